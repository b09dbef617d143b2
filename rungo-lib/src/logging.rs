use std::fmt::Write as _;

use tracing::field::{Field, Visit};
use tracing::span::Record;
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::style::ProgressStyle;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::field::RecordFields;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Byte progress bar used while an archive is streamed to disk.
pub fn progress_bar_style() -> ProgressStyle {
    ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
        .tick_strings(TICK_STRINGS)
}

/// Spinner with a custom trailing template, e.g. `"{msg}"`.
pub fn spinner_style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(&format!("{{spinner:.green}} [{{elapsed_precise}}] {template}"))
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS)
}

/// Installs the global subscriber: plain messages on stdout, progress bars
/// drawn by indicatif. `RUST_LOG` overrides the default filter.
pub fn initialize_logging(verbose: bool) {
    let default_filter = if verbose {
        "rungo=debug,rungo_lib=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let progress_bar_layer = IndicatifLayer::new();
    let fmt_layer = fmt::layer()
        .with_writer(progress_bar_layer.get_stdout_writer())
        .event_format(MessageFormat)
        .fmt_fields(MessageFields);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(progress_bar_layer)
        .init();
}

/// Writes the event message first, followed by any structured fields as
/// `key=value`.
pub struct MessageFields;

impl<'writer> FormatFields<'writer> for MessageFields {
    fn format_fields<R: RecordFields>(
        &self,
        mut writer: Writer<'writer>,
        fields: R,
    ) -> std::fmt::Result {
        #[derive(Default)]
        struct Collector {
            message: String,
            extra: String,
        }

        impl Visit for Collector {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    let _ = write!(self.message, "{value:?}");
                } else {
                    let _ = write!(self.extra, " {}={value:?}", field.name());
                }
            }
        }

        let mut collector = Collector::default();
        fields.record(&mut collector);
        write!(writer, "{}{}", collector.message, collector.extra)
    }

    fn add_fields(
        &self,
        _current: &'writer mut FormattedFields<Self>,
        _fields: &Record<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

/// Event format without timestamps or span context. Only warnings and errors
/// carry a level prefix.
#[derive(Clone, Debug, Default)]
pub struct MessageFormat;

impl<S, N> FormatEvent<S, N> for MessageFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        match *event.metadata().level() {
            Level::ERROR => write!(writer, "error: ")?,
            Level::WARN => write!(writer, "warning: ")?,
            _ => {}
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
