use colored::*;

pub fn success(msg: &str) {
    tracing::info!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    tracing::info!("{}", msg);
}

pub fn heading(msg: &str) {
    tracing::info!("{}", msg.underline().green());
}

pub fn warning(msg: &str) {
    tracing::info!("{}", msg.yellow());
}

pub fn tip(msg: &str) {
    tracing::info!("{} {}", "Tip:".dimmed(), msg.dimmed());
}
