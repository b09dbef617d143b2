pub mod download;
pub mod downloaded;
pub mod fetch;
pub mod list;
