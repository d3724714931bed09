mod config;
mod report;

pub use config::Config;
pub use report::ReportConfig;
