use std::path::PathBuf;

use clap::Parser;
use log::kv::{ToValue, Value};

/// Print the included PA/MJD rows of the binary table in each FITS file.
#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    /// Optional TOML config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// FITS files, processed in order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl ToValue for CliArgs {
    fn to_value(&self) -> Value<'_> {
        Value::from_debug(self)
    }
}
