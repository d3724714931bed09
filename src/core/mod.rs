mod args;
mod error;
mod logger;

pub use args::CliArgs;
pub use error::{
    EXIT_COLUMN_NOT_FOUND, EXIT_FAILURE, EXIT_NOT_BINARY_TABLE, EXIT_TYPE_MISMATCH, PalistError,
};
pub use logger::setup_logging;
