use std::io::{self, BufWriter, Write};

use clap::Parser;
use log::{debug, error};

use palist::conf::Config;
use palist::core::{CliArgs, PalistError, setup_logging};
use palist::table::TableReport;

fn main() {
    setup_logging();
    let args = CliArgs::parse();
    debug!(args = args; "palist started");

    if let Err(err) = run(&args) {
        error!("palist failed with exit code {}", err.exit_code());
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

/// Process every file in order; the first error stops the run.
fn run(args: &CliArgs) -> Result<(), PalistError> {
    let config = Config::load(args.config.as_deref())?;
    let report = TableReport::new(config.report);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for file in &args.files {
        let result = report.run(file, &mut out);
        out.flush()?;
        result?;
    }
    Ok(())
}
