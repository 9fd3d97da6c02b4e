//! `crm` entry-point: parse arguments, initialise tracing, run one command.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use crm_console::bootstrap;
use crm_console::inbound::cli::{Cli, Notice, write_notice};
use crm_console::telemetry;
use tracing::{debug, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = telemetry::init(cli.globals.log_format()) {
        warn!(error = %e, "tracing init failed");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = bootstrap::run(cli, &mut out);
    let code = match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if let Err(write_err) = write_notice(&mut out, &Notice::error(err.to_string())) {
                warn!(error = %write_err, "failed to report command failure");
            }
            ExitCode::FAILURE
        }
    };
    if let Err(e) = out.flush() {
        warn!(error = %e, "failed to flush output");
    }
    code
}
