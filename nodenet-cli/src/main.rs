//! Entry point for the `nodenet` binary.
//!
//! Initialises logging, runs the parsed command, prints the summary to stdout
//! and maps failures to a non-zero exit status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, field};

use nodenet_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    let Err(err) = try_main() else {
        return ExitCode::SUCCESS;
    };

    let (code, sampling_code) = match err.downcast_ref::<CliError>() {
        Some(CliError::Core(core)) => (Some(core.code().as_str()), core.sampling_code()),
        _ => (None, None),
    };
    error!(
        error = %format!("{err:#}"),
        code = code.map(field::display),
        sampling_code = sampling_code.map(|inner| field::display(inner.as_str())),
        "command execution failed"
    );
    ExitCode::FAILURE
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not available until logging has initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
