//! envtpl CLI entrypoint
//! Renders the template named on the command line and prints the result.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use envtpl::{Environment, Error, run};
use std::io::{self, Write};
use std::process::ExitCode;

// External imports (alphabetized)
use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Diagnostics go to stderr so they never mix with rendered output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(std::env::args_os(), Environment::from_process()) {
        Ok(output) => match write_output(&output) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e:#}");
                ExitCode::FAILURE
            }
        },
        Err(Error::Usage(e)) => e.exit(),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn write_output(output: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").context("Failed to write rendered template")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
