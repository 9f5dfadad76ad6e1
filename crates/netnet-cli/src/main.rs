mod cli;
mod error;
mod logging;
mod screen;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse_from(cli::normalize_legacy_flags(std::env::args_os()));
    logging::init(&cli.log_level, cli.log_format);

    let report = screen::run(&cli).await?;
    println!("Stocks information saved to {}", report.output.display());

    Ok(ExitCode::SUCCESS)
}
