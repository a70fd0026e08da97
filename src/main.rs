//! CLI entry point for genetic image blending

use clap::Parser;
use genblend::io::cli::{BlendRunner, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let runner = BlendRunner::new(cli);
    match runner.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            if let Some(cause) = std::error::Error::source(&error) {
                tracing::debug!(%cause, "underlying error");
            }
            // Fatal errors are reported as a single line on stderr
            #[allow(clippy::print_stderr)]
            {
                eprintln!("{error}");
            }
            ExitCode::from(error.exit_code())
        }
    }
}
