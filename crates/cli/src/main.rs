//! confstore - load a configuration document and print it.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Resolve the location through the `confstore` selector, decode, and print.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Source or decoder implementations (see `crates/core` and `crates/http`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Logs go to stderr; stdout carries only the loaded value.

mod args;
mod cancellation;
mod dispatch;
mod dotenv;
mod error;
mod formatters;

use args::Cli;
use cancellation::{cancel_on_ctrl_c, print_cancelled_message};
use clap::Parser;
use confstore::OperationContext;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = dotenv::load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let ctx = match cli.deadline() {
        Some(timeout) => OperationContext::with_timeout(timeout),
        None => OperationContext::background(),
    };
    cancel_on_ctrl_c(&ctx);

    let exit_code = match run_command(&cli, &ctx).await {
        Ok(()) => ExitCode::Success,
        Err(e) => match e.exit_code() {
            ExitCode::Interrupted => {
                print_cancelled_message();
                ExitCode::Interrupted
            }
            code => {
                eprintln!("{:#}", e);
                code
            }
        },
    };

    std::process::exit(exit_code.as_i32());
}
