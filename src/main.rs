//! hostenv CLI entry point.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use hostenv::cli::{Cli, CommandDispatcher};
use hostenv::settings::LoadOptions;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("hostenv=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hostenv=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("hostenv starting with args: {:?}", cli);

    let options = match LoadOptions::load_or_default(cli.settings.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let dispatcher = CommandDispatcher::new(options);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = dispatcher.dispatch(&cli, &mut out);
    let _ = out.flush();

    match result {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
