use convtrack_core::logging;
use std::path::Path;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the log file is unusable.
    let logged = match std::env::var_os("CONVTRACK_LOG_FILE") {
        Some(path) => logging::init_logging_at(Path::new(&path)),
        None => logging::init_logging(),
    };
    if logged.is_err() {
        logging::init_logging_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("convtrack error: {:#}", err);
        std::process::exit(1);
    }
}
