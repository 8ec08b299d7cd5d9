mod events;
mod handlers;
pub mod logging;
pub mod parse;
mod tty_raw;

use std::process::ExitCode;

use clap::Parser;
pub use events::TerminalEvents;
pub use handlers::config_from;
pub use parse::Cli;

/// Parse arguments, run the chart, map the outcome to an exit status:
/// 0 for success or help, 1 for usage, file or terminal errors.
#[must_use]
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::init();

    match handlers::chart(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "chart failed");
            eprintln!("chart: {e}");
            ExitCode::FAILURE
        }
    }
}
