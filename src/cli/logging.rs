//! Diagnostics go to a file: the terminal itself is busy showing the chart.

use std::{fs::File, sync::Mutex};

use tracing_subscriber::EnvFilter;

/// Path of the log file; logging is off when unset.
pub const LOG_PATH_ENV: &str = "CHART_LOG";

/// Install a `fmt` subscriber writing to `$CHART_LOG`, filtered by
/// `RUST_LOG` (default `info`). Failures are reported on stderr and ignored.
pub fn init() {
    let Some(path) = std::env::var_os(LOG_PATH_ENV) else {
        return;
    };
    let file = match File::create(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("chart: {}: {e}", path.to_string_lossy());
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init();
}
