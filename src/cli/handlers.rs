use std::{
    fs::File,
    io::{self, IsTerminal, Read},
    path::PathBuf,
};

use crate::{
    core::{config::ChartConfig, error::ChartError, ring::CapacityPolicy},
    render::AnsiTerminal,
    session::Session,
};

use super::{events::TerminalEvents, parse::Cli, tty_raw::RawModeGuard};

/// Open the named file, or stdin.
fn open_input(path: Option<&str>) -> Result<Box<dyn Read + Send>, ChartError> {
    match path {
        None => Ok(Box::new(io::stdin())),
        Some(p) => File::open(p)
            .map(|f| Box::new(f) as Box<dyn Read + Send>)
            .map_err(|source| ChartError::Open {
                path: PathBuf::from(p),
                source,
            }),
    }
}

/// Build the session configuration from the command line.
///
/// # Errors
/// Invalid range or capacity.
pub fn config_from(a: &Cli) -> Result<ChartConfig, ChartError> {
    let path = a.input_path();
    let capacity = a
        .capacity
        .map_or(CapacityPolicy::Growable, CapacityPolicy::Fixed);
    Ok(ChartConfig::builder()
        .title_opt(a.title.as_deref().or(path))
        .y_range_opt(a.range)
        .style(a.style)
        .capacity(capacity)
        // a finished file leaves the chart up until a key press
        .hold_on_eof(path.is_some())
        .build()?)
}

/// Open the input, take over the terminal and run the chart to completion.
/// Guards drop in reverse order: the screen is restored before the tty mode.
///
/// # Errors
/// Unreadable input file, no usable terminal, or a failure while running.
pub fn chart(a: &Cli) -> Result<(), ChartError> {
    let config = config_from(a)?;
    // file errors are reported before the terminal is touched
    let input = open_input(a.input_path())?;

    let _raw = if config.hold_on_eof && io::stdin().is_terminal() {
        Some(RawModeGuard::enter()?)
    } else {
        None
    };
    let screen = AnsiTerminal::new()?;
    let mut events = TerminalEvents::spawn(input)?;
    let mut session = Session::new(config, screen)?;
    session.run(&mut events)?;

    let stats = session.stats();
    tracing::info!(
        readings = stats.readings,
        dropped = stats.dropped,
        frames = stats.frames,
        points = session.buffer().len(),
        "chart finished"
    );
    Ok(())
}
