//! Centralised error types used across the crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Precise configuration faults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("range minimum {low} must be < maximum {high}")]
    InvalidRange { low: f64, high: f64 },
    #[error("range must look like <min>,<max>, got `{0}`")]
    MalformedRange(String),
    #[error("fixed capacity must be at least 1")]
    ZeroCapacity,
    #[error("fixed capacity {0} is too large")]
    CapacityTooLarge(usize),
}

/// Why an input line did not become a reading. Never fatal.
#[derive(Debug, Error, PartialEq)]
pub enum ReadingError {
    #[error("empty line")]
    Empty,
    #[error("not a number: `{0}`")]
    NotANumber(String),
    #[error("non-finite value: `{0}`")]
    NonFinite(String),
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot initialise terminal: {0}")]
    Terminal(String),
    #[error("cannot allocate room for {capacity} points")]
    Alloc { capacity: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
