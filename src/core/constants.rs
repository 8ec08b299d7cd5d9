//! A collection of constants.

use std::time::Duration;

/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;
/// The top and bottom border rows
pub const BORDER_HEIGHT: usize = 2;

/// Column of the top border where the title starts.
pub const TITLE_COLUMN: usize = 4;

/// Readings closer together than this fold into one point.
///
/// 20ms keeps redraws around 50 per second no matter how fast the input is.
pub const COALESCE_WINDOW: Duration = Duration::from_millis(20);

/// Significant digits of the `%g`-style axis labels.
pub const LABEL_PRECISION: usize = 6;

/// Appended to the title once a file input has been fully read.
pub const CLOSED_SUFFIX: &str = " (closed)";

/// Widest possible `%g` label, e.g. `-1.23457e-100`.
pub const MAX_LABEL_WIDTH: usize = 13;
