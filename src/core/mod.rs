//! Aggregates the “business logic” layer.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod label;
pub mod layout;
pub mod point;
pub mod ring;

// re-export frequently-used items for convenience
pub use aggregate::{Aggregator, Decision, Wait};
pub use config::{ChartConfig, ChartConfigBuilder};
pub use constants::{BORDER_HEIGHT, BORDER_WIDTH, COALESCE_WINDOW};
pub use error::{ChartError, ConfigError, ReadingError};
pub use layout::{Layout, Viewport, YRange, solve};
pub use point::Point;
pub use ring::{CapacityPolicy, RingIndex, SampleBuffer, Window};
