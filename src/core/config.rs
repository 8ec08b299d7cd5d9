//! Run-time configuration object + fluent builder.

use std::time::Duration;

use crate::{
    core::{
        constants::COALESCE_WINDOW, error::ConfigError, layout::YRange, ring::CapacityPolicy,
    },
    render::PointStyle,
};

/// Immutable parameters handed to the session.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: Option<String>,
    pub y_range: Option<YRange>,
    pub style: PointStyle,
    pub capacity: CapacityPolicy,
    pub coalesce: Duration,
    /// Keep the final chart up until a key is pressed once input ends.
    pub hold_on_eof: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: None,
            y_range: None,
            style: PointStyle::default(),
            capacity: CapacityPolicy::Growable,
            coalesce: COALESCE_WINDOW,
            hold_on_eof: false,
        }
    }
}

impl ChartConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> ChartConfigBuilder {
        ChartConfigBuilder::default()
    }
}

/// Fluent builder; validation happens in `build`.
#[derive(Debug, Default)]
pub struct ChartConfigBuilder {
    title: Option<String>,
    y_min: Option<f64>,
    y_max: Option<f64>,
    style: Option<PointStyle>,
    capacity: Option<CapacityPolicy>,
    coalesce: Option<Duration>,
    hold_on_eof: bool,
}

impl ChartConfigBuilder {
    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn title_opt(mut self, t: Option<&str>) -> Self {
        if let Some(t) = t {
            self.title = Some(t.to_owned());
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn y_range(mut self, r: std::ops::RangeInclusive<f64>) -> Self {
        self.y_min = Some(*r.start());
        self.y_max = Some(*r.end());
        self
    }
    #[inline]
    #[must_use]
    pub fn y_range_opt(self, r: Option<YRange>) -> Self {
        match r {
            Some(r) => self.y_range(r.low..=r.high),
            None => self,
        }
    }
    #[inline]
    #[must_use]
    pub fn style(mut self, s: PointStyle) -> Self {
        self.style = Some(s);
        self
    }
    #[inline]
    #[must_use]
    pub fn capacity(mut self, c: CapacityPolicy) -> Self {
        self.capacity = Some(c);
        self
    }
    #[inline]
    #[must_use]
    pub fn coalesce(mut self, window: Duration) -> Self {
        self.coalesce = Some(window);
        self
    }
    #[inline]
    #[must_use]
    pub fn hold_on_eof(mut self, hold: bool) -> Self {
        self.hold_on_eof = hold;
        self
    }

    /// # Errors
    /// An inverted or non-finite y range, or a fixed capacity that is zero
    /// or has no power of two above it.
    pub fn build(self) -> Result<ChartConfig, ConfigError> {
        let y_range = match (self.y_min, self.y_max) {
            (Some(low), Some(high)) => {
                if !(low.is_finite() && high.is_finite() && low < high) {
                    return Err(ConfigError::InvalidRange { low, high });
                }
                Some(YRange { low, high })
            }
            _ => None,
        };
        match self.capacity {
            Some(CapacityPolicy::Fixed(0)) => return Err(ConfigError::ZeroCapacity),
            Some(CapacityPolicy::Fixed(n)) if n.checked_next_power_of_two().is_none() => {
                return Err(ConfigError::CapacityTooLarge(n));
            }
            _ => {}
        }
        Ok(ChartConfig {
            title: self.title,
            y_range,
            style: self.style.unwrap_or_default(),
            capacity: self.capacity.unwrap_or_default(),
            coalesce: self.coalesce.unwrap_or(COALESCE_WINDOW),
            hold_on_eof: self.hold_on_eof,
        })
    }
}

/// Ergonomic `?` on a builder chain.
impl From<ChartConfigBuilder> for Result<ChartConfig, ConfigError> {
    fn from(b: ChartConfigBuilder) -> Self {
        b.build()
    }
}
