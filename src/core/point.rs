//! One plotted position: the open/high/low/close of a coalescing window.

/// OHLC aggregate of the raw readings folded into one chart column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Point {
    /// A fresh point where all four fields equal the opening reading.
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            open: value,
            high: value,
            low: value,
            close: value,
        }
    }

    /// Fold a later reading into this point. `open` never changes.
    #[inline]
    pub fn fold(&mut self, value: f64) {
        self.high = self.high.max(value);
        self.low = self.low.min(value);
        self.close = value;
    }

    /// `low <= open, close <= high`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }
}
