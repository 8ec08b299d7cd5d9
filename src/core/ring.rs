//! Power-of-two ring of OHLC points.
//!
//! Points are addressed by *logical* index: `0` is the oldest retained point,
//! `len - 1` the newest.  [`RingIndex::slot`] is the only place that turns a
//! logical index into a physical slot, so wraparound lives in one function.
//!
//! ```text
//! capacity 8, len 5, head 1
//!
//! physical  0   1   2   3   4   5   6   7
//!          [d] [e] [ ] [ ] [a] [b] [c]  ...
//! logical   3   4           0   1   2
//! ```

use std::ops::Range;

use crate::core::{
    error::{ChartError, ConfigError},
    point::Point,
};

/// How the buffer decides its size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CapacityPolicy {
    /// Starts empty; grows to the next power of two that covers the viewport.
    Growable,
    /// Allocated once (rounded up to a power of two) and never resized.
    Fixed(usize),
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self::Growable
    }
}

/// Head/length bookkeeping for a power-of-two ring.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RingIndex {
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingIndex {
    /// Index for a ring of `capacity` slots holding `len` points written
    /// contiguously from slot 0.
    ///
    /// # Panics
    /// If `capacity` is not zero or a power of two, or `len > capacity`.
    #[must_use]
    pub fn rebased(len: usize, capacity: usize) -> Self {
        assert!(
            capacity == 0 || capacity.is_power_of_two(),
            "ring capacity {capacity} is not a power of two"
        );
        assert!(len <= capacity, "ring length {len} exceeds capacity {capacity}");
        let head = if capacity == 0 {
            0
        } else {
            (len + capacity - 1) & (capacity - 1)
        };
        Self {
            head,
            len,
            capacity,
        }
    }

    #[inline]
    #[must_use]
    pub const fn head(&self) -> usize {
        self.head
    }
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Physical slot of logical position `logical` (0 = oldest).
    #[inline]
    #[must_use]
    pub fn slot(&self, logical: usize) -> usize {
        debug_assert!(logical < self.len, "logical index {logical} out of {}", self.len);
        (self.head + self.capacity + 1 - self.len + logical) & (self.capacity - 1)
    }

    /// Step `head` forward, growing `len` until the ring is full.
    #[inline]
    fn advance(&mut self) {
        self.head = (self.head + 1) & (self.capacity - 1);
        if self.len < self.capacity {
            self.len += 1;
        }
    }
}

/// Bounded history of chart points.
#[derive(Debug)]
pub struct SampleBuffer {
    slots: Vec<Point>,
    index: RingIndex,
    policy: CapacityPolicy,
}

fn allocate(capacity: usize) -> Result<Vec<Point>, ChartError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| ChartError::Alloc { capacity })?;
    Ok(slots)
}

impl SampleBuffer {
    /// An empty buffer. A growable buffer has no storage until the first
    /// [`ensure_capacity`](Self::ensure_capacity).
    ///
    /// # Errors
    /// `Fixed(0)` and capacities with no power of two above them are
    /// rejected; allocation failure is reported as [`ChartError::Alloc`].
    pub fn new(policy: CapacityPolicy) -> Result<Self, ChartError> {
        let capacity = match policy {
            CapacityPolicy::Growable => 0,
            CapacityPolicy::Fixed(0) => return Err(ConfigError::ZeroCapacity.into()),
            CapacityPolicy::Fixed(n) => n
                .checked_next_power_of_two()
                .ok_or(ConfigError::CapacityTooLarge(n))?,
        };
        let mut slots = allocate(capacity)?;
        slots.resize(capacity, Point::new(0.0));
        Ok(Self {
            slots,
            index: RingIndex::rebased(0, capacity),
            policy,
        })
    }

    /// Grow so at least `min_width` points fit. Returns `true` if storage was
    /// reallocated. Retained points keep their logical order; nothing shrinks.
    ///
    /// # Errors
    /// [`ChartError::Alloc`] when the new storage cannot be reserved.
    pub fn ensure_capacity(&mut self, min_width: usize) -> Result<bool, ChartError> {
        if let CapacityPolicy::Fixed(_) = self.policy {
            return Ok(false);
        }
        let target = min_width.max(1).next_power_of_two();
        if target <= self.capacity() {
            return Ok(false);
        }

        let mut slots = allocate(target)?;
        slots.extend(self.iter().copied());
        slots.resize(target, Point::new(0.0));

        tracing::debug!(
            from = self.capacity(),
            to = target,
            len = self.len(),
            "grew sample buffer"
        );
        self.index = RingIndex::rebased(self.len(), target);
        self.slots = slots;
        Ok(true)
    }

    /// Start a new point. Overwrites the oldest point when full.
    ///
    /// # Panics
    /// If no capacity has been established yet.
    pub fn push(&mut self, value: f64) {
        assert!(
            self.capacity() > 0,
            "push on a sample buffer without capacity"
        );
        self.index.advance();
        self.slots[self.index.head()] = Point::new(value);
    }

    /// Fold `value` into the newest point.
    ///
    /// # Panics
    /// If the buffer holds no point.
    pub fn update_last(&mut self, value: f64) {
        assert!(!self.is_empty(), "update_last on an empty sample buffer");
        self.slots[self.index.head()].fold(value);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }
    #[inline]
    #[must_use]
    pub fn policy(&self) -> CapacityPolicy {
        self.policy
    }
    #[inline]
    #[must_use]
    pub fn ring_index(&self) -> RingIndex {
        self.index
    }

    /// Point at logical position `logical` (0 = oldest).
    #[must_use]
    pub fn get(&self, logical: usize) -> Option<&Point> {
        (logical < self.len()).then(|| &self.slots[self.index.slot(logical)])
    }

    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        (!self.is_empty()).then(|| &self.slots[self.index.head()])
    }

    /// Every retained point, oldest first.
    #[must_use]
    pub fn iter(&self) -> Window<'_> {
        self.window(0..self.len())
    }

    /// Points in the logical range, clamped to what is retained.
    #[must_use]
    pub fn window(&self, range: Range<usize>) -> Window<'_> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        Window {
            slots: &self.slots,
            index: self.index,
            range: start..end,
        }
    }

    /// The newest `n` points (fewer if the buffer is shorter).
    #[must_use]
    pub fn recent(&self, n: usize) -> Window<'_> {
        let len = self.len();
        self.window(len - n.min(len)..len)
    }
}

impl<'a> IntoIterator for &'a SampleBuffer {
    type Item = &'a Point;
    type IntoIter = Window<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy, restartable walk over a logical range of a [`SampleBuffer`].
#[derive(Clone, Debug)]
pub struct Window<'a> {
    slots: &'a [Point],
    index: RingIndex,
    range: Range<usize>,
}

impl Window<'_> {
    /// Logical indices still to be yielded.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
}

impl<'a> Iterator for Window<'a> {
    type Item = &'a Point;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let logical = self.range.next()?;
        Some(&self.slots[self.index.slot(logical)])
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Window<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let logical = self.range.next_back()?;
        Some(&self.slots[self.index.slot(logical)])
    }
}

impl ExactSizeIterator for Window<'_> {}
