//! Push-or-fold decisions for incoming readings.
//!
//! A reading that arrives while a point is *open* folds into it; otherwise it
//! opens a new point.  A point stays open until one coalescing window passes
//! with no further reading; every fold pushes the deadline back.

use std::time::{Duration, Instant};

use crate::core::{constants::COALESCE_WINDOW, ring::SampleBuffer};

/// What happened to a reading.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    /// Started a new point.
    Push,
    /// Folded into the open point.
    Fold,
}

/// How the control loop should wait for the next event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Wait {
    /// Nothing pending: block until input, resize or end of input.
    Block,
    /// A point is open: wake up at the deadline to close it and redraw.
    Until(Instant),
}

/// Coalescing state machine.
#[derive(Clone, Debug)]
pub struct Aggregator {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(COALESCE_WINDOW)
    }
}

impl Aggregator {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Whether a point is currently accepting folds.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.deadline.is_some()
    }

    /// Route `value` into `buffer` and report the decision.
    ///
    /// A reading that arrives after the open point's deadline (because the
    /// loop was busy) starts a new point.
    pub fn ingest(&mut self, buffer: &mut SampleBuffer, value: f64, now: Instant) -> Decision {
        let decision = match self.deadline {
            Some(deadline) if now < deadline && !buffer.is_empty() => {
                buffer.update_last(value);
                self.deadline = Some(now + self.window);
                Decision::Fold
            }
            _ => {
                buffer.push(value);
                self.deadline = Some(now + self.window);
                Decision::Push
            }
        };
        tracing::trace!(value, ?decision, "reading aggregated");
        decision
    }

    /// Close the open point; the next reading starts a new one.
    /// Returns `true` if a point was open.
    pub fn close(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// The wait mode the loop should use right now.
    #[must_use]
    pub const fn wait(&self) -> Wait {
        match self.deadline {
            None => Wait::Block,
            Some(deadline) => Wait::Until(deadline),
        }
    }

    /// `true` once the open point's window has elapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{point::Point, ring::CapacityPolicy};

    fn buffer() -> SampleBuffer {
        SampleBuffer::new(CapacityPolicy::Fixed(8)).unwrap()
    }

    #[test]
    fn first_reading_pushes_and_opens() {
        let mut buf = buffer();
        let mut agg = Aggregator::default();
        let t0 = Instant::now();
        assert_eq!(agg.wait(), Wait::Block);
        assert_eq!(agg.ingest(&mut buf, 1.0, t0), Decision::Push);
        assert_eq!(agg.wait(), Wait::Until(t0 + COALESCE_WINDOW));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn readings_inside_window_fold() {
        let mut buf = buffer();
        let mut agg = Aggregator::new(Duration::from_millis(20));
        let t0 = Instant::now();
        agg.ingest(&mut buf, 5.0, t0);
        assert_eq!(
            agg.ingest(&mut buf, 7.0, t0 + Duration::from_millis(5)),
            Decision::Fold
        );
        assert_eq!(buf.len(), 1);
        assert_eq!(
            buf.last(),
            Some(&Point {
                open: 5.0,
                high: 7.0,
                low: 5.0,
                close: 7.0
            })
        );
    }

    #[test]
    fn steady_stream_inside_window_stays_one_point() {
        let mut buf = buffer();
        let mut agg = Aggregator::new(Duration::from_millis(20));
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        assert_eq!(agg.ingest(&mut buf, 1.0, t0), Decision::Push);
        assert_eq!(agg.ingest(&mut buf, 2.0, t0 + ms(15)), Decision::Fold);
        assert_eq!(agg.ingest(&mut buf, 3.0, t0 + ms(30)), Decision::Fold);
        assert_eq!(buf.len(), 1);
        assert_eq!(agg.wait(), Wait::Until(t0 + ms(50)));
        assert!(!agg.is_expired(t0 + ms(45)));
        assert!(agg.is_expired(t0 + ms(50)));
    }

    #[test]
    fn idle_gap_starts_new_point() {
        let mut buf = buffer();
        let mut agg = Aggregator::new(Duration::from_millis(20));
        let t0 = Instant::now();
        agg.ingest(&mut buf, 1.0, t0);
        agg.ingest(&mut buf, 2.0, t0 + Duration::from_millis(15));
        // 20ms after the last reading
        assert_eq!(
            agg.ingest(&mut buf, 3.0, t0 + Duration::from_millis(35)),
            Decision::Push
        );
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn close_forces_next_push() {
        let mut buf = buffer();
        let mut agg = Aggregator::default();
        let t0 = Instant::now();
        agg.ingest(&mut buf, 1.0, t0);
        assert!(agg.close());
        assert!(!agg.close());
        assert_eq!(agg.wait(), Wait::Block);
        assert_eq!(agg.ingest(&mut buf, 2.0, t0), Decision::Push);
        assert_eq!(buf.len(), 2);
    }
}
