//! Fit the buffered series into a viewport.
//!
//! The margin on the right holds the max, min and current-value labels.  Its
//! width depends on which points are visible, and which points are visible
//! depends on the margin, so [`solve`] iterates to a fixed point:
//!
//! 1. assume a margin wider than any label can be;
//! 2. take the newest `cols - margin - BORDER_WIDTH` points and their range;
//! 3. measure the labels that range needs (`need`);
//! 4. `need == margin` → done; `need < margin` → shrink and repeat;
//!    `need > margin` → keep the previous window, whose labels need exactly
//!    `margin` columns.
//!
//! The assumed margin strictly decreases, so the loop terminates; in practice
//! after one or two rounds.

use std::ops::Range;

use crate::core::{
    constants::{BORDER_HEIGHT, BORDER_WIDTH, MAX_LABEL_WIDTH},
    label::margin_width,
    ring::SampleBuffer,
};

/// Terminal size in character cells.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    #[inline]
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

/// Caller-supplied y axis (`low < high`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YRange {
    pub low: f64,
    pub high: f64,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    /// Logical buffer indices on screen, oldest first.
    pub visible: Range<usize>,
    pub data_min: f64,
    pub data_max: f64,
    /// Close of the newest visible point.
    pub last: f64,
    /// Columns right of the chart border reserved for labels.
    pub margin: usize,
    pub viewport: Viewport,
}

impl Layout {
    fn empty(viewport: Viewport) -> Self {
        Self {
            visible: 0..0,
            data_min: 0.0,
            data_max: 0.0,
            last: 0.0,
            margin: 0,
            viewport,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn drange(&self) -> f64 {
        self.data_max - self.data_min
    }

    /// Columns inside the chart border.
    #[inline]
    #[must_use]
    pub fn chart_cols(&self) -> usize {
        self.viewport
            .cols
            .saturating_sub(self.margin + BORDER_WIDTH)
    }

    /// Rows inside the chart border.
    #[inline]
    #[must_use]
    pub fn chart_rows(&self) -> usize {
        self.viewport.rows.saturating_sub(BORDER_HEIGHT)
    }

    /// Chart-relative row (0 = top) of `value`.
    ///
    /// Linear, top row is `data_max`, values outside the range clamp to the
    /// edges.  A flat range maps everything to the centre row.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn row_of(&self, value: f64) -> usize {
        let rows = self.chart_rows();
        if rows == 0 {
            return 0;
        }
        let span = (rows - 1) as f64;
        // halved so spans wider than f64::MAX stay finite
        let half_range = self.data_max * 0.5 - self.data_min * 0.5;
        let frac = if half_range > 0.0 {
            ((value * 0.5 - self.data_min * 0.5) / half_range).clamp(0.0, 1.0)
        } else {
            0.5
        };
        (span - frac * span).round() as usize
    }
}

/// One round of the fixed-point search.
struct Round {
    visible: Range<usize>,
    data_min: f64,
    data_max: f64,
    last: f64,
    need: usize,
}

fn measure(buffer: &SampleBuffer, chart_cols: usize, fixed: Option<YRange>) -> Option<Round> {
    let window = buffer.recent(chart_cols);
    let visible = window.range();
    let last = window.clone().next_back()?.close;
    let (data_min, data_max) = match fixed {
        Some(r) => (r.low, r.high),
        None => window.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.low), hi.max(p.high))
        }),
    };
    Some(Round {
        visible,
        data_min,
        data_max,
        last,
        need: margin_width(data_min, data_max, last),
    })
}

/// Solve the layout for `buffer` in `viewport`.
#[must_use]
pub fn solve(buffer: &SampleBuffer, viewport: Viewport, fixed: Option<YRange>) -> Layout {
    // wider than any label, but leave at least one chart column
    let Some(widest) = viewport.cols.checked_sub(BORDER_WIDTH + 1) else {
        return Layout::empty(viewport);
    };
    let mut margin = widest.min(MAX_LABEL_WIDTH + 1);
    let mut accepted: Option<Round> = None;
    let mut iterations = 0usize;

    let round = loop {
        iterations += 1;
        let chart_cols = viewport.cols - BORDER_WIDTH - margin;
        let Some(round) = measure(buffer, chart_cols, fixed) else {
            return Layout::empty(viewport);
        };
        tracing::trace!(iterations, margin, need = round.need, "layout round");

        if round.need == margin {
            break round;
        }
        if round.need > margin {
            // labels for the wider window don't fit; the previous window's
            // labels need exactly `margin`
            break accepted.unwrap_or(round);
        }
        margin = round.need;
        accepted = Some(round);
    };

    Layout {
        visible: round.visible,
        data_min: round.data_min,
        data_max: round.data_max,
        last: round.last,
        margin,
        viewport,
    }
}
