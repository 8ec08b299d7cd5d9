//! Per-point glyph strategies, keyed by [`PointStyle`].

use std::fmt;

use crate::render::surface::{Style, Surface};

/// How a single point is drawn.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum PointStyle {
    /// A bold bullet at the close.
    #[default]
    Dot,
    /// A plus sign at the close.
    Plus,
    /// A bar from high to low with open/close ticks.
    Ohlc,
}

impl PointStyle {
    /// The drawing strategy for this style.
    #[must_use]
    pub fn marker(self) -> &'static dyn Marker {
        match self {
            Self::Dot => &Dot,
            Self::Plus => &Plus,
            Self::Ohlc => &Candle,
        }
    }
}

impl fmt::Display for PointStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dot => "dot",
            Self::Plus => "plus",
            Self::Ohlc => "ohlc",
        })
    }
}

/// Screen rows of a point's four values (smaller row = larger value).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PointRows {
    pub open: usize,
    pub high: usize,
    pub low: usize,
    pub close: usize,
}

pub trait Marker: Sync {
    fn draw(&self, surface: &mut dyn Surface, col: usize, rows: PointRows);
}

struct Dot;
struct Plus;
struct Candle;

impl Marker for Dot {
    fn draw(&self, surface: &mut dyn Surface, col: usize, rows: PointRows) {
        surface.put_char(rows.close, col, '•', Style::BOLD);
    }
}

impl Marker for Plus {
    fn draw(&self, surface: &mut dyn Surface, col: usize, rows: PointRows) {
        surface.put_char(rows.close, col, '+', Style::BOLD);
    }
}

impl Marker for Candle {
    fn draw(&self, surface: &mut dyn Surface, col: usize, rows: PointRows) {
        for row in rows.high..=rows.low {
            surface.put_char(row, col, '│', Style::PLAIN);
        }
        if rows.open == rows.close {
            surface.put_char(rows.close, col, '┼', Style::BOLD);
        } else {
            surface.put_char(rows.open, col, '┤', Style::PLAIN);
            surface.put_char(rows.close, col, '├', Style::BOLD);
        }
    }
}
