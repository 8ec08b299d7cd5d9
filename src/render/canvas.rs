//! In-memory character grid; the back buffer of every frame.

use std::io;

use crate::{
    core::layout::Viewport,
    render::surface::{Screen, Style, Surface},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Self = Self {
        ch: ' ',
        style: Style::PLAIN,
    };
}

/// Row-major grid of [`Cell`]s.
#[derive(Clone, Debug)]
pub struct Canvas {
    viewport: Viewport,
    cells: Vec<Cell>,
}

impl Canvas {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cells: vec![Cell::BLANK; viewport.rows * viewport.cols],
        }
    }

    /// Adopt a new size; contents are cleared.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cells.clear();
        self.cells
            .resize(viewport.rows * viewport.cols, Cell::BLANK);
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.viewport.rows && col < self.viewport.cols)
            .then(|| self.cells[row * self.viewport.cols + col])
    }

    /// One row's cells.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        let cols = self.viewport.cols;
        if row >= self.viewport.rows {
            return &[];
        }
        &self.cells[row * cols..(row + 1) * cols]
    }

    /// One row as plain text (styles dropped).
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        self.row(row).iter().map(|c| c.ch).collect()
    }

    /// Every `(row, col)` holding `ch`, top to bottom, left to right.
    #[must_use]
    pub fn find(&self, ch: char) -> Vec<(usize, usize)> {
        let cols = self.viewport.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.ch == ch)
            .map(|(i, _)| (i / cols, i % cols))
            .collect()
    }
}

impl Surface for Canvas {
    #[inline]
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    #[inline]
    fn put_char(&mut self, row: usize, col: usize, ch: char, style: Style) {
        if row < self.viewport.rows && col < self.viewport.cols {
            self.cells[row * self.viewport.cols + col] = Cell { ch, style };
        }
    }
}

/// A bare canvas is its own screen: the size only changes through
/// [`Canvas::resize`] and presenting is a no-op.
impl Screen for Canvas {
    fn refresh_size(&mut self) -> Viewport {
        self.viewport
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}
