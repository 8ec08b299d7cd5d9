//! The terminal capability the renderer draws through.

use std::io;

use crate::core::layout::Viewport;

/// Character attributes. Colour is left to the terminal's defaults.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Style {
    pub bold: bool,
    pub reverse: bool,
}

impl Style {
    pub const PLAIN: Self = Self {
        bold: false,
        reverse: false,
    };
    pub const BOLD: Self = Self {
        bold: true,
        reverse: false,
    };
    /// Bold reverse video, used for the title.
    pub const BANNER: Self = Self {
        bold: true,
        reverse: true,
    };

    /// Append the SGR sequence selecting exactly this style.
    pub fn write_sgr(self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"\x1b[0");
        if self.bold {
            out.extend_from_slice(b";1");
        }
        if self.reverse {
            out.extend_from_slice(b";7");
        }
        out.push(b'm');
    }
}

/// Something characters can be placed on. Writes outside the viewport are
/// silently clipped.
pub trait Surface {
    fn viewport(&self) -> Viewport;

    /// Blank every cell.
    fn clear(&mut self);

    fn put_char(&mut self, row: usize, col: usize, ch: char, style: Style);

    /// Write `text` left to right starting at `(row, col)`.
    fn put_str(&mut self, row: usize, col: usize, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            self.put_char(row, col + i, ch, style);
        }
    }

    fn hline(&mut self, row: usize, col: usize, len: usize, ch: char) {
        for c in col..col + len {
            self.put_char(row, c, ch, Style::PLAIN);
        }
    }

    fn vline(&mut self, row: usize, col: usize, len: usize, ch: char) {
        for r in row..row + len {
            self.put_char(r, col, ch, Style::PLAIN);
        }
    }
}

/// A [`Surface`] backed by a real (or simulated) screen.
pub trait Screen: Surface {
    /// Re-query the size after a resize and adopt it.
    fn refresh_size(&mut self) -> Viewport;

    /// Make everything drawn since the last call visible.
    ///
    /// # Errors
    /// Any I/O failure writing to the terminal.
    fn present(&mut self) -> io::Result<()>;
}
