//! Full-screen ANSI presenter with:
//! - alternate screen + hidden cursor for the lifetime of the value
//! - persistent double buffering (encoded rows of the previous frame)
//! - row-diff; only rows that changed are rewritten
//! - batched writes using `write_vectored`

use std::io::{self, IoSlice, IsTerminal, Stdout, Write, stdout};

use terminal_size::{Height, Width, terminal_size};

use crate::{
    core::{error::ChartError, layout::Viewport},
    render::{
        canvas::Canvas,
        surface::{Screen, Style, Surface},
    },
};

const ENTER_SEQ: &[u8] = b"\x1b[?1049h\x1b[?25l\x1b[2J";
const LEAVE_SEQ: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?1049l";
const RESET_SEQ: &[u8] = b"\x1b[0m";
const CLEAR_SEQ: &[u8] = b"\x1b[2J";

// --- Helpers ---

/// Switches to the alternate screen and hides the cursor on construction;
/// undoes both on Drop.
struct ScreenGuard;
impl ScreenGuard {
    fn new() -> io::Result<Self> {
        let mut out = stdout();
        out.write_all(ENTER_SEQ)?;
        out.flush()?;
        Ok(ScreenGuard)
    }
}
impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = out.write_all(LEAVE_SEQ);
        let _ = out.flush();
    }
}

#[inline]
fn push_usize_dec(buf: &mut Vec<u8>, mut n: usize) {
    // enough for 64-bit usize (20 digits max)
    let mut tmp = [0u8; 20];
    let mut i = tmp.len();

    // write digits in reverse
    loop {
        i -= 1;
        tmp[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }

    buf.extend_from_slice(&tmp[i..]);
}

/// Encode one canvas row: SGR changes only where the style changes, then a
/// reset so the next row starts clean.
fn encode_row(canvas: &Canvas, row: usize, out: &mut Vec<u8>) {
    let mut current = Style::PLAIN;
    let mut utf8 = [0u8; 4];
    for cell in canvas.row(row) {
        if cell.style != current {
            cell.style.write_sgr(out);
            current = cell.style;
        }
        out.extend_from_slice(cell.ch.encode_utf8(&mut utf8).as_bytes());
    }
    if current != Style::PLAIN {
        out.extend_from_slice(RESET_SEQ);
    }
}

/// Write `dirty` rows (each preceded by a cursor move) in one batch,
/// optionally erasing the screen first.
fn write_frame<W: Write>(out: &mut W, clear: bool, dirty: &[(usize, Vec<u8>)]) -> io::Result<()> {
    // Pre-build all cursor sequences in one grow
    let mut cursor_buf = Vec::<u8>::with_capacity(dirty.len() * 10);
    let mut spans = Vec::with_capacity(dirty.len());
    for (row, _) in dirty {
        let start = cursor_buf.len();
        cursor_buf.extend_from_slice(b"\x1b[");
        push_usize_dec(&mut cursor_buf, row + 1);
        cursor_buf.extend_from_slice(b";1H");
        spans.push(start..cursor_buf.len());
    }

    let mut ios: Vec<IoSlice<'_>> = Vec::with_capacity(dirty.len() * 2 + 1);
    if clear {
        ios.push(IoSlice::new(CLEAR_SEQ));
    }
    for (span, (_, enc)) in spans.iter().zip(dirty) {
        ios.push(IoSlice::new(&cursor_buf[span.clone()]));
        ios.push(IoSlice::new(enc));
    }

    // write_vectored may stop short; fall back to plain writes for the rest
    let mut written = out.write_vectored(&ios)?;
    for slice in &ios {
        if written >= slice.len() {
            written -= slice.len();
            continue;
        }
        out.write_all(&slice[written..])?;
        written = 0;
    }
    out.flush()
}

/// Current terminal geometry, if stdout is a terminal.
#[inline]
#[must_use]
pub fn terminal_geometry() -> Option<Viewport> {
    terminal_size().map(|(Width(w), Height(h))| Viewport::new(usize::from(h), usize::from(w)))
}

/// Draw target for the real terminal.
pub struct AnsiTerminal {
    canvas: Canvas,
    // encoded rows of the frame currently on screen; empty = repaint all
    shown: Vec<Vec<u8>>,
    // erase the whole screen before the next frame
    clear_pending: bool,
    out: Stdout,
    _screen: ScreenGuard,
}

impl AnsiTerminal {
    /// Take over the terminal.
    ///
    /// # Errors
    /// [`ChartError::Terminal`] when stdout is not a terminal or its size
    /// cannot be determined.
    pub fn new() -> Result<Self, ChartError> {
        let out = stdout();
        if !out.is_terminal() {
            return Err(ChartError::Terminal(
                "standard output is not a terminal".into(),
            ));
        }
        let viewport = terminal_geometry()
            .ok_or_else(|| ChartError::Terminal("cannot determine the terminal size".into()))?;
        let screen = ScreenGuard::new()?;
        tracing::debug!(rows = viewport.rows, cols = viewport.cols, "terminal ready");
        Ok(Self {
            canvas: Canvas::new(viewport),
            shown: Vec::new(),
            clear_pending: false,
            out,
            _screen: screen,
        })
    }

    /// Rows that differ from what is on screen, with their new encoding.
    fn dirty_rows(&self) -> Vec<(usize, Vec<u8>)> {
        let rows = self.canvas.viewport().rows;
        let full = self.shown.len() != rows;
        (0..rows)
            .filter_map(|r| {
                let mut enc = Vec::with_capacity(self.canvas.viewport().cols * 3);
                encode_row(&self.canvas, r, &mut enc);
                (full || self.shown[r] != enc).then_some((r, enc))
            })
            .collect()
    }
}

impl Surface for AnsiTerminal {
    #[inline]
    fn viewport(&self) -> Viewport {
        self.canvas.viewport()
    }
    #[inline]
    fn clear(&mut self) {
        self.canvas.clear();
    }
    #[inline]
    fn put_char(&mut self, row: usize, col: usize, ch: char, style: Style) {
        self.canvas.put_char(row, col, ch, style);
    }
}

impl Screen for AnsiTerminal {
    fn refresh_size(&mut self) -> Viewport {
        let viewport = terminal_geometry().unwrap_or_else(|| self.canvas.viewport());
        if viewport != self.canvas.viewport() {
            self.canvas.resize(viewport);
            self.shown.clear();
            self.clear_pending = true;
        }
        viewport
    }

    fn present(&mut self) -> io::Result<()> {
        let dirty = self.dirty_rows();
        if dirty.is_empty() && !self.clear_pending {
            return Ok(());
        }
        write_frame(&mut self.out.lock(), self.clear_pending, &dirty)?;
        self.clear_pending = false;

        let rows = self.canvas.viewport().rows;
        if self.shown.len() != rows {
            self.shown = vec![Vec::new(); rows];
        }
        for (row, enc) in dirty {
            self.shown[row] = enc;
        }
        Ok(())
    }
}
