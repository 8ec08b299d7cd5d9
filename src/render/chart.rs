//! Layout + visible points → draw calls.
//!
//! ```text
//! ┌───  title  ──────┐
//! │            •  •  ┤12.5        <- max
//! │   •  •  •        │
//! │•              •  ◀10          <- current value
//! │      •           ┤7           <- min
//! └──────────────────┘
//! ```

use crate::{
    core::{
        constants::{BORDER_HEIGHT, BORDER_WIDTH, TITLE_COLUMN},
        label::format_label,
        layout::Layout,
        ring::SampleBuffer,
    },
    render::{
        marker::{PointRows, PointStyle},
        surface::{Style, Surface},
    },
};

// Box-drawing glyphs
const TL: char = '┌';
const TR: char = '┐';
const BL: char = '└';
const BR: char = '┘';
const H: char = '─';
const V: char = '│';

/// Border tick beside the max/min labels.
const SCALE_TICK: char = '┤';
/// Border tick beside the current-value label.
const CURRENT_TICK: char = '◀';

/// Draws one frame. Holds no per-frame state; the buffer is only read.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartRenderer {
    style: PointStyle,
}

fn draw_box(surface: &mut dyn Surface, rows: usize, cols: usize) {
    let (bottom, right) = (rows - 1, cols - 1);
    surface.hline(0, 1, cols - BORDER_WIDTH, H);
    surface.hline(bottom, 1, cols - BORDER_WIDTH, H);
    surface.vline(1, 0, rows - BORDER_HEIGHT, V);
    surface.vline(1, right, rows - BORDER_HEIGHT, V);
    surface.put_char(0, 0, TL, Style::PLAIN);
    surface.put_char(0, right, TR, Style::PLAIN);
    surface.put_char(bottom, 0, BL, Style::PLAIN);
    surface.put_char(bottom, right, BR, Style::PLAIN);
}

/// ` title ` in reverse video on the top border, cut short before the corner.
fn draw_title(surface: &mut dyn Surface, title: &str, box_cols: usize) {
    let room = box_cols.saturating_sub(TITLE_COLUMN + 1);
    if room < 3 {
        return;
    }
    let text: String = format!(" {title} ").chars().take(room).collect();
    surface.put_str(0, TITLE_COLUMN, &text, Style::BANNER);
}

impl ChartRenderer {
    #[inline]
    #[must_use]
    pub const fn new(style: PointStyle) -> Self {
        Self { style }
    }

    #[inline]
    #[must_use]
    pub const fn style(&self) -> PointStyle {
        self.style
    }

    /// Clear `surface` and draw `layout`.
    ///
    /// Viewports too small for a border draw nothing; too small for a chart
    /// row draw only the border.
    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        buffer: &SampleBuffer,
        layout: &Layout,
        title: Option<&str>,
    ) {
        surface.clear();
        let viewport = layout.viewport;
        let box_cols = viewport.cols.saturating_sub(layout.margin);
        if viewport.rows < BORDER_HEIGHT || box_cols < BORDER_WIDTH {
            return;
        }

        draw_box(surface, viewport.rows, box_cols);
        if let Some(title) = title {
            draw_title(surface, title, box_cols);
        }
        if layout.is_empty() || layout.chart_rows() == 0 {
            return;
        }

        let screen_row = |v: f64| 1 + layout.row_of(v);
        let marker = self.style.marker();
        for (i, p) in buffer.window(layout.visible.clone()).enumerate() {
            let rows = PointRows {
                open: screen_row(p.open),
                high: screen_row(p.high),
                low: screen_row(p.low),
                close: screen_row(p.close),
            };
            marker.draw(surface, 1 + i, rows);
        }

        // current value last so it wins a shared row
        let border = box_cols - 1;
        for (value, current) in [
            (layout.data_max, false),
            (layout.data_min, false),
            (layout.last, true),
        ] {
            let row = screen_row(value);
            let (tick, style) = if current {
                (CURRENT_TICK, Style::BOLD)
            } else {
                (SCALE_TICK, Style::PLAIN)
            };
            let text = format!("{:<width$}", format_label(value), width = layout.margin);
            surface.put_char(row, border, tick, style);
            surface.put_str(row, box_cols, &text, style);
        }
    }
}
