//! Public-facing crate root: re-exports + one-shot helper.

pub mod cli;
pub mod core;
pub mod render;
pub mod session;

pub use crate::core::{
    aggregate::{Aggregator, Decision, Wait},
    config::{ChartConfig, ChartConfigBuilder},
    error::{ChartError, ConfigError, ReadingError},
    layout::{Layout, Viewport, YRange, solve},
    point::Point,
    ring::{CapacityPolicy, SampleBuffer},
};

pub use render::{Canvas, ChartRenderer, PointStyle, Screen, Surface};
pub use session::{Event, EventSource, Session, Stats};

/// Draw a **static** series, one point per value, onto an off-screen
/// canvas of the given size. No coalescing takes place.
///
/// # Errors
/// Invalid capacity in `config` or buffer allocation failure.
pub fn render_static(
    values: &[f64],
    viewport: Viewport,
    config: &ChartConfig,
) -> Result<Canvas, ChartError> {
    let mut buffer = SampleBuffer::new(config.capacity)?;
    buffer.ensure_capacity(viewport.cols.max(values.len()))?;
    for &v in values {
        buffer.push(v);
    }
    let layout = solve(&buffer, viewport, config.y_range);
    let mut canvas = Canvas::new(viewport);
    ChartRenderer::new(config.style).draw(&mut canvas, &buffer, &layout, config.title.as_deref());
    Ok(canvas)
}
