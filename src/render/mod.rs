pub mod canvas;
pub mod chart;
pub mod frame;
pub mod marker;
pub mod surface;

pub use canvas::{Canvas, Cell};
pub use chart::ChartRenderer;
pub use frame::{AnsiTerminal, terminal_geometry};
pub use marker::{Marker, PointRows, PointStyle};
pub use surface::{Screen, Style, Surface};
