//! Heat-map image output.

mod palette;
mod heatmap;

pub use palette::ylgn;
pub use heatmap::HeatmapRenderer;
