//! High-level plot helpers.
//!
//! Each helper reshapes its input and issues draw calls on a caller-supplied surface.

mod error_plot;
mod spectrogram;
mod waterfall;

pub use error_plot::{error_plot, scatter_positions, ErrorPlot, ErrorPlotLayout, DEFAULT_SHIFT};
pub use spectrogram::Spectrogram3d;
pub use waterfall::Waterfall;
