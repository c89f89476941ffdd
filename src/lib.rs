//! # Trueno-Plotkit
//!
//! Statistical plotting helpers on top of a pure-Rust raster plotting core.
//!
//! The helpers never own a drawing surface. They reshape their input into the
//! coordinates a surface expects and issue draw calls through the [`Surface`] (2-D)
//! or [`Surface3d`] (3-D) traits:
//!
//! - [`ErrorPlot`]: bar of group means, error bars of SD or SE, raw samples alongside
//! - [`Waterfall`]: rows of a 2-D array stacked in depth, as lines or filled polygons
//! - [`Spectrogram3d`]: frame × bin magnitudes as a color-mapped surface
//!
//! [`RecordingSurface`] captures the calls for inspection; [`RasterAxes`] and
//! [`RasterAxes3d`] rasterize them, and [`Figure`] composes panels into a PNG.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trueno_plotkit::prelude::*;
//!
//! # fn main() -> trueno_plotkit::Result<()> {
//! let rc = RcParams::default();
//! let mut axes = RasterAxes::new(&rc);
//!
//! ErrorPlot::new()
//!     .data(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
//!     .dispersion(Dispersion::Se)
//!     .render(&mut axes)?;
//!
//! Figure::new(&rc).save_png("error_plot.png", 1, 1, &[&axes])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://crates.io/crates/log) facade under the
//! `trueno_plotkit` target. The library never installs a logger.
//!
//! [`Surface`]: surface::Surface
//! [`Surface3d`]: surface::Surface3d
//! [`ErrorPlot`]: plots::ErrorPlot
//! [`Waterfall`]: plots::Waterfall
//! [`Spectrogram3d`]: plots::Spectrogram3d
//! [`RecordingSurface`]: surface::RecordingSurface
//! [`RasterAxes`]: axes::RasterAxes
//! [`RasterAxes3d`]: axes::RasterAxes3d
//! [`Figure`]: figure::Figure

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and color-spec parsing.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives and the 3-D projection.
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Descriptive statistics and grids.
pub mod stats;

/// Element styles, broadcast values and override merging.
pub mod style;

// ============================================================================
// Plotting Modules
// ============================================================================

/// Drawing-surface traits and the recording surface.
pub mod surface;

/// Plot helpers (error plot, waterfall, spectrogram).
pub mod plots;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Raster primitives.
pub mod render;

/// Framebuffer-backed 2-D and 3-D axes.
pub mod axes;

/// Multi-panel figures.
pub mod figure;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Configuration and Errors
// ============================================================================

/// Global style parameters.
pub mod config;

/// Error types for trueno-plotkit operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_plotkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::axes::{Panel, RasterAxes, RasterAxes3d};
    pub use crate::color::Rgba;
    pub use crate::config::RcParams;
    pub use crate::error::{Error, Result};
    pub use crate::figure::Figure;
    pub use crate::framebuffer::Framebuffer;
    pub use crate::plots::{error_plot, ErrorPlot, Spectrogram3d, Waterfall};
    pub use crate::scale::Colormap;
    pub use crate::stats::Dispersion;
    pub use crate::style::{
        BarOverrides, ErrorBarOverrides, Hatch, PerGroup, ScatterOverrides, StyleOverrides,
    };
    pub use crate::surface::{RecordingSurface, Surface, Surface3d};
    pub use batuta_common::display::WithDimensions;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
