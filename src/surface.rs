//! Drawing-surface abstractions.
//!
//! Plot helpers never own the surface they draw on. They reshape their input and
//! issue draw calls through [`Surface`] (2-D) or [`Surface3d`] (3-D). The surface owns
//! whatever accumulates across calls.

use crate::color::Rgba;
use crate::error::Result;
use crate::scale::Colormap;
use crate::style::{BarStyle, ErrorBarStyle, PerGroup, ScatterStyle};

/// Handle to an artist added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtistId(pub usize);

/// A 2-D drawing surface with the primitives the statistical helpers need.
pub trait Surface {
    /// Draw one bar per position, rising from zero to `heights[i]`.
    fn bar(&mut self, positions: &[f32], heights: &[f32], style: &BarStyle) -> Result<ArtistId>;

    /// Draw symmetric vertical error bars `y[i] ± yerr[i]` at `positions[i]`.
    fn error_bar(
        &mut self,
        positions: &[f32],
        y: &[f32],
        yerr: &[f32],
        style: &ErrorBarStyle,
    ) -> Result<ArtistId>;

    /// Draw one marker per `(x[i], y[i])`.
    fn scatter(&mut self, x: &[f32], y: &[f32], style: &ScatterStyle) -> Result<ArtistId>;

    /// Place the category-axis ticks.
    fn set_xticks(&mut self, ticks: &[f32]) -> Result<()>;

    /// Label the category-axis ticks.
    fn set_xticklabels(&mut self, labels: &[String]) -> Result<()>;
}

/// Polygons drawn in the x–z plane and stacked along the y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyCollection {
    /// One closed polygon per entry, as `(x, z)` vertices.
    pub polygons: Vec<Vec<(f32, f32)>>,
    /// Y position of each polygon.
    pub depths: Vec<f32>,
    /// Outline color(s), per polygon when `Each`.
    pub edgecolors: PerGroup<Rgba>,
    /// Fill color(s), per polygon when `Each`.
    pub facecolors: PerGroup<Rgba>,
    /// Opacity (0.0 - 1.0).
    pub alpha: f32,
}

/// A height field sampled on a rectilinear grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    /// X coordinate of each column.
    pub x: Vec<f32>,
    /// Y coordinate of each row.
    pub y: Vec<f32>,
    /// Heights in row-major order, `y.len()` rows of `x.len()` values.
    pub z: Vec<f32>,
}

impl SurfaceMesh {
    /// Height at `(row, col)`.
    #[must_use]
    pub fn at(&self, row: usize, col: usize) -> Option<f32> {
        if col >= self.x.len() {
            return None;
        }
        self.z.get(row * self.x.len() + col).copied()
    }
}

/// Axis limits of a 3-D surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits3d {
    /// X range.
    pub x: (f32, f32),
    /// Y range.
    pub y: (f32, f32),
    /// Z range.
    pub z: (f32, f32),
}

/// A 3-D drawing surface.
pub trait Surface3d {
    /// Draw a polyline through `(xs[i], ys[i], zs[i])`.
    fn plot3d(&mut self, xs: &[f32], ys: &[f32], zs: &[f32], color: Rgba) -> Result<ArtistId>;

    /// Add a collection of polygons stacked along y.
    fn add_polygons(&mut self, collection: PolyCollection) -> Result<ArtistId>;

    /// Draw a color-mapped surface.
    fn plot_surface(&mut self, mesh: SurfaceMesh, colormap: Colormap) -> Result<ArtistId>;

    /// Fix the axis limits.
    fn set_limits(&mut self, limits: Limits3d) -> Result<()>;
}

// ============================================================================
// Recording surface
// ============================================================================

/// One recorded call with its full argument tuple.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCall {
    Bar {
        positions: Vec<f32>,
        heights: Vec<f32>,
        style: BarStyle,
    },
    ErrorBar {
        positions: Vec<f32>,
        y: Vec<f32>,
        yerr: Vec<f32>,
        style: ErrorBarStyle,
    },
    Scatter {
        x: Vec<f32>,
        y: Vec<f32>,
        style: ScatterStyle,
    },
    XTicks(Vec<f32>),
    XTickLabels(Vec<String>),
    Line3d {
        xs: Vec<f32>,
        ys: Vec<f32>,
        zs: Vec<f32>,
        color: Rgba,
    },
    Polygons(PolyCollection),
    Surface {
        mesh: SurfaceMesh,
        colormap: Colormap,
    },
    Limits(Limits3d),
}

/// A surface that draws nothing and records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls.
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Forget all recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    fn record(&mut self, call: DrawCall) -> ArtistId {
        self.calls.push(call);
        ArtistId(self.calls.len() - 1)
    }
}

impl Surface for RecordingSurface {
    fn bar(&mut self, positions: &[f32], heights: &[f32], style: &BarStyle) -> Result<ArtistId> {
        Ok(self.record(DrawCall::Bar {
            positions: positions.to_vec(),
            heights: heights.to_vec(),
            style: style.clone(),
        }))
    }

    fn error_bar(
        &mut self,
        positions: &[f32],
        y: &[f32],
        yerr: &[f32],
        style: &ErrorBarStyle,
    ) -> Result<ArtistId> {
        Ok(self.record(DrawCall::ErrorBar {
            positions: positions.to_vec(),
            y: y.to_vec(),
            yerr: yerr.to_vec(),
            style: style.clone(),
        }))
    }

    fn scatter(&mut self, x: &[f32], y: &[f32], style: &ScatterStyle) -> Result<ArtistId> {
        Ok(self.record(DrawCall::Scatter {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        }))
    }

    fn set_xticks(&mut self, ticks: &[f32]) -> Result<()> {
        self.record(DrawCall::XTicks(ticks.to_vec()));
        Ok(())
    }

    fn set_xticklabels(&mut self, labels: &[String]) -> Result<()> {
        self.record(DrawCall::XTickLabels(labels.to_vec()));
        Ok(())
    }
}

impl Surface3d for RecordingSurface {
    fn plot3d(&mut self, xs: &[f32], ys: &[f32], zs: &[f32], color: Rgba) -> Result<ArtistId> {
        Ok(self.record(DrawCall::Line3d {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.to_vec(),
            color,
        }))
    }

    fn add_polygons(&mut self, collection: PolyCollection) -> Result<ArtistId> {
        Ok(self.record(DrawCall::Polygons(collection)))
    }

    fn plot_surface(&mut self, mesh: SurfaceMesh, colormap: Colormap) -> Result<ArtistId> {
        Ok(self.record(DrawCall::Surface { mesh, colormap }))
    }

    fn set_limits(&mut self, limits: Limits3d) -> Result<()> {
        self.record(DrawCall::Limits(limits));
        Ok(())
    }
}
