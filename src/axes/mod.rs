//! Framebuffer-backed drawing surfaces.
//!
//! Axes are retained: draw calls store artists, and rasterization happens when the
//! axes are rendered into a viewport of a framebuffer. Limits are therefore computed
//! from everything drawn so far.

mod axes2d;
mod axes3d;

pub use axes2d::RasterAxes;
pub use axes3d::RasterAxes3d;

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;

/// Anything that can rasterize itself into a region of a framebuffer.
pub trait Panel {
    /// Draw into `viewport` (pixel coordinates) of `fb`.
    fn render_into(&self, fb: &mut Framebuffer, viewport: Rect) -> Result<()>;
}
