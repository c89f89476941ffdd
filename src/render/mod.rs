//! Rasterization of geometric primitives.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: one-pixel strokes
//! - **Scanline polygon fill**: even-odd rule, sampled at pixel centres; also used for
//!   thick strokes
//! - **Distance-test discs**: markers, touching each pixel once so alpha blends evenly
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{
    draw_line, draw_polyline, draw_rect_outline, draw_thick_line, fill_circle,
    fill_circle_outlined, fill_polygon, fill_rect, hatch_rect, stroke_polygon, HATCH_SPACING,
};
