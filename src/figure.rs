//! Figures: a grid of panels rendered into one image.

use crate::axes::Panel;
use crate::color::Rgba;
use crate::config::RcParams;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::PngEncoder;
use std::path::Path;

/// A figure laid out as a `rows × cols` grid of equally sized panels.
///
/// Panels fill the grid row by row. Each is rendered into its own cell buffer and
/// composited, so a panel never paints over its neighbours.
#[derive(Debug, Clone)]
pub struct Figure {
    width: u32,
    height: u32,
    background: Rgba,
}

impl Figure {
    /// Create a figure sized from `figsize × dpi`.
    #[must_use]
    pub fn new(rc: &RcParams) -> Self {
        let (width, height) = rc.figure_pixels();
        Self {
            width,
            height,
            background: Rgba::WHITE,
        }
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Figure width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Figure height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Render `panels` into a `rows × cols` grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, has fewer cells than panels, or a
    /// panel fails to render.
    pub fn render(&self, rows: u32, cols: u32, panels: &[&dyn Panel]) -> Result<Framebuffer> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { width: cols, height: rows });
        }
        let cells = (rows * cols) as usize;
        if panels.len() > cells {
            return Err(Error::InvalidParameter {
                name: "panels",
                reason: format!("{} panels do not fit a {rows}x{cols} grid", panels.len()),
            });
        }

        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.background);

        let cell_w = self.width / cols;
        let cell_h = self.height / rows;
        log::debug!(
            target: "trueno_plotkit",
            "figure {}x{}: {} panels in {rows}x{cols} grid",
            self.width,
            self.height,
            panels.len()
        );

        for (i, panel) in panels.iter().enumerate() {
            let (row, col) = (i as u32 / cols, i as u32 % cols);
            let mut cell = Framebuffer::new(cell_w, cell_h)?;
            cell.clear(self.background);
            panel.render_into(&mut cell, Rect::new(0.0, 0.0, cell_w as f32, cell_h as f32))?;
            fb.blit(&cell, (col * cell_w) as i32, (row * cell_h) as i32);
        }

        Ok(fb)
    }

    /// Render and write the figure as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn save_png<P: AsRef<Path>>(
        &self,
        path: P,
        rows: u32,
        cols: u32,
        panels: &[&dyn Panel],
    ) -> Result<()> {
        let fb = self.render(rows, cols, panels)?;
        PngEncoder::write_to_file(&fb, path)
    }
}

impl batuta_common::display::WithDimensions for Figure {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
