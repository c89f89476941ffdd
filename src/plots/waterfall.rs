//! Waterfall plot: the rows of a 2-D array stacked along the depth axis.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::stats::{extent, linspace};
use crate::style::PerGroup;
use crate::surface::{ArtistId, Limits3d, PolyCollection, Surface3d};

/// Builder for waterfall plots.
///
/// Row `r` of the array is drawn at depth `ys[r]` as a curve over `xs`, where both
/// grids are evenly spaced over the extent. In fill mode each row becomes a polygon
/// closed down to `zmin`, so nearer rows hide the ones behind them.
#[derive(Debug, Clone)]
pub struct Waterfall {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
    ragged: Option<(usize, usize)>,
    extent: Option<(f32, f32, f32, f32)>,
    edgecolors: PerGroup<Rgba>,
    fill: bool,
    facecolors: PerGroup<Rgba>,
    alpha: f32,
    zmin: f32,
}

impl Default for Waterfall {
    fn default() -> Self {
        Self::new()
    }
}

impl Waterfall {
    /// Create a builder: black lines, no fill, white faces, opaque, `zmin = 0`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            rows: 0,
            cols: 0,
            ragged: None,
            extent: None,
            edgecolors: PerGroup::All(Rgba::BLACK),
            fill: false,
            facecolors: PerGroup::All(Rgba::WHITE),
            alpha: 1.0,
            zmin: 0.0,
        }
    }

    /// Set the array as rows. Rows must all have the same length.
    #[must_use]
    pub fn data_2d(mut self, rows: &[Vec<f32>]) -> Self {
        self.rows = rows.len();
        self.cols = rows.first().map_or(0, Vec::len);
        self.ragged = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.cols)
            .map(|(i, row)| (i, row.len()));
        self.data = rows.iter().flatten().copied().collect();
        self
    }

    /// Set the array from row-major values.
    #[must_use]
    pub fn data(mut self, values: &[f32], rows: usize, cols: usize) -> Self {
        self.data = values.to_vec();
        self.rows = rows;
        self.cols = cols;
        self.ragged = None;
        self
    }

    /// Set `(x_min, x_max, y_min, y_max)`. Defaults to column and row indices.
    #[must_use]
    pub fn extent(mut self, x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        self.extent = Some((x_min, x_max, y_min, y_max));
        self
    }

    /// Line colors: one for all rows or one per row.
    #[must_use]
    pub fn edgecolors(mut self, colors: impl Into<PerGroup<Rgba>>) -> Self {
        self.edgecolors = colors.into();
        self
    }

    /// Draw filled polygons instead of lines.
    #[must_use]
    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Polygon face colors (fill mode).
    #[must_use]
    pub fn facecolors(mut self, colors: impl Into<PerGroup<Rgba>>) -> Self {
        self.facecolors = colors.into();
        self
    }

    /// Polygon opacity (fill mode).
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Floor the polygons are closed down to (fill mode).
    #[must_use]
    pub fn zmin(mut self, zmin: f32) -> Self {
        self.zmin = zmin;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::EmptyData);
        }
        if let Some((row, len)) = self.ragged {
            log::debug!(target: "trueno_plotkit", "waterfall row {row} is ragged");
            return Err(Error::LengthMismatch {
                what: "waterfall row",
                expected: self.cols,
                actual: len,
            });
        }
        let expected = self.rows * self.cols;
        if self.data.len() != expected {
            return Err(Error::LengthMismatch {
                what: "waterfall values",
                expected,
                actual: self.data.len(),
            });
        }
        self.edgecolors.check_len(self.rows, "edgecolors")?;
        if self.fill {
            self.facecolors.check_len(self.rows, "facecolors")?;
        }
        Ok(())
    }

    fn bounds(&self) -> (f32, f32, f32, f32) {
        self.extent.unwrap_or((
            0.0,
            self.cols.saturating_sub(1) as f32,
            0.0,
            self.rows.saturating_sub(1) as f32,
        ))
    }

    /// X grid, one value per column.
    #[must_use]
    pub fn xs(&self) -> Vec<f32> {
        let (x_min, x_max, _, _) = self.bounds();
        linspace(x_min, x_max, self.cols)
    }

    /// Depth grid, one value per row.
    #[must_use]
    pub fn ys(&self) -> Vec<f32> {
        let (_, _, y_min, y_max) = self.bounds();
        linspace(y_min, y_max, self.rows)
    }

    fn row(&self, r: usize) -> &[f32] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Draw onto `surface`.
    ///
    /// Returns one artist per row in line mode, or the single polygon collection in
    /// fill mode (which also fixes the axis limits).
    ///
    /// # Errors
    ///
    /// Returns an error for an empty or mis-shaped array or per-row colors of the
    /// wrong length, before anything is drawn.
    pub fn render<S: Surface3d + ?Sized>(&self, surface: &mut S) -> Result<Vec<ArtistId>> {
        self.validate()?;
        let (xs, ys) = (self.xs(), self.ys());
        log::debug!(
            target: "trueno_plotkit",
            "waterfall: {}x{} fill={}",
            self.rows,
            self.cols,
            self.fill
        );

        if !self.fill {
            let mut ids = Vec::with_capacity(self.rows);
            for (r, &y) in ys.iter().enumerate() {
                let color = self.edgecolors.get(r).copied().unwrap_or(Rgba::BLACK);
                ids.push(surface.plot3d(&xs, &vec![y; self.cols], self.row(r), color)?);
            }
            return Ok(ids);
        }

        let polygons = (0..self.rows).map(|r| self.polygon(&xs, self.row(r))).collect();
        let id = surface.add_polygons(PolyCollection {
            polygons,
            depths: ys,
            edgecolors: self.edgecolors.clone(),
            facecolors: self.facecolors.clone(),
            alpha: self.alpha,
        })?;

        let (x_min, x_max, y_min, y_max) = self.bounds();
        let z = extent(self.data.iter().copied()).unwrap_or((self.zmin, self.zmin));
        surface.set_limits(Limits3d {
            x: (x_min, x_max),
            y: (y_min, y_max),
            z,
        })?;
        Ok(vec![id])
    }

    fn polygon(&self, xs: &[f32], zs: &[f32]) -> Vec<(f32, f32)> {
        let mut vertices = Vec::with_capacity(xs.len() + 2);
        if let (Some(&first), Some(&last)) = (xs.first(), xs.last()) {
            vertices.push((first, self.zmin));
            vertices.extend(xs.iter().copied().zip(zs.iter().copied()));
            vertices.push((last, self.zmin));
        }
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, RecordingSurface};

    fn grid() -> Vec<Vec<f32>> {
        vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]
    }

    #[test]
    fn test_lines_one_call_per_row() {
        let mut surface = RecordingSurface::new();
        let ids = Waterfall::new()
            .data_2d(&grid())
            .extent(0.0, 1.0, 10.0, 20.0)
            .render(&mut surface)
            .unwrap();

        assert_eq!(ids, vec![ArtistId(0), ArtistId(1)]);
        assert_eq!(
            surface.calls()[1],
            DrawCall::Line3d {
                xs: vec![0.0, 0.5, 1.0],
                ys: vec![20.0; 3],
                zs: vec![4.0, 5.0, 6.0],
                color: Rgba::BLACK,
            }
        );
    }

    #[test]
    fn test_lines_per_row_colors() {
        let mut surface = RecordingSurface::new();
        Waterfall::new()
            .data_2d(&grid())
            .edgecolors(vec![Rgba::RED, Rgba::BLUE])
            .render(&mut surface)
            .unwrap();

        let colors: Vec<Rgba> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line3d { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Rgba::RED, Rgba::BLUE]);
    }

    #[test]
    fn test_fill_polygons_and_limits() {
        let mut surface = RecordingSurface::new();
        let ids = Waterfall::new()
            .data(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3)
            .extent(0.0, 2.0, 0.0, 1.0)
            .fill(true)
            .zmin(-1.0)
            .render(&mut surface)
            .unwrap();

        assert_eq!(ids, vec![ArtistId(0)]);
        let DrawCall::Polygons(collection) = &surface.calls()[0] else {
            panic!("expected polygons, got {:?}", surface.calls()[0]);
        };
        assert_eq!(collection.depths, vec![0.0, 1.0]);
        assert_eq!(
            collection.polygons[0],
            vec![(0.0, -1.0), (0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (2.0, -1.0)]
        );
        assert_eq!(collection.facecolors, PerGroup::All(Rgba::WHITE));
        assert_eq!(
            surface.calls()[1],
            DrawCall::Limits(Limits3d {
                x: (0.0, 2.0),
                y: (0.0, 1.0),
                z: (1.0, 6.0),
            })
        );
    }

    #[test]
    fn test_default_extent_uses_indices() {
        let plot = Waterfall::new().data_2d(&grid());
        assert_eq!(plot.xs(), vec![0.0, 1.0, 2.0]);
        assert_eq!(plot.ys(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_errors_before_drawing() {
        let mut surface = RecordingSurface::new();

        assert!(matches!(Waterfall::new().render(&mut surface), Err(Error::EmptyData)));

        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            Waterfall::new().data_2d(&ragged).render(&mut surface),
            Err(Error::LengthMismatch { .. })
        ));

        // Same total as a 3x2 grid, still ragged.
        let ragged = vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0, 6.0]];
        assert!(matches!(
            Waterfall::new().data_2d(&ragged).render(&mut surface),
            Err(Error::LengthMismatch { what: "waterfall row", expected: 2, actual: 1 })
        ));

        assert!(Waterfall::new()
            .data_2d(&grid())
            .edgecolors(vec![Rgba::RED])
            .render(&mut surface)
            .is_err());

        assert!(matches!(
            Waterfall::new()
                .data_2d(&grid())
                .fill(true)
                .facecolors(vec![Rgba::RED, Rgba::BLUE, Rgba::GREEN])
                .render(&mut surface),
            Err(Error::LengthMismatch { what: "facecolors", expected: 2, actual: 3 })
        ));

        assert!(surface.calls().is_empty());
    }
}
