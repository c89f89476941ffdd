//! 3-D raster axes with an orthographic camera and painter's-algorithm ordering.

use super::Panel;
use crate::color::Rgba;
use crate::config::RcParams;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Point3, Projection, Rect};
use crate::render::{draw_thick_line, fill_polygon, fill_rect, stroke_polygon};
use crate::scale::{Colormap, Scale};
use crate::stats::extent;
use crate::surface::{ArtistId, Limits3d, PolyCollection, Surface3d, SurfaceMesh};

/// Color of the back edges of the bounding box.
const PANE_EDGE: Rgba = Rgba::rgb(176, 176, 176);

#[derive(Debug, Clone)]
enum Artist {
    Line { points: Vec<Point3>, color: Rgba },
    Polygons(PolyCollection),
    Surface { mesh: SurfaceMesh, colormap: Colormap },
}

/// A projected primitive waiting to be painted.
#[derive(Debug)]
enum Shape {
    Segment {
        a: Point,
        b: Point,
        color: Rgba,
        width: f32,
    },
    Polygon {
        vertices: Vec<Point>,
        fill: Option<Rgba>,
        edge: Option<(Rgba, f32)>,
    },
}

/// Maps data coordinates into the unit cube, then onto the viewport.
struct Camera {
    projection: Projection,
    limits: Limits3d,
    center: Point,
    scale: f32,
}

impl Camera {
    fn new(projection: Projection, limits: Limits3d, area: Rect) -> Self {
        let mut cam = Self {
            projection,
            limits,
            center: Point::new(0.0, 0.0),
            scale: 1.0,
        };

        // Fit the projected cube into the area.
        let corners: Vec<Point> = cube_corners().iter().map(|&c| projection.project(c).0).collect();
        let (u0, u1) = bounds(corners.iter().map(|p| p.x));
        let (v0, v1) = bounds(corners.iter().map(|p| p.y));
        cam.scale = (area.width / (u1 - u0)).min(area.height / (v1 - v0));
        let mid = area.center();
        cam.center = Point::new(
            mid.x - (u0 + u1) / 2.0 * cam.scale,
            mid.y + (v0 + v1) / 2.0 * cam.scale,
        );
        cam
    }

    fn normalize(&self, x: f32, y: f32, z: f32) -> Point3 {
        Point3::new(unit(x, self.limits.x), unit(y, self.limits.y), unit(z, self.limits.z))
    }

    /// Screen position and depth of a data point.
    fn place(&self, x: f32, y: f32, z: f32) -> (Point, f32) {
        self.place_unit(self.normalize(x, y, z))
    }

    fn place_unit(&self, p: Point3) -> (Point, f32) {
        let (uv, depth) = self.projection.project(p);
        (
            Point::new(self.center.x + uv.x * self.scale, self.center.y - uv.y * self.scale),
            depth,
        )
    }
}

fn unit(value: f32, (lo, hi): (f32, f32)) -> f32 {
    if (hi - lo).abs() < f32::EPSILON {
        0.0
    } else {
        (value - lo) / (hi - lo) - 0.5
    }
}

fn bounds(values: impl Iterator<Item = f32>) -> (f32, f32) {
    values.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn cube_corners() -> [Point3; 8] {
    let mut corners = [Point3::new(0.0, 0.0, 0.0); 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let pick = |bit: usize| if i & bit == 0 { -0.5 } else { 0.5 };
        *corner = Point3::new(pick(1), pick(2), pick(4));
    }
    corners
}

/// A 3-D axes that rasterizes lines, polygon collections and surfaces.
#[derive(Debug, Clone)]
pub struct RasterAxes3d {
    rc: RcParams,
    projection: Projection,
    artists: Vec<Artist>,
    limits: Option<Limits3d>,
    background: Rgba,
}

impl Default for RasterAxes3d {
    fn default() -> Self {
        Self::new(&RcParams::default())
    }
}

impl RasterAxes3d {
    /// Create empty axes viewed from the default angles.
    #[must_use]
    pub fn new(rc: &RcParams) -> Self {
        Self {
            rc: rc.clone(),
            projection: Projection::default(),
            artists: Vec::new(),
            limits: None,
            background: Rgba::WHITE,
        }
    }

    /// Change the view angles (degrees).
    #[must_use]
    pub fn view(mut self, azimuth: f32, elevation: f32) -> Self {
        self.projection = Projection::new(azimuth, elevation);
        self
    }

    /// Number of artists drawn so far.
    #[must_use]
    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    /// Explicit limits if set, otherwise the extent of everything drawn.
    #[must_use]
    pub fn limits(&self) -> Option<Limits3d> {
        self.limits.or_else(|| self.data_limits())
    }

    fn data_limits(&self) -> Option<Limits3d> {
        let (mut xs, mut ys, mut zs) = (Vec::new(), Vec::new(), Vec::new());
        for artist in &self.artists {
            match artist {
                Artist::Line { points, .. } => {
                    for p in points {
                        xs.push(p.x);
                        ys.push(p.y);
                        zs.push(p.z);
                    }
                }
                Artist::Polygons(collection) => {
                    ys.extend_from_slice(&collection.depths);
                    for &(x, z) in collection.polygons.iter().flatten() {
                        xs.push(x);
                        zs.push(z);
                    }
                }
                Artist::Surface { mesh, .. } => {
                    xs.extend_from_slice(&mesh.x);
                    ys.extend_from_slice(&mesh.y);
                    zs.extend_from_slice(&mesh.z);
                }
            }
        }
        Some(Limits3d {
            x: extent(xs)?,
            y: extent(ys)?,
            z: extent(zs)?,
        })
    }

    /// Render alone into a new white framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions.
    pub fn to_framebuffer(&self, width: u32, height: u32) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(width, height)?;
        fb.clear(Rgba::WHITE);
        self.render_into(&mut fb, Rect::new(0.0, 0.0, width as f32, height as f32))?;
        Ok(fb)
    }

    fn shapes(&self, cam: &Camera) -> Vec<(f32, Shape)> {
        let line_width = self.rc.points_to_pixels(1.5).max(1.0);
        let edge_width = self.rc.points_to_pixels(1.0).max(1.0);
        let mut shapes = Vec::new();

        for artist in &self.artists {
            match artist {
                Artist::Line { points, color } => {
                    for pair in points.windows(2) {
                        let (a, da) = cam.place(pair[0].x, pair[0].y, pair[0].z);
                        let (b, db) = cam.place(pair[1].x, pair[1].y, pair[1].z);
                        shapes.push((
                            (da + db) / 2.0,
                            Shape::Segment { a, b, color: *color, width: line_width },
                        ));
                    }
                }
                Artist::Polygons(collection) => {
                    for (i, (polygon, &y)) in collection.polygons.iter().zip(&collection.depths).enumerate() {
                        let placed: Vec<(Point, f32)> =
                            polygon.iter().map(|&(x, z)| cam.place(x, y, z)).collect();
                        if placed.is_empty() {
                            continue;
                        }
                        let depth = placed.iter().map(|(_, d)| d).sum::<f32>() / placed.len() as f32;
                        shapes.push((
                            depth,
                            Shape::Polygon {
                                vertices: placed.into_iter().map(|(p, _)| p).collect(),
                                fill: collection.facecolors.get(i).map(|c| c.fade(collection.alpha)),
                                edge: collection
                                    .edgecolors
                                    .get(i)
                                    .map(|c| (c.fade(collection.alpha), edge_width)),
                            },
                        ));
                    }
                }
                Artist::Surface { mesh, colormap } => {
                    surface_shapes(mesh, *colormap, cam, line_width, &mut shapes);
                }
            }
        }
        shapes
    }

    fn draw_back_edges(&self, fb: &mut Framebuffer, cam: &Camera) {
        let corners = cube_corners();
        let placed: Vec<(Point, f32)> = corners.iter().map(|&c| cam.place_unit(c)).collect();
        let nearest = placed
            .iter()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, (_, d))| if *d > best.1 { (i, *d) } else { best })
            .0;
        let width = self.rc.points_to_pixels(1.0).max(1.0);

        for i in 0..corners.len() {
            for bit in [1, 2, 4] {
                let j = i | bit;
                if j == i || i == nearest || j == nearest {
                    continue;
                }
                draw_thick_line(fb, placed[i].0, placed[j].0, width, PANE_EDGE);
            }
        }
    }
}

fn surface_shapes(
    mesh: &SurfaceMesh,
    colormap: Colormap,
    cam: &Camera,
    line_width: f32,
    shapes: &mut Vec<(f32, Shape)>,
) {
    let Some(z_range) = extent(mesh.z.iter().copied()) else {
        return;
    };
    let colors = colormap.over(z_range);
    let (rows, cols) = (mesh.y.len(), mesh.x.len());
    let point = |r: usize, c: usize| mesh.at(r, c).map(|z| (cam.place(mesh.x[c], mesh.y[r], z), z));

    if rows < 2 || cols < 2 {
        // Degenerate grid: a single colored polyline.
        let cells: Vec<(usize, usize)> = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c))).collect();
        for pair in cells.windows(2) {
            let (Some(((a, da), za)), Some(((b, db), zb))) =
                (point(pair[0].0, pair[0].1), point(pair[1].0, pair[1].1))
            else {
                continue;
            };
            shapes.push((
                (da + db) / 2.0,
                Shape::Segment { a, b, color: colors.scale((za + zb) / 2.0), width: line_width },
            ));
        }
        return;
    }

    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let quad = [point(r, c), point(r, c + 1), point(r + 1, c + 1), point(r + 1, c)];
            let Some(quad) = quad.into_iter().collect::<Option<Vec<_>>>() else {
                continue;
            };
            let depth = quad.iter().map(|((_, d), _)| d).sum::<f32>() / 4.0;
            let z = quad.iter().map(|(_, z)| z).sum::<f32>() / 4.0;
            shapes.push((
                depth,
                Shape::Polygon {
                    vertices: quad.iter().map(|((p, _), _)| *p).collect(),
                    fill: Some(colors.scale(z)),
                    edge: None,
                },
            ));
        }
    }
}

impl Panel for RasterAxes3d {
    fn render_into(&self, fb: &mut Framebuffer, viewport: Rect) -> Result<()> {
        let area = viewport.inset(
            viewport.width * 0.05,
            viewport.height * 0.05,
            viewport.width * 0.05,
            viewport.height * 0.05,
        );
        if area.width < 1.0 || area.height < 1.0 {
            return Err(Error::InvalidDimensions {
                width: viewport.width as u32,
                height: viewport.height as u32,
            });
        }

        let limits = self.limits().unwrap_or(Limits3d {
            x: (0.0, 1.0),
            y: (0.0, 1.0),
            z: (0.0, 1.0),
        });
        let cam = Camera::new(self.projection, limits, area);

        fill_rect(fb, viewport, self.background);
        self.draw_back_edges(fb, &cam);

        let mut shapes = self.shapes(&cam);
        shapes.sort_by(|a, b| a.0.total_cmp(&b.0));
        log::debug!(
            target: "trueno_plotkit",
            "render 3d axes: {} artists, {} shapes, limits={limits:?}",
            self.artists.len(),
            shapes.len()
        );

        for (_, shape) in shapes {
            match shape {
                Shape::Segment { a, b, color, width } => draw_thick_line(fb, a, b, width, color),
                Shape::Polygon { vertices, fill, edge } => {
                    if let Some(fill) = fill {
                        fill_polygon(fb, &vertices, fill);
                    }
                    if let Some((color, width)) = edge {
                        stroke_polygon(fb, &vertices, width, color);
                    }
                }
            }
        }
        Ok(())
    }
}

impl Surface3d for RasterAxes3d {
    fn plot3d(&mut self, xs: &[f32], ys: &[f32], zs: &[f32], color: Rgba) -> Result<ArtistId> {
        if xs.len() != ys.len() {
            return Err(Error::DataLengthMismatch { x_len: xs.len(), y_len: ys.len() });
        }
        if zs.len() != xs.len() {
            return Err(Error::LengthMismatch {
                what: "plot3d z values",
                expected: xs.len(),
                actual: zs.len(),
            });
        }

        let points = xs
            .iter()
            .zip(ys)
            .zip(zs)
            .map(|((&x, &y), &z)| Point3::new(x, y, z))
            .collect();
        self.artists.push(Artist::Line { points, color });
        Ok(ArtistId(self.artists.len() - 1))
    }

    fn add_polygons(&mut self, collection: PolyCollection) -> Result<ArtistId> {
        let n = collection.polygons.len();
        if collection.depths.len() != n {
            return Err(Error::LengthMismatch {
                what: "polygon depths",
                expected: n,
                actual: collection.depths.len(),
            });
        }
        collection.edgecolors.check_len(n, "polygon edgecolors")?;
        collection.facecolors.check_len(n, "polygon facecolors")?;

        self.artists.push(Artist::Polygons(collection));
        Ok(ArtistId(self.artists.len() - 1))
    }

    fn plot_surface(&mut self, mesh: SurfaceMesh, colormap: Colormap) -> Result<ArtistId> {
        if mesh.x.is_empty() || mesh.y.is_empty() {
            return Err(Error::EmptyData);
        }
        let expected = mesh.x.len() * mesh.y.len();
        if mesh.z.len() != expected {
            return Err(Error::LengthMismatch {
                what: "surface heights",
                expected,
                actual: mesh.z.len(),
            });
        }

        self.artists.push(Artist::Surface { mesh, colormap });
        Ok(ArtistId(self.artists.len() - 1))
    }

    fn set_limits(&mut self, limits: Limits3d) -> Result<()> {
        for (name, (lo, hi)) in [("x limits", limits.x), ("y limits", limits.y), ("z limits", limits.z)] {
            if !(lo.is_finite() && hi.is_finite()) || lo > hi {
                return Err(Error::InvalidParameter {
                    name,
                    reason: format!("expected finite lo <= hi, got ({lo}, {hi})"),
                });
            }
        }
        self.limits = Some(limits);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PerGroup;

    fn rc() -> RcParams {
        let mut rc = RcParams::default();
        rc.figure.dpi = 72.0;
        rc
    }

    #[test]
    fn test_cube_corners_distinct() {
        let corners = cube_corners();
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(corners[i], corners[j]);
            }
        }
    }

    #[test]
    fn test_plot3d_length_checks() {
        let mut axes = RasterAxes3d::new(&rc());
        assert!(axes.plot3d(&[0.0, 1.0], &[0.0], &[0.0, 1.0], Rgba::BLACK).is_err());
        assert!(axes.plot3d(&[0.0, 1.0], &[0.0, 1.0], &[0.0], Rgba::BLACK).is_err());
        assert_eq!(axes.artist_count(), 0);
    }

    #[test]
    fn test_limits_follow_data_until_set() {
        let mut axes = RasterAxes3d::new(&rc());
        axes.plot3d(&[0.0, 2.0], &[1.0, 3.0], &[-1.0, 4.0], Rgba::BLACK).unwrap();
        let limits = axes.limits().unwrap();
        assert_eq!(limits.x, (0.0, 2.0));
        assert_eq!(limits.y, (1.0, 3.0));
        assert_eq!(limits.z, (-1.0, 4.0));

        let fixed = Limits3d { x: (0.0, 10.0), y: (0.0, 10.0), z: (0.0, 10.0) };
        axes.set_limits(fixed).unwrap();
        assert_eq!(axes.limits(), Some(fixed));
    }

    #[test]
    fn test_set_limits_rejects_inverted() {
        let mut axes = RasterAxes3d::new(&rc());
        let bad = Limits3d { x: (1.0, 0.0), y: (0.0, 1.0), z: (0.0, 1.0) };
        assert!(matches!(
            axes.set_limits(bad),
            Err(Error::InvalidParameter { name: "x limits", .. })
        ));
    }

    #[test]
    fn test_surface_shape_checked() {
        let mut axes = RasterAxes3d::new(&rc());
        let mesh = SurfaceMesh { x: vec![0.0, 1.0], y: vec![0.0, 1.0], z: vec![0.0; 3] };
        assert!(axes.plot_surface(mesh, Colormap::Terrain).is_err());
    }

    #[test]
    fn test_polygon_colors_checked() {
        let mut axes = RasterAxes3d::new(&rc());
        let collection = PolyCollection {
            polygons: vec![vec![(0.0, 0.0), (1.0, 1.0), (1.0, 0.0)]; 2],
            depths: vec![0.0, 1.0],
            edgecolors: PerGroup::Each(vec![Rgba::BLACK]),
            facecolors: PerGroup::All(Rgba::WHITE),
            alpha: 1.0,
        };
        assert!(axes.add_polygons(collection).is_err());
    }

    #[test]
    fn test_render_line() {
        let mut axes = RasterAxes3d::new(&rc());
        axes.plot3d(&[0.0, 1.0], &[0.0, 1.0], &[0.0, 1.0], Rgba::RED).unwrap();
        let fb = axes.to_framebuffer(120, 120).unwrap();
        assert!(fb.count_pixels(Rgba::RED) > 20);
    }

    #[test]
    fn test_front_polygon_painted_last() {
        let mut axes = RasterAxes3d::new(&rc());
        // Same outline at two depths; with the default view larger y is farther away.
        let square = vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let collection = PolyCollection {
            polygons: vec![square.clone(), square],
            depths: vec![0.0, 1.0],
            edgecolors: PerGroup::All(Rgba::TRANSPARENT),
            facecolors: PerGroup::Each(vec![Rgba::RED, Rgba::BLUE]),
            alpha: 1.0,
        };
        axes.add_polygons(collection).unwrap();

        let fb = axes.to_framebuffer(160, 160).unwrap();
        assert!(fb.count_pixels(Rgba::RED) > fb.count_pixels(Rgba::BLUE));
    }

    #[test]
    fn test_render_surface_uses_colormap() {
        let mut axes = RasterAxes3d::new(&rc());
        let mesh = SurfaceMesh {
            x: vec![0.0, 1.0, 2.0],
            y: vec![0.0, 1.0],
            z: vec![0.0, 1.0, 2.0, 1.0, 2.0, 3.0],
        };
        axes.plot_surface(mesh, Colormap::Greyscale).unwrap();
        let fb = axes.to_framebuffer(160, 160).unwrap();
        let white = fb.count_pixels(Rgba::WHITE);
        assert!(white < 160 * 160);
    }
}
