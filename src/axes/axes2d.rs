//! 2-D raster axes.

use super::Panel;
use crate::color::Rgba;
use crate::config::RcParams;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::render::{
    draw_rect_outline, draw_thick_line, fill_circle, fill_circle_outlined, fill_rect, hatch_rect,
};
use crate::scale::{LinearScale, Scale};
use crate::stats::extent;
use crate::style::{BarStyle, ErrorBarStyle, ScatterStyle};
use crate::surface::{ArtistId, Surface};

/// Fraction of the data span added on each side of the limits.
const DATA_MARGIN: f32 = 0.05;

#[derive(Debug, Clone)]
enum Artist {
    Bars {
        positions: Vec<f32>,
        heights: Vec<f32>,
        style: BarStyle,
    },
    ErrorBars {
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
}

/// A 2-D axes that rasterizes bars, error bars and scatter markers.
#[derive(Debug, Clone)]
pub struct RasterAxes {
    rc: RcParams,
    artists: Vec<Artist>,
    xticks: Option<Vec<f32>>,
    xticklabels: Vec<String>,
    background: Rgba,
}

impl Default for RasterAxes {
    fn default() -> Self {
        Self::new(&RcParams::default())
    }
}

impl RasterAxes {
    /// Create empty axes using the given style parameters.
    #[must_use]
    pub fn new(rc: &RcParams) -> Self {
        Self {
            rc: rc.clone(),
            artists: Vec::new(),
            xticks: None,
            xticklabels: Vec::new(),
            background: Rgba::WHITE,
        }
    }

    /// Set the plot-area background.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Number of artists drawn so far.
    #[must_use]
    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    /// Explicit x tick positions, if set.
    #[must_use]
    pub fn xticks(&self) -> Option<&[f32]> {
        self.xticks.as_deref()
    }

    /// X tick labels.
    #[must_use]
    pub fn xticklabels(&self) -> &[String] {
        &self.xticklabels
    }

    /// Data limits `((x_min, x_max), (y_min, y_max))` before margins.
    ///
    /// Bars contribute their full width and the zero baseline; error bars their
    /// whiskers. `None` while nothing has been drawn.
    #[must_use]
    pub fn data_limits(&self) -> Option<((f32, f32), (f32, f32))> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();

        for artist in &self.artists {
            match artist {
                Artist::Bars { positions, heights, style } => {
                    let half = style.width / 2.0;
                    xs.extend(positions.iter().flat_map(|&x| [x - half, x + half]));
                    ys.push(0.0);
                    ys.extend_from_slice(heights);
                }
                Artist::ErrorBars { positions, y, yerr, .. } => {
                    xs.extend_from_slice(positions);
                    ys.extend(y.iter().zip(yerr).flat_map(|(&v, &e)| [v - e, v + e]));
                }
                Artist::Scatter { x, y, .. } => {
                    xs.extend_from_slice(x);
                    ys.extend_from_slice(y);
                }
            }
        }

        Some((extent(xs)?, extent(ys)?))
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

    fn px(&self, points: f32) -> f32 {
        self.rc.points_to_pixels(points)
    }

    fn plot_area(&self, viewport: Rect) -> Rect {
        let tick = self.px(self.rc.xtick.major_size.max(self.rc.ytick.major_size));
        viewport.inset(
            viewport.width * 0.08 + tick,
            viewport.height * 0.05,
            viewport.width * 0.04,
            viewport.height * 0.06 + tick,
        )
    }

    fn draw_artist(&self, fb: &mut Framebuffer, artist: &Artist, xs: &LinearScale, ys: &LinearScale) {
        match artist {
            Artist::Bars { positions, heights, style } => {
                log::trace!(target: "trueno_plotkit", "bars n={}", positions.len());
                self.draw_bars(fb, positions, heights, style, xs, ys);
            }
            Artist::ErrorBars { positions, y, yerr, style } => {
                log::trace!(target: "trueno_plotkit", "error bars n={}", positions.len());
                self.draw_error_bars(fb, positions, y, yerr, style, xs, ys);
            }
            Artist::Scatter { x, y, style } => {
                log::trace!(target: "trueno_plotkit", "scatter n={}", x.len());
                self.draw_scatter(fb, x, y, style, xs, ys);
            }
        }
    }

    fn draw_bars(
        &self,
        fb: &mut Framebuffer,
        positions: &[f32],
        heights: &[f32],
        style: &BarStyle,
        xs: &LinearScale,
        ys: &LinearScale,
    ) {
        let half = style.width / 2.0;
        let outline = self.px(style.linewidth).round() as u32;

        for (i, (&x, &h)) in positions.iter().zip(heights).enumerate() {
            let left = xs.scale(x - half);
            let right = xs.scale(x + half);
            let top = ys.scale(h.max(0.0));
            let bottom = ys.scale(h.min(0.0));
            let rect = Rect::new(left.min(right), top, (right - left).abs(), bottom - top);

            if style.fill {
                if let Some(face) = style.color.get(i) {
                    fill_rect(fb, rect, face.fade(style.alpha));
                }
            }

            let edge = style.edgecolor.get(i).map(|c| c.fade(style.alpha));
            if let (Some(hatches), Some(edge)) = (&style.hatch, edge) {
                if let Some(hatch) = hatches.get(i) {
                    hatch_rect(fb, rect, hatch, edge);
                }
            }
            if let (Some(edge), true) = (edge, style.linewidth > 0.0) {
                draw_rect_outline(fb, rect, edge, outline.max(1));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_error_bars(
        &self,
        fb: &mut Framebuffer,
        positions: &[f32],
        y: &[f32],
        yerr: &[f32],
        style: &ErrorBarStyle,
        xs: &LinearScale,
        ys: &LinearScale,
    ) {
        let color = style.ecolor.fade(style.alpha);
        let line = self.px(style.elinewidth);
        let cap_half = self.px(style.capsize);
        let cap_thick = self.px(style.capthick);

        for ((&x, &v), &e) in positions.iter().zip(y).zip(yerr) {
            let px = xs.scale(x);
            let lo = ys.scale(v - e);
            let hi = ys.scale(v + e);
            draw_thick_line(fb, Point::new(px, lo), Point::new(px, hi), line, color);

            if cap_half > 0.0 && cap_thick > 0.0 {
                for cap_y in [lo, hi] {
                    draw_thick_line(
                        fb,
                        Point::new(px - cap_half, cap_y),
                        Point::new(px + cap_half, cap_y),
                        cap_thick,
                        color,
                    );
                }
            }
        }
    }

    fn draw_scatter(
        &self,
        fb: &mut Framebuffer,
        x: &[f32],
        y: &[f32],
        style: &ScatterStyle,
        xs: &LinearScale,
        ys: &LinearScale,
    ) {
        let radius = self.px(style.size.max(0.0).sqrt() / 2.0);
        let edge_width = self.px(style.linewidth);

        for (i, (&vx, &vy)) in x.iter().zip(y).enumerate() {
            let Some(fill) = style.color.get(i) else {
                continue;
            };
            let fill = fill.fade(style.alpha);
            let (cx, cy) = (xs.scale(vx), ys.scale(vy));

            match style.edgecolor {
                Some(edge) if edge_width > 0.0 => {
                    fill_circle_outlined(fb, cx, cy, radius, fill, edge.fade(style.alpha), edge_width);
                }
                _ => fill_circle(fb, cx, cy, radius, fill),
            }
        }
    }

    fn draw_frame(&self, fb: &mut Framebuffer, area: Rect, xs: &LinearScale, ys: &LinearScale) {
        let spine = self.px(self.rc.axes.linewidth);
        let color = Rgba::BLACK;
        let (left, right, top, bottom) = (area.x, area.right(), area.y, area.bottom());

        draw_thick_line(fb, Point::new(left, top), Point::new(left, bottom), spine, color);
        draw_thick_line(fb, Point::new(left, bottom), Point::new(right, bottom), spine, color);
        if self.rc.axes.spine_top {
            draw_thick_line(fb, Point::new(left, top), Point::new(right, top), spine, color);
        }
        if self.rc.axes.spine_right {
            draw_thick_line(fb, Point::new(right, top), Point::new(right, bottom), spine, color);
        }

        let x_ticks = self.xticks.clone().unwrap_or_else(|| xs.ticks(6));
        let (x_len, x_width) = (self.px(self.rc.xtick.major_size), self.px(self.rc.xtick.major_width));
        for tick in x_ticks {
            let px = xs.scale(tick);
            if px >= left - 0.5 && px <= right + 0.5 {
                draw_thick_line(fb, Point::new(px, bottom), Point::new(px, bottom + x_len), x_width, color);
            }
        }

        let (y_len, y_width) = (self.px(self.rc.ytick.major_size), self.px(self.rc.ytick.major_width));
        for tick in ys.ticks(5) {
            let py = ys.scale(tick);
            if py >= top - 0.5 && py <= bottom + 0.5 {
                draw_thick_line(fb, Point::new(left - y_len, py), Point::new(left, py), y_width, color);
            }
        }
    }
}

impl Panel for RasterAxes {
    fn render_into(&self, fb: &mut Framebuffer, viewport: Rect) -> Result<()> {
        let area = self.plot_area(viewport);
        if area.width < 1.0 || area.height < 1.0 {
            return Err(Error::InvalidDimensions {
                width: viewport.width as u32,
                height: viewport.height as u32,
            });
        }

        let (x_ext, y_ext) = self.data_limits().unwrap_or(((0.0, 1.0), (0.0, 1.0)));
        let xs = LinearScale::padded(x_ext, DATA_MARGIN, (area.x, area.right()));
        let ys = LinearScale::padded(y_ext, DATA_MARGIN, (area.bottom(), area.y));

        log::debug!(
            target: "trueno_plotkit",
            "render axes: {} artists, x={:?} y={:?}",
            self.artists.len(),
            xs.domain(),
            ys.domain()
        );

        fill_rect(fb, area, self.background);
        for artist in &self.artists {
            self.draw_artist(fb, artist, &xs, &ys);
        }
        self.draw_frame(fb, area, &xs, &ys);
        Ok(())
    }
}

fn check_pair(x: &[f32], y: &[f32]) -> Result<()> {
    if x.len() == y.len() {
        Ok(())
    } else {
        Err(Error::DataLengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        })
    }
}

impl Surface for RasterAxes {
    fn bar(&mut self, positions: &[f32], heights: &[f32], style: &BarStyle) -> Result<ArtistId> {
        check_pair(positions, heights)?;
        let n = positions.len();
        style.edgecolor.check_len(n, "bar edgecolor")?;
        style.color.check_len(n, "bar color")?;
        if let Some(hatch) = &style.hatch {
            hatch.check_len(n, "bar hatch")?;
        }

        self.artists.push(Artist::Bars {
            positions: positions.to_vec(),
            heights: heights.to_vec(),
            style: style.clone(),
        });
        Ok(ArtistId(self.artists.len() - 1))
    }

    fn error_bar(
        &mut self,
        positions: &[f32],
        y: &[f32],
        yerr: &[f32],
        style: &ErrorBarStyle,
    ) -> Result<ArtistId> {
        check_pair(positions, y)?;
        check_pair(positions, yerr)?;

        self.artists.push(Artist::ErrorBars {
            positions: positions.to_vec(),
            y: y.to_vec(),
            yerr: yerr.to_vec(),
            style: style.clone(),
        });
        Ok(ArtistId(self.artists.len() - 1))
    }

    fn scatter(&mut self, x: &[f32], y: &[f32], style: &ScatterStyle) -> Result<ArtistId> {
        check_pair(x, y)?;
        style.color.check_len(x.len(), "scatter color")?;

        self.artists.push(Artist::Scatter {
            x: x.to_vec(),
            y: y.to_vec(),
            style: style.clone(),
        });
        Ok(ArtistId(self.artists.len() - 1))
    }

    fn set_xticks(&mut self, ticks: &[f32]) -> Result<()> {
        self.xticks = Some(ticks.to_vec());
        Ok(())
    }

    fn set_xticklabels(&mut self, labels: &[String]) -> Result<()> {
        if let Some(ticks) = &self.xticks {
            if ticks.len() != labels.len() {
                return Err(Error::LengthMismatch {
                    what: "xticklabels",
                    expected: ticks.len(),
                    actual: labels.len(),
                });
            }
        }
        self.xticklabels = labels.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Hatch, PerGroup};

    fn small_rc() -> RcParams {
        let mut rc = RcParams::default();
        rc.figure.dpi = 72.0;
        rc
    }

    #[test]
    fn test_bar_length_mismatch() {
        let mut axes = RasterAxes::new(&small_rc());
        let style = BarStyle::with_colors(PerGroup::All(Rgba::BLACK));
        let result = axes.bar(&[0.0, 1.0], &[1.0], &style);
        assert!(matches!(result, Err(Error::DataLengthMismatch { x_len: 2, y_len: 1 })));
        assert_eq!(axes.artist_count(), 0);
    }

    #[test]
    fn test_bar_color_count_checked() {
        let mut axes = RasterAxes::new(&small_rc());
        let style = BarStyle::with_colors(PerGroup::Each(vec![Rgba::RED]));
        let result = axes.bar(&[0.0, 1.0], &[1.0, 2.0], &style);
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn test_data_limits_include_baseline_and_whiskers() {
        let mut axes = RasterAxes::new(&small_rc());
        let bar = BarStyle::with_colors(PerGroup::All(Rgba::BLACK));
        axes.bar(&[0.0, 1.0], &[2.0, 5.0], &bar).unwrap();
        axes.error_bar(&[0.0, 1.0], &[2.0, 5.0], &[0.5, 1.0], &ErrorBarStyle::default())
            .unwrap();

        let ((x0, x1), (y0, y1)) = axes.data_limits().unwrap();
        assert!((x0 + 0.4).abs() < 1e-6);
        assert!((x1 - 1.4).abs() < 1e-6);
        assert!((y0 - 0.0).abs() < 1e-6);
        assert!((y1 - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_axes_render_frame_only() {
        let axes = RasterAxes::new(&small_rc());
        assert!(axes.data_limits().is_none());
        let fb = axes.to_framebuffer(200, 150).unwrap();
        assert!(fb.count_pixels(Rgba::BLACK) > 0);
    }

    #[test]
    fn test_render_filled_bar() {
        let mut axes = RasterAxes::new(&small_rc());
        let style = BarStyle::with_colors(PerGroup::All(Rgba::BLUE)).merged(
            &crate::style::BarOverrides::default().fill(true).linewidth(0.0),
        );
        axes.bar(&[0.0], &[1.0], &style).unwrap();

        let fb = axes.to_framebuffer(200, 200).unwrap();
        assert!(fb.count_pixels(Rgba::BLUE) > 1000);
    }

    #[test]
    fn test_unfilled_bar_leaves_interior_white() {
        let mut axes = RasterAxes::new(&small_rc());
        let style = BarStyle::with_colors(PerGroup::All(Rgba::RED));
        axes.bar(&[0.0], &[1.0], &style).unwrap();

        let fb = axes.to_framebuffer(200, 200).unwrap();
        let red = fb.count_pixels(Rgba::RED);
        assert!(red > 0);
        // Only the outline is painted, far less than the full bar area.
        assert!(red < 100 * 100);
    }

    #[test]
    fn test_hatch_adds_pixels() {
        let mut plain = RasterAxes::new(&small_rc());
        let mut hatched = RasterAxes::new(&small_rc());
        let style = BarStyle::with_colors(PerGroup::All(Rgba::RED));
        let hatch_style = style
            .clone()
            .merged(&crate::style::BarOverrides::default().hatch(Hatch::new("//").unwrap()));

        plain.bar(&[0.0], &[1.0], &style).unwrap();
        hatched.bar(&[0.0], &[1.0], &hatch_style).unwrap();

        let p = plain.to_framebuffer(200, 200).unwrap().count_pixels(Rgba::RED);
        let h = hatched.to_framebuffer(200, 200).unwrap().count_pixels(Rgba::RED);
        assert!(h > p);
    }

    #[test]
    fn test_scatter_colors_per_point() {
        let mut axes = RasterAxes::new(&small_rc());
        let style = ScatterStyle::with_colors(PerGroup::Each(vec![Rgba::RED, Rgba::BLUE]));
        axes.scatter(&[0.0, 1.0], &[0.0, 1.0], &style).unwrap();

        let fb = axes.to_framebuffer(200, 200).unwrap();
        assert!(fb.count_pixels(Rgba::RED) > 20);
        assert!(fb.count_pixels(Rgba::BLUE) > 20);
    }

    #[test]
    fn test_scatter_color_count_checked() {
        let mut axes = RasterAxes::new(&small_rc());
        let style = ScatterStyle::with_colors(PerGroup::Each(vec![Rgba::RED]));
        assert!(axes.scatter(&[0.0, 1.0], &[0.0, 1.0], &style).is_err());
    }

    #[test]
    fn test_xticklabels_must_match_ticks() {
        let mut axes = RasterAxes::new(&small_rc());
        axes.set_xticks(&[0.0, 1.0]).unwrap();
        assert!(axes.set_xticklabels(&["a".to_string()]).is_err());
        axes.set_xticklabels(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(axes.xticklabels().len(), 2);
        assert_eq!(axes.xticks(), Some(&[0.0, 1.0][..]));
    }

    #[test]
    fn test_tiny_viewport_rejected() {
        let axes = RasterAxes::new(&small_rc());
        let mut fb = Framebuffer::new(10, 10).unwrap();
        let result = axes.render_into(&mut fb, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(result.is_err());
    }
}
