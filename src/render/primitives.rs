//! Primitive rendering functions.
//!
//! Implements rasterization algorithms for the shapes the plot surfaces need.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};
use crate::style::{Hatch, HatchStroke};

// ============================================================================
// Lines
// ============================================================================

/// Draw a one-pixel line using Bresenham's algorithm.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.put(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a line segment of the given pixel width.
///
/// Widths up to 1.5 px fall back to Bresenham; wider strokes are filled as a quad.
pub fn draw_thick_line(fb: &mut Framebuffer, a: Point, b: Point, width: f32, color: Rgba) {
    if width <= 1.5 {
        draw_line(fb, a.x.round() as i32, a.y.round() as i32, b.x.round() as i32, b.y.round() as i32, color);
        return;
    }

    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        fill_circle(fb, a.x, a.y, width / 2.0, color);
        return;
    }

    let (nx, ny) = (-dy / len * width / 2.0, dx / len * width / 2.0);
    let quad = [
        Point::new(a.x + nx, a.y + ny),
        Point::new(b.x + nx, b.y + ny),
        Point::new(b.x - nx, b.y - ny),
        Point::new(a.x - nx, a.y - ny),
    ];
    fill_polygon(fb, &quad, color);
}

/// Draw a connected polyline.
pub fn draw_polyline(fb: &mut Framebuffer, points: &[Point], width: f32, color: Rgba) {
    for pair in points.windows(2) {
        draw_thick_line(fb, pair[0], pair[1], width, color);
    }
}

// ============================================================================
// Rectangles
// ============================================================================

/// Draw a rectangle outline whose stroke lies inside the rectangle.
pub fn draw_rect_outline(fb: &mut Framebuffer, rect: Rect, color: Rgba, thickness: u32) {
    let t = thickness.max(1) as i32;
    let x = rect.x.round() as i32;
    let y = rect.y.round() as i32;
    let w = rect.width.round() as i32;
    let h = rect.height.round() as i32;
    if w <= 0 || h <= 0 {
        return;
    }

    let t_w = t.min(w);
    let t_h = t.min(h);
    // Top and bottom edges span the full width; sides fill the gap between them.
    fb.fill_rect(x, y, w, t_h, color);
    if h > t_h {
        fb.fill_rect(x, y + h - t_h, w, t_h, color);
    }
    if h > 2 * t_h {
        fb.fill_rect(x, y + t_h, t_w, h - 2 * t_h, color);
        if w > t_w {
            fb.fill_rect(x + w - t_w, y + t_h, t_w, h - 2 * t_h, color);
        }
    }
}

/// Fill a rectangle given in float pixel coordinates.
pub fn fill_rect(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    fb.fill_rect(
        rect.x.round() as i32,
        rect.y.round() as i32,
        rect.width.round() as i32,
        rect.height.round() as i32,
        color,
    );
}

// ============================================================================
// Circles
// ============================================================================

/// Fill a disc of the given radius, touching each covered pixel once.
pub fn fill_circle(fb: &mut Framebuffer, cx: f32, cy: f32, radius: f32, color: Rgba) {
    if radius < 0.5 {
        if cx >= 0.0 && cy >= 0.0 {
            fb.put(cx as u32, cy as u32, color);
        }
        return;
    }

    let r2 = radius * radius;
    let y0 = (cy - radius).floor() as i32;
    let y1 = (cy + radius).ceil() as i32;
    let x0 = (cx - radius).floor() as i32;
    let x1 = (cx + radius).ceil() as i32;

    for py in y0.max(0)..=y1.min(fb.height() as i32 - 1) {
        let dy = py as f32 + 0.5 - cy;
        for px in x0.max(0)..=x1.min(fb.width() as i32 - 1) {
            let dx = px as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                fb.put(px as u32, py as u32, color);
            }
        }
    }
}

/// Fill a disc with an outline ring of `edge_width` pixels in `edge`.
pub fn fill_circle_outlined(
    fb: &mut Framebuffer,
    cx: f32,
    cy: f32,
    radius: f32,
    fill: Rgba,
    edge: Rgba,
    edge_width: f32,
) {
    if edge_width <= 0.0 {
        fill_circle(fb, cx, cy, radius, fill);
        return;
    }

    let outer = radius + edge_width / 2.0;
    let inner = (radius - edge_width / 2.0).max(0.0);
    let (outer2, inner2) = (outer * outer, inner * inner);

    let y0 = (cy - outer).floor() as i32;
    let y1 = (cy + outer).ceil() as i32;
    let x0 = (cx - outer).floor() as i32;
    let x1 = (cx + outer).ceil() as i32;

    for py in y0.max(0)..=y1.min(fb.height() as i32 - 1) {
        let dy = py as f32 + 0.5 - cy;
        for px in x0.max(0)..=x1.min(fb.width() as i32 - 1) {
            let dx = px as f32 + 0.5 - cx;
            let d2 = dx * dx + dy * dy;
            if d2 <= inner2 {
                fb.put(px as u32, py as u32, fill);
            } else if d2 <= outer2 {
                fb.put(px as u32, py as u32, edge);
            }
        }
    }
}

// ============================================================================
// Polygons
// ============================================================================

/// Fill a simple or self-intersecting polygon (even-odd rule, pixel-center sampling).
pub fn fill_polygon(fb: &mut Framebuffer, vertices: &[Point], color: Rgba) {
    if vertices.len() < 3 {
        return;
    }

    let (min_y, max_y) = vertices
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }

    let row_start = (min_y.floor() as i32).max(0);
    let row_end = (max_y.ceil() as i32).min(fb.height() as i32 - 1);
    let mut crossings: Vec<f32> = Vec::with_capacity(vertices.len());

    for py in row_start..=row_end {
        let yc = py as f32 + 0.5;
        crossings.clear();

        for (i, a) in vertices.iter().enumerate() {
            let b = vertices[(i + 1) % vertices.len()];
            if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for span in crossings.chunks_exact(2) {
            let start = ((span[0] - 0.5).ceil() as i32).max(0);
            let end = ((span[1] - 0.5).ceil() as i32).min(fb.width() as i32);
            for px in start..end {
                fb.put(px as u32, py as u32, color);
            }
        }
    }
}

/// Stroke the closed outline of a polygon.
pub fn stroke_polygon(fb: &mut Framebuffer, vertices: &[Point], width: f32, color: Rgba) {
    if vertices.len() < 2 {
        return;
    }
    draw_polyline(fb, vertices, width, color);
    if let (Some(&first), Some(&last)) = (vertices.first(), vertices.last()) {
        draw_thick_line(fb, last, first, width, color);
    }
}

// ============================================================================
// Hatching
// ============================================================================

/// Base distance between hatch strokes in pixels, divided by the stroke density.
pub const HATCH_SPACING: i32 = 12;

/// Paint a hatch pattern inside a rectangle.
///
/// Patterns are anchored to the framebuffer origin, so neighbouring bars line up.
pub fn hatch_rect(fb: &mut Framebuffer, rect: Rect, hatch: &Hatch, color: Rgba) {
    let x0 = (rect.x.round() as i32).max(0);
    let y0 = (rect.y.round() as i32).max(0);
    let x1 = ((rect.x + rect.width).round() as i32).min(fb.width() as i32);
    let y1 = ((rect.y + rect.height).round() as i32).min(fb.height() as i32);

    let strokes = hatch.strokes();
    for py in y0..y1 {
        for px in x0..x1 {
            if strokes.iter().any(|&(stroke, density)| hatch_hit(stroke, density, px, py)) {
                fb.put(px as u32, py as u32, color);
            }
        }
    }
}

fn hatch_hit(stroke: HatchStroke, density: u32, px: i32, py: i32) -> bool {
    let spacing = (HATCH_SPACING / density.max(1) as i32).max(3);
    let on = |v: i32| v.rem_euclid(spacing) == 0;
    // Offset from the centre of the pattern cell.
    let cell = |v: i32| v.rem_euclid(spacing) - spacing / 2;
    let mark_radius = spacing / 3;

    match stroke {
        HatchStroke::Diagonal => on(px + py),
        HatchStroke::BackDiagonal => on(px - py),
        HatchStroke::Vertical => on(px),
        HatchStroke::Horizontal => on(py),
        HatchStroke::Cross => on(px) || on(py),
        HatchStroke::DiagonalCross => on(px + py) || on(px - py),
        HatchStroke::Dots => {
            let (dx, dy) = (cell(px), cell(py));
            dx * dx + dy * dy <= 1
        }
        HatchStroke::Rings => {
            let (dx, dy) = (cell(px) as f32, cell(py) as f32);
            ((dx * dx + dy * dy).sqrt() - mark_radius as f32).abs() < 0.75
        }
        HatchStroke::Stars => {
            let (dx, dy) = (cell(px), cell(py));
            dx.abs().max(dy.abs()) <= mark_radius && (dx == 0 || dy == 0 || dx.abs() == dy.abs())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
