//! Geometric primitives for visualization.
//!
//! 2-D points and rectangles for screen space, plus 3-D points and the
//! orthographic view projection used by the 3-D axes.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink by independent insets on each side, never below zero size.
    #[must_use]
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(
            self.x + left,
            self.y + top,
            (self.width - left - right).max(0.0),
            (self.height - top - bottom).max(0.0),
        )
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A 3D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    /// Z coordinate (up).
    pub z: f32,
}

impl Point3 {
    /// Create a new 3D point.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Orthographic view of the unit cube `[-0.5, 0.5]³`.
///
/// The camera orbits the z axis by `azimuth` and looks down by `elevation`
/// (both in degrees), matching the usual 3-D axes conventions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    sin_az: f32,
    cos_az: f32,
    sin_el: f32,
    cos_el: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(-60.0, 30.0)
    }
}

impl Projection {
    /// Create a projection for the given view angles in degrees.
    #[must_use]
    pub fn new(azimuth: f32, elevation: f32) -> Self {
        let (sin_az, cos_az) = azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = elevation.to_radians().sin_cos();
        Self { sin_az, cos_az, sin_el, cos_el }
    }

    /// Project a point of the unit cube.
    ///
    /// Returns screen `(u, v)` with `v` pointing up, and a depth that grows towards
    /// the viewer.
    #[must_use]
    pub fn project(&self, p: Point3) -> (Point, f32) {
        // Rotate around z so the camera's right axis becomes u.
        let u = -p.x * self.sin_az + p.y * self.cos_az;
        let toward = p.x * self.cos_az + p.y * self.sin_az;
        let v = p.z * self.cos_el - toward * self.sin_el;
        let depth = toward * self.cos_el + p.z * self.sin_el;
        (Point::new(u, v), depth)
    }
}
