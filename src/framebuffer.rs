//! RGBA pixel buffer that every raster surface draws into.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Tightly packed RGBA framebuffer in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// Each pixel is 4 bytes: [R, G, B, A].
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a new, fully transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_plotkit::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, ready for encoders.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Fill a rectangle with signed coordinates, clipped to the buffer.
    ///
    /// Translucent colors are alpha-blended.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let x1 = x.max(0);
        let y1 = y.max(0);
        let x2 = x.saturating_add(w).min(self.width as i32);
        let y2 = y.saturating_add(h).min(self.height as i32);

        for py in y1..y2 {
            for px in x1..x2 {
                self.put(px as u32, py as u32, color);
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let idx = self.index(x, y)?;
        let p = &self.pixels[idx..idx + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// Overwrite a pixel. Does nothing out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
        }
    }

    /// Blend a color over a pixel ("over" compositing). Does nothing out of bounds.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let Some(idx) = self.index(x, y) else {
            return;
        };

        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        let src = color.to_array();
        for c in 0..3 {
            let s = f32::from(src[c]) / 255.0;
            let d = f32::from(self.pixels[idx + c]) / 255.0;
            let out = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
            self.pixels[idx + c] = (out * 255.0).round() as u8;
        }
        self.pixels[idx + 3] = (out_a * 255.0).round() as u8;
    }

    /// Write a pixel, blending when the color is translucent.
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, color: Rgba) {
        if color.a == 255 {
            self.set_pixel(x, y, color);
        } else if color.a > 0 {
            self.blend_pixel(x, y, color);
        }
    }

    /// Copy `other` into this buffer with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, other: &Framebuffer, x: i32, y: i32) {
        for sy in 0..other.height {
            for sx in 0..other.width {
                let (dx, dy) = (x + sx as i32, y + sy as i32);
                if dx < 0 || dy < 0 {
                    continue;
                }
                if let Some(color) = other.get_pixel(sx, sy) {
                    self.put(dx as u32, dy as u32, color);
                }
            }
        }
    }

    /// Count pixels exactly equal to `color`.
    #[must_use]
    pub fn count_pixels(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        self.pixels.chunks_exact(4).filter(|p| *p == rgba).count()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| ((y as usize) * (self.width as usize) + x as usize) * 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_framebuffer() {
        let fb = Framebuffer::new(100, 50).unwrap();
        assert_eq!(fb.width(), 100);
        assert_eq!(fb.height(), 50);
        assert_eq!(fb.pixels().len(), 100 * 50 * 4);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Framebuffer::new(0, 100).is_err());
        assert!(Framebuffer::new(100, 0).is_err());
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::RED);
        assert_eq!(fb.count_pixels(Rgba::RED), 100);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_rect(-5, -5, 10, 10, Rgba::BLUE);

        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(4, 4), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
        assert_eq!(fb.count_pixels(Rgba::BLUE), 25);
    }

    #[test]
    fn test_set_get_pixel_bounds() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.set_pixel(5, 5, Rgba::BLUE);
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::BLUE));
        fb.set_pixel(50, 5, Rgba::BLUE);
        assert_eq!(fb.get_pixel(50, 5), None);
    }

    #[test]
    fn test_blend_pixel() {
        let mut fb = Framebuffer::new(10, 10).unwrap();
        fb.clear(Rgba::WHITE);
        fb.blend_pixel(5, 5, Rgba::new(255, 0, 0, 128));

        let result = fb.get_pixel(5, 5).unwrap();
        assert_eq!(result.r, 255);
        assert!(result.g > 100 && result.g < 150);
        assert_eq!(result.a, 255);
    }

    #[test]
    fn test_put_ignores_transparent() {
        let mut fb = Framebuffer::new(4, 4).unwrap();
        fb.clear(Rgba::WHITE);
        fb.put(1, 1, Rgba::TRANSPARENT);
        assert_eq!(fb.get_pixel(1, 1), Some(Rgba::WHITE));
    }

    #[test]
    fn test_blit_offsets() {
        let mut dst = Framebuffer::new(10, 10).unwrap();
        dst.clear(Rgba::WHITE);
        let mut src = Framebuffer::new(2, 2).unwrap();
        src.clear(Rgba::BLACK);

        dst.blit(&src, 8, -1);
        assert_eq!(dst.get_pixel(8, 0), Some(Rgba::BLACK));
        assert_eq!(dst.get_pixel(9, 0), Some(Rgba::BLACK));
        assert_eq!(dst.count_pixels(Rgba::BLACK), 2);
    }
}
