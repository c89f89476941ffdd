//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use crate::color::Rgba;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Create a scale over a data extent widened by `margin` (fraction of the span)
    /// on both sides.
    ///
    /// A zero-width extent is widened to ±0.5 (or ±5 % of its magnitude) so a single
    /// value still maps to the middle of the range.
    #[must_use]
    pub fn padded(extent: (f32, f32), margin: f32, range: (f32, f32)) -> Self {
        let (lo, hi) = widen(extent);
        let pad = (hi - lo) * margin;
        Self {
            domain_min: lo - pad,
            domain_max: hi + pad,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// "Nice" tick positions inside the domain, roughly `count` of them.
    ///
    /// Steps are 1, 2 or 5 times a power of ten.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let (lo, hi) = if self.domain_min <= self.domain_max {
            (self.domain_min, self.domain_max)
        } else {
            (self.domain_max, self.domain_min)
        };
        let step = nice_step(hi - lo, count.max(1));
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f32 * step).collect()
    }
}

fn widen((lo, hi): (f32, f32)) -> (f32, f32) {
    if (hi - lo).abs() > f32::EPSILON {
        return (lo, hi);
    }
    let half = if lo.abs() > f32::EPSILON { lo.abs() * 0.05 } else { 0.5 };
    (lo - half, hi + half)
}

fn nice_step(span: f32, count: usize) -> f32 {
    let raw = span / count as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    let error = raw / magnitude;
    let factor = if error >= 7.07 {
        10.0
    } else if error >= 3.16 {
        5.0
    } else if error >= 1.41 {
        2.0
    } else {
        1.0
    };
    factor * magnitude
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Color scale for mapping values to colors through positioned color stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<(f32, Rgba)>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Create a color scale with evenly spaced stops.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f32, f32)) -> Result<Self> {
        let last = colors.len().saturating_sub(1).max(1) as f32;
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i as f32 / last, c))
            .collect();
        Self::with_stops(stops, domain)
    }

    /// Create a color scale from `(position, color)` stops with positions in `0..=1`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no stops, positions are unsorted, or the domain
    /// is empty.
    pub fn with_stops(stops: Vec<(f32, Rgba)>, domain: (f32, f32)) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }
        if stops.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(Error::ScaleDomain("Color stops must be sorted".to_string()));
        }
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { stops, domain_min: domain.0, domain_max: domain.1 })
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        let upper = self.stops.iter().position(|&(p, _)| p >= t);
        match upper {
            None => self.stops[self.stops.len() - 1].1,
            Some(0) => self.stops[0].1,
            Some(i) => {
                let (p0, c0) = self.stops[i - 1];
                let (p1, c1) = self.stops[i];
                let span = p1 - p0;
                if span <= f32::EPSILON {
                    c1
                } else {
                    c0.lerp(c1, (t - p0) / span)
                }
            }
        }
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (self.stops[0].1, self.stops[self.stops.len() - 1].1)
    }
}

/// Named colormaps for surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Deep blue through green and brown to white, like a relief map.
    #[default]
    Terrain,
    /// Viridis (perceptually uniform, colorblind-safe).
    Viridis,
    /// Black to white.
    Greyscale,
}

impl Colormap {
    fn stops(self) -> Vec<(f32, Rgba)> {
        match self {
            Self::Terrain => vec![
                (0.00, Rgba::rgb(51, 51, 153)),
                (0.15, Rgba::rgb(0, 153, 255)),
                (0.25, Rgba::rgb(0, 204, 102)),
                (0.50, Rgba::rgb(255, 255, 153)),
                (0.75, Rgba::rgb(128, 92, 84)),
                (1.00, Rgba::rgb(255, 255, 255)),
            ],
            Self::Viridis => vec![
                (0.00, Rgba::rgb(68, 1, 84)),
                (0.25, Rgba::rgb(59, 82, 139)),
                (0.50, Rgba::rgb(33, 145, 140)),
                (0.75, Rgba::rgb(94, 201, 98)),
                (1.00, Rgba::rgb(253, 231, 37)),
            ],
            Self::Greyscale => vec![(0.0, Rgba::BLACK), (1.0, Rgba::WHITE)],
        }
    }

    /// Color scale of this map over `domain`.
    ///
    /// A zero-width domain is widened so every value maps to the middle color.
    #[must_use]
    pub fn over(self, domain: (f32, f32)) -> ColorScale {
        let (lo, hi) = widen(domain);
        ColorScale {
            stops: self.stops(),
            domain_min: lo,
            domain_max: hi,
        }
    }
}
