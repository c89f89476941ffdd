//! Global style parameters ("rc params").
//!
//! Supports YAML configuration with precedence: file > defaults. Every section and
//! field is optional; anything left out keeps its default.

use crate::error::{Error, Result};
use crate::style::LINE_WIDTH;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Figure size and resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureParams {
    /// Figure size in inches, `(width, height)`.
    pub figsize: (f32, f32),
    /// Pixels per inch.
    pub dpi: f32,
}

impl Default for FigureParams {
    fn default() -> Self {
        Self {
            figsize: (19.20, 10.80),
            dpi: 100.0,
        }
    }
}

/// Font settings. Kept as metadata for text-capable backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontParams {
    /// Font family.
    pub family: String,
    /// Size in points.
    pub size: f32,
    /// Weight name.
    pub weight: String,
}

impl Default for FontParams {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 45.0,
            weight: "bold".to_string(),
        }
    }
}

/// Axes frame settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesParams {
    /// Draw the right spine.
    pub spine_right: bool,
    /// Draw the top spine.
    pub spine_top: bool,
    /// Spine width in points.
    pub linewidth: f32,
}

impl Default for AxesParams {
    fn default() -> Self {
        Self {
            spine_right: false,
            spine_top: false,
            linewidth: LINE_WIDTH,
        }
    }
}

/// Major tick settings for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickParams {
    /// Tick stroke width in points.
    pub major_width: f32,
    /// Tick length in points.
    pub major_size: f32,
}

impl Default for TickParams {
    fn default() -> Self {
        Self {
            major_width: LINE_WIDTH,
            major_size: 15.0,
        }
    }
}

/// Global style parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RcParams {
    /// Figure settings.
    pub figure: FigureParams,
    /// Font settings.
    pub font: FontParams,
    /// Axes frame settings.
    pub axes: AxesParams,
    /// X tick settings.
    pub xtick: TickParams,
    /// Y tick settings.
    pub ytick: TickParams,
}

impl RcParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads parameters from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parses parameters from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        let params: Self = serde_yaml_ng::from_str(yaml).map_err(|e| Error::ConfigParse {
            line: e.location().map_or(0, |l| l.line()),
            message: e.to_string(),
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Loads parameters with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(params) => params,
            Err(e) => {
                log::debug!(
                    target: "trueno_plotkit",
                    "rc params from {} unusable ({e}), using defaults",
                    path.as_ref().display()
                );
                Self::default()
            }
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for non-positive sizes or resolution.
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.figure.figsize;
        if [w, h].iter().any(|v| v.is_nan() || *v <= 0.0) {
            return Err(Error::InvalidParameter {
                name: "figure.figsize",
                reason: format!("must be positive, got ({w}, {h})"),
            });
        }
        if self.figure.dpi.is_nan() || self.figure.dpi <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "figure.dpi",
                reason: format!("must be positive, got {}", self.figure.dpi),
            });
        }
        Ok(())
    }

    /// Pixel dimensions of a figure, `figsize × dpi`.
    #[must_use]
    pub fn figure_pixels(&self) -> (u32, u32) {
        let (w, h) = self.figure.figsize;
        (
            (w * self.figure.dpi).round().max(1.0) as u32,
            (h * self.figure.dpi).round().max(1.0) as u32,
        )
    }

    /// Convert a length in points (1/72 in) to pixels.
    #[must_use]
    pub fn points_to_pixels(&self, points: f32) -> f32 {
        points * self.figure.dpi / 72.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let rc = RcParams::new();
        assert_eq!(rc.figure_pixels(), (1920, 1080));
        assert_eq!(rc.font.family, "Arial");
        assert!(!rc.axes.spine_top);
        assert!(!rc.axes.spine_right);
        assert!((rc.xtick.major_size - 15.0).abs() < f32::EPSILON);
        assert!((rc.ytick.major_width - LINE_WIDTH).abs() < f32::EPSILON);
    }

    #[test]
    fn test_points_to_pixels() {
        let rc = RcParams::new();
        assert!((rc.points_to_pixels(72.0) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn test_parse_partial() {
        let yaml = r"
figure:
  dpi: 50
axes:
  spine_top: true
";
        let rc = RcParams::parse(yaml).unwrap();
        assert_eq!(rc.figure_pixels(), (960, 540));
        assert!(rc.axes.spine_top);
        assert!(!rc.axes.spine_right);
        assert!((rc.axes.linewidth - LINE_WIDTH).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_error_includes_line() {
        let yaml = "figure:\n  dpi: 100\nfont:\n  size: big\n";
        let err = RcParams::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains('4'), "Error should include line number");
    }

    #[test]
    fn test_parse_rejects_zero_dpi() {
        let result = RcParams::parse("figure:\n  dpi: 0\n");
        assert!(matches!(result, Err(Error::InvalidParameter { name: "figure.dpi", .. })));
    }

    #[test]
    fn test_parse_rejects_negative_figsize() {
        let result = RcParams::parse("figure:\n  figsize: [-4, 3]\n");
        assert!(matches!(result, Err(Error::InvalidParameter { name: "figure.figsize", .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "figure:\n  figsize: [4, 3]\n  dpi: 10").unwrap();

        let rc = RcParams::load(file.path()).unwrap();
        assert_eq!(rc.figure_pixels(), (40, 30));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let rc = RcParams::load_or_default("/nonexistent/plotkit-rc.yaml");
        assert_eq!(rc, RcParams::default());
    }
}
