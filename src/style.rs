//! Per-element styles, their defaults and caller overrides.
//!
//! Every drawable element (bar, error bar, scatter) has a fully resolved style type
//! and an override record whose fields are all optional. Resolving a style is a
//! shallow, field-by-field merge: a set override field replaces the default, an unset
//! one keeps it.

use crate::color::Rgba;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default stroke width shared by bar outlines, error bars and spines.
pub const LINE_WIDTH: f32 = 5.0;

// ============================================================================
// Broadcast values
// ============================================================================

/// A value given either once for every group or once per group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerGroup<T> {
    /// One value applied to every group.
    All(T),
    /// One value per group, in group order.
    Each(Vec<T>),
}

impl<T: Clone> PerGroup<T> {
    /// Value for group `index`. `All` answers for any index.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            Self::All(value) => Some(value),
            Self::Each(values) => values.get(index),
        }
    }

    /// Number of explicit entries, `None` for `All`.
    pub fn explicit_len(&self) -> Option<usize> {
        match self {
            Self::All(_) => None,
            Self::Each(values) => Some(values.len()),
        }
    }

    /// Check that an `Each` sequence has exactly `groups` entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] naming `what` when the lengths differ.
    pub fn check_len(&self, groups: usize, what: &'static str) -> Result<()> {
        match self.explicit_len() {
            Some(actual) if actual != groups => Err(Error::LengthMismatch {
                what,
                expected: groups,
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// Expand to exactly one value per group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] when an `Each` sequence has the wrong length.
    pub fn expand(&self, groups: usize, what: &'static str) -> Result<Vec<T>> {
        self.check_len(groups, what)?;
        Ok(match self {
            Self::All(value) => vec![value.clone(); groups],
            Self::Each(values) => values.clone(),
        })
    }

    /// Broadcast per-group values to per-sample values.
    ///
    /// `All` stays `All`; `Each` repeats group `i`'s value `counts[i]` times,
    /// concatenated in group order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] when an `Each` sequence has the wrong length.
    pub fn repeat_each(&self, counts: &[usize], what: &'static str) -> Result<Self> {
        self.check_len(counts.len(), what)?;
        Ok(match self {
            Self::All(value) => Self::All(value.clone()),
            Self::Each(values) => Self::Each(
                values
                    .iter()
                    .zip(counts)
                    .flat_map(|(value, &n)| std::iter::repeat(value.clone()).take(n))
                    .collect(),
            ),
        })
    }
}

impl From<Rgba> for PerGroup<Rgba> {
    fn from(color: Rgba) -> Self {
        Self::All(color)
    }
}

impl From<f32> for PerGroup<f32> {
    fn from(value: f32) -> Self {
        Self::All(value)
    }
}

impl From<Hatch> for PerGroup<Hatch> {
    fn from(hatch: Hatch) -> Self {
        Self::All(hatch)
    }
}

impl<T> From<Vec<T>> for PerGroup<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Each(values)
    }
}

impl<T: Clone> From<&[T]> for PerGroup<T> {
    fn from(values: &[T]) -> Self {
        Self::Each(values.to_vec())
    }
}

// ============================================================================
// Hatching
// ============================================================================

/// One family of hatch strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatchStroke {
    /// `/` diagonal lines.
    Diagonal,
    /// `\` back-diagonal lines.
    BackDiagonal,
    /// `|` vertical lines.
    Vertical,
    /// `-` horizontal lines.
    Horizontal,
    /// `+` horizontal and vertical lines.
    Cross,
    /// `x` both diagonals.
    DiagonalCross,
    /// `.` small dots.
    Dots,
    /// `o` / `O` rings.
    Rings,
    /// `*` stars.
    Stars,
}

impl HatchStroke {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '/' => Self::Diagonal,
            '\\' => Self::BackDiagonal,
            '|' => Self::Vertical,
            '-' => Self::Horizontal,
            '+' => Self::Cross,
            'x' | 'X' => Self::DiagonalCross,
            '.' => Self::Dots,
            'o' | 'O' => Self::Rings,
            '*' => Self::Stars,
            _ => return None,
        })
    }
}

/// A hatch pattern such as `"//"` or `"**"`.
///
/// Each character adds one stroke family; repeating a character increases its density.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hatch(String);

impl Hatch {
    /// Parse a hatch pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHatch`] for empty patterns or unknown characters.
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() || pattern.chars().any(|c| HatchStroke::from_char(c).is_none()) {
            return Err(Error::InvalidHatch(pattern.to_string()));
        }
        Ok(Self(pattern.to_string()))
    }

    /// The pattern string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stroke families with their density (number of repeats), in first-seen order.
    pub fn strokes(&self) -> Vec<(HatchStroke, u32)> {
        let mut strokes: Vec<(HatchStroke, u32)> = Vec::new();
        for stroke in self.0.chars().filter_map(HatchStroke::from_char) {
            match strokes.iter_mut().find(|(s, _)| *s == stroke) {
                Some((_, density)) => *density += 1,
                None => strokes.push((stroke, 1)),
            }
        }
        strokes
    }
}

impl TryFrom<String> for Hatch {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Hatch> for String {
    fn from(hatch: Hatch) -> Self {
        hatch.0
    }
}

impl fmt::Display for Hatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Bar
// ============================================================================

/// Resolved bar style.
#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    /// Outline color(s).
    pub edgecolor: PerGroup<Rgba>,
    /// Face color(s), used only when `fill` is set.
    pub color: PerGroup<Rgba>,
    /// Whether the bar face is painted.
    pub fill: bool,
    /// Outline width in points.
    pub linewidth: f32,
    /// Bar width in data units.
    pub width: f32,
    /// Optional hatch pattern(s), drawn in the edge color.
    pub hatch: Option<PerGroup<Hatch>>,
    /// Opacity (0.0 - 1.0).
    pub alpha: f32,
}

impl BarStyle {
    /// Default bar style: unfilled bars outlined in the group colors.
    #[must_use]
    pub fn with_colors(colors: PerGroup<Rgba>) -> Self {
        Self {
            edgecolor: colors.clone(),
            color: colors,
            fill: false,
            linewidth: LINE_WIDTH,
            width: 0.8,
            hatch: None,
            alpha: 1.0,
        }
    }

    /// Apply caller overrides on top of this style.
    #[must_use]
    pub fn merged(mut self, overrides: &BarOverrides) -> Self {
        if let Some(edgecolor) = &overrides.edgecolor {
            self.edgecolor = edgecolor.clone();
        }
        if let Some(color) = &overrides.color {
            self.color = color.clone();
        }
        if let Some(fill) = overrides.fill {
            self.fill = fill;
        }
        if let Some(linewidth) = overrides.linewidth {
            self.linewidth = linewidth;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(hatch) = &overrides.hatch {
            self.hatch = Some(hatch.clone());
        }
        if let Some(alpha) = overrides.alpha {
            self.alpha = alpha;
        }
        self
    }
}

/// Caller overrides for [`BarStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarOverrides {
    /// Outline color(s).
    pub edgecolor: Option<PerGroup<Rgba>>,
    /// Face color(s).
    pub color: Option<PerGroup<Rgba>>,
    /// Paint the bar face.
    pub fill: Option<bool>,
    /// Outline width in points.
    pub linewidth: Option<f32>,
    /// Bar width in data units.
    pub width: Option<f32>,
    /// Hatch pattern(s).
    pub hatch: Option<PerGroup<Hatch>>,
    /// Opacity.
    pub alpha: Option<f32>,
}

impl BarOverrides {
    /// Override the outline color(s).
    #[must_use]
    pub fn edgecolor(mut self, color: impl Into<PerGroup<Rgba>>) -> Self {
        self.edgecolor = Some(color.into());
        self
    }

    /// Override the face color(s).
    #[must_use]
    pub fn color(mut self, color: impl Into<PerGroup<Rgba>>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Override whether faces are painted.
    #[must_use]
    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Override the outline width.
    #[must_use]
    pub fn linewidth(mut self, linewidth: f32) -> Self {
        self.linewidth = Some(linewidth);
        self
    }

    /// Override the bar width.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Override the hatch pattern(s).
    #[must_use]
    pub fn hatch(mut self, hatch: impl Into<PerGroup<Hatch>>) -> Self {
        self.hatch = Some(hatch.into());
        self
    }

    /// Override the opacity.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

// ============================================================================
// Error bar
// ============================================================================

/// Resolved error-bar style.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarStyle {
    /// Line and cap color.
    pub ecolor: Rgba,
    /// Half-length of the caps in points.
    pub capsize: f32,
    /// Cap stroke thickness in points.
    pub capthick: f32,
    /// Vertical line width in points.
    pub elinewidth: f32,
    /// Opacity (0.0 - 1.0).
    pub alpha: f32,
}

impl Default for ErrorBarStyle {
    fn default() -> Self {
        Self {
            ecolor: Rgba::BLACK,
            capsize: 10.0,
            capthick: 5.0,
            elinewidth: LINE_WIDTH,
            alpha: 1.0,
        }
    }
}

impl ErrorBarStyle {
    /// Apply caller overrides on top of this style.
    #[must_use]
    pub fn merged(mut self, overrides: &ErrorBarOverrides) -> Self {
        if let Some(ecolor) = overrides.ecolor {
            self.ecolor = ecolor;
        }
        if let Some(capsize) = overrides.capsize {
            self.capsize = capsize;
        }
        if let Some(capthick) = overrides.capthick {
            self.capthick = capthick;
        }
        if let Some(elinewidth) = overrides.elinewidth {
            self.elinewidth = elinewidth;
        }
        if let Some(alpha) = overrides.alpha {
            self.alpha = alpha;
        }
        self
    }
}

/// Caller overrides for [`ErrorBarStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBarOverrides {
    /// Line and cap color.
    pub ecolor: Option<Rgba>,
    /// Cap half-length.
    pub capsize: Option<f32>,
    /// Cap thickness.
    pub capthick: Option<f32>,
    /// Line width.
    pub elinewidth: Option<f32>,
    /// Opacity.
    pub alpha: Option<f32>,
}

impl ErrorBarOverrides {
    /// Override the line color.
    #[must_use]
    pub fn ecolor(mut self, color: Rgba) -> Self {
        self.ecolor = Some(color);
        self
    }

    /// Override the cap half-length.
    #[must_use]
    pub fn capsize(mut self, capsize: f32) -> Self {
        self.capsize = Some(capsize);
        self
    }

    /// Override the cap thickness.
    #[must_use]
    pub fn capthick(mut self, capthick: f32) -> Self {
        self.capthick = Some(capthick);
        self
    }

    /// Override the line width.
    #[must_use]
    pub fn elinewidth(mut self, elinewidth: f32) -> Self {
        self.elinewidth = Some(elinewidth);
        self
    }

    /// Override the opacity.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

// ============================================================================
// Scatter
// ============================================================================

/// Resolved scatter style.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterStyle {
    /// Marker color, once for all points or once per point.
    pub color: PerGroup<Rgba>,
    /// Marker area in points².
    pub size: f32,
    /// Marker outline color.
    pub edgecolor: Option<Rgba>,
    /// Marker outline width in points.
    pub linewidth: f32,
    /// Opacity (0.0 - 1.0).
    pub alpha: f32,
}

impl ScatterStyle {
    /// Default scatter style with the given point colors.
    #[must_use]
    pub fn with_colors(colors: PerGroup<Rgba>) -> Self {
        Self {
            color: colors,
            size: 150.0,
            edgecolor: None,
            linewidth: 0.0,
            alpha: 1.0,
        }
    }

    /// Apply caller overrides on top of this style.
    #[must_use]
    pub fn merged(mut self, overrides: &ScatterOverrides) -> Self {
        if let Some(color) = &overrides.color {
            self.color = color.clone();
        }
        if let Some(size) = overrides.size {
            self.size = size;
        }
        if let Some(edgecolor) = overrides.edgecolor {
            self.edgecolor = Some(edgecolor);
        }
        if let Some(linewidth) = overrides.linewidth {
            self.linewidth = linewidth;
        }
        if let Some(alpha) = overrides.alpha {
            self.alpha = alpha;
        }
        self
    }
}

/// Caller overrides for [`ScatterStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterOverrides {
    /// Marker color(s).
    pub color: Option<PerGroup<Rgba>>,
    /// Marker area in points².
    #[serde(alias = "s")]
    pub size: Option<f32>,
    /// Marker outline color.
    pub edgecolor: Option<Rgba>,
    /// Marker outline width.
    pub linewidth: Option<f32>,
    /// Opacity.
    pub alpha: Option<f32>,
}

impl ScatterOverrides {
    /// Override the marker color(s).
    #[must_use]
    pub fn color(mut self, color: impl Into<PerGroup<Rgba>>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Override the marker area.
    #[must_use]
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Override the marker outline color.
    #[must_use]
    pub fn edgecolor(mut self, color: Rgba) -> Self {
        self.edgecolor = Some(color);
        self
    }

    /// Override the marker outline width.
    #[must_use]
    pub fn linewidth(mut self, linewidth: f32) -> Self {
        self.linewidth = Some(linewidth);
        self
    }

    /// Override the opacity.
    #[must_use]
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = Some(alpha);
        self
    }
}

// ============================================================================
// Bundle
// ============================================================================

/// Overrides for all three elements of an error plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    /// Bar overrides.
    pub bar: Option<BarOverrides>,
    /// Error-bar overrides.
    pub error: Option<ErrorBarOverrides>,
    /// Scatter overrides.
    pub scatter: Option<ScatterOverrides>,
}

impl StyleOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bar overrides.
    #[must_use]
    pub fn bar(mut self, bar: BarOverrides) -> Self {
        self.bar = Some(bar);
        self
    }

    /// Set the error-bar overrides.
    #[must_use]
    pub fn error(mut self, error: ErrorBarOverrides) -> Self {
        self.error = Some(error);
        self
    }

    /// Set the scatter overrides.
    #[must_use]
    pub fn scatter(mut self, scatter: ScatterOverrides) -> Self {
        self.scatter = Some(scatter);
        self
    }

    /// Parse overrides from YAML with `bar`, `error` and `scatter` sections.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] with the failing line.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| Error::ConfigParse {
            line: e.location().map_or(0, |l| l.line()),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_group_expand() {
        assert_eq!(PerGroup::All(0.5).expand(3, "shift").unwrap(), vec![0.5, 0.5, 0.5]);
        assert_eq!(
            PerGroup::Each(vec![0.1, 0.2]).expand(2, "shift").unwrap(),
            vec![0.1, 0.2]
        );
        let err = PerGroup::Each(vec![0.1]).expand(2, "shift").unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                what: "shift",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_per_group_repeat_each() {
        let colors = PerGroup::Each(vec![Rgba::RED, Rgba::BLUE]);
        let per_sample = colors.repeat_each(&[2, 1], "colors").unwrap();
        assert_eq!(per_sample, PerGroup::Each(vec![Rgba::RED, Rgba::RED, Rgba::BLUE]));

        let single = PerGroup::All(Rgba::BLACK).repeat_each(&[4, 4], "colors").unwrap();
        assert_eq!(single, PerGroup::All(Rgba::BLACK));
    }

    #[test]
    fn test_per_group_get() {
        let all = PerGroup::All(Rgba::RED);
        assert_eq!(all.get(99), Some(&Rgba::RED));
        let each = PerGroup::Each(vec![Rgba::RED]);
        assert_eq!(each.get(1), None);
    }

    #[test]
    fn test_hatch_parse_and_density() {
        let hatch = Hatch::new("//**").unwrap();
        assert_eq!(
            hatch.strokes(),
            vec![(HatchStroke::Diagonal, 2), (HatchStroke::Stars, 2)]
        );
        assert!(Hatch::new("").is_err());
        assert!(Hatch::new("/#").is_err());
    }

    #[test]
    fn test_bar_override_keeps_unspecified_fields() {
        let defaults = BarStyle::with_colors(PerGroup::All(Rgba::BLACK));
        let overrides = BarOverrides::default().hatch(PerGroup::Each(vec![
            Hatch::new("//").unwrap(),
            Hatch::new("**").unwrap(),
        ]));

        let merged = defaults.clone().merged(&overrides);
        assert!(merged.hatch.is_some());
        assert!((merged.linewidth - LINE_WIDTH).abs() < f32::EPSILON);
        assert_eq!(merged.edgecolor, defaults.edgecolor);
        assert!(!merged.fill);
    }

    #[test]
    fn test_error_override() {
        let merged = ErrorBarStyle::default().merged(&ErrorBarOverrides::default().capsize(50.0));
        assert!((merged.capsize - 50.0).abs() < f32::EPSILON);
        assert!((merged.capthick - 5.0).abs() < f32::EPSILON);
        assert_eq!(merged.ecolor, Rgba::BLACK);

        let faded = ErrorBarStyle::default().merged(&ErrorBarOverrides::default().alpha(0.25));
        assert!((faded.alpha - 0.25).abs() < f32::EPSILON);
        assert!((faded.capsize - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_scatter_override() {
        let merged = ScatterStyle::with_colors(PerGroup::All(Rgba::RED))
            .merged(&ScatterOverrides::default().edgecolor(Rgba::BLACK).linewidth(2.0));
        assert_eq!(merged.edgecolor, Some(Rgba::BLACK));
        assert!((merged.size - 150.0).abs() < f32::EPSILON);
        assert_eq!(merged.color, PerGroup::All(Rgba::RED));
    }

    #[test]
    fn test_overrides_from_yaml() {
        let yaml = r#"
bar:
  hatch: ["//", "**"]
scatter:
  edgecolor: k
  linewidth: 2
  s: 80
error:
  capsize: 50
"#;
        let overrides = StyleOverrides::from_yaml(yaml).unwrap();
        let bar = overrides.bar.unwrap();
        assert_eq!(
            bar.hatch,
            Some(PerGroup::Each(vec![Hatch::new("//").unwrap(), Hatch::new("**").unwrap()]))
        );
        assert_eq!(bar.linewidth, None);
        let scatter = overrides.scatter.unwrap();
        assert_eq!(scatter.edgecolor, Some(Rgba::BLACK));
        assert_eq!(scatter.size, Some(80.0));
        assert_eq!(overrides.error.unwrap().capsize, Some(50.0));
    }

    #[test]
    fn test_overrides_yaml_single_color() {
        let overrides = StyleOverrides::from_yaml("bar:\n  color: red\n  fill: true\n").unwrap();
        let bar = overrides.bar.unwrap();
        assert_eq!(bar.color, Some(PerGroup::All(Rgba::RED)));
        assert_eq!(bar.fill, Some(true));
    }

    #[test]
    fn test_overrides_yaml_bad_hatch() {
        let result = StyleOverrides::from_yaml("bar:\n  hatch: \"#\"\n");
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }
}
