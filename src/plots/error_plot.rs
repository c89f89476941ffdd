//! Composite bar / error-bar / scatter plot of grouped samples.
//!
//! Each group becomes a bar at its mean, an error bar of its dispersion, and a column
//! of raw samples shifted to the right of the bar center so the points do not sit on
//! the error-bar line.

use crate::color::Rgba;
use crate::error::Result;
use crate::stats::{group_stats, Dispersion, GroupStats};
use crate::style::{BarStyle, ErrorBarStyle, PerGroup, ScatterStyle, StyleOverrides};
use crate::surface::Surface;

/// Default horizontal offset of the sample scatter.
pub const DEFAULT_SHIFT: f32 = 0.1;

/// Builder for the composite statistical plot.
///
/// # Example
///
/// ```
/// use trueno_plotkit::prelude::*;
///
/// let mut surface = RecordingSurface::new();
/// ErrorPlot::new()
///     .data(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])
///     .colors(vec![Rgba::RED, Rgba::BLUE])
///     .dispersion(Dispersion::Se)
///     .render(&mut surface)
///     .unwrap();
/// assert_eq!(surface.calls().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ErrorPlot {
    data: Vec<Vec<f32>>,
    colors: PerGroup<Rgba>,
    shift: PerGroup<f32>,
    dispersion: Dispersion,
    overrides: StyleOverrides,
}

impl Default for ErrorPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorPlot {
    /// Create a builder with black markers, a 0.1 shift and SD error bars.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            colors: PerGroup::All(Rgba::BLACK),
            shift: PerGroup::All(DEFAULT_SHIFT),
            dispersion: Dispersion::Sd,
            overrides: StyleOverrides::default(),
        }
    }

    /// Set the groups; group order is bar order.
    #[must_use]
    pub fn data(mut self, groups: &[Vec<f32>]) -> Self {
        self.data = groups.to_vec();
        self
    }

    /// Set one color for all groups or one per group.
    #[must_use]
    pub fn colors(mut self, colors: impl Into<PerGroup<Rgba>>) -> Self {
        self.colors = colors.into();
        self
    }

    /// Set one scatter shift for all groups or one per group.
    #[must_use]
    pub fn shift(mut self, shift: impl Into<PerGroup<f32>>) -> Self {
        self.shift = shift.into();
        self
    }

    /// Choose SD or SE error bars.
    #[must_use]
    pub fn dispersion(mut self, dispersion: Dispersion) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// Set per-element style overrides.
    #[must_use]
    pub fn overrides(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Per-group statistics for the current data and dispersion mode.
    ///
    /// # Errors
    ///
    /// Returns an error for no groups or an empty group.
    pub fn stats(&self) -> Result<Vec<GroupStats>> {
        group_stats(&self.data, self.dispersion)
    }

    /// Resolve every draw-call argument without touching a surface.
    ///
    /// # Errors
    ///
    /// Returns an error for no groups, an empty group, color / shift sequences whose
    /// length differs from the group count, or override sequences of the wrong length
    /// (one per group for bars, one per sample for the scatter).
    pub fn layout(&self) -> Result<ErrorPlotLayout> {
        let stats = self.stats()?;
        let groups = stats.len();
        let counts: Vec<usize> = self.data.iter().map(Vec::len).collect();

        self.colors.check_len(groups, "colors")?;
        let shifts = self.shift.expand(groups, "shift values")?;
        let sample_colors = self.colors.repeat_each(&counts, "colors")?;

        let bar = BarStyle::with_colors(self.colors.clone());
        let bar = match &self.overrides.bar {
            Some(o) => bar.merged(o),
            None => bar,
        };
        let error = match &self.overrides.error {
            Some(o) => ErrorBarStyle::default().merged(o),
            None => ErrorBarStyle::default(),
        };
        let scatter = ScatterStyle::with_colors(sample_colors);
        let scatter = match &self.overrides.scatter {
            Some(o) => scatter.merged(o),
            None => scatter,
        };

        // Override sequences are checked here so a bad one draws nothing.
        bar.edgecolor.check_len(groups, "bar edgecolor")?;
        bar.color.check_len(groups, "bar color")?;
        if let Some(hatch) = &bar.hatch {
            hatch.check_len(groups, "bar hatch")?;
        }
        scatter.color.check_len(counts.iter().sum(), "scatter color")?;

        Ok(ErrorPlotLayout {
            positions: (0..groups).map(|i| i as f32).collect(),
            means: stats.iter().map(|s| s.mean).collect(),
            errors: stats.iter().map(|s| s.dispersion).collect(),
            scatter_x: scatter_positions(&counts, &shifts),
            scatter_y: self.data.iter().flatten().copied().collect(),
            bar,
            error,
            scatter,
        })
    }

    /// Draw onto `surface`: bars, then error bars, then samples, then x ticks.
    ///
    /// Validation happens first; on error nothing is drawn.
    ///
    /// # Errors
    ///
    /// Returns layout errors, or whatever the surface reports.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<()> {
        let layout = self.layout()?;
        log::debug!(
            target: "trueno_plotkit",
            "error plot: {} groups, {} samples, {:?}",
            layout.positions.len(),
            layout.scatter_y.len(),
            self.dispersion
        );

        surface.bar(&layout.positions, &layout.means, &layout.bar)?;
        surface.error_bar(&layout.positions, &layout.means, &layout.errors, &layout.error)?;
        surface.scatter(&layout.scatter_x, &layout.scatter_y, &layout.scatter)?;
        surface.set_xticks(&layout.positions)
    }
}

/// Fully resolved arguments of the error-plot draw calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPlotLayout {
    /// Bar positions `0..g`.
    pub positions: Vec<f32>,
    /// Group means.
    pub means: Vec<f32>,
    /// Group dispersions.
    pub errors: Vec<f32>,
    /// Scatter x, one per sample.
    pub scatter_x: Vec<f32>,
    /// Scatter y: all samples in group order.
    pub scatter_y: Vec<f32>,
    /// Bar style after overrides.
    pub bar: BarStyle,
    /// Error-bar style after overrides.
    pub error: ErrorBarStyle,
    /// Scatter style after overrides.
    pub scatter: ScatterStyle,
}

/// X position of every sample: `counts[i]` copies of `i + shifts[i]`.
#[must_use]
pub fn scatter_positions(counts: &[usize], shifts: &[f32]) -> Vec<f32> {
    counts
        .iter()
        .zip(shifts)
        .enumerate()
        .flat_map(|(i, (&n, &shift))| std::iter::repeat(i as f32 + shift).take(n))
        .collect()
}

/// One-call form of [`ErrorPlot`].
///
/// # Errors
///
/// See [`ErrorPlot::render`].
pub fn error_plot<S: Surface + ?Sized>(
    dataset: &[Vec<f32>],
    surface: &mut S,
    colors: impl Into<PerGroup<Rgba>>,
    shift: impl Into<PerGroup<f32>>,
    dispersion: Dispersion,
    overrides: &StyleOverrides,
) -> Result<()> {
    ErrorPlot::new()
        .data(dataset)
        .colors(colors)
        .shift(shift)
        .dispersion(dispersion)
        .overrides(overrides.clone())
        .render(surface)
}
