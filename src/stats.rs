//! Descriptive statistics and evenly spaced grids.
//!
//! Reductions go through trueno's [`Vector`] so they pick up the best SIMD backend.

use crate::error::{Error, Result};
use trueno::Vector;

/// Which dispersion measure an error bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Dispersion {
    /// Population standard deviation.
    #[default]
    #[serde(rename = "SD")]
    Sd,
    /// Standard error of the mean: SD / √n.
    #[serde(rename = "SE")]
    Se,
}

/// Mean and dispersion of one group of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStats {
    /// Arithmetic mean.
    pub mean: f32,
    /// SD or SE, depending on the requested [`Dispersion`].
    pub dispersion: f32,
    /// Number of samples.
    pub count: usize,
}

impl GroupStats {
    /// Compute statistics for one group.
    ///
    /// Returns `None` for an empty group.
    pub fn from_samples(samples: &[f32], mode: Dispersion) -> Option<Self> {
        let mean = mean(samples)?;
        let sd = population_std_with_mean(samples, mean)?;
        let dispersion = match mode {
            Dispersion::Sd => sd,
            Dispersion::Se => sd / (samples.len() as f32).sqrt(),
        };

        Some(Self {
            mean,
            dispersion,
            count: samples.len(),
        })
    }
}

/// Compute statistics for every group, in order.
///
/// # Errors
///
/// Returns [`Error::EmptyData`] for no groups, [`Error::EmptyGroup`] for an empty one.
pub fn group_stats(groups: &[Vec<f32>], mode: Dispersion) -> Result<Vec<GroupStats>> {
    if groups.is_empty() {
        return Err(Error::EmptyData);
    }

    groups
        .iter()
        .enumerate()
        .map(|(index, group)| GroupStats::from_samples(group, mode).ok_or(Error::EmptyGroup { index }))
        .collect()
}

/// Arithmetic mean, `None` when empty.
pub fn mean(data: &[f32]) -> Option<f32> {
    if data.is_empty() {
        return None;
    }
    Vector::from_vec(data.to_vec()).mean().ok()
}

/// Population standard deviation (divides by n), `None` when empty.
pub fn population_std(data: &[f32]) -> Option<f32> {
    population_std_with_mean(data, mean(data)?)
}

/// Standard error of the mean, `None` when empty.
pub fn standard_error(data: &[f32]) -> Option<f32> {
    Some(population_std(data)? / (data.len() as f32).sqrt())
}

fn population_std_with_mean(data: &[f32], mean: f32) -> Option<f32> {
    let squared: Vec<f32> = data.iter().map(|&x| (x - mean) * (x - mean)).collect();
    let variance = self::mean(&squared)?;
    Some(variance.max(0.0).sqrt())
}

/// `count` evenly spaced values from `start` to `stop`, both inclusive.
///
/// A single value yields `[start]`; zero values yield an empty vector.
#[must_use]
pub fn linspace(start: f32, stop: f32, count: usize) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f32;
            (0..count)
                .map(|i| if i == count - 1 { stop } else { start + step * i as f32 })
                .collect()
        }
    }
}

/// Minimum and maximum of the finite values, `None` if there are none.
pub fn extent(data: impl IntoIterator<Item = f32>) -> Option<(f32, f32)> {
    data.into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean() {
        assert_abs_diff_eq!(mean(&[1.0, 2.0, 3.0]).unwrap(), 2.0, epsilon = 1e-6);
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_population_std() {
        // sqrt(2/3)
        assert_abs_diff_eq!(population_std(&[1.0, 2.0, 3.0]).unwrap(), 0.816_496_6, epsilon = 1e-5);
        assert_abs_diff_eq!(population_std(&[5.0]).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_standard_error() {
        assert_abs_diff_eq!(standard_error(&[1.0, 2.0, 3.0]).unwrap(), 0.471_404_5, epsilon = 1e-5);
        assert!(standard_error(&[]).is_none());
    }

    #[test]
    fn test_group_stats_modes() {
        let groups = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];

        let sd = group_stats(&groups, Dispersion::Sd).unwrap();
        assert_abs_diff_eq!(sd[0].mean, 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sd[1].mean, 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sd[1].dispersion, 0.8165, epsilon = 1e-4);

        let se = group_stats(&groups, Dispersion::Se).unwrap();
        assert_abs_diff_eq!(se[0].dispersion, 0.4714, epsilon = 1e-4);
        assert_eq!(se[0].count, 3);
    }

    #[test]
    fn test_group_stats_empty_inputs() {
        assert!(matches!(group_stats(&[], Dispersion::Sd), Err(Error::EmptyData)));
        let groups = vec![vec![1.0], vec![]];
        assert!(matches!(
            group_stats(&groups, Dispersion::Sd),
            Err(Error::EmptyGroup { index: 1 })
        ));
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, -2.0, 3), vec![2.0, 0.0, -2.0]);
    }

    #[test]
    fn test_extent_skips_non_finite() {
        assert_eq!(extent([3.0, f32::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(extent(std::iter::empty()), None);
    }

    #[test]
    fn test_dispersion_serde_names() {
        let mode: Dispersion = serde_yaml_ng::from_str("SE").unwrap();
        assert_eq!(mode, Dispersion::Se);
        assert_eq!(Dispersion::default(), Dispersion::Sd);
    }
}
