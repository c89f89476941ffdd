//! 3-D spectrogram: short-time magnitudes as a color-mapped surface.

use crate::error::{Error, Result};
use crate::scale::Colormap;
use crate::stats::linspace;
use crate::surface::{ArtistId, Surface3d, SurfaceMesh};

/// Builder for 3-D spectrogram surfaces.
///
/// The input holds one row per analysis frame and one column per frequency bin.
/// The surface is drawn with time along x, frequency along y and magnitude as height.
#[derive(Debug, Clone)]
pub struct Spectrogram3d {
    frames: Vec<Vec<f32>>,
    signal_len: usize,
    sample_rate: f32,
    window_size: usize,
    step: usize,
    colormap: Colormap,
}

impl Default for Spectrogram3d {
    fn default() -> Self {
        Self::new()
    }
}

impl Spectrogram3d {
    /// Create an empty builder with the terrain colormap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            signal_len: 0,
            sample_rate: 0.0,
            window_size: 0,
            step: 0,
            colormap: Colormap::Terrain,
        }
    }

    /// Set the magnitudes, `frames × bins`.
    #[must_use]
    pub fn data(mut self, frames: &[Vec<f32>]) -> Self {
        self.frames = frames.to_vec();
        self
    }

    /// Length of the analysed signal in samples.
    #[must_use]
    pub fn signal_len(mut self, n: usize) -> Self {
        self.signal_len = n;
        self
    }

    /// Sample rate in Hz.
    #[must_use]
    pub fn sample_rate(mut self, fs: f32) -> Self {
        self.sample_rate = fs;
        self
    }

    /// Analysis window length and hop, in samples.
    #[must_use]
    pub fn window(mut self, window_size: usize, step: usize) -> Self {
        self.window_size = window_size;
        self.step = step;
        self
    }

    /// Surface colormap.
    #[must_use]
    pub fn colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    fn check_params(&self) -> Result<()> {
        if self.sample_rate.is_nan() || self.sample_rate <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "sample_rate",
                reason: format!("must be positive, got {}", self.sample_rate),
            });
        }
        if self.window_size == 0 {
            return Err(Error::InvalidParameter {
                name: "window_size",
                reason: "must be positive".to_string(),
            });
        }
        if self.step == 0 {
            return Err(Error::InvalidParameter {
                name: "step",
                reason: "must be positive".to_string(),
            });
        }
        if self.signal_len < self.window_size {
            return Err(Error::InvalidParameter {
                name: "signal_len",
                reason: format!(
                    "{} samples is shorter than the {}-sample window",
                    self.signal_len, self.window_size
                ),
            });
        }
        Ok(())
    }

    /// Bin center frequencies: `fs·k / window_size` for `k = 0..=window_size/2`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid signal parameters.
    pub fn frequency_mesh(&self) -> Result<Vec<f32>> {
        self.check_params()?;
        Ok((0..=self.window_size / 2)
            .map(|k| self.sample_rate * k as f32 / self.window_size as f32)
            .collect())
    }

    /// Frame times: `(N - window_size) / step` values spread over `[0, N / fs]`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid signal parameters.
    pub fn time_mesh(&self) -> Result<Vec<f32>> {
        self.check_params()?;
        let duration = self.signal_len as f32 / self.sample_rate;
        Ok(linspace(0.0, duration, (self.signal_len - self.window_size) / self.step))
    }

    /// Build the surface mesh: x = time, y = frequency, `z[f][t] = data[t][f]`.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid parameters, empty or ragged data, or data whose
    /// shape does not match the time and frequency meshes.
    pub fn mesh(&self) -> Result<SurfaceMesh> {
        let freqs = self.frequency_mesh()?;
        let times = self.time_mesh()?;

        if self.frames.is_empty() {
            return Err(Error::EmptyData);
        }
        if self.frames.len() != times.len() {
            return Err(Error::LengthMismatch {
                what: "spectrogram frames",
                expected: times.len(),
                actual: self.frames.len(),
            });
        }
        if let Some(frame) = self.frames.iter().find(|f| f.len() != freqs.len()) {
            return Err(Error::LengthMismatch {
                what: "spectrogram bins",
                expected: freqs.len(),
                actual: frame.len(),
            });
        }

        let z = (0..freqs.len())
            .flat_map(|bin| self.frames.iter().map(move |frame| frame[bin]))
            .collect();
        Ok(SurfaceMesh { x: times, y: freqs, z })
    }

    /// Draw the surface onto `surface`.
    ///
    /// # Errors
    ///
    /// Returns mesh errors before drawing, or whatever the surface reports.
    pub fn render<S: Surface3d + ?Sized>(&self, surface: &mut S) -> Result<ArtistId> {
        let mesh = self.mesh()?;
        log::debug!(
            target: "trueno_plotkit",
            "spectrogram: {} frames x {} bins, fs={}",
            mesh.x.len(),
            mesh.y.len(),
            self.sample_rate
        );
        surface.plot_surface(mesh, self.colormap)
    }
}
