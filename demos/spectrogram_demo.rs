#![allow(clippy::expect_used, clippy::unwrap_used)]
//! 3-D Spectrogram and Waterfall Example
//!
//! Builds short-time magnitudes of a chirp with a plain DFT, then renders them as a
//! terrain-colored surface and as a filled waterfall.
//!
//! Run with: `cargo run --example spectrogram_demo`

use std::f32::consts::TAU;
use trueno_plotkit::prelude::*;

const SAMPLE_RATE: f32 = 256.0;
const SIGNAL_LEN: usize = 1024;
const WINDOW: usize = 64;
const STEP: usize = 32;

fn main() {
    println!("3-D Spectrogram Example");
    println!("=======================\n");

    let signal: Vec<f32> = (0..SIGNAL_LEN)
        .map(|n| {
            let t = n as f32 / SAMPLE_RATE;
            (TAU * (10.0 + 20.0 * t) * t).sin()
        })
        .collect();

    let frames = short_time_magnitudes(&signal);
    println!("Frames: {} x {} bins", frames.len(), WINDOW / 2 + 1);

    let rc = RcParams::default();
    let mut surface = RasterAxes3d::new(&rc);
    Spectrogram3d::new()
        .data(&frames)
        .signal_len(SIGNAL_LEN)
        .sample_rate(SAMPLE_RATE)
        .window(WINDOW, STEP)
        .render(&mut surface)
        .expect("Failed to draw spectrogram");

    let mut waterfall = RasterAxes3d::new(&rc);
    Waterfall::new()
        .data_2d(&frames)
        .extent(0.0, SAMPLE_RATE / 2.0, 0.0, SIGNAL_LEN as f32 / SAMPLE_RATE)
        .fill(true)
        .alpha(0.9)
        .render(&mut waterfall)
        .expect("Failed to draw waterfall");

    Figure::new(&rc)
        .save_png("spectrogram_demo.png", 1, 2, &[&surface, &waterfall])
        .expect("Failed to write PNG");
    println!("Saved: spectrogram_demo.png");
}

/// Magnitude of each frame's DFT bins `0..=WINDOW/2`, one frame per time-mesh entry.
fn short_time_magnitudes(signal: &[f32]) -> Vec<Vec<f32>> {
    let frames = (signal.len() - WINDOW) / STEP;
    (0..frames)
        .map(|f| {
            let frame = &signal[f * STEP..f * STEP + WINDOW];
            (0..=WINDOW / 2)
                .map(|k| {
                    let (re, im) = frame.iter().enumerate().fold((0.0, 0.0), |(re, im), (n, &x)| {
                        let phase = TAU * (k * n) as f32 / WINDOW as f32;
                        (re + x * phase.cos(), im - x * phase.sin())
                    });
                    (re * re + im * im).sqrt()
                })
                .collect()
        })
        .collect()
}
