//! End-to-end rendering: helpers drawing onto raster axes, composed into PNG figures.
//!
//! Run: cargo test --test raster_render_test

#![allow(clippy::unwrap_used, missing_docs)]

use trueno_plotkit::output::PngEncoder;
use trueno_plotkit::prelude::*;

fn small_rc() -> RcParams {
    RcParams::parse("figure:\n  figsize: [6, 3]\n  dpi: 60\n").unwrap()
}

fn dataset() -> Vec<Vec<f32>> {
    (0..2)
        .map(|g| (0..15).map(|i| ((i * 7 + g * 3) % 11) as f32 / 11.0).collect())
        .collect()
}

// ============================================================================
// 2-D
// ============================================================================

#[test]
fn test_error_plot_renders_group_colors() {
    let rc = small_rc();
    let mut axes = RasterAxes::new(&rc);
    ErrorPlot::new()
        .data(&dataset())
        .colors(vec![Rgba::RED, Rgba::BLUE])
        .render(&mut axes)
        .unwrap();
    assert_eq!(axes.artist_count(), 3);

    let fb = axes.to_framebuffer(300, 200).unwrap();
    assert!(fb.count_pixels(Rgba::RED) > 0, "group 0 should be drawn in red");
    assert!(fb.count_pixels(Rgba::BLUE) > 0, "group 1 should be drawn in blue");
    assert!(fb.count_pixels(Rgba::BLACK) > 0, "error bars and spines are black");
}

#[test]
fn test_custom_overrides_render() {
    let rc = small_rc();
    let overrides = StyleOverrides::from_yaml(
        r"
bar:
  hatch: ['//', '**']
scatter:
  edgecolor: k
  linewidth: 2
error:
  capsize: 50
",
    )
    .unwrap();

    let mut custom = RasterAxes::new(&rc);
    error_plot(&dataset(), &mut custom, Rgba::BLACK, 0.5_f32, Dispersion::Se, &overrides).unwrap();
    let mut plain = RasterAxes::new(&rc);
    error_plot(
        &dataset(),
        &mut plain,
        Rgba::BLACK,
        0.5_f32,
        Dispersion::Se,
        &StyleOverrides::new(),
    )
    .unwrap();

    let custom_black = custom.to_framebuffer(300, 200).unwrap().count_pixels(Rgba::BLACK);
    let plain_black = plain.to_framebuffer(300, 200).unwrap().count_pixels(Rgba::BLACK);
    assert!(custom_black > plain_black, "hatches and wide caps add ink");
}

#[test]
fn test_two_panel_figure_png() {
    let rc = small_rc();
    let mut left = RasterAxes::new(&rc);
    let mut right = RasterAxes::new(&rc);
    ErrorPlot::new().data(&dataset()).render(&mut left).unwrap();
    ErrorPlot::new()
        .data(&dataset())
        .dispersion(Dispersion::Se)
        .render(&mut right)
        .unwrap();
    right.set_xticklabels(&["data1".to_string(), "data2".to_string()]).unwrap();

    let figure = Figure::new(&rc);
    let fb = figure.render(1, 2, &[&left, &right]).unwrap();
    assert_eq!((fb.width(), fb.height()), (360, 180));

    let bytes = PngEncoder::to_bytes(&fb).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panels.png");
    figure.save_png(&path, 1, 2, &[&left, &right]).unwrap();
    assert!(std::fs::metadata(&path).unwrap().len() > 0);
}

// ============================================================================
// 3-D
// ============================================================================

#[test]
fn test_waterfall_lines_on_raster() {
    let rows: Vec<Vec<f32>> = (0..5)
        .map(|r| (0..20).map(|c| ((c as f32 / 3.0) + r as f32).sin()).collect())
        .collect();
    let mut axes = RasterAxes3d::new(&small_rc());
    let ids = Waterfall::new()
        .data_2d(&rows)
        .extent(0.0, 1.0, 0.0, 4.0)
        .edgecolors(Rgba::RED)
        .render(&mut axes)
        .unwrap();

    assert_eq!(ids.len(), 5);
    let fb = axes.to_framebuffer(200, 200).unwrap();
    assert!(fb.count_pixels(Rgba::RED) > 50);
}

#[test]
fn test_waterfall_fill_sets_limits() {
    let rows = vec![vec![0.0, 2.0, 1.0], vec![1.0, 3.0, 0.5]];
    let mut axes = RasterAxes3d::new(&small_rc());
    Waterfall::new()
        .data_2d(&rows)
        .extent(0.0, 10.0, 0.0, 1.0)
        .fill(true)
        .facecolors(Rgba::GREEN)
        .render(&mut axes)
        .unwrap();

    let limits = axes.limits().unwrap();
    assert_eq!(limits.x, (0.0, 10.0));
    assert_eq!(limits.z, (0.0, 3.0));
    let fb = axes.to_framebuffer(200, 200).unwrap();
    assert!(fb.count_pixels(Rgba::GREEN) > 100);
}

#[test]
fn test_spectrogram_on_raster() {
    // 64 samples at 8 Hz, window 8, hop 4: 14 frames of 5 bins.
    let frames: Vec<Vec<f32>> = (0..14)
        .map(|t| (0..5).map(|k| ((t + k) % 6) as f32).collect())
        .collect();
    let mut axes = RasterAxes3d::new(&small_rc());
    Spectrogram3d::new()
        .data(&frames)
        .signal_len(64)
        .sample_rate(8.0)
        .window(8, 4)
        .render(&mut axes)
        .unwrap();

    let limits = axes.limits().unwrap();
    assert_eq!(limits.x, (0.0, 8.0));
    assert_eq!(limits.y, (0.0, 4.0));

    // Nearly flat, so the surface covers about the top face of the box.
    let white = axes.to_framebuffer(240, 240).unwrap().count_pixels(Rgba::WHITE);
    let empty = RasterAxes3d::new(&small_rc())
        .to_framebuffer(240, 240)
        .unwrap()
        .count_pixels(Rgba::WHITE);
    assert!(
        white + 240 * 240 / 10 < empty,
        "surface should paint at least a tenth of the panel: {white} white vs {empty} empty"
    );
}
