#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Error Plot Example
//!
//! Draws the same two groups twice, side by side: once with custom hatches,
//! marker edges and wide caps, once with the default style. Both panels show
//! mean ± standard error.
//!
//! Run with: `cargo run --example error_plot_demo`

use trueno_plotkit::prelude::*;

fn main() {
    println!("Error Plot Example");
    println!("==================\n");

    // Step 1: Global style
    let rc = RcParams::load_or_default("plotkit.yaml");
    let (width, height) = rc.figure_pixels();
    println!("Step 1: Figure {width}x{height} px at {} dpi", rc.figure.dpi);

    // Step 2: Sample data
    println!("\nStep 2: Generating sample data...");
    let dataset = generate_sample_data();
    for (i, group) in dataset.iter().enumerate() {
        println!("  data{}: {} samples", i + 1, group.len());
    }

    // Step 3: Custom panel
    println!("\nStep 3: Drawing custom panel...");
    let overrides = StyleOverrides::new()
        .bar(BarOverrides::default().hatch(vec![
            Hatch::new("//").expect("valid hatch"),
            Hatch::new("**").expect("valid hatch"),
        ]))
        .scatter(ScatterOverrides::default().edgecolor(Rgba::BLACK).linewidth(2.0))
        .error(ErrorBarOverrides::default().capsize(50.0));

    let mut custom = RasterAxes::new(&rc);
    error_plot(&dataset, &mut custom, Rgba::BLACK, 0.5_f32, Dispersion::Se, &overrides)
        .expect("Failed to draw custom panel");

    // Step 4: Default panel
    println!("Step 4: Drawing default panel...");
    let mut default = RasterAxes::new(&rc);
    ErrorPlot::new()
        .data(&dataset)
        .dispersion(Dispersion::Se)
        .render(&mut default)
        .expect("Failed to draw default panel");

    let labels = vec!["data1".to_string(), "data2".to_string()];
    for axes in [&mut custom, &mut default] {
        axes.set_xticklabels(&labels).expect("one label per group");
    }

    for stats in ErrorPlot::new()
        .data(&dataset)
        .dispersion(Dispersion::Se)
        .stats()
        .expect("non-empty groups")
    {
        println!("  mean {:.3} ± {:.3} (n = {})", stats.mean, stats.dispersion, stats.count);
    }

    // Step 5: Compose and save
    println!("\nStep 5: Saving figure...");
    Figure::new(&rc)
        .save_png("error_plot_demo.png", 1, 2, &[&custom, &default])
        .expect("Failed to write PNG");
    println!("  Saved: error_plot_demo.png");
}

/// Two groups of 15 values in [0, 1), reproducible across runs.
fn generate_sample_data() -> Vec<Vec<f32>> {
    let mut state: u32 = 12_345;
    let mut next = move || {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (state >> 16) as f32 / 65_536.0
    };
    (0..2).map(|_| (0..15).map(|_| next()).collect()).collect()
}
