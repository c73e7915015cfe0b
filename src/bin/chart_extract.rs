use chart_extractor::calibrate::CalibrationStatus;
use chart_extractor::config::load_config;
use chart_extractor::image::io::{save_gray_image, write_json_file};
use chart_extractor::markers::color_mask;
use chart_extractor::{Axis, ChartExtractor, ColorName, ExtractionReport};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut extractor =
        ChartExtractor::open(&config.input_path, config.params.clone()).map_err(|e| e.to_string())?;
    if let Some(manual) = config.manual_calibration {
        extractor
            .set_manual_calibration(manual.x_min, manual.x_max, manual.y_min, manual.y_max)
            .map_err(|e| e.to_string())?;
    }
    let report = extractor.process().map_err(|e| e.to_string())?;
    print_text_summary(&report);

    match &config.output.json_out {
        Some(path) => {
            write_json_file(path, &report)?;
            println!("\nJSON report written to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("\nJSON report:\n{json}");
        }
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_artifacts(dir, &extractor)?;
        println!("Debug artifacts written to {}", dir.display());
    }
    Ok(())
}

fn print_text_summary(report: &ExtractionReport) {
    let trace = &report.trace;
    let f = &trace.frame.frame;
    println!("Extraction summary");
    println!("  input: {}x{}", trace.input.width, trace.input.height);
    println!(
        "  frame: ({}, {}) - ({}, {}) partial={} relaxed={} degraded={}",
        f.left(),
        f.top(),
        f.right(),
        f.bottom(),
        trace.frame.partial,
        trace.frame.relaxed,
        trace.frame.degraded
    );
    for outcome in [&trace.calibration.x, &trace.calibration.y] {
        let cal = &outcome.calibration;
        let status = match &outcome.status {
            CalibrationStatus::Fitted { tokens, rmse } => {
                format!("fitted tokens={tokens} rmse={rmse:.3}")
            }
            CalibrationStatus::RangeOnly { tokens } => format!("range-only tokens={tokens}"),
            CalibrationStatus::Degraded { reason } => format!("degraded ({reason})"),
            CalibrationStatus::Manual => "manual".to_string(),
        };
        println!(
            "  {} axis: [{:.4}, {:.4}] {}",
            outcome.axis,
            cal.min_value(),
            cal.max_value(),
            status
        );
    }
    println!(
        "  detections: markers={} curve_points={}",
        trace.detection.markers, trace.detection.curve_points
    );

    println!("\nSeries ({} total, {} points)", report.summary.total_series, report.summary.total_points);
    for (name, series) in &report.summary.series {
        println!(
            "  {name}: n={} x=[{:.3}, {:.3}] y=[{:.3}, {:.3}]",
            series.points, series.x_range[0], series.x_range[1], series.y_range[0], series.y_range[1]
        );
    }

    let timings = trace
        .timings
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect::<Vec<_>>()
        .join(" ");
    println!("\nTimings (ms): {timings} total={:.3}", trace.timings.total_ms);
}

fn save_debug_artifacts(dir: &Path, extractor: &ChartExtractor) -> Result<(), String> {
    if let Some(mask) = extractor.edge_mask() {
        save_gray_image(mask, &dir.join("curve_edges.png"))?;
    }
    let Some(interior) = extractor.interior() else {
        return Ok(());
    };
    let params = extractor.params();
    let mut colors: Vec<ColorName> = params.palette.entries().iter().map(|e| e.color).collect();
    colors.sort();
    colors.dedup();
    for color in colors {
        let mask = color_mask(
            extractor.image(),
            interior,
            color,
            &params.palette,
            &params.neutral,
        );
        save_gray_image(&mask, &dir.join(format!("mask_{color}.png")))?;
    }
    if let Some(frame) = extractor.frame() {
        let axes = [Axis::X, Axis::Y]
            .map(|axis| extractor.calibration(axis).copied().unwrap_or_default());
        write_json_file(&dir.join("frame.json"), &(frame, axes))?;
    }
    Ok(())
}

fn usage() -> String {
    "Usage: chart_extract <config.json>".to_string()
}
