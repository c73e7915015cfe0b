mod common;

use chart_extractor::{
    Axis, CalibrationStatus, ChartExtractor, ExtractorParams, MarkerType, TextRecognizer,
};
use common::init_logging;
use common::synthetic_chart::*;
use image::RgbImage;

fn extractor(image: RgbImage, labels: ScriptedLabels) -> ChartExtractor {
    ChartExtractor::with_recognizer(image, ExtractorParams::default(), Box::new(labels))
        .expect("default params are valid")
}

/// x ticks "0"/"10" at the frame edges, y ticks "100"@top and "50"@middle,
/// one orange marker in the middle of the frame.
fn labelled_chart() -> (RgbImage, ScriptedLabels) {
    let image = ChartBuilder::new()
        .x_label(LEFT)
        .x_label(RIGHT)
        .y_label(TOP)
        .y_label(375)
        .disc(500, 375, 8, ORANGE)
        .build();
    (image, ScriptedLabels::new(&["0", "10"], &["100", "50"]))
}

#[test]
fn orange_marker_lands_at_axis_midpoint() {
    init_logging();
    let (image, labels) = labelled_chart();
    let mut ex = extractor(image, labels);
    let report = ex.process().expect("extraction succeeds");

    let x_cal = ex.calibration(Axis::X).unwrap();
    assert!(x_cal.min_value().abs() < 0.1, "{x_cal:?}");
    assert!((x_cal.max_value() - 10.0).abs() < 0.1, "{x_cal:?}");
    assert!(matches!(
        report.trace.calibration.x.status,
        CalibrationStatus::Fitted { tokens: 2, .. }
    ));

    let points = report
        .result
        .get_by_name("orange_points")
        .expect("orange_points series");
    assert_eq!(points.len(), 1);
    assert!((points[0].x - 5.0).abs() < 0.5, "{:?}", points[0]);
    assert!((points[0].y - 50.0).abs() < 2.0, "{:?}", points[0]);
    assert_eq!(points[0].marker_type, MarkerType::Marker);
    assert_eq!(report.trace.detection.markers, 1);
}

#[test]
fn circle_and_line_of_same_color_are_separate_series() {
    init_logging();
    let image = ChartBuilder::new()
        .disc(300, 200, 9, BLUE)
        .stroke((150, 650), (850, 400), 1, BLUE)
        .build();
    let mut ex = extractor(image, ScriptedLabels::default());
    let report = ex.process().unwrap();

    let markers = report.result.get_by_name("blue_points").expect("blue_points");
    let line = report.result.get_by_name("blue_line").expect("blue_line");
    assert!(markers.iter().all(|p| p.marker_type == MarkerType::Marker));
    assert!(line.iter().all(|p| p.marker_type == MarkerType::Curve));
    assert!(line.len() > 20, "line points: {}", line.len());

    // Unlabelled axes fall back to the unit range.
    assert!(report.trace.calibration.is_degraded());
    let near_disc = markers
        .iter()
        .any(|p| (p.x - 0.25).abs() < 0.02 && (p.y - 500.0 / 650.0).abs() < 0.02);
    assert!(near_disc, "{markers:?}");
}

#[test]
fn manual_override_maps_points_into_bounds() {
    init_logging();
    let image = ChartBuilder::new()
        .disc(120, 680, 6, ORANGE)
        .disc(880, 70, 6, ORANGE)
        .stroke((150, 600), (850, 120), 1, BLUE)
        .build();
    let mut ex = extractor(image, ScriptedLabels::default());
    ex.process().unwrap();
    let raw_before = ex.raw_points().to_vec();

    ex.set_manual_calibration(-5.0, 5.0, 0.0, 1000.0).unwrap();
    assert_eq!(ex.raw_points(), raw_before.as_slice());

    let result = ex.result().unwrap();
    assert!(!result.is_empty());
    for (_, points) in result.iter() {
        for p in points {
            assert!((-5.0..=5.0).contains(&p.x), "{p:?}");
            assert!((0.0..=1000.0).contains(&p.y), "{p:?}");
        }
    }
    let status = &ex.calibration_outcome(Axis::X).unwrap().status;
    assert_eq!(*status, CalibrationStatus::Manual);
    let summary = ex.summary().unwrap();
    assert_eq!(summary.calibration.x.min, -5.0);
    assert_eq!(summary.calibration.y.max, 1000.0);
}

#[test]
fn reprojection_is_idempotent() {
    init_logging();
    let (image, labels) = labelled_chart();
    let mut ex = extractor(image, labels);
    let first = ex.process().unwrap().result;
    let second = ex.process().unwrap().result;
    assert_eq!(first, second);

    ex.set_manual_calibration(0.0, 20.0, -1.0, 1.0).unwrap();
    let once = ex.result().cloned().unwrap();
    ex.set_manual_calibration(0.0, 20.0, -1.0, 1.0).unwrap();
    assert_eq!(ex.result().cloned().unwrap(), once);

    // The override survives a full re-run.
    let rerun = ex.process().unwrap().result;
    assert_eq!(rerun, once);
}

#[test]
fn misread_label_is_rejected_before_fitting() {
    init_logging();
    let xs = [100, 260, 420, 500, 580, 740, 900];
    let mut builder = ChartBuilder::new().disc(500, 375, 8, ORANGE);
    for x in xs {
        builder = builder.x_label(x);
    }
    let labels = ScriptedLabels::new(&["0", "2", "4", "9000", "6", "8", "10"], &[]);
    let mut ex = extractor(builder.build(), labels);
    let report = ex.process().unwrap();

    let outcome = &report.trace.calibration.x;
    assert!(outcome.tokens.iter().all(|t| t.value <= 10.0));
    assert_eq!(outcome.tokens.len(), 6);
    let cal = outcome.calibration;
    assert!(cal.min_value().abs() < 0.1, "{cal:?}");
    assert!((cal.max_value() - 10.0).abs() < 0.1, "{cal:?}");
}

#[test]
fn calibration_range_is_always_ordered() {
    init_logging();
    let scripts: Vec<ScriptedLabels> = vec![
        ScriptedLabels::default(),
        ScriptedLabels::new(&["0", "10"], &["100", "50"]),
        // Decreasing labels: the fit would invert the range.
        ScriptedLabels::new(&["10", "0"], &["50", "100"]),
        // A single distinct value.
        ScriptedLabels::new(&["5", "5"], &["7"]),
    ];
    for labels in scripts {
        let (image, _) = labelled_chart();
        let mut ex = extractor(image, labels.clone());
        ex.process().unwrap();
        for axis in [Axis::X, Axis::Y] {
            let cal = ex.calibration(axis).unwrap();
            assert!(
                cal.min_value() < cal.max_value(),
                "{axis} with {labels:?}: {cal:?}"
            );
        }
    }
}

#[test]
fn blank_image_without_fallback_is_a_frame_error() {
    init_logging();
    let image = RgbImage::from_pixel(300, 200, WHITE);
    let mut ex = extractor(image, ScriptedLabels::default());
    let err = ex.process().unwrap_err();
    assert!(matches!(err, chart_extractor::ExtractError::Frame(_)), "{err}");
    assert!(ex.result().is_none());
}

#[test]
fn blank_image_with_fallback_yields_empty_result() {
    init_logging();
    let mut params = ExtractorParams::default();
    params.frame.fallback_to_image_bounds = true;
    let image = RgbImage::from_pixel(300, 200, WHITE);
    let recognizer: Box<dyn TextRecognizer + Send + Sync> = Box::new(ScriptedLabels::default());
    let mut ex = ChartExtractor::with_recognizer(image, params, recognizer).unwrap();
    let report = ex.process().unwrap();
    assert!(report.trace.frame.degraded);
    assert!(report.result.is_empty());
    assert_eq!(report.summary.total_points, 0);
}
