mod common;

use chart_extractor::{extract_batch_with, ExtractorParams, TextRecognizer};
use common::init_logging;
use common::synthetic_chart::*;

#[test]
fn batch_processes_images_independently() {
    init_logging();
    let chart = |x: u32| {
        ChartBuilder::new()
            .x_label(LEFT)
            .x_label(RIGHT)
            .disc(x, 375, 8, ORANGE)
            .build()
    };
    let images = vec![chart(300), chart(700), image::RgbImage::new(4, 4)];
    let results = extract_batch_with(images, &ExtractorParams::default(), || {
        Box::new(ScriptedLabels::new(&["0", "10"], &[])) as Box<dyn TextRecognizer + Send + Sync>
    });

    assert_eq!(results.len(), 3);
    let xs: Vec<f64> = results[..2]
        .iter()
        .map(|r| {
            let report = r.as_ref().expect("chart extracts");
            report.result.get_by_name("orange_points").unwrap()[0].x
        })
        .collect();
    assert!((xs[0] - 2.5).abs() < 0.5, "{xs:?}");
    assert!((xs[1] - 7.5).abs() < 0.5, "{xs:?}");
    assert!(results[2].is_err());
}
