//! Series classification and data-space projection.
//!
//! Raw pixel detections are keyed by `(color, points|line)` and mapped
//! through the frame and the two axis calibrations. Projection is a pure
//! function of its inputs, so recalibration simply calls it again on the
//! retained raw points.

use crate::color::{classify_color, ClassifierOptions, ColorName, Palette};
use crate::types::{
    Axis, AxisCalibration, DetectedPoint, ExtractionResult, GraphFrame, PointKind, SeriesKey,
    SeriesPoint,
};

/// Assigns every detection to a series key.
#[derive(Clone, Debug, Default)]
pub struct SeriesClassifier {
    palette: Palette,
    options: ClassifierOptions,
}

impl SeriesClassifier {
    pub fn new(palette: Palette, options: ClassifierOptions) -> Self {
        Self { palette, options }
    }

    /// Markers keep the palette color they were segmented with; curve
    /// samples are named from their pixel color.
    pub fn color_of(&self, point: &DetectedPoint) -> ColorName {
        match point.kind {
            PointKind::Marker { color, .. } => color,
            PointKind::Curve => classify_color(point.rgb, &self.palette, &self.options),
        }
    }

    pub fn key_of(&self, point: &DetectedPoint) -> SeriesKey {
        SeriesKey::new(self.color_of(point), point.marker_type().into())
    }
}

/// Project raw detections into data space, preserving detection order
/// within each series.
pub fn project_points(
    points: &[DetectedPoint],
    classifier: &SeriesClassifier,
    frame: &GraphFrame,
    x_cal: &AxisCalibration,
    y_cal: &AxisCalibration,
) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    for point in points {
        let fx = frame.fraction(Axis::X, point.px);
        let fy = frame.fraction(Axis::Y, point.py);
        result.push(
            classifier.key_of(point),
            SeriesPoint {
                x: x_cal.project(fx),
                y: y_cal.project(fy),
                marker_type: point.marker_type(),
            },
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarkerShape, MarkerType, SeriesKind};

    fn frame() -> GraphFrame {
        GraphFrame::new(100, 100, 900, 500).unwrap()
    }

    #[test]
    fn same_color_different_type_gives_distinct_keys() {
        let points = [
            DetectedPoint::marker(
                500.0,
                300.0,
                [255, 140, 0],
                ColorName::Orange,
                MarkerShape::Circle,
            ),
            DetectedPoint::curve(300.0, 300.0, [255, 140, 0]),
        ];
        let result = project_points(
            &points,
            &SeriesClassifier::default(),
            &frame(),
            &AxisCalibration::default(),
            &AxisCalibration::default(),
        );
        assert_eq!(result.len(), 2);
        let markers = result
            .get(&SeriesKey::new(ColorName::Orange, SeriesKind::Points))
            .unwrap();
        assert_eq!(markers[0].marker_type, MarkerType::Marker);
        assert!((markers[0].x - 0.5).abs() < 1e-9);
        assert!((markers[0].y - 0.5).abs() < 1e-9);
        assert!(result.get_by_name("orange_line").is_some());
    }

    #[test]
    fn detection_order_is_kept() {
        let points: Vec<DetectedPoint> = [700.0, 200.0, 500.0]
            .iter()
            .map(|&x| DetectedPoint::curve(x, 300.0, [0, 0, 255]))
            .collect();
        let x_cal = AxisCalibration::new(Axis::X, 0.0, 8.0).unwrap();
        let result = project_points(
            &points,
            &SeriesClassifier::default(),
            &frame(),
            &x_cal,
            &AxisCalibration::default(),
        );
        let xs: Vec<f64> = result
            .get_by_name("blue_line")
            .unwrap()
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(xs, vec![6.0, 1.0, 4.0]);
    }

    #[test]
    fn projection_is_idempotent() {
        let points = [
            DetectedPoint::curve(150.0, 450.0, [0, 160, 0]),
            DetectedPoint::marker(
                820.0,
                120.0,
                [0, 0, 255],
                ColorName::Blue,
                MarkerShape::Square,
            ),
        ];
        let classifier = SeriesClassifier::default();
        let x_cal = AxisCalibration::new(Axis::X, -2.0, 2.0).unwrap();
        let y_cal = AxisCalibration::new(Axis::Y, 10.0, 20.0).unwrap();
        let first = project_points(&points, &classifier, &frame(), &x_cal, &y_cal);
        let second = project_points(&points, &classifier, &frame(), &x_cal, &y_cal);
        assert_eq!(first, second);
    }
}
