use crate::types::{AxisCalibration, ExtractionResult, MarkerType};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl From<&AxisCalibration> for AxisBounds {
    fn from(cal: &AxisCalibration) -> Self {
        Self {
            min: cal.min_value(),
            max: cal.max_value(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CalibrationBounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
}

/// Statistics of one series.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub points: usize,
    pub marker_types: Vec<MarkerType>,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
}

/// Compact overview of an extraction result.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    pub total_series: usize,
    pub total_points: usize,
    pub calibration: CalibrationBounds,
    /// Keyed by series display name.
    pub series: BTreeMap<String, SeriesSummary>,
}

impl ExtractionSummary {
    pub fn new(result: &ExtractionResult, x_cal: &AxisCalibration, y_cal: &AxisCalibration) -> Self {
        let series = result
            .iter()
            .filter(|(_, points)| !points.is_empty())
            .map(|(key, points)| {
                let mut marker_types: Vec<MarkerType> = Vec::new();
                let mut x_range = [f64::INFINITY, f64::NEG_INFINITY];
                let mut y_range = [f64::INFINITY, f64::NEG_INFINITY];
                for p in points {
                    if !marker_types.contains(&p.marker_type) {
                        marker_types.push(p.marker_type);
                    }
                    x_range = [x_range[0].min(p.x), x_range[1].max(p.x)];
                    y_range = [y_range[0].min(p.y), y_range[1].max(p.y)];
                }
                (
                    key.to_string(),
                    SeriesSummary {
                        points: points.len(),
                        marker_types,
                        x_range,
                        y_range,
                    },
                )
            })
            .collect();
        Self {
            total_series: result.len(),
            total_points: result.total_points(),
            calibration: CalibrationBounds {
                x: x_cal.into(),
                y: y_cal.into(),
            },
            series,
        }
    }
}
