use super::summary::ExtractionSummary;
use super::timing::TimingBreakdown;
use crate::calibrate::AxisCalibrationOutcome;
use crate::frame::FrameOutcome;
use crate::types::{ExtractionResult, PixelRect};
use serde::Serialize;

/// Returned by [`ChartExtractor::process`](crate::ChartExtractor::process).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub result: ExtractionResult,
    pub summary: ExtractionSummary,
    pub trace: PipelineTrace,
}

/// Per-stage record of one extraction run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub frame: FrameOutcome,
    pub calibration: CalibrationStage,
    pub detection: DetectionStage,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: u32,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationStage {
    pub x: AxisCalibrationOutcome,
    pub y: AxisCalibrationOutcome,
}

impl CalibrationStage {
    pub fn is_degraded(&self) -> bool {
        self.x.status.is_degraded() || self.y.status.is_degraded()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionStage {
    /// Frame interior scanned by both detection layers.
    pub interior: PixelRect,
    pub markers: usize,
    pub curve_points: usize,
}
