use crate::segments::SegmentOptions;
use serde::Deserialize;

/// Thresholds for axis-line selection.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FrameOptions {
    pub segments: SegmentOptions,
    /// Minimum line length as a fraction of the image extent along the line.
    pub min_length_fraction: f32,
    /// Maximum deviation (degrees) from horizontal/vertical.
    pub axis_tolerance_deg: f32,
    /// Parallel lines closer than this are one line (the longest is kept).
    pub merge_distance_px: f32,
    /// Where the missing top edge of a partial frame is placed.
    pub partial_top_fraction: f32,
    /// Where the missing right edge of a partial frame is placed.
    pub partial_right_fraction: f32,
    /// Second attempt with looser thresholds; `None` disables the retry.
    pub relaxed: Option<RelaxedFrameOptions>,
    /// Use the whole image as frame when no lines are found (degraded mode).
    pub fallback_to_image_bounds: bool,
    /// Images smaller than this on either side are rejected.
    pub min_image_size: u32,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            segments: SegmentOptions::default(),
            min_length_fraction: 0.5,
            axis_tolerance_deg: 5.0,
            merge_distance_px: 10.0,
            partial_top_fraction: 0.1,
            partial_right_fraction: 0.9,
            relaxed: Some(RelaxedFrameOptions::default()),
            fallback_to_image_bounds: false,
            min_image_size: 16,
        }
    }
}

/// Overrides applied on the retry pass.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct RelaxedFrameOptions {
    pub min_length_fraction: f32,
    pub magnitude_threshold: f32,
}

impl Default for RelaxedFrameOptions {
    fn default() -> Self {
        Self {
            min_length_fraction: 0.25,
            magnitude_threshold: 0.2,
        }
    }
}

impl FrameOptions {
    pub(crate) fn relaxed_copy(&self) -> Option<FrameOptions> {
        let relaxed = self.relaxed?;
        let mut copy = self.clone();
        copy.min_length_fraction = relaxed.min_length_fraction;
        copy.segments.magnitude_threshold = relaxed.magnitude_threshold;
        copy.relaxed = None;
        Some(copy)
    }
}
