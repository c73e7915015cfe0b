use crate::edges::GradientKernel;
use serde::Deserialize;

/// Options controlling region growth and the significance test.
///
/// Thresholds are expressed for intensities normalized to `[0, 1]`; a full
/// black-on-white step produces a Sobel magnitude of about 4.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SegmentOptions {
    pub kernel: GradientKernel,
    /// Minimum gradient magnitude for seed and grown pixels.
    pub magnitude_threshold: f32,
    /// Orientation tolerance around the seed normal in degrees.
    pub angle_tolerance_deg: f32,
    /// Minimum accepted segment length in pixels.
    pub min_length_px: f32,
    /// Minimum number of pixels in a grown region.
    pub min_region_size: usize,
    pub min_aligned_fraction: f32,
    /// Optional maximum span (in pixels) along the segment normal.
    pub normal_span_limit_px: Option<f32>,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            kernel: GradientKernel::Sobel,
            magnitude_threshold: 0.5,
            angle_tolerance_deg: 22.5,
            min_length_px: 8.0,
            min_region_size: 12,
            min_aligned_fraction: 0.6,
            normal_span_limit_px: None,
        }
    }
}
