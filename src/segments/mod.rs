//! Lightweight LSD-like segment extractor used to find the plot frame.
//!
//! The algorithm performs:
//!
//! - Gradient computation (via `edges::image_gradients`), producing per-pixel
//!   `gx`, `gy`, magnitude, and implicitly an orientation.
//! - Region growing from seeds using orientation consistency: pixels whose
//!   gradient orientation is within a tolerance of the seed normal are grown
//!   into a region, while enforcing a minimum gradient magnitude.
//! - PCA line fitting: the pixel coordinates of a grown region are summarized
//!   online and a 2x2 covariance matrix is eigendecomposed to obtain the
//!   principal direction.
//! - Endpoint projection: region points are projected onto the principal axis
//!   to obtain endpoints `p0` and `p1`.
//! - Significance tests: minimum region size, minimum length and a minimum
//!   fraction of pixels aligned with the seed orientation.
//!
//! Orientation is taken modulo pi, so both flanks of a thin dark stroke grow
//! into one region and yield a single segment on the stroke's center line.
//!
//! Region growing visits each pixel at most once, giving O(W*H) behavior;
//! PCA fitting and endpoint estimation are linear in region size.

mod extractor;
mod options;
mod region;
mod segment;

pub use extractor::SegmentResult;
pub use options::SegmentOptions;
pub use segment::Segment;

use crate::image::ImageF32;

/// Extract straight segments from a normalized grayscale image.
pub fn extract_segments(l: &ImageF32, options: &SegmentOptions) -> SegmentResult {
    extractor::SegmentExtractor::new(l, options).extract()
}

#[cfg(test)]
mod tests;
