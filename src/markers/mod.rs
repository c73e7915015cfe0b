//! Color-blob marker detection.
//!
//! The frame interior is converted to HSV once. For every palette color a
//! binary mask is built (neutral pixels never enter a mask), outer contours
//! are traced with `imageproc`, and contours whose enclosed area lies in the
//! configured band become marker candidates. Same-color candidates closer
//! than the dedup radius collapse into one marker.

mod dedup;
mod detector;
mod options;
mod shape;

pub use detector::{color_mask, detect_markers};
pub use options::MarkerOptions;
pub use shape::{classify_shape, polygon_area_centroid};
