//! Plot frame detection.
//!
//! Long, nearly axis-aligned segments are extracted from the grayscale image
//! (`segments`), near-duplicates from the two flanks of thick strokes are
//! merged, and the extreme horizontal/vertical lines define the frame. When
//! only one line per orientation survives, the frame is completed from image
//! proportions and flagged as partial.

mod detector;
mod options;

pub use detector::{detect_frame, detect_frame_with_fallback, AxisLine, FrameOutcome};
pub use options::{FrameOptions, RelaxedFrameOptions};
