//! Axis calibration from tick labels.
//!
//! For each axis a region of interest next to the frame edge (below the
//! frame for x, left of it for y) is cut out, preprocessed with several
//! binarization strategies and passed to a [`TextRecognizer`]. Numeric words
//! become [`AxisToken`]s carrying their position along the axis in full-image
//! pixels. Tokens are merged, deduplicated, filtered with Tukey fences and
//! fitted with a least-squares line `value = a + b·pixel`, which is evaluated
//! at the frame edges to get the calibrated range.
//!
//! Sparse OCR output never fails: the outcome falls back to the raw value
//! range or to `[0, 1]` with a degraded status.

mod calibrator;
mod fit;
mod ocr;
mod options;
mod preprocess;
mod tokens;

pub use calibrator::{axis_roi, AxisCalibrator};
pub use fit::{fit_calibration, AxisCalibrationOutcome, CalibrationStatus};
pub use ocr::{RecognizedWord, TesseractRecognizer, TextRecognizer};
pub use options::{CalibrationOptions, RoiMargins, TesseractOptions};
pub use preprocess::{upscale_for_ocr, OcrStrategy};
pub use tokens::{parse_number, AxisToken};
