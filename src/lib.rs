#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod image;
pub mod types;

// Stage modules. Public so tools can run a single stage, but their options
// and intermediate types may still change.
pub mod angle;
pub mod calibrate;
pub mod color;
pub mod curves;
pub mod edges;
pub mod frame;
pub mod markers;
pub mod segments;
pub mod series;
pub mod stats;

// --- High-level re-exports -------------------------------------------------

// Main entry points: extractor + results.
pub use crate::extractor::{extract_batch, extract_batch_with, ChartExtractor, ExtractorParams};
pub use crate::types::{
    Axis, AxisCalibration, DetectedPoint, ExtractionResult, GraphFrame, MarkerShape, MarkerType,
    PointKind, SeriesKey, SeriesKind, SeriesPoint,
};

// Diagnostics returned by the extractor.
pub use crate::diagnostics::{ExtractionReport, ExtractionSummary, PipelineTrace};

pub use crate::calibrate::{CalibrationStatus, RecognizedWord, TesseractRecognizer, TextRecognizer};
pub use crate::color::{ColorName, Palette, PaletteEntry};
pub use crate::error::{CalibrationError, ConfigError, ExtractError, FrameDetectionError, OcrError};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use chart_extractor::prelude::*;
///
/// # fn main() -> Result<(), ExtractError> {
/// let mut extractor = ChartExtractor::open("figure.png", ExtractorParams::default())?;
/// let report = extractor.process()?;
/// println!(
///     "series={} points={} total_ms={:.1}",
///     report.summary.total_series, report.summary.total_points, report.trace.timings.total_ms
/// );
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        Axis, AxisCalibration, ChartExtractor, ExtractError, ExtractionResult, ExtractorParams,
        SeriesKey,
    };
}
