//! Extraction orchestrator.
//!
//! [`ChartExtractor`] owns the source image and sequences the stages:
//! frame detection, axis calibration (OCR or manual), marker and curve
//! detection, and series projection. It keeps the raw pixel detections so a
//! later manual calibration re-projects them without re-scanning the image.
//!
//! ```no_run
//! use chart_extractor::{ChartExtractor, ExtractorParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut extractor = ChartExtractor::open("plot.png", ExtractorParams::default())?;
//! let report = extractor.process()?;
//! for (key, points) in report.result.iter() {
//!     println!("{key}: {} points", points.len());
//! }
//! extractor.set_manual_calibration(0.0, 10.0, 0.0, 100.0)?;
//! # Ok(())
//! # }
//! ```

mod batch;
mod params;
mod pipeline;

pub use batch::{extract_batch, extract_batch_with};
pub use params::ExtractorParams;
pub use pipeline::ChartExtractor;
