//! Diagnostics data model returned alongside the extraction result.
//!
//! `ExtractionReport` bundles the series mapping, a compact summary and a
//! `PipelineTrace` describing what every stage saw and how long it took.
//! Everything here is plain serializable data.

pub mod report;
pub mod summary;
pub mod timing;

pub use report::{
    CalibrationStage, DetectionStage, ExtractionReport, InputDescriptor, PipelineTrace,
};
pub use summary::{AxisBounds, CalibrationBounds, ExtractionSummary, SeriesSummary};
pub use timing::{StageTiming, TimingBreakdown};
