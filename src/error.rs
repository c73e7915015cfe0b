//! Error taxonomy of the extraction pipeline.
//!
//! Only structural failures are errors. Sparse OCR output and empty detections
//! are reported through status values on the result instead.

use crate::color::ColorName;
use crate::types::Axis;
use std::path::PathBuf;
use thiserror::Error;

/// The plotting frame could not be located.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FrameDetectionError {
    #[error("no usable axis lines (horizontal={horizontal}, vertical={vertical})")]
    NoAxisLines { horizontal: usize, vertical: usize },
    #[error("degenerate frame {width}x{height}")]
    Degenerate { width: i64, height: i64 },
    #[error("image too small for frame detection ({width}x{height})")]
    ImageTooSmall { width: u32, height: u32 },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalibrationError {
    #[error("invalid {axis} range [{min}, {max}]: min must be finite and below max")]
    InvalidRange { axis: Axis, min: f64, max: f64 },
}

/// Rejected configuration, reported before any image is processed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("palette is empty")]
    EmptyPalette,
    #[error("palette range for {color} has lower bound above upper bound")]
    InvertedRange { color: ColorName },
    #[error("palette ranges for {first} and {second} overlap")]
    OverlappingRanges { first: ColorName, second: ColorName },
    #[error("curve grid size must be positive")]
    InvalidGridSize,
    #[error("marker area band ({min}, {max}) is empty")]
    InvalidAreaBand { min: f64, max: f64 },
    #[error("neutral thresholds must stay below pure white")]
    InvalidNeutralThresholds,
}

/// Failure inside a text-recognition backend.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OcrError {
    #[error("text recognition backend failed: {0}")]
    Backend(String),
}

/// Top-level error returned by [`ChartExtractor`](crate::ChartExtractor).
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Frame(#[from] FrameDetectionError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
