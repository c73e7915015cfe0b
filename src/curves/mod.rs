//! Grid sampling of thin curves.
//!
//! Blob detection misses one- or two-pixel polylines. Here the frame interior
//! is reduced to a thin edge map (gradients + NMS), dilated to bridge gaps
//! and scanned on an N×N grid; every cell containing edge pixels emits at
//! most one curve point.

mod options;
mod sampler;

pub use options::CurveOptions;
pub use sampler::{sample_curves, CurveSampling};
