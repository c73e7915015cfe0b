//! Edge processing: image gradients and non-maximum suppression.
//!
//! - Gradient computation (Sobel/Scharr) returning `gx`, `gy` and magnitude.
//!   Borders are handled by clamping indices (replicate).
//! - Direction-aligned non-maximum suppression producing thin edge elements,
//!   rasterized into a binary edge map for the curve sampler.

pub mod grad;
pub mod nms;

pub use grad::{image_gradients, Grad, GradientKernel};
pub use nms::{detect_edges, edge_map, run_nms, EdgeElement};
