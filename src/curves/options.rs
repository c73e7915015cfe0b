use crate::edges::GradientKernel;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CurveOptions {
    /// Number of cells per side of the sampling grid.
    pub grid_size: u32,
    pub kernel: GradientKernel,
    /// Gradient magnitude threshold on `[0, 1]` intensities.
    pub magnitude_threshold: f32,
    /// Chebyshev radius of the dilation applied to the edge map.
    pub dilate_radius: u8,
    /// When the cell center is neutral, emit the most chromatic edge pixel
    /// of the cell instead of dropping the cell.
    pub chromatic_fallback: bool,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            grid_size: 100,
            kernel: GradientKernel::Sobel,
            magnitude_threshold: 0.15,
            dilate_radius: 1,
            chromatic_fallback: true,
        }
    }
}
