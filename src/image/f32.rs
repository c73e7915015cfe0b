//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Intensities are normalized to `[0, 1]`, so gradient thresholds are
//! independent of the 8-bit source encoding.
use image::GrayImage;

#[derive(Clone, Debug, Default)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Convert an 8-bit grayscale image, scaling to `[0, 1]`.
    pub fn from_luma8(gray: &GrayImage) -> Self {
        let data = gray.as_raw().iter().map(|&v| v as f32 / 255.0).collect();
        Self {
            w: gray.width() as usize,
            h: gray.height() as usize,
            data,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn luma_conversion_normalizes() {
        let mut gray = GrayImage::new(3, 2);
        gray.put_pixel(2, 1, Luma([255]));
        gray.put_pixel(0, 0, Luma([51]));
        let img = ImageF32::from_luma8(&gray);
        assert_eq!((img.w, img.h), (3, 2));
        assert!((img.get(2, 1) - 1.0).abs() < 1e-6);
        assert!((img.get(0, 0) - 0.2).abs() < 1e-6);
        assert_eq!(img.row(1).len(), 3);
    }
}
