//! Binarization strategies applied to tick-label ROIs before recognition.
use super::options::CalibrationOptions;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::filter::box_filter;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrStrategy {
    /// Plain grayscale.
    Grayscale,
    /// Otsu global threshold, dark text on white.
    Otsu,
    /// Inverted Otsu threshold.
    InvertedOtsu,
    /// Local mean threshold for uneven backgrounds.
    Adaptive,
    /// Contrast-boosted and brightened grayscale.
    ContrastBoost,
}

impl OcrStrategy {
    pub const ALL: [OcrStrategy; 5] = [
        OcrStrategy::Grayscale,
        OcrStrategy::Otsu,
        OcrStrategy::InvertedOtsu,
        OcrStrategy::Adaptive,
        OcrStrategy::ContrastBoost,
    ];

    pub fn apply(&self, roi: &GrayImage, options: &CalibrationOptions) -> GrayImage {
        match self {
            OcrStrategy::Grayscale => roi.clone(),
            OcrStrategy::Otsu => threshold(roi, otsu_level(roi), false),
            OcrStrategy::InvertedOtsu => threshold(roi, otsu_level(roi), true),
            OcrStrategy::Adaptive => {
                adaptive_threshold(roi, options.adaptive_radius, options.adaptive_offset)
            }
            OcrStrategy::ContrastBoost => {
                let boosted = imageops::contrast(roi, options.contrast_percent);
                imageops::brighten(&boosted, options.brighten)
            }
        }
    }
}

fn threshold(image: &GrayImage, level: u8, invert: bool) -> GrayImage {
    let mut out = image.clone();
    for p in out.pixels_mut() {
        let above = p[0] > level;
        p[0] = if above != invert { 255 } else { 0 };
    }
    out
}

/// Pixels brighter than `local_mean - offset` become white.
fn adaptive_threshold(image: &GrayImage, radius: u32, offset: i16) -> GrayImage {
    let mean = box_filter(image, radius, radius);
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let v = image.get_pixel(x, y)[0] as i16;
        let m = mean.get_pixel(x, y)[0] as i16;
        if v > m - offset {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Upscale narrow ROIs towards `target_width`, capped at `max_scale`.
/// Returns the image and the applied scale factor.
pub fn upscale_for_ocr(roi: &GrayImage, target_width: u32, max_scale: f32) -> (GrayImage, f32) {
    let width = roi.width();
    if width == 0 || width >= target_width {
        return (roi.clone(), 1.0);
    }
    let scale = (target_width as f32 / width as f32).min(max_scale.max(1.0));
    if scale <= 1.0 {
        return (roi.clone(), 1.0);
    }
    let new_w = (width as f32 * scale).round() as u32;
    let new_h = (roi.height() as f32 * scale).round().max(1.0) as u32;
    let resized = imageops::resize(roi, new_w, new_h, FilterType::Lanczos3);
    (resized, new_w as f32 / width as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_image() -> GrayImage {
        let mut img = GrayImage::from_pixel(40, 20, Luma([230]));
        for y in 5..15 {
            for x in 10..18 {
                img.put_pixel(x, y, Luma([20]));
            }
        }
        img
    }

    #[test]
    fn otsu_variants_are_complementary() {
        let img = label_image();
        let opts = CalibrationOptions::default();
        let normal = OcrStrategy::Otsu.apply(&img, &opts);
        let inverted = OcrStrategy::InvertedOtsu.apply(&img, &opts);
        assert_eq!(normal.get_pixel(12, 8)[0], 0);
        assert_eq!(normal.get_pixel(1, 1)[0], 255);
        for (a, b) in normal.pixels().zip(inverted.pixels()) {
            assert_eq!(a[0], 255 - b[0]);
        }
    }

    #[test]
    fn adaptive_keeps_text_dark_and_background_white() {
        let img = label_image();
        let out = OcrStrategy::Adaptive.apply(&img, &CalibrationOptions::default());
        assert_eq!(out.get_pixel(12, 8)[0], 0);
        assert_eq!(out.get_pixel(35, 2)[0], 255);
    }

    #[test]
    fn contrast_boost_separates_faint_ink() {
        let mut img = GrayImage::from_pixel(40, 20, Luma([180]));
        for y in 5..15 {
            for x in 10..18 {
                img.put_pixel(x, y, Luma([90]));
            }
        }
        let out = OcrStrategy::ContrastBoost.apply(&img, &CalibrationOptions::default());
        let ink = out.get_pixel(12, 8)[0];
        let background = out.get_pixel(35, 2)[0];
        assert!(ink < 90, "ink={ink}");
        assert!(background > 180, "background={background}");
        assert!(background - ink > 90);
    }

    #[test]
    fn upscale_respects_cap() {
        let img = label_image();
        let (big, scale) = upscale_for_ocr(&img, 800, 4.0);
        assert_eq!(scale, 4.0);
        assert_eq!(big.dimensions(), (160, 80));
        let (same, scale) = upscale_for_ocr(&img, 30, 4.0);
        assert_eq!(scale, 1.0);
        assert_eq!(same.dimensions(), img.dimensions());
    }
}
