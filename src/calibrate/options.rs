use super::preprocess::OcrStrategy;
use serde::Deserialize;

/// Margins of the tick-label regions around the frame.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct RoiMargins {
    /// Extent below the bottom edge covered by the x-axis ROI.
    pub x_below_px: u32,
    /// Horizontal overhang of the x-axis ROI past the left/right edges.
    pub x_side_px: u32,
    /// Extent left of the left edge covered by the y-axis ROI.
    pub y_left_px: u32,
    /// Vertical overhang of the y-axis ROI past the top/bottom edges.
    pub y_side_px: u32,
    /// Gap kept between the frame line and the ROI.
    pub gap_px: u32,
}

impl Default for RoiMargins {
    fn default() -> Self {
        Self {
            x_below_px: 250,
            x_side_px: 80,
            y_left_px: 300,
            y_side_px: 50,
            gap_px: 3,
        }
    }
}

/// Arguments forwarded to the tesseract binary.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TesseractOptions {
    pub lang: String,
    /// Page segmentation modes; each is run and the words are concatenated.
    pub psm_modes: Vec<i32>,
    pub oem: i32,
    pub dpi: i32,
    pub char_whitelist: String,
}

impl Default for TesseractOptions {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
            psm_modes: vec![6, 11],
            oem: 3,
            dpi: 300,
            char_whitelist: "0123456789.,-".to_string(),
        }
    }
}

/// Parameters of the OCR calibration stage.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CalibrationOptions {
    pub roi: RoiMargins,
    /// ROIs thinner than this on either side are skipped.
    pub min_roi_size: u32,
    /// ROIs narrower than this are upscaled (Lanczos3) before recognition.
    pub ocr_target_width: u32,
    pub max_upscale: f32,
    pub strategies: Vec<OcrStrategy>,
    /// Half window of the local-mean threshold.
    pub adaptive_radius: u32,
    /// Offset subtracted from the local mean.
    pub adaptive_offset: i16,
    /// Contrast change in percent for the contrast-boost strategy.
    pub contrast_percent: f32,
    pub brighten: i32,
    /// Words below this recognizer confidence are ignored.
    pub min_confidence: f32,
    /// Plausible tick values lie strictly inside this interval.
    pub value_bounds: (f64, f64),
    /// Values closer than this are treated as the same label.
    pub dedup_tolerance: f64,
    /// IQR filtering applies when more than this many distinct values remain.
    pub outlier_min_count: usize,
    pub iqr_factor: f64,
    pub tesseract: TesseractOptions,
}

impl Default for CalibrationOptions {
    fn default() -> Self {
        Self {
            roi: RoiMargins::default(),
            min_roi_size: 10,
            ocr_target_width: 800,
            max_upscale: 4.0,
            strategies: OcrStrategy::ALL.to_vec(),
            adaptive_radius: 7,
            adaptive_offset: 5,
            contrast_percent: 60.0,
            brighten: 20,
            min_confidence: 0.0,
            value_bounds: (-10_000.0, 100_000.0),
            dedup_tolerance: 1e-6,
            outlier_min_count: 4,
            iqr_factor: 1.5,
            tesseract: TesseractOptions::default(),
        }
    }
}
