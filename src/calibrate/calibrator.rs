use super::fit::{fit_calibration, AxisCalibrationOutcome};
use super::ocr::TextRecognizer;
use super::options::CalibrationOptions;
use super::preprocess::upscale_for_ocr;
use super::tokens::{tokens_from_words, AxisToken};
use crate::types::{Axis, GraphFrame, PixelRect};
use image::imageops;
use image::GrayImage;
use log::{debug, warn};

/// Tick-label region next to a frame edge, clipped to the image.
///
/// x: below the bottom edge, overhanging left/right. y: left of the left
/// edge, overhanging top/bottom.
pub fn axis_roi(
    frame: &GraphFrame,
    axis: Axis,
    width: u32,
    height: u32,
    options: &CalibrationOptions,
) -> PixelRect {
    let m = options.roi;
    let gap = m.gap_px as i64;
    match axis {
        Axis::X => {
            let y0 = frame.bottom() as i64 + gap;
            PixelRect::clipped(
                frame.left() as i64 - m.x_side_px as i64,
                y0,
                frame.right() as i64 + m.x_side_px as i64 + 1,
                y0 + m.x_below_px as i64,
                width,
                height,
            )
        }
        Axis::Y => {
            let x1 = frame.left() as i64 - gap;
            PixelRect::clipped(
                x1 - m.y_left_px as i64,
                frame.top() as i64 - m.y_side_px as i64,
                x1,
                frame.bottom() as i64 + m.y_side_px as i64 + 1,
                width,
                height,
            )
        }
    }
}

/// Runs every configured strategy over an axis ROI and fits the result.
pub struct AxisCalibrator<'a> {
    recognizer: &'a dyn TextRecognizer,
    options: &'a CalibrationOptions,
}

impl<'a> AxisCalibrator<'a> {
    pub fn new(recognizer: &'a dyn TextRecognizer, options: &'a CalibrationOptions) -> Self {
        Self {
            recognizer,
            options,
        }
    }

    pub fn calibrate(
        &self,
        gray: &GrayImage,
        frame: &GraphFrame,
        axis: Axis,
    ) -> AxisCalibrationOutcome {
        let tokens = self.collect_tokens(gray, frame, axis);
        fit_calibration(tokens, frame, axis, self.options)
    }

    /// Raw tokens from all strategies, not yet merged.
    pub fn collect_tokens(&self, gray: &GrayImage, frame: &GraphFrame, axis: Axis) -> Vec<AxisToken> {
        let roi = axis_roi(frame, axis, gray.width(), gray.height(), self.options);
        if roi.w < self.options.min_roi_size || roi.h < self.options.min_roi_size {
            debug!("calibration: {axis} roi too small ({}x{})", roi.w, roi.h);
            return Vec::new();
        }

        let crop = imageops::crop_imm(gray, roi.x, roi.y, roi.w, roi.h).to_image();
        let (scaled, scale) =
            upscale_for_ocr(&crop, self.options.ocr_target_width, self.options.max_upscale);

        let mut tokens = Vec::new();
        for strategy in &self.options.strategies {
            let prepared = strategy.apply(&scaled, self.options);
            match self.recognizer.recognize(&prepared) {
                Ok(words) => {
                    let found = tokens_from_words(
                        &words,
                        axis,
                        roi,
                        scale,
                        self.options.min_confidence,
                        self.options.value_bounds,
                    );
                    debug!(
                        "calibration: {axis} strategy={:?} words={} tokens={}",
                        strategy,
                        words.len(),
                        found.len()
                    );
                    tokens.extend(found);
                }
                Err(err) => warn!("calibration: {axis} strategy={strategy:?} failed: {err}"),
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rois_sit_outside_the_frame() {
        let frame = GraphFrame::new(100, 50, 900, 700).unwrap();
        let opts = CalibrationOptions::default();
        let x = axis_roi(&frame, Axis::X, 1000, 800, &opts);
        assert_eq!((x.x, x.y, x.w, x.h), (20, 703, 961, 97));
        let y = axis_roi(&frame, Axis::Y, 1000, 800, &opts);
        assert_eq!((y.x, y.y, y.w, y.h), (0, 0, 97, 751));
    }

    #[test]
    fn roi_at_image_border_is_empty() {
        let frame = GraphFrame::new(0, 0, 99, 99).unwrap();
        let opts = CalibrationOptions::default();
        assert!(axis_roi(&frame, Axis::X, 100, 100, &opts).is_empty());
        assert!(axis_roi(&frame, Axis::Y, 100, 100, &opts).is_empty());
    }
}
