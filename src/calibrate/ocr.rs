//! Text recognition seam.
//!
//! The calibrator only needs word boxes with text; [`TextRecognizer`] hides
//! the engine. [`TesseractRecognizer`] shells out to the system `tesseract`
//! through `rusty-tesseract`.
use super::options::TesseractOptions;
use crate::error::OcrError;
use image::{DynamicImage, GrayImage};
use rusty_tesseract::{Args, Image};
use std::collections::HashMap;

/// One recognized word, box in the coordinates of the image passed in.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizedWord {
    pub text: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f32,
}

impl RecognizedWord {
    pub fn center(&self) -> (f32, f32) {
        (
            self.left as f32 + self.width as f32 * 0.5,
            self.top as f32 + self.height as f32 * 0.5,
        )
    }
}

pub trait TextRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<Vec<RecognizedWord>, OcrError>;
}

/// Recognizer backed by the tesseract command line tool.
#[derive(Clone, Debug, Default)]
pub struct TesseractRecognizer {
    options: TesseractOptions,
}

impl TesseractRecognizer {
    pub fn new(options: TesseractOptions) -> Self {
        Self { options }
    }

    fn args(&self, psm: i32) -> Args {
        let mut config_variables = HashMap::new();
        if !self.options.char_whitelist.is_empty() {
            config_variables.insert(
                "tessedit_char_whitelist".to_string(),
                self.options.char_whitelist.clone(),
            );
        }
        Args {
            lang: self.options.lang.clone(),
            config_variables,
            dpi: Some(self.options.dpi),
            psm: Some(psm),
            oem: Some(self.options.oem),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<Vec<RecognizedWord>, OcrError> {
        let dynamic = DynamicImage::ImageLuma8(image.clone());
        let tess_img = Image::from_dynamic_image(&dynamic)
            .map_err(|e| OcrError::Backend(format!("failed to create tesseract image: {e}")))?;

        let mut words = Vec::new();
        for &psm in &self.options.psm_modes {
            let output = rusty_tesseract::image_to_data(&tess_img, &self.args(psm))
                .map_err(|e| OcrError::Backend(e.to_string()))?;
            log::debug!(
                "ocr: psm={} entries={} size={}x{}",
                psm,
                output.data.len(),
                image.width(),
                image.height()
            );
            words.extend(
                output
                    .data
                    .into_iter()
                    .filter(|d| !d.text.trim().is_empty())
                    .map(|d| RecognizedWord {
                        text: d.text,
                        left: d.left,
                        top: d.top,
                        width: d.width,
                        height: d.height,
                        confidence: d.conf,
                    }),
            );
        }
        Ok(words)
    }
}
