//! Independent extraction of many charts.
//!
//! Each image gets its own [`ChartExtractor`]; nothing is shared between
//! runs except the parameters. With the `parallel` feature the images are
//! spread over the rayon pool, otherwise they run in order.

use super::params::ExtractorParams;
use super::pipeline::ChartExtractor;
use crate::calibrate::TextRecognizer;
use crate::diagnostics::ExtractionReport;
use crate::error::ExtractError;
use image::RgbImage;
use log::debug;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Load and process every path with the tesseract recognizer.
///
/// Results are in input order; one failing image does not stop the others.
pub fn extract_batch<P>(
    paths: &[P],
    params: &ExtractorParams,
) -> Vec<Result<ExtractionReport, ExtractError>>
where
    P: AsRef<Path> + Sync,
{
    debug!("extract_batch: images={}", paths.len());
    let run = |path: &P| -> Result<ExtractionReport, ExtractError> {
        ChartExtractor::open(path, params.clone())?.process()
    };
    #[cfg(feature = "parallel")]
    {
        paths.par_iter().map(run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        paths.iter().map(run).collect()
    }
}

/// Process in-memory images, building one recognizer per image.
pub fn extract_batch_with<F>(
    images: Vec<RgbImage>,
    params: &ExtractorParams,
    make_recognizer: F,
) -> Vec<Result<ExtractionReport, ExtractError>>
where
    F: Fn() -> Box<dyn TextRecognizer + Send + Sync> + Sync,
{
    debug!("extract_batch_with: images={}", images.len());
    let run = |image: RgbImage| -> Result<ExtractionReport, ExtractError> {
        ChartExtractor::with_recognizer(image, params.clone(), make_recognizer())?.process()
    };
    #[cfg(feature = "parallel")]
    {
        images.into_par_iter().map(run).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        images.into_iter().map(run).collect()
    }
}
