//! Parameter types configuring the extraction stages.
//!
//! Every field has a default; JSON configs only need to name what they
//! change. `validate` runs before any image is touched.

use crate::calibrate::CalibrationOptions;
use crate::color::{ClassifierOptions, NeutralThresholds, Palette};
use crate::curves::CurveOptions;
use crate::error::ConfigError;
use crate::frame::FrameOptions;
use crate::markers::MarkerOptions;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ExtractorParams {
    pub frame: FrameOptions,
    pub calibration: CalibrationOptions,
    pub markers: MarkerOptions,
    pub curves: CurveOptions,
    /// Named HSV ranges, validated for non-overlap on deserialization.
    pub palette: Palette,
    pub neutral: NeutralThresholds,
    pub classifier: ClassifierOptions,
    /// Pixels skipped inside the frame lines before detection.
    pub frame_inset_px: u32,
}

impl Default for ExtractorParams {
    fn default() -> Self {
        Self {
            frame: FrameOptions::default(),
            calibration: CalibrationOptions::default(),
            markers: MarkerOptions::default(),
            curves: CurveOptions::default(),
            palette: Palette::default(),
            neutral: NeutralThresholds::default(),
            classifier: ClassifierOptions::default(),
            frame_inset_px: 3,
        }
    }
}

impl ExtractorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        Palette::new(self.palette.entries().to_vec())?;
        self.neutral.validate()?;
        if self.curves.grid_size == 0 {
            return Err(ConfigError::InvalidGridSize);
        }
        let (min, max) = (self.markers.min_area, self.markers.max_area);
        if !(min >= 0.0 && min < max && max.is_finite()) {
            return Err(ConfigError::InvalidAreaBand { min, max });
        }
        Ok(())
    }
}
