use super::params::ExtractorParams;
use crate::calibrate::{
    AxisCalibrationOutcome, AxisCalibrator, TesseractRecognizer, TextRecognizer,
};
use crate::curves::sample_curves;
use crate::diagnostics::{
    CalibrationStage, DetectionStage, ExtractionReport, ExtractionSummary, InputDescriptor,
    PipelineTrace, TimingBreakdown,
};
use crate::error::{CalibrationError, ConfigError, ExtractError};
use crate::frame::{detect_frame_with_fallback, FrameOutcome};
use crate::image::io::load_rgb_image;
use crate::markers::detect_markers;
use crate::series::{project_points, SeriesClassifier};
use crate::types::{Axis, AxisCalibration, DetectedPoint, ExtractionResult, GraphFrame, PixelRect};
use image::{imageops, GrayImage, RgbImage};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

type BoxedRecognizer = Box<dyn TextRecognizer + Send + Sync>;

/// Owns one chart image and everything derived from it.
///
/// `process` runs the full pipeline; the raw pixel detections are kept so
/// [`set_manual_calibration`](Self::set_manual_calibration) can re-project
/// them without touching the image again.
pub struct ChartExtractor {
    image: RgbImage,
    source: Option<PathBuf>,
    params: ExtractorParams,
    recognizer: BoxedRecognizer,
    classifier: SeriesClassifier,
    manual: Option<(AxisCalibration, AxisCalibration)>,
    state: Option<RunState>,
}

/// Artifacts of the last successful run.
struct RunState {
    frame: FrameOutcome,
    calibration: CalibrationStage,
    interior: PixelRect,
    points: Vec<DetectedPoint>,
    markers: usize,
    edge_mask: GrayImage,
    result: ExtractionResult,
    timings: TimingBreakdown,
}

impl RunState {
    fn report(&self, input: InputDescriptor) -> ExtractionReport {
        let x = &self.calibration.x.calibration;
        let y = &self.calibration.y.calibration;
        ExtractionReport {
            result: self.result.clone(),
            summary: ExtractionSummary::new(&self.result, x, y),
            trace: PipelineTrace {
                input,
                timings: self.timings.clone(),
                frame: self.frame.clone(),
                calibration: self.calibration.clone(),
                detection: DetectionStage {
                    interior: self.interior,
                    markers: self.markers,
                    curve_points: self.points.len() - self.markers,
                },
            },
        }
    }
}

impl ChartExtractor {
    /// Extractor over an in-memory image using the tesseract recognizer.
    pub fn new(image: RgbImage, params: ExtractorParams) -> Result<Self, ConfigError> {
        let recognizer = TesseractRecognizer::new(params.calibration.tesseract.clone());
        Self::with_recognizer(image, params, Box::new(recognizer))
    }

    /// Load `path` and build an extractor over it.
    pub fn open(path: impl AsRef<Path>, params: ExtractorParams) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let image = load_rgb_image(path).map_err(|source| ExtractError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let mut extractor = Self::new(image, params)?;
        extractor.source = Some(path.to_path_buf());
        Ok(extractor)
    }

    /// Extractor with a caller-supplied text recognizer.
    pub fn with_recognizer(
        image: RgbImage,
        params: ExtractorParams,
        recognizer: BoxedRecognizer,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        let classifier = SeriesClassifier::new(params.palette.clone(), params.classifier);
        Ok(Self {
            image,
            source: None,
            params,
            recognizer,
            classifier,
            manual: None,
            state: None,
        })
    }

    /// Run every stage and keep the artifacts for later recalibration.
    ///
    /// Repeated calls recompute from the image and give the same result.
    pub fn process(&mut self) -> Result<ExtractionReport, ExtractError> {
        let (width, height) = self.image.dimensions();
        debug!(
            "ChartExtractor::process start w={} h={} manual={}",
            width,
            height,
            self.manual.is_some()
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let gray = imageops::grayscale(&self.image);
        timings.record_since("grayscale", stage);

        let stage = Instant::now();
        let frame = detect_frame_with_fallback(&gray, &self.params.frame)?;
        let frame_ms = timings.record_since("frame", stage);
        debug!(
            "frame: left={} top={} right={} bottom={} partial={} relaxed={} degraded={} ms={:.2}",
            frame.frame.left(),
            frame.frame.top(),
            frame.frame.right(),
            frame.frame.bottom(),
            frame.partial,
            frame.relaxed,
            frame.degraded,
            frame_ms
        );

        let stage = Instant::now();
        let calibration = self.calibrate(&gray, &frame.frame);
        timings.record_since("calibration", stage);

        let interior = frame
            .frame
            .interior(self.params.frame_inset_px, width, height);

        let stage = Instant::now();
        let mut points = detect_markers(
            &self.image,
            interior,
            &self.params.palette,
            &self.params.neutral,
            &self.params.markers,
        );
        let markers = points.len();
        timings.record_since("markers", stage);

        let stage = Instant::now();
        let curves = sample_curves(
            &self.image,
            interior,
            &self.params.neutral,
            &self.params.curves,
        );
        points.extend(curves.points);
        timings.record_since("curves", stage);

        let stage = Instant::now();
        let result = project_points(
            &points,
            &self.classifier,
            &frame.frame,
            &calibration.x.calibration,
            &calibration.y.calibration,
        );
        timings.record_since("projection", stage);
        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

        if result.is_empty() {
            warn!("extraction: no data points detected inside {interior:?}");
        }
        debug!(
            "ChartExtractor::process done markers={} curve_points={} series={} total_ms={:.2}",
            markers,
            points.len() - markers,
            result.len(),
            timings.total_ms
        );

        let state = RunState {
            frame,
            calibration,
            interior,
            points,
            markers,
            edge_mask: curves.edge_mask,
            result,
            timings,
        };
        let report = state.report(self.input_descriptor());
        self.state = Some(state);
        Ok(report)
    }

    fn calibrate(&self, gray: &GrayImage, frame: &GraphFrame) -> CalibrationStage {
        if let Some((x, y)) = self.manual {
            return CalibrationStage {
                x: AxisCalibrationOutcome::manual(Axis::X, x),
                y: AxisCalibrationOutcome::manual(Axis::Y, y),
            };
        }
        let calibrator = AxisCalibrator::new(&*self.recognizer, &self.params.calibration);
        CalibrationStage {
            x: calibrator.calibrate(gray, frame, Axis::X),
            y: calibrator.calibrate(gray, frame, Axis::Y),
        }
    }

    /// Replace both axis calibrations and re-project the stored detections.
    ///
    /// The bounds are validated before anything changes. The override also
    /// applies to later `process` calls until cleared.
    pub fn set_manual_calibration(
        &mut self,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<(), CalibrationError> {
        let x = AxisCalibration::new(Axis::X, x_min, x_max)?;
        let y = AxisCalibration::new(Axis::Y, y_min, y_max)?;
        debug!("calibration: manual x=[{x_min}, {x_max}] y=[{y_min}, {y_max}]");

        if let Some(state) = self.state.as_mut() {
            let stage = Instant::now();
            state.result =
                project_points(&state.points, &self.classifier, &state.frame.frame, &x, &y);
            state.calibration = CalibrationStage {
                x: AxisCalibrationOutcome::manual(Axis::X, x),
                y: AxisCalibrationOutcome::manual(Axis::Y, y),
            };
            state.timings.record_since("reprojection", stage);
        }
        self.manual = Some((x, y));
        Ok(())
    }

    /// Drop the manual override; the next `process` uses OCR again.
    pub fn clear_manual_calibration(&mut self) {
        self.manual = None;
    }

    pub fn manual_calibration(&self) -> Option<(AxisCalibration, AxisCalibration)> {
        self.manual
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn params(&self) -> &ExtractorParams {
        &self.params
    }

    pub fn frame(&self) -> Option<&GraphFrame> {
        self.state.as_ref().map(|s| &s.frame.frame)
    }

    pub fn calibration(&self, axis: Axis) -> Option<&AxisCalibration> {
        self.calibration_outcome(axis).map(|o| &o.calibration)
    }

    pub fn calibration_outcome(&self, axis: Axis) -> Option<&AxisCalibrationOutcome> {
        self.state.as_ref().map(|s| match axis {
            Axis::X => &s.calibration.x,
            Axis::Y => &s.calibration.y,
        })
    }

    pub fn result(&self) -> Option<&ExtractionResult> {
        self.state.as_ref().map(|s| &s.result)
    }

    /// Pixel-space detections of the last run, markers first.
    pub fn raw_points(&self) -> &[DetectedPoint] {
        self.state
            .as_ref()
            .map(|s| s.points.as_slice())
            .unwrap_or_default()
    }

    pub fn interior(&self) -> Option<PixelRect> {
        self.state.as_ref().map(|s| s.interior)
    }

    /// Dilated edge map the curve sampler scanned (interior coordinates).
    pub fn edge_mask(&self) -> Option<&GrayImage> {
        self.state.as_ref().map(|s| &s.edge_mask)
    }

    pub fn summary(&self) -> Option<ExtractionSummary> {
        self.state.as_ref().map(|s| {
            ExtractionSummary::new(
                &s.result,
                &s.calibration.x.calibration,
                &s.calibration.y.calibration,
            )
        })
    }

    /// Report of the current state, reflecting any manual recalibration.
    pub fn report(&self) -> Option<ExtractionReport> {
        self.state
            .as_ref()
            .map(|s| s.report(self.input_descriptor()))
    }

    fn input_descriptor(&self) -> InputDescriptor {
        InputDescriptor {
            width: self.image.width(),
            height: self.image.height(),
            path: self.source.as_ref().map(|p| p.display().to_string()),
        }
    }
}
