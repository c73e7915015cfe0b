//! Core data model shared by every stage of the extraction pipeline.
//!
//! Pixel-space artifacts (`DetectedPoint`, `GraphFrame`) stay inside the
//! extractor; `AxisCalibration` and `ExtractionResult` are what downstream
//! consumers (exporters, viewers) read.

use crate::color::ColorName;
use crate::error::{CalibrationError, FrameDetectionError};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Chart axis identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Axis-aligned pixel rectangle `[x, x + w) × [y, y + h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Clip `[x0, x1) × [y0, y1)` (signed, possibly out of bounds) to an image.
    pub fn clipped(x0: i64, y0: i64, x1: i64, y1: i64, width: u32, height: u32) -> Self {
        let cx0 = x0.clamp(0, width as i64);
        let cy0 = y0.clamp(0, height as i64);
        let cx1 = x1.clamp(cx0, width as i64);
        let cy1 = y1.clamp(cy0, height as i64);
        Self {
            x: cx0 as u32,
            y: cy0 as u32,
            w: (cx1 - cx0) as u32,
            h: (cy1 - cy0) as u32,
        }
    }
}

/// Bounding rectangle of the plotting area in pixel coordinates.
///
/// `left`/`right` are the x positions of the vertical frame lines and
/// `top`/`bottom` the y positions of the horizontal ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphFrame {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl GraphFrame {
    /// Build a frame, rejecting rectangles with zero or negative extent.
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Result<Self, FrameDetectionError> {
        if right <= left || bottom <= top {
            return Err(FrameDetectionError::Degenerate {
                width: right as i64 - left as i64,
                height: bottom as i64 - top as i64,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Whole image used as the frame (degraded mode).
    pub fn from_image_bounds(width: u32, height: u32) -> Result<Self, FrameDetectionError> {
        Self::new(0, 0, width.saturating_sub(1), height.saturating_sub(1))
    }

    pub fn left(&self) -> u32 {
        self.left
    }
    pub fn top(&self) -> u32 {
        self.top
    }
    pub fn right(&self) -> u32 {
        self.right
    }
    pub fn bottom(&self) -> u32 {
        self.bottom
    }

    pub fn top_left(&self) -> (u32, u32) {
        (self.left, self.top)
    }

    pub fn bottom_right(&self) -> (u32, u32) {
        (self.right, self.bottom)
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Normalized position of a pixel coordinate along `axis`.
    ///
    /// X grows left to right from the left edge; Y grows bottom to top from
    /// the bottom edge. Values outside `[0, 1]` lie outside the frame.
    pub fn fraction(&self, axis: Axis, pixel: f32) -> f64 {
        match axis {
            Axis::X => (pixel as f64 - self.left as f64) / self.width() as f64,
            Axis::Y => (self.bottom as f64 - pixel as f64) / self.height() as f64,
        }
    }

    /// Pixel interval `(low_value_edge, high_value_edge)` along `axis`.
    pub fn axis_span(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::X => (self.left as f64, self.right as f64),
            Axis::Y => (self.bottom as f64, self.top as f64),
        }
    }

    /// Frame interior shrunk by `inset` pixels on every side, clipped to the image.
    pub fn interior(&self, inset: u32, width: u32, height: u32) -> PixelRect {
        let inset = inset as i64;
        PixelRect::clipped(
            self.left as i64 + inset,
            self.top as i64 + inset,
            self.right as i64 - inset + 1,
            self.bottom as i64 - inset + 1,
            width,
            height,
        )
    }
}

/// Linear pixel→value mapping for one axis.
///
/// `zero_position` is 0 for standard axes. When the range spans zero the
/// axis is bipolar and `zero_position` is the pixel fraction where value 0
/// sits; projection is then piecewise around that point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisCalibration {
    min_value: f64,
    max_value: f64,
    zero_position: f64,
}

impl Default for AxisCalibration {
    fn default() -> Self {
        Self {
            min_value: 0.0,
            max_value: 1.0,
            zero_position: 0.0,
        }
    }
}

impl AxisCalibration {
    /// Calibration spanning `[min_value, max_value]` on `axis`.
    pub fn new(axis: Axis, min_value: f64, max_value: f64) -> Result<Self, CalibrationError> {
        if !min_value.is_finite() || !max_value.is_finite() || min_value >= max_value {
            return Err(CalibrationError::InvalidRange {
                axis,
                min: min_value,
                max: max_value,
            });
        }
        let zero_position = if min_value < 0.0 && max_value > 0.0 {
            -min_value / (max_value - min_value)
        } else {
            0.0
        };
        Ok(Self {
            min_value,
            max_value,
            zero_position,
        })
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn zero_position(&self) -> f64 {
        self.zero_position
    }

    pub fn is_symmetric(&self) -> bool {
        self.zero_position > 0.0 && self.zero_position < 1.0
    }

    /// Map a normalized frame fraction to a data value.
    pub fn project(&self, fraction: f64) -> f64 {
        if self.is_symmetric() {
            let z = self.zero_position;
            if fraction < z {
                self.min_value * (1.0 - fraction / z)
            } else {
                self.max_value * (fraction - z) / (1.0 - z)
            }
        } else {
            self.min_value + fraction * (self.max_value - self.min_value)
        }
    }
}

/// Coarse geometric label attached to blob markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Square,
    Rectangle,
    Triangle,
    Polygon,
}

/// Whether a record came from a discrete marker or from a sampled curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerType {
    Marker,
    Curve,
}

/// Detection layer that produced a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointKind {
    /// Color blob matched against a palette entry.
    Marker { color: ColorName, shape: MarkerShape },
    /// Grid sample along an edge.
    Curve,
}

/// Raw pixel-space detection. Never mutated after creation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedPoint {
    pub px: f32,
    pub py: f32,
    pub rgb: Rgb,
    #[serde(flatten)]
    pub kind: PointKind,
}

impl DetectedPoint {
    pub fn marker(px: f32, py: f32, rgb: Rgb, color: ColorName, shape: MarkerShape) -> Self {
        Self {
            px,
            py,
            rgb,
            kind: PointKind::Marker { color, shape },
        }
    }

    pub fn curve(px: f32, py: f32, rgb: Rgb) -> Self {
        Self {
            px,
            py,
            rgb,
            kind: PointKind::Curve,
        }
    }

    pub fn marker_type(&self) -> MarkerType {
        match self.kind {
            PointKind::Marker { .. } => MarkerType::Marker,
            PointKind::Curve => MarkerType::Curve,
        }
    }
}

/// Second half of a series key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Points,
    Line,
}

impl From<MarkerType> for SeriesKind {
    fn from(t: MarkerType) -> Self {
        match t {
            MarkerType::Marker => SeriesKind::Points,
            MarkerType::Curve => SeriesKind::Line,
        }
    }
}

/// Identifies one exported series, displayed as `"{color}_{kind}"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesKey {
    pub color: ColorName,
    pub kind: SeriesKind,
}

impl SeriesKey {
    pub fn new(color: ColorName, kind: SeriesKind) -> Self {
        Self { color, kind }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            SeriesKind::Points => "points",
            SeriesKind::Line => "line",
        };
        write!(f, "{}_{}", self.color, kind)
    }
}

impl Serialize for SeriesKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One data-space record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
    pub marker_type: MarkerType,
}

/// Series mapping produced by one extraction run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractionResult {
    series: BTreeMap<SeriesKey, Vec<SeriesPoint>>,
}

impl ExtractionResult {
    pub fn push(&mut self, key: SeriesKey, point: SeriesPoint) {
        self.series.entry(key).or_default().push(point);
    }

    pub fn get(&self, key: &SeriesKey) -> Option<&[SeriesPoint]> {
        self.series.get(key).map(Vec::as_slice)
    }

    /// Lookup by display name, e.g. `"orange_points"`.
    pub fn get_by_name(&self, name: &str) -> Option<&[SeriesPoint]> {
        self.series
            .iter()
            .find(|(k, _)| k.to_string() == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &SeriesKey> {
        self.series.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SeriesKey, &[SeriesPoint])> {
        self.series.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}
