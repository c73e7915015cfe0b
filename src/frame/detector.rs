use super::options::FrameOptions;
use crate::error::FrameDetectionError;
use crate::image::ImageF32;
use crate::segments::{extract_segments, Segment};
use crate::types::{Axis, GraphFrame};
use image::GrayImage;
use log::{debug, warn};
use serde::Serialize;

/// A merged frame-line candidate.
///
/// `axis` is the image axis the line runs along: `Axis::X` for horizontal
/// lines (whose `position` is a y coordinate), `Axis::Y` for vertical ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLine {
    pub axis: Axis,
    pub position: f32,
    pub start: f32,
    pub end: f32,
}

impl AxisLine {
    fn from_segment(seg: &Segment, axis: Axis) -> Self {
        let mid = seg.midpoint();
        let position = match axis {
            Axis::X => mid[1],
            Axis::Y => mid[0],
        };
        let (start, end) = seg.span(axis);
        Self {
            axis,
            position,
            start,
            end,
        }
    }

    pub fn length(&self) -> f32 {
        self.end - self.start
    }
}

/// Frame plus how it was obtained.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutcome {
    pub frame: GraphFrame,
    /// One orientation had a single line; the opposite edge was synthesized.
    pub partial: bool,
    /// Found only on the relaxed retry.
    pub relaxed: bool,
    /// No lines at all; the image bounds were used.
    pub degraded: bool,
    pub horizontal: Vec<AxisLine>,
    pub vertical: Vec<AxisLine>,
}

/// Single detection attempt with the given thresholds.
pub fn detect_frame(
    gray: &GrayImage,
    options: &FrameOptions,
) -> Result<FrameOutcome, FrameDetectionError> {
    let (width, height) = gray.dimensions();
    if width < options.min_image_size || height < options.min_image_size {
        return Err(FrameDetectionError::ImageTooSmall { width, height });
    }

    let l = ImageF32::from_luma8(gray);
    let extracted = extract_segments(&l, &options.segments);

    let min_h = options.min_length_fraction * width as f32;
    let min_v = options.min_length_fraction * height as f32;
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    for seg in &extracted.segments {
        match seg.axis_alignment(options.axis_tolerance_deg) {
            Some(Axis::X) if seg.length() > min_h => {
                horizontal.push(AxisLine::from_segment(seg, Axis::X))
            }
            Some(Axis::Y) if seg.length() > min_v => {
                vertical.push(AxisLine::from_segment(seg, Axis::Y))
            }
            _ => {}
        }
    }

    let horizontal = merge_similar_lines(horizontal, options.merge_distance_px);
    let vertical = merge_similar_lines(vertical, options.merge_distance_px);
    debug!(
        "frame: segments={} horizontal={} vertical={} min_len=({:.1},{:.1})",
        extracted.segments.len(),
        horizontal.len(),
        vertical.len(),
        min_h,
        min_v
    );

    let (Some(first_h), Some(last_h), Some(first_v), Some(last_v)) = (
        horizontal.first(),
        horizontal.last(),
        vertical.first(),
        vertical.last(),
    ) else {
        return Err(FrameDetectionError::NoAxisLines {
            horizontal: horizontal.len(),
            vertical: vertical.len(),
        });
    };

    let clamp_x = |v: f32| v.round().clamp(0.0, (width - 1) as f32) as u32;
    let clamp_y = |v: f32| v.round().clamp(0.0, (height - 1) as f32) as u32;

    // Lines are sorted by position after merging. A lone horizontal line is
    // the x axis (bottom), a lone vertical line the y axis (left).
    let partial = horizontal.len() == 1 || vertical.len() == 1;
    let top = if horizontal.len() == 1 {
        clamp_y(options.partial_top_fraction * height as f32)
    } else {
        clamp_y(first_h.position)
    };
    let bottom = clamp_y(last_h.position);
    let left = clamp_x(first_v.position);
    let right = if vertical.len() == 1 {
        clamp_x(options.partial_right_fraction * width as f32)
    } else {
        clamp_x(last_v.position)
    };

    let frame = GraphFrame::new(left, top, right, bottom)?;
    if partial {
        warn!(
            "frame: partial frame completed from image proportions ({}x{})",
            frame.width(),
            frame.height()
        );
    }
    Ok(FrameOutcome {
        frame,
        partial,
        relaxed: false,
        degraded: false,
        horizontal,
        vertical,
    })
}

/// Strict attempt, then the relaxed retry, then (if enabled) the image bounds.
pub fn detect_frame_with_fallback(
    gray: &GrayImage,
    options: &FrameOptions,
) -> Result<FrameOutcome, FrameDetectionError> {
    let err = match detect_frame(gray, options) {
        Ok(outcome) => return Ok(outcome),
        Err(err @ FrameDetectionError::ImageTooSmall { .. }) => return Err(err),
        Err(err) => err,
    };
    debug!("frame: strict attempt failed: {err}");

    let err = match options.relaxed_copy() {
        Some(relaxed) => match detect_frame(gray, &relaxed) {
            Ok(mut outcome) => {
                outcome.relaxed = true;
                return Ok(outcome);
            }
            Err(err) => err,
        },
        None => err,
    };

    if !options.fallback_to_image_bounds {
        return Err(err);
    }
    let (width, height) = gray.dimensions();
    warn!("frame: {err}; falling back to image bounds {width}x{height}");
    Ok(FrameOutcome {
        frame: GraphFrame::from_image_bounds(width, height)?,
        partial: false,
        relaxed: false,
        degraded: true,
        horizontal: Vec::new(),
        vertical: Vec::new(),
    })
}

fn merge_similar_lines(mut lines: Vec<AxisLine>, threshold: f32) -> Vec<AxisLine> {
    lines.sort_by(|a, b| a.position.total_cmp(&b.position));
    let mut merged: Vec<AxisLine> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged.last_mut() {
            Some(last) if (line.position - last.position).abs() < threshold => {
                if line.length() > last.length() {
                    *last = line;
                }
            }
            _ => merged.push(line),
        }
    }
    merged
}
