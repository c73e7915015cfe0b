use super::options::SegmentOptions;
use super::region::Region;
use super::segment::Segment;
use crate::angle::{angular_difference, normalize_half_pi};
use crate::edges::{image_gradients, Grad};
use crate::image::ImageF32;
use log::debug;
use std::time::Instant;

/// Extracted segments plus the wall time spent.
#[derive(Clone, Debug, Default)]
pub struct SegmentResult {
    pub segments: Vec<Segment>,
    pub elapsed_ms: f64,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PixelState {
    Free,
    Claimed,
    /// Seed of a rejected region; never seeds again.
    Exhausted,
}

pub(super) struct SegmentExtractor<'o> {
    grad: Grad,
    width: usize,
    height: usize,
    options: &'o SegmentOptions,
    angle_tol: f32,
    state: Vec<PixelState>,
    orientation: Vec<Option<f32>>,
    frontier: Vec<usize>,
    region: Region,
}

impl<'o> SegmentExtractor<'o> {
    pub(super) fn new(l: &ImageF32, options: &'o SegmentOptions) -> Self {
        let n = l.w * l.h;
        Self {
            grad: image_gradients(l, options.kernel),
            width: l.w,
            height: l.h,
            options,
            angle_tol: options.angle_tolerance_deg.to_radians(),
            state: vec![PixelState::Free; n],
            orientation: vec![None; n],
            frontier: Vec::with_capacity(64),
            region: Region::default(),
        }
    }

    pub(super) fn extract(mut self) -> SegmentResult {
        let start = Instant::now();
        let mut segments = Vec::new();
        for seed in 0..self.state.len() {
            if self.state[seed] != PixelState::Free || !self.strong(seed) {
                continue;
            }
            self.grow_from(seed);
            match self.fit_segment() {
                Some(segment) => segments.push(segment),
                None => {
                    for &idx in self.region.pixels() {
                        self.state[idx] = PixelState::Free;
                    }
                    self.state[seed] = PixelState::Exhausted;
                }
            }
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "segments: extracted={} size={}x{} elapsed_ms={:.2}",
            segments.len(),
            self.width,
            self.height,
            elapsed_ms
        );
        SegmentResult {
            segments,
            elapsed_ms,
        }
    }

    fn strong(&self, idx: usize) -> bool {
        self.grad.mag.data[idx] >= self.options.magnitude_threshold
    }

    /// Flood-fill 8-connected strong pixels whose orientation stays within
    /// the tolerance of the seed's.
    fn grow_from(&mut self, seed: usize) {
        self.region.clear();
        self.frontier.clear();
        let seed_angle = self.orientation_at(seed);
        let half_tol = self.angle_tol * 0.5;
        self.state[seed] = PixelState::Claimed;
        self.frontier.push(seed);

        while let Some(idx) = self.frontier.pop() {
            let (x, y) = (idx % self.width, idx / self.width);
            let aligned = angular_difference(self.orientation_at(idx), seed_angle) <= half_tol;
            self.region
                .add(idx, x, y, self.grad.mag.data[idx], aligned);

            for ny in y.saturating_sub(1)..=(y + 1).min(self.height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(self.width - 1) {
                    let n = ny * self.width + nx;
                    if self.state[n] != PixelState::Free || !self.strong(n) {
                        continue;
                    }
                    if angular_difference(self.orientation_at(n), seed_angle) <= self.angle_tol {
                        self.state[n] = PixelState::Claimed;
                        self.frontier.push(n);
                    }
                }
            }
        }
    }

    /// Significance test and endpoint estimation for the current region.
    fn fit_segment(&self) -> Option<Segment> {
        let opts = self.options;
        if self.region.len() < opts.min_region_size.max(2)
            || self.region.aligned_fraction() < opts.min_aligned_fraction
        {
            return None;
        }
        let axis = self.region.principal_axis()?;

        let (mut s_lo, mut s_hi) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut n_lo, mut n_hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for &idx in self.region.pixels() {
            let p = [(idx % self.width) as f64, (idx / self.width) as f64];
            let (s, n) = axis.project(p);
            s_lo = s_lo.min(s);
            s_hi = s_hi.max(s);
            n_lo = n_lo.min(n);
            n_hi = n_hi.max(n);
        }

        let length = s_hi - s_lo;
        if !(length > 0.0) || (length as f32) < opts.min_length_px {
            return None;
        }
        let span_limit = opts
            .normal_span_limit_px
            .filter(|v| v.is_finite() && *v > 0.0);
        if matches!(span_limit, Some(limit) if (n_hi - n_lo) as f32 > limit) {
            return None;
        }

        Some(Segment::new(
            axis.point_at(s_lo),
            axis.point_at(s_hi),
            self.region.mean_magnitude(),
        ))
    }

    fn orientation_at(&mut self, idx: usize) -> f32 {
        if let Some(angle) = self.orientation[idx] {
            return angle;
        }
        let angle = normalize_half_pi(self.grad.gy.data[idx].atan2(self.grad.gx.data[idx]));
        self.orientation[idx] = Some(angle);
        angle
    }
}
