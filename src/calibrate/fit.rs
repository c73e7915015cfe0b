use super::options::CalibrationOptions;
use super::tokens::AxisToken;
use crate::stats::{fit_line, reject_outliers_iqr};
use crate::types::{Axis, AxisCalibration, GraphFrame};
use log::{debug, warn};
use serde::Serialize;

/// How an axis calibration was obtained.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CalibrationStatus {
    /// Least-squares fit of value against pixel position.
    Fitted { tokens: usize, rmse: f64 },
    /// Positions were unusable; the min/max of the values was taken.
    RangeOnly { tokens: usize },
    /// Not enough labels; the default `[0, 1]` range is in effect.
    Degraded { reason: String },
    /// Set by the caller.
    Manual,
}

impl CalibrationStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, CalibrationStatus::Degraded { .. })
    }
}

/// Calibration for one axis plus the evidence behind it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisCalibrationOutcome {
    pub axis: Axis,
    pub calibration: AxisCalibration,
    pub status: CalibrationStatus,
    /// Tokens that survived deduplication and outlier rejection.
    pub tokens: Vec<AxisToken>,
    /// Raw token count before merging.
    pub candidates: usize,
}

impl AxisCalibrationOutcome {
    pub fn manual(axis: Axis, calibration: AxisCalibration) -> Self {
        Self {
            axis,
            calibration,
            status: CalibrationStatus::Manual,
            tokens: Vec::new(),
            candidates: 0,
        }
    }

    fn degraded(axis: Axis, tokens: Vec<AxisToken>, candidates: usize, reason: String) -> Self {
        warn!("calibration: {axis} axis degraded to [0, 1]: {reason}");
        Self {
            axis,
            calibration: AxisCalibration::default(),
            status: CalibrationStatus::Degraded { reason },
            tokens,
            candidates,
        }
    }
}

/// Turn raw tokens into an axis calibration. Never fails.
pub fn fit_calibration(
    tokens: Vec<AxisToken>,
    frame: &GraphFrame,
    axis: Axis,
    options: &CalibrationOptions,
) -> AxisCalibrationOutcome {
    let candidates = tokens.len();
    let mut merged = dedup_tokens(tokens, options.dedup_tolerance);
    if merged.len() > options.outlier_min_count {
        let before = merged.len();
        merged = reject_outliers_iqr(merged, options.iqr_factor, |t| t.value);
        debug!(
            "calibration: {axis} iqr kept {}/{} values",
            merged.len(),
            before
        );
    }

    if merged.len() < 2 {
        let reason = format!("{} distinct label(s) from {candidates} candidates", merged.len());
        return AxisCalibrationOutcome::degraded(axis, merged, candidates, reason);
    }

    let samples: Vec<(f64, f64)> = merged.iter().map(|t| (t.position, t.value)).collect();
    if let Some(fit) = fit_line(&samples) {
        let (low_px, high_px) = frame.axis_span(axis);
        let (min_value, max_value) = (fit.eval(low_px), fit.eval(high_px));
        match AxisCalibration::new(axis, min_value, max_value) {
            Ok(calibration) => {
                debug!(
                    "calibration: {axis} fitted [{:.4}, {:.4}] tokens={} rmse={:.4}",
                    min_value,
                    max_value,
                    merged.len(),
                    fit.rmse
                );
                return AxisCalibrationOutcome {
                    axis,
                    calibration,
                    status: CalibrationStatus::Fitted {
                        tokens: merged.len(),
                        rmse: fit.rmse,
                    },
                    tokens: merged,
                    candidates,
                };
            }
            Err(err) => debug!("calibration: {axis} fit rejected: {err}"),
        }
    }

    let min_value = merged.iter().map(|t| t.value).fold(f64::INFINITY, f64::min);
    let max_value = merged.iter().map(|t| t.value).fold(f64::NEG_INFINITY, f64::max);
    match AxisCalibration::new(axis, min_value, max_value) {
        Ok(calibration) => AxisCalibrationOutcome {
            axis,
            calibration,
            status: CalibrationStatus::RangeOnly {
                tokens: merged.len(),
            },
            tokens: merged,
            candidates,
        },
        Err(err) => AxisCalibrationOutcome::degraded(axis, merged, candidates, err.to_string()),
    }
}

/// Merge tokens with (nearly) equal values, averaging their positions.
/// Output is sorted by value.
fn dedup_tokens(mut tokens: Vec<AxisToken>, tolerance: f64) -> Vec<AxisToken> {
    tokens.retain(|t| t.value.is_finite() && t.position.is_finite());
    tokens.sort_by(|a, b| a.value.total_cmp(&b.value));
    let mut merged: Vec<(AxisToken, usize)> = Vec::new();
    for token in tokens {
        match merged.last_mut() {
            Some((acc, n))
                if (token.value - acc.value).abs() <= tolerance * acc.value.abs().max(1.0) =>
            {
                acc.position = (acc.position * *n as f64 + token.position) / (*n + 1) as f64;
                *n += 1;
            }
            _ => merged.push((token, 1)),
        }
    }
    merged.into_iter().map(|(t, _)| t).collect()
}
