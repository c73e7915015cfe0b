//! Small robust-statistics helpers used by axis calibration.

/// Linear-interpolated percentile of an ascending slice, `q` in `[0, 1]`.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let t = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * t)
}

/// Tukey fences `[Q1 - k·IQR, Q3 + k·IQR]` of `values`.
pub fn iqr_bounds(values: &[f64], factor: f64) -> Option<(f64, f64)> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let q1 = percentile_sorted(&sorted, 0.25)?;
    let q3 = percentile_sorted(&sorted, 0.75)?;
    let iqr = q3 - q1;
    Some((q1 - factor * iqr, q3 + factor * iqr))
}

/// Drop items whose key lies outside the Tukey fences. Returns the input
/// unchanged if filtering would remove everything.
pub fn reject_outliers_iqr<T>(items: Vec<T>, factor: f64, key: impl Fn(&T) -> f64) -> Vec<T> {
    let values: Vec<f64> = items.iter().map(&key).collect();
    let Some((lower, upper)) = iqr_bounds(&values, factor) else {
        return items;
    };
    let (kept, dropped): (Vec<T>, Vec<T>) = items.into_iter().partition(|item| {
        let v = key(item);
        v >= lower && v <= upper
    });
    if kept.is_empty() {
        dropped
    } else {
        kept
    }
}

/// Least-squares line `y = intercept + slope · x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
    /// Root-mean-square residual of the fit.
    pub rmse: f64,
}

impl LineFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least squares over `(x, y)` samples. Needs two distinct `x`.
pub fn fit_line(samples: &[(f64, f64)]) -> Option<LineFit> {
    if samples.len() < 2 {
        return None;
    }
    let n = samples.len() as f64;
    let mean_x = samples.iter().map(|s| s.0).sum::<f64>() / n;
    let mean_y = samples.iter().map(|s| s.1).sum::<f64>() / n;
    let (mut sxx, mut sxy) = (0.0, 0.0);
    for &(x, y) in samples {
        sxx += (x - mean_x) * (x - mean_x);
        sxy += (x - mean_x) * (y - mean_y);
    }
    if sxx <= f64::EPSILON * n {
        return None;
    }
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }
    let sse: f64 = samples
        .iter()
        .map(|&(x, y)| {
            let r = y - (intercept + slope * x);
            r * r
        })
        .sum();
    Some(LineFit {
        intercept,
        slope,
        rmse: (sse / n).sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates() {
        let v = [0.0, 2.0, 4.0, 6.0, 8.0];
        assert_eq!(percentile_sorted(&v, 0.25), Some(2.0));
        assert_eq!(percentile_sorted(&v, 0.5), Some(4.0));
        let v = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 9999.0];
        assert_eq!(percentile_sorted(&v, 0.25), Some(3.0));
        assert_eq!(percentile_sorted(&v, 0.75), Some(9.0));
    }

    #[test]
    fn iqr_drops_extreme_value() {
        let kept = reject_outliers_iqr(vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 9999.0], 1.5, |v| *v);
        assert_eq!(kept, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn line_fit_recovers_slope() {
        let fit = fit_line(&[(100.0, 0.0), (500.0, 5.0), (900.0, 10.0)]).unwrap();
        assert!((fit.slope - 0.0125).abs() < 1e-12);
        assert!((fit.eval(100.0)).abs() < 1e-9);
        assert!(fit.rmse < 1e-9);
    }

    #[test]
    fn line_fit_needs_spread() {
        assert!(fit_line(&[(3.0, 1.0)]).is_none());
        assert!(fit_line(&[(3.0, 1.0), (3.0, 2.0)]).is_none());
    }
}
