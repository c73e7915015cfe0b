//! Pixel regions grown from a seed and their principal-axis fit.
use nalgebra::{Matrix2, SymmetricEigen};

/// Running first and second moments of pixel coordinates.
#[derive(Clone, Copy, Debug, Default)]
struct Moments {
    n: f64,
    x: f64,
    y: f64,
    xx: f64,
    xy: f64,
    yy: f64,
}

impl Moments {
    fn add(&mut self, x: f64, y: f64) {
        self.n += 1.0;
        self.x += x;
        self.y += y;
        self.xx += x * x;
        self.xy += x * y;
        self.yy += y * y;
    }

    fn mean(&self) -> Option<[f64; 2]> {
        (self.n > 0.0).then(|| [self.x / self.n, self.y / self.n])
    }

    fn covariance(&self) -> Option<Matrix2<f64>> {
        let [mx, my] = self.mean()?;
        let cxy = self.xy / self.n - mx * my;
        Some(Matrix2::new(
            self.xx / self.n - mx * mx,
            cxy,
            cxy,
            self.yy / self.n - my * my,
        ))
    }
}

/// Centroid and unit direction of a region's dominant axis.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PrincipalAxis {
    pub center: [f64; 2],
    pub tangent: [f64; 2],
}

impl PrincipalAxis {
    pub(crate) fn normal(&self) -> [f64; 2] {
        [-self.tangent[1], self.tangent[0]]
    }

    /// Offsets of `p` along the tangent and the normal.
    pub(crate) fn project(&self, p: [f64; 2]) -> (f64, f64) {
        let d = [p[0] - self.center[0], p[1] - self.center[1]];
        let n = self.normal();
        (
            d[0] * self.tangent[0] + d[1] * self.tangent[1],
            d[0] * n[0] + d[1] * n[1],
        )
    }

    pub(crate) fn point_at(&self, s: f64) -> [f32; 2] {
        [
            (self.center[0] + s * self.tangent[0]) as f32,
            (self.center[1] + s * self.tangent[1]) as f32,
        ]
    }
}

/// Pixels of one region in flat image indices, with the statistics needed
/// for the significance test.
#[derive(Debug, Default)]
pub(crate) struct Region {
    pixels: Vec<usize>,
    moments: Moments,
    aligned: usize,
    magnitude_sum: f32,
}

impl Region {
    pub(crate) fn clear(&mut self) {
        self.pixels.clear();
        self.moments = Moments::default();
        self.aligned = 0;
        self.magnitude_sum = 0.0;
    }

    pub(crate) fn add(&mut self, idx: usize, x: usize, y: usize, magnitude: f32, aligned: bool) {
        self.pixels.push(idx);
        self.moments.add(x as f64, y as f64);
        self.aligned += aligned as usize;
        self.magnitude_sum += magnitude;
    }

    pub(crate) fn len(&self) -> usize {
        self.pixels.len()
    }

    pub(crate) fn pixels(&self) -> &[usize] {
        &self.pixels
    }

    pub(crate) fn aligned_fraction(&self) -> f32 {
        match self.pixels.len() {
            0 => 0.0,
            n => self.aligned as f32 / n as f32,
        }
    }

    pub(crate) fn mean_magnitude(&self) -> f32 {
        match self.pixels.len() {
            0 => 0.0,
            n => self.magnitude_sum / n as f32,
        }
    }

    /// Eigenvector of the largest covariance eigenvalue. `None` for
    /// degenerate regions (single pixel, no spread).
    pub(crate) fn principal_axis(&self) -> Option<PrincipalAxis> {
        let center = self.moments.mean()?;
        let eig = SymmetricEigen::new(self.moments.covariance()?);
        let major = if eig.eigenvalues[0] >= eig.eigenvalues[1] { 0 } else { 1 };
        let lambda = eig.eigenvalues[major];
        if !lambda.is_finite() || lambda <= 0.0 {
            return None;
        }
        let v = eig.eigenvectors.column(major);
        let norm = v.norm();
        if !norm.is_finite() || norm < 1e-9 {
            return None;
        }
        Some(PrincipalAxis {
            center,
            tangent: [v[0] / norm, v[1] / norm],
        })
    }
}
