use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MarkerOptions {
    /// Contour areas must lie strictly inside `(min_area, max_area)`.
    pub min_area: f64,
    pub max_area: f64,
    /// Same-color centroids within this distance are one marker.
    pub dedup_radius_px: f32,
    /// Douglas-Peucker tolerance as a fraction of the contour perimeter.
    pub shape_epsilon_fraction: f64,
    /// Four-vertex shapes with bbox aspect within `1 ± tol` are squares.
    pub square_aspect_tolerance: f64,
    /// Blobs whose bounding box is longer than this ratio (long side over
    /// short side) are rejected, e.g. dashes of a dashed curve. `None` keeps
    /// every shape.
    pub max_elongation: Option<f64>,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            min_area: 15.0,
            max_area: 1000.0,
            dedup_radius_px: 8.0,
            shape_epsilon_fraction: 0.04,
            square_aspect_tolerance: 0.1,
            max_elongation: None,
        }
    }
}
