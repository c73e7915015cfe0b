use crate::types::MarkerShape;
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use imageproc::point::Point;

const CIRCULARITY_MIN: f64 = 0.8;

/// Enclosed area and centroid of a closed pixel contour (shoelace formula).
///
/// Degenerate contours (lines, single pixels) report zero area and the mean
/// of their points as centroid.
pub fn polygon_area_centroid(points: &[Point<i32>]) -> (f64, [f64; 2]) {
    let n = points.len();
    if n == 0 {
        return (0.0, [0.0, 0.0]);
    }
    let mut twice_area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let cross = p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
        twice_area += cross;
        cx += (p.x + q.x) as f64 * cross;
        cy += (p.y + q.y) as f64 * cross;
    }
    if twice_area.abs() < 1e-9 {
        let mx = points.iter().map(|p| p.x as f64).sum::<f64>() / n as f64;
        let my = points.iter().map(|p| p.y as f64).sum::<f64>() / n as f64;
        return (0.0, [mx, my]);
    }
    let area = twice_area * 0.5;
    (area.abs(), [cx / (6.0 * area), cy / (6.0 * area)])
}

/// Long side over short side of the contour's bounding box.
pub fn bbox_elongation(points: &[Point<i32>]) -> f64 {
    let Some(first) = points.first() else {
        return 1.0;
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let w = (max_x - min_x + 1) as f64;
    let h = (max_y - min_y + 1) as f64;
    w.max(h) / w.min(h)
}

/// Coarse shape label from a Douglas-Peucker approximation.
///
/// Contours with five or more vertices count as circles when their
/// isoperimetric ratio `4πA/P²` reaches `CIRCULARITY_MIN`.
pub fn classify_shape(
    points: &[Point<i32>],
    epsilon_fraction: f64,
    square_tolerance: f64,
) -> MarkerShape {
    if points.len() < 3 {
        return MarkerShape::Polygon;
    }
    let epsilon = epsilon_fraction * arc_length(points, true);
    let approx = approximate_polygon_dp(points, epsilon, true);
    match approx.len() {
        3 => MarkerShape::Triangle,
        4 => {
            let (min_x, max_x) = points
                .iter()
                .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
            let (min_y, max_y) = points
                .iter()
                .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
            let w = (max_x - min_x + 1) as f64;
            let h = (max_y - min_y + 1) as f64;
            if (w / h - 1.0).abs() <= square_tolerance {
                MarkerShape::Square
            } else {
                MarkerShape::Rectangle
            }
        }
        n if n > 6 => MarkerShape::Circle,
        _ => {
            let (area, _) = polygon_area_centroid(points);
            let perimeter = arc_length(points, true);
            if perimeter > 0.0
                && 4.0 * std::f64::consts::PI * area / (perimeter * perimeter) >= CIRCULARITY_MIN
            {
                MarkerShape::Circle
            } else {
                MarkerShape::Polygon
            }
        }
    }
}
