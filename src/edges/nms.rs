//! Non-maximum suppression and the binary edge map built from it.
use crate::edges::grad::{image_gradients, Grad, GradientKernel};
use crate::image::ImageF32;
use image::{GrayImage, Luma};

/// A thin edge sample after NMS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeElement {
    pub x: u32,
    pub y: u32,
    pub magnitude: f32,
}

const TAN_22_5_DEG: f32 = 0.414_213_57;

/// Offset `(dx, dy)` to the neighbor along the gradient, quantized to the
/// 8-neighborhood. The opposite neighbor is the negated offset.
fn gradient_step(gx: f32, gy: f32) -> (isize, isize) {
    let (ax, ay) = (gx.abs(), gy.abs());
    if ay <= ax * TAN_22_5_DEG {
        (1, 0)
    } else if ax <= ay * TAN_22_5_DEG {
        (0, 1)
    } else if (gx >= 0.0) == (gy >= 0.0) {
        (1, 1)
    } else {
        (1, -1)
    }
}

/// Thin edges: pixels above `mag_thresh` that are a local maximum along
/// their gradient direction. The 1-pixel image border is skipped.
pub fn run_nms(grad: &Grad, mag_thresh: f32) -> Vec<EdgeElement> {
    let (w, h) = (grad.mag.w, grad.mag.h);
    if w < 3 || h < 3 {
        return Vec::new();
    }

    let mut edges = Vec::new();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mag = grad.mag.get(x, y);
            if mag < mag_thresh {
                continue;
            }
            let (dx, dy) = gradient_step(grad.gx.get(x, y), grad.gy.get(x, y));
            let ahead = grad
                .mag
                .get((x as isize + dx) as usize, (y as isize + dy) as usize);
            let behind = grad
                .mag
                .get((x as isize - dx) as usize, (y as isize - dy) as usize);
            // Flat-topped ridges of thick strokes keep only one side.
            if mag <= ahead || mag < behind {
                continue;
            }
            edges.push(EdgeElement {
                x: x as u32,
                y: y as u32,
                magnitude: mag,
            });
        }
    }
    edges
}

/// Gradients followed by NMS.
pub fn detect_edges(l: &ImageF32, kernel: GradientKernel, mag_thresh: f32) -> Vec<EdgeElement> {
    let grad = image_gradients(l, kernel);
    run_nms(&grad, mag_thresh)
}

/// Binary edge map (255 on edges) of the same size as `l`.
pub fn edge_map(l: &ImageF32, kernel: GradientKernel, mag_thresh: f32) -> GrayImage {
    let mut map = GrayImage::new(l.w as u32, l.h as u32);
    for e in detect_edges(l, kernel, mag_thresh) {
        map.put_pixel(e.x, e.y, Luma([255]));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thin_line_produces_edges_on_both_flanks() {
        let mut img = ImageF32::new(20, 20);
        for v in img.data.iter_mut() {
            *v = 1.0;
        }
        for x in 0..20 {
            img.set(x, 10, 0.0);
        }
        let map = edge_map(&img, GradientKernel::Sobel, 0.2);
        let hits: Vec<u32> = (0..20).filter(|&y| map.get_pixel(10, y)[0] > 0).collect();
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|&y| (8..=12).contains(&y)), "hits={hits:?}");
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = ImageF32::new(16, 16);
        assert!(detect_edges(&img, GradientKernel::Sobel, 0.05).is_empty());
    }
}
