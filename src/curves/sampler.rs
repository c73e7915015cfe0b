use super::options::CurveOptions;
use crate::color::{chroma, NeutralThresholds};
use crate::edges::edge_map;
use crate::image::ImageF32;
use crate::types::{DetectedPoint, PixelRect};
use image::{imageops, GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use log::debug;

/// Curve points plus the dilated edge map they were sampled from.
#[derive(Clone, Debug, Default)]
pub struct CurveSampling {
    /// Full-image coordinates, row-major cell order.
    pub points: Vec<DetectedPoint>,
    /// Edge map of the sampled region (region-local coordinates).
    pub edge_mask: GrayImage,
}

/// Sample curve points on a grid over `region`.
pub fn sample_curves(
    rgb: &RgbImage,
    region: PixelRect,
    neutral: &NeutralThresholds,
    options: &CurveOptions,
) -> CurveSampling {
    if region.is_empty() || options.grid_size == 0 {
        return CurveSampling::default();
    }

    let crop = imageops::crop_imm(rgb, region.x, region.y, region.w, region.h).to_image();
    let gray = imageops::grayscale(&crop);
    let edges = edge_map(
        &ImageF32::from_luma8(&gray),
        options.kernel,
        options.magnitude_threshold,
    );
    let mask = if options.dilate_radius > 0 {
        dilate(&edges, Norm::LInf, options.dilate_radius)
    } else {
        edges
    };

    let n = options.grid_size as u64;
    let (w, h) = (region.w as u64, region.h as u64);
    let mut points = Vec::new();
    let mut fallbacks = 0usize;
    for row in 0..n {
        let y0 = (row * h / n) as u32;
        let y1 = ((row + 1) * h / n) as u32;
        if y1 <= y0 {
            continue;
        }
        for col in 0..n {
            let x0 = (col * w / n) as u32;
            let x1 = ((col + 1) * w / n) as u32;
            if x1 <= x0 {
                continue;
            }
            if !has_edge(&mask, x0, y0, x1, y1) {
                continue;
            }

            let cx = (x0 + x1 - 1) / 2;
            let cy = (y0 + y1 - 1) / 2;
            let center = crop.get_pixel(cx, cy).0;
            let sample = if !neutral.is_neutral(center) {
                Some((cx, cy, center))
            } else if options.chromatic_fallback {
                fallbacks += 1;
                most_chromatic_edge_pixel(&crop, &mask, neutral, x0, y0, x1, y1)
            } else {
                None
            };

            if let Some((x, y, color)) = sample {
                points.push(DetectedPoint::curve(
                    (region.x + x) as f32,
                    (region.y + y) as f32,
                    color,
                ));
            }
        }
    }

    debug!(
        "curves: region={}x{} grid={} points={} center_fallbacks={}",
        region.w,
        region.h,
        options.grid_size,
        points.len(),
        fallbacks
    );
    CurveSampling {
        points,
        edge_mask: mask,
    }
}

fn has_edge(mask: &GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) -> bool {
    (y0..y1).any(|y| (x0..x1).any(|x| mask.get_pixel(x, y)[0] > 0))
}

fn most_chromatic_edge_pixel(
    crop: &RgbImage,
    mask: &GrayImage,
    neutral: &NeutralThresholds,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
) -> Option<(u32, u32, [u8; 3])> {
    let mut best: Option<(u32, u32, [u8; 3])> = None;
    for y in y0..y1 {
        for x in x0..x1 {
            if mask.get_pixel(x, y)[0] == 0 {
                continue;
            }
            let px = crop.get_pixel(x, y).0;
            if neutral.is_neutral(px) {
                continue;
            }
            if best.map_or(true, |(_, _, b)| chroma(px) > chroma(b)) {
                best = Some((x, y, px));
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn canvas(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([255, 255, 255]))
    }

    fn full(img: &RgbImage) -> PixelRect {
        PixelRect {
            x: 0,
            y: 0,
            w: img.width(),
            h: img.height(),
        }
    }

    #[test]
    fn blank_region_has_no_points() {
        let img = canvas(50, 50);
        let out = sample_curves(
            &img,
            full(&img),
            &NeutralThresholds::default(),
            &CurveOptions::default(),
        );
        assert!(out.points.is_empty());
    }

    #[test]
    fn thin_line_is_sampled_along_its_length() {
        let mut img = canvas(200, 100);
        for x in 10..190 {
            img.put_pixel(x, 50, Rgb([0, 0, 255]));
        }
        let options = CurveOptions {
            grid_size: 20,
            ..CurveOptions::default()
        };
        let out = sample_curves(&img, full(&img), &NeutralThresholds::default(), &options);
        assert!(out.points.len() >= 15, "points={}", out.points.len());
        for p in &out.points {
            assert_eq!(p.rgb, [0, 0, 255]);
            assert_eq!(p.py, 50.0);
        }
        assert_eq!(out.edge_mask.dimensions(), (200, 100));
    }

    #[test]
    fn gray_gridline_is_ignored() {
        let mut img = canvas(100, 100);
        for x in 0..100 {
            img.put_pixel(x, 40, Rgb([200, 200, 200]));
        }
        let out = sample_curves(
            &img,
            full(&img),
            &NeutralThresholds::default(),
            &CurveOptions::default(),
        );
        assert!(out.points.is_empty(), "{:?}", out.points.first());
    }

    #[test]
    fn fallback_can_be_disabled() {
        let mut img = canvas(100, 100);
        for x in 0..100 {
            img.put_pixel(x, 50, Rgb([255, 0, 0]));
        }
        let neutral = NeutralThresholds::default();
        let region = PixelRect {
            x: 0,
            y: 40,
            w: 100,
            h: 20,
        };
        let strict = CurveOptions {
            grid_size: 4,
            chromatic_fallback: false,
            ..CurveOptions::default()
        };
        assert!(sample_curves(&img, region, &neutral, &strict).points.is_empty());
        let lenient = CurveOptions {
            grid_size: 4,
            ..CurveOptions::default()
        };
        // Cells are 5 px tall; the line sits off the cell center.
        let pts = sample_curves(&img, region, &neutral, &lenient).points;
        assert_eq!(pts.len(), 4);
        assert!(pts.iter().all(|p| p.py == 50.0));
    }
}
