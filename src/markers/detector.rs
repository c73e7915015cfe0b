use super::dedup::{merge_close_blobs, Blob};
use super::options::MarkerOptions;
use super::shape::{bbox_elongation, classify_shape, polygon_area_centroid};
use crate::color::{rgb_to_hsv, ColorName, NeutralThresholds, Palette};
use crate::types::{DetectedPoint, PixelRect, Rgb};
use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;
use log::debug;

/// Binary mask (255 = member) of `color` over `region`.
///
/// A pixel belongs to the mask when it is not neutral and its HSV value lies
/// in any palette range registered for `color`.
pub fn color_mask(
    rgb: &RgbImage,
    region: PixelRect,
    color: ColorName,
    palette: &Palette,
    neutral: &NeutralThresholds,
) -> GrayImage {
    let ranges: Vec<_> = palette
        .entries()
        .iter()
        .filter(|e| e.color == color)
        .map(|e| e.range)
        .collect();
    GrayImage::from_fn(region.w, region.h, |x, y| {
        let px = rgb.get_pixel(region.x + x, region.y + y).0;
        if neutral.is_neutral(px) {
            return Luma([0]);
        }
        let hsv = rgb_to_hsv(px);
        if ranges.iter().any(|r| r.contains(hsv)) {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Detect palette-colored blobs inside `region`.
///
/// Returned points are in full-image pixel coordinates, in palette order and
/// contour order within a color.
pub fn detect_markers(
    rgb: &RgbImage,
    region: PixelRect,
    palette: &Palette,
    neutral: &NeutralThresholds,
    options: &MarkerOptions,
) -> Vec<DetectedPoint> {
    if region.is_empty() {
        return Vec::new();
    }

    let mut colors: Vec<ColorName> = Vec::new();
    for entry in palette.entries() {
        if !colors.contains(&entry.color) {
            colors.push(entry.color);
        }
    }

    let mut blobs = Vec::new();
    for color in colors {
        let mask = color_mask(rgb, region, color, palette, neutral);
        let before = blobs.len();
        for contour in find_contours::<i32>(&mask) {
            if !matches!(contour.border_type, BorderType::Outer) || contour.parent.is_some() {
                continue;
            }
            let (area, center) = polygon_area_centroid(&contour.points);
            if area <= options.min_area || area >= options.max_area {
                continue;
            }
            if let Some(limit) = options.max_elongation {
                if bbox_elongation(&contour.points) > limit {
                    continue;
                }
            }
            let shape = classify_shape(
                &contour.points,
                options.shape_epsilon_fraction,
                options.square_aspect_tolerance,
            );
            blobs.push(Blob {
                color,
                center: [center[0] as f32, center[1] as f32],
                area,
                shape,
                rgb: mean_color(rgb, region, &contour.points),
            });
        }
        debug!("markers: color={} candidates={}", color, blobs.len() - before);
    }

    let candidates = blobs.len();
    let merged = merge_close_blobs(blobs, options.dedup_radius_px);
    debug!(
        "markers: region={}x{}+{}+{} candidates={} merged={}",
        region.w,
        region.h,
        region.x,
        region.y,
        candidates,
        merged.len()
    );

    merged
        .into_iter()
        .map(|b| {
            DetectedPoint::marker(
                region.x as f32 + b.center[0],
                region.y as f32 + b.center[1],
                b.rgb,
                b.color,
                b.shape,
            )
        })
        .collect()
}

fn mean_color(rgb: &RgbImage, region: PixelRect, points: &[Point<i32>]) -> Rgb {
    let mut sum = [0u64; 3];
    let mut n = 0u64;
    for p in points {
        if p.x < 0 || p.y < 0 || p.x as u32 >= region.w || p.y as u32 >= region.h {
            continue;
        }
        let px = rgb.get_pixel(region.x + p.x as u32, region.y + p.y as u32).0;
        for c in 0..3 {
            sum[c] += px[c] as u64;
        }
        n += 1;
    }
    if n == 0 {
        return [0, 0, 0];
    }
    [
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MarkerShape, PointKind};
    use image::Rgb as RgbPixel;

    fn canvas(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, RgbPixel([255, 255, 255]))
    }

    fn disc(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: [u8; 3]) {
        for y in cy - r..=cy + r {
            for x in cx - r..=cx + r {
                if (x - cx).pow(2) + (y - cy).pow(2) <= r * r {
                    img.put_pixel(x as u32, y as u32, RgbPixel(color));
                }
            }
        }
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
    fn orange_disc_becomes_one_marker() {
        let mut img = canvas(100, 80);
        disc(&mut img, 40, 30, 7, [255, 140, 0]);
        let pts = detect_markers(
            &img,
            full(&img),
            &Palette::default(),
            &NeutralThresholds::default(),
            &MarkerOptions::default(),
        );
        assert_eq!(pts.len(), 1, "{pts:?}");
        let p = pts[0];
        assert!((p.px - 40.0).abs() < 1.0 && (p.py - 30.0).abs() < 1.0, "{p:?}");
        match p.kind {
            PointKind::Marker { color, shape } => {
                assert_eq!(color, ColorName::Orange);
                assert_eq!(shape, MarkerShape::Circle);
            }
            PointKind::Curve => panic!("expected a marker"),
        }
    }

    #[test]
    fn tiny_and_huge_blobs_are_ignored() {
        let mut img = canvas(200, 200);
        disc(&mut img, 20, 20, 1, [0, 0, 255]);
        disc(&mut img, 120, 120, 40, [0, 0, 255]);
        let pts = detect_markers(
            &img,
            full(&img),
            &Palette::default(),
            &NeutralThresholds::default(),
            &MarkerOptions::default(),
        );
        assert!(pts.is_empty(), "{pts:?}");
    }

    #[test]
    fn coordinates_are_offset_by_region() {
        let mut img = canvas(100, 100);
        disc(&mut img, 60, 70, 6, [0, 0, 255]);
        let region = PixelRect {
            x: 30,
            y: 40,
            w: 60,
            h: 50,
        };
        let pts = detect_markers(
            &img,
            region,
            &Palette::default(),
            &NeutralThresholds::default(),
            &MarkerOptions::default(),
        );
        assert_eq!(pts.len(), 1);
        assert!((pts[0].px - 60.0).abs() < 1.0 && (pts[0].py - 70.0).abs() < 1.0);
    }

    #[test]
    fn overlapping_discs_form_one_marker() {
        let mut img = canvas(100, 80);
        disc(&mut img, 40, 30, 7, [255, 140, 0]);
        disc(&mut img, 48, 30, 7, [255, 140, 0]);
        let options = MarkerOptions {
            dedup_radius_px: 0.0,
            ..MarkerOptions::default()
        };
        let pts = detect_markers(
            &img,
            full(&img),
            &Palette::default(),
            &NeutralThresholds::default(),
            &options,
        );
        assert_eq!(pts.len(), 1, "{pts:?}");
        assert!((pts[0].px - 44.0).abs() < 1.0, "{:?}", pts[0]);
        assert!((pts[0].py - 30.0).abs() < 1.0, "{:?}", pts[0]);
    }

    #[test]
    fn elongation_limit_drops_dashes() {
        let mut img = canvas(200, 60);
        for dash in 0..3u32 {
            let x0 = 10 + dash * 50;
            for y in 30..33 {
                for x in x0..x0 + 31 {
                    img.put_pixel(x, y, RgbPixel([0, 0, 255]));
                }
            }
        }
        disc(&mut img, 180, 20, 6, [0, 0, 255]);
        let detect = |options: &MarkerOptions| {
            detect_markers(
                &img,
                full(&img),
                &Palette::default(),
                &NeutralThresholds::default(),
                options,
            )
        };

        assert_eq!(detect(&MarkerOptions::default()).len(), 4);
        let strict = MarkerOptions {
            max_elongation: Some(3.0),
            ..MarkerOptions::default()
        };
        let pts = detect(&strict);
        assert_eq!(pts.len(), 1, "{pts:?}");
        assert!((pts[0].px - 180.0).abs() < 1.0);
    }

    #[test]
    fn gray_pixels_never_enter_a_mask() {
        let mut img = canvas(40, 40);
        disc(&mut img, 20, 20, 6, [210, 210, 210]);
        let mask = color_mask(
            &img,
            full(&img),
            ColorName::Black,
            &Palette::default(),
            &NeutralThresholds::default(),
        );
        assert!(mask.pixels().all(|p| p[0] == 0));
    }
}
