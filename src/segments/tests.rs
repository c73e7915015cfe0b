use super::*;
use crate::image::ImageF32;
use crate::types::Axis;

fn white(width: usize, height: usize) -> ImageF32 {
    let mut img = ImageF32::new(width, height);
    img.data.iter_mut().for_each(|v| *v = 1.0);
    img
}

fn longest(segs: &[Segment]) -> &Segment {
    segs.iter()
        .max_by(|a, b| a.length().total_cmp(&b.length()))
        .expect("at least one segment")
}

#[test]
fn finds_vertical_step_edge() {
    let mut img = white(32, 32);
    for y in 0..32 {
        for x in 0..16 {
            img.set(x, y, 0.0);
        }
    }
    let res = extract_segments(&img, &SegmentOptions::default());
    assert!(!res.segments.is_empty());
    let seg = longest(&res.segments);
    assert_eq!(seg.axis_alignment(5.0), Some(Axis::Y), "{seg:?}");
    assert!(seg.length() >= 20.0, "len={}", seg.length());
}

#[test]
fn thin_dark_line_yields_one_centered_segment() {
    let mut img = white(120, 60);
    for x in 10..110 {
        img.set(x, 30, 0.0);
        img.set(x, 31, 0.0);
    }
    let res = extract_segments(&img, &SegmentOptions::default());
    let seg = longest(&res.segments);
    assert_eq!(seg.axis_alignment(5.0), Some(Axis::X));
    assert!(seg.length() > 90.0, "len={}", seg.length());
    let mid = seg.midpoint();
    assert!((mid[1] - 30.5).abs() < 1.5, "mid={mid:?}");
}

#[test]
fn rejects_flat_image() {
    let img = ImageF32::new(16, 16);
    let res = extract_segments(&img, &SegmentOptions::default());
    assert!(res.segments.is_empty(), "{:?}", res.segments);
}

#[test]
fn short_ticks_are_below_min_length() {
    let mut img = white(60, 60);
    for y in 20..24 {
        img.set(30, y, 0.0);
    }
    let options = SegmentOptions {
        min_length_px: 10.0,
        ..SegmentOptions::default()
    };
    let res = extract_segments(&img, &options);
    assert!(res.segments.is_empty(), "{:?}", res.segments);
}
