//! Synthetic chart images and a scripted text recognizer.
//!
//! Tick labels are drawn as solid dark blocks. The recognizer finds those
//! blocks by projecting the ROI onto its long axis and names them from a
//! script, so calibration can be tested without tesseract.
use chart_extractor::{OcrError, RecognizedWord, TextRecognizer};
use image::{GrayImage, Rgb, RgbImage};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const ORANGE: Rgb<u8> = Rgb([255, 140, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// Standard test canvas: 1000x800 with the frame at (100, 50)-(900, 700).
pub const WIDTH: u32 = 1000;
pub const HEIGHT: u32 = 800;
pub const LEFT: u32 = 100;
pub const TOP: u32 = 50;
pub const RIGHT: u32 = 900;
pub const BOTTOM: u32 = 700;

/// Row where x tick labels are centered. Below the y label ROI.
pub const X_LABEL_ROW: u32 = BOTTOM + 70;
/// Column where y tick labels are centered.
pub const Y_LABEL_COL: u32 = LEFT - 40;

pub struct ChartBuilder {
    image: RgbImage,
}

impl ChartBuilder {
    /// White canvas with a closed 2px black frame.
    pub fn new() -> Self {
        let mut image = RgbImage::from_pixel(WIDTH, HEIGHT, WHITE);
        for x in LEFT..=RIGHT + 1 {
            for t in 0..2 {
                image.put_pixel(x, TOP + t, BLACK);
                image.put_pixel(x, BOTTOM + t, BLACK);
            }
        }
        for y in TOP..=BOTTOM + 1 {
            for t in 0..2 {
                image.put_pixel(LEFT + t, y, BLACK);
                image.put_pixel(RIGHT + t, y, BLACK);
            }
        }
        Self { image }
    }

    /// Label block centered on pixel column `x` below the frame.
    pub fn x_label(mut self, x: u32) -> Self {
        self.block(x, X_LABEL_ROW);
        self
    }

    /// Label block centered on pixel row `y` left of the frame.
    pub fn y_label(mut self, y: u32) -> Self {
        self.block(Y_LABEL_COL, y);
        self
    }

    pub fn disc(mut self, cx: u32, cy: u32, radius: u32, color: Rgb<u8>) -> Self {
        fill_disc(&mut self.image, cx as i64, cy as i64, radius as i64, color);
        self
    }

    /// Straight stroke of the given half width.
    pub fn stroke(
        mut self,
        from: (u32, u32),
        to: (u32, u32),
        half_width: u32,
        color: Rgb<u8>,
    ) -> Self {
        let (x0, y0) = (from.0 as f64, from.1 as f64);
        let (x1, y1) = (to.0 as f64, to.1 as f64);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil() as usize;
        for i in 0..=steps {
            let t = i as f64 / steps.max(1) as f64;
            let x = (x0 + (x1 - x0) * t).round() as i64;
            let y = (y0 + (y1 - y0) * t).round() as i64;
            fill_disc(&mut self.image, x, y, half_width as i64, color);
        }
        self
    }

    pub fn build(self) -> RgbImage {
        self.image
    }

    fn block(&mut self, cx: u32, cy: u32) {
        for y in cy - 7..=cy + 7 {
            for x in cx - 5..=cx + 5 {
                self.image.put_pixel(x, y, BLACK);
            }
        }
    }
}

fn fill_disc(image: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    for y in cy - radius..=cy + radius {
        for x in cx - radius..=cx + radius {
            let inside = (x - cx).pow(2) + (y - cy).pow(2) <= radius * radius;
            let on_canvas =
                x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height();
            if inside && on_canvas {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Names dark blocks from a script: wide images are x ROIs (labels listed
/// left to right), tall images are y ROIs (labels listed top to bottom).
#[derive(Clone, Debug, Default)]
pub struct ScriptedLabels {
    pub x: Vec<String>,
    pub y: Vec<String>,
}

impl ScriptedLabels {
    pub fn new(x: &[&str], y: &[&str]) -> Self {
        Self {
            x: x.iter().map(|s| s.to_string()).collect(),
            y: y.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TextRecognizer for ScriptedLabels {
    fn recognize(&self, image: &GrayImage) -> Result<Vec<RecognizedWord>, OcrError> {
        let (w, h) = image.dimensions();
        let total: u64 = image.pixels().map(|p| p[0] as u64).sum();
        let mean = total / (w as u64 * h as u64).max(1);
        let inverted = mean < 128;
        let ink = |x: u32, y: u32| (image.get_pixel(x, y)[0] < 128) != inverted;

        let wide = w >= h;
        let labels = if wide { &self.x } else { &self.y };
        let (along, across) = if wide { (w, h) } else { (h, w) };
        let at = |a: u32, c: u32| if wide { ink(a, c) } else { ink(c, a) };

        let mut runs: Vec<(u32, u32)> = Vec::new();
        let mut start = None;
        for a in 0..along {
            let hit = (0..across).any(|c| at(a, c));
            match (hit, start) {
                (true, None) => start = Some(a),
                (false, Some(s)) => {
                    runs.push((s, a - 1));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, along - 1));
        }

        let words = runs
            .into_iter()
            .zip(labels)
            .map(|((a0, a1), text)| {
                let hits: Vec<u32> = (0..across)
                    .filter(|&c| (a0..=a1).any(|a| at(a, c)))
                    .collect();
                let c0 = hits.first().copied().unwrap_or(0);
                let c1 = hits.last().copied().unwrap_or(0);
                let (left, top, width, height) = if wide {
                    (a0, c0, a1 - a0 + 1, c1 - c0 + 1)
                } else {
                    (c0, a0, c1 - c0 + 1, a1 - a0 + 1)
                };
                RecognizedWord {
                    text: text.clone(),
                    left: left as i32,
                    top: top as i32,
                    width: width as i32,
                    height: height as i32,
                    confidence: 95.0,
                }
            })
            .collect();
        Ok(words)
    }
}
