//! Color utilities: HSV conversion, neutrality test, the named palette and
//! color-bucket classification.
//!
//! HSV values use the 8-bit convention common to vision toolkits: hue in
//! `[0, 180)` (degrees / 2), saturation and value in `[0, 255]`.

use crate::error::ConfigError;
use crate::types::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of series color names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    Black,
    Blue,
    Green,
    Orange,
    Red,
    Yellow,
}

impl ColorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Black => "black",
            ColorName::Blue => "blue",
            ColorName::Green => "green",
            ColorName::Orange => "orange",
            ColorName::Red => "red",
            ColorName::Yellow => "yellow",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert an RGB triple to 8-bit HSV (`h` in `[0, 180)`).
pub fn rgb_to_hsv(rgb: Rgb) -> [u8; 3] {
    let r = rgb[0] as f32;
    let g = rgb[1] as f32;
    let b = rgb[2] as f32;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };
    let h_deg = if delta <= 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };
    let h = ((h_deg / 2.0).round() as u32 % 180) as u8;
    [h, s.round() as u8, v as u8]
}

/// Thresholds separating background/gridline ink from data ink.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct NeutralThresholds {
    /// Every channel strictly above this is "near white".
    pub white: u8,
    /// Maximum deviation of any channel from the channel mean for flat gray.
    pub gray_spread: f32,
    /// Minimum channel mean for a flat gray to count as neutral.
    pub gray_mean: f32,
}

impl Default for NeutralThresholds {
    fn default() -> Self {
        Self {
            white: 230,
            gray_spread: 20.0,
            gray_mean: 180.0,
        }
    }
}

impl NeutralThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.white == u8::MAX || !(self.gray_mean < 255.0) || !(self.gray_spread >= 0.0) {
            return Err(ConfigError::InvalidNeutralThresholds);
        }
        Ok(())
    }

    /// True for near-white pixels and for light, flat grays (gridlines).
    pub fn is_neutral(&self, rgb: Rgb) -> bool {
        if rgb.iter().all(|&c| c > self.white) {
            return true;
        }
        let mean = rgb.iter().map(|&c| c as f32).sum::<f32>() / 3.0;
        let spread = rgb
            .iter()
            .map(|&c| (c as f32 - mean).abs())
            .fold(0.0f32, f32::max);
        spread < self.gray_spread && mean > self.gray_mean
    }
}

/// Inclusive HSV box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|i| hsv[i] >= self.lower[i] && hsv[i] <= self.upper[i])
    }

    pub fn overlaps(&self, other: &HsvRange) -> bool {
        (0..3).all(|i| self.lower[i] <= other.upper[i] && other.lower[i] <= self.upper[i])
    }

    fn is_ordered(&self) -> bool {
        (0..3).all(|i| self.lower[i] <= self.upper[i])
    }
}

/// One named HSV range. A color may own several entries (red wraps around hue 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub color: ColorName,
    #[serde(flatten)]
    pub range: HsvRange,
}

impl PaletteEntry {
    pub const fn new(color: ColorName, lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self {
            color,
            range: HsvRange::new(lower, upper),
        }
    }
}

const DEFAULT_PALETTE: [PaletteEntry; 7] = [
    PaletteEntry::new(ColorName::Blue, [100, 50, 50], [130, 255, 255]),
    PaletteEntry::new(ColorName::Red, [0, 50, 50], [10, 255, 255]),
    PaletteEntry::new(ColorName::Red, [170, 50, 50], [179, 255, 255]),
    PaletteEntry::new(ColorName::Green, [40, 50, 50], [80, 255, 255]),
    PaletteEntry::new(ColorName::Orange, [11, 100, 100], [25, 255, 255]),
    PaletteEntry::new(ColorName::Yellow, [26, 100, 100], [35, 255, 255]),
    PaletteEntry::new(ColorName::Black, [0, 0, 0], [179, 255, 49]),
];

/// Validated set of non-overlapping palette entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PaletteEntry>", into = "Vec<PaletteEntry>")]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl Palette {
    /// Build a palette, rejecting inverted or mutually overlapping ranges.
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for entry in &entries {
            if !entry.range.is_ordered() {
                return Err(ConfigError::InvertedRange { color: entry.color });
            }
        }
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                if a.range.overlaps(&b.range) {
                    return Err(ConfigError::OverlappingRanges {
                        first: a.color,
                        second: b.color,
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// First entry whose range contains `hsv`.
    pub fn lookup(&self, hsv: [u8; 3]) -> Option<ColorName> {
        self.entries
            .iter()
            .find(|e| e.range.contains(hsv))
            .map(|e| e.color)
    }
}

impl TryFrom<Vec<PaletteEntry>> for Palette {
    type Error = ConfigError;

    fn try_from(entries: Vec<PaletteEntry>) -> Result<Self, Self::Error> {
        Palette::new(entries)
    }
}

impl From<Palette> for Vec<PaletteEntry> {
    fn from(p: Palette) -> Self {
        p.entries
    }
}

/// Options for naming an arbitrary sampled color.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// Pixels whose brightest channel is below this are black.
    pub black_max_channel: u8,
    /// Desaturated pixels up to this brightness still count as black.
    pub dark_gray_max_channel: u8,
    /// Saturation (0..1) below which a dark pixel is treated as gray ink.
    pub dark_gray_max_saturation: f32,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            black_max_channel: 80,
            dark_gray_max_channel: 150,
            dark_gray_max_saturation: 0.2,
        }
    }
}

/// Name the color bucket of `rgb`.
///
/// Black is tested before any hue so dark, desaturated antialiasing is never
/// promoted to a hue color. Colors outside every palette range fall back to
/// their dominant channel.
pub fn classify_color(rgb: Rgb, palette: &Palette, options: &ClassifierOptions) -> ColorName {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max < options.black_max_channel {
        return ColorName::Black;
    }

    if let Some(name) = palette.lookup(rgb_to_hsv(rgb)) {
        return name;
    }

    let saturation = (max - min) as f32 / max as f32;
    if max <= options.dark_gray_max_channel && saturation < options.dark_gray_max_saturation {
        return ColorName::Black;
    }

    if r > g.max(b) {
        ColorName::Red
    } else if b > r.max(g) {
        ColorName::Blue
    } else if g > r.max(b) {
        ColorName::Green
    } else {
        ColorName::Black
    }
}

/// Chroma (max - min channel), used to rank candidate ink pixels.
#[inline]
pub fn chroma(rgb: Rgb) -> u8 {
    rgb.iter().max().copied().unwrap_or(0) - rgb.iter().min().copied().unwrap_or(0)
}
