//! Numeric tick-label tokens.
use super::ocr::RecognizedWord;
use crate::types::{Axis, PixelRect};
use serde::Serialize;

/// A parsed tick label and its position along the axis (full-image pixels).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisToken {
    pub value: f64,
    pub position: f64,
}

/// Parse a tick label into a number.
///
/// Accepts an optional leading minus (ASCII or unicode), `.` or `,` as the
/// decimal separator and thousands grouping (`1,000`, `1.000,5`). Values
/// outside the open interval `bounds` are rejected.
pub fn parse_number(text: &str, bounds: (f64, f64)) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '\u{2212}' | '\u{2013}' => '-',
            other => other,
        })
        .collect();
    let cleaned = cleaned.trim_end_matches(['.', ',']);
    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned),
    };
    if body.is_empty()
        || !body.starts_with(|c: char| c.is_ascii_digit())
        || !body.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let normalized = normalize_separators(body)?;
    let magnitude: f64 = normalized.parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    (value > bounds.0 && value < bounds.1).then_some(value)
}

fn normalize_separators(body: &str) -> Option<String> {
    let dots = body.matches('.').count();
    let commas = body.matches(',').count();
    match (dots, commas) {
        (0, 0) => Some(body.to_string()),
        (_, 0) | (0, _) => {
            let sep = if dots > 0 { '.' } else { ',' };
            let groups: Vec<&str> = body.split(sep).collect();
            if groups.len() == 2 {
                // A lone comma followed by exactly three digits is grouping.
                if sep == ',' && groups[1].len() == 3 && groups[0] != "0" {
                    Some(format!("{}{}", groups[0], groups[1]))
                } else {
                    Some(format!("{}.{}", groups[0], groups[1]))
                }
            } else if is_grouping(&groups) {
                Some(groups.concat())
            } else {
                None
            }
        }
        _ => {
            // Both present: the last separator is the decimal mark.
            let last = body.rfind(['.', ','])?;
            let (int_part, frac) = body.split_at(last);
            let group_sep = if body[last..].starts_with('.') { ',' } else { '.' };
            if int_part.contains(&body[last..last + 1]) {
                return None;
            }
            let groups: Vec<&str> = int_part.split(group_sep).collect();
            if !is_grouping(&groups) {
                return None;
            }
            Some(format!("{}.{}", groups.concat(), &frac[1..]))
        }
    }
}

fn is_grouping(groups: &[&str]) -> bool {
    match groups.split_first() {
        Some((head, tail)) => {
            !head.is_empty() && head.len() <= 3 && tail.iter().all(|g| g.len() == 3)
        }
        None => false,
    }
}

/// Convert recognized words into tokens.
///
/// `roi` is where the recognized image was cut from and `scale` the
/// upscaling applied afterwards; positions are mapped back to full-image
/// pixels. For the x axis the position is the word's center x, for the y
/// axis its center y.
pub fn tokens_from_words(
    words: &[RecognizedWord],
    axis: Axis,
    roi: PixelRect,
    scale: f32,
    min_confidence: f32,
    bounds: (f64, f64),
) -> Vec<AxisToken> {
    let scale = scale.max(f32::EPSILON) as f64;
    words
        .iter()
        .filter(|w| w.confidence >= min_confidence && w.width > 0 && w.height > 0)
        .filter_map(|w| {
            let value = parse_number(&w.text, bounds)?;
            let (cx, cy) = w.center();
            let position = match axis {
                Axis::X => roi.x as f64 + cx as f64 / scale,
                Axis::Y => roi.y as f64 + cy as f64 / scale,
            };
            Some(AxisToken { value, position })
        })
        .collect()
}
