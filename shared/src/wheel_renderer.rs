use serde::{Deserialize, Serialize};

use crate::constants::{FULL_TURN_DEGREES, LABEL_FALLBACK_SPLIT, LABEL_WRAP_THRESHOLD};
use crate::prize_pool::PrizePool;

/// Everything the painter needs for one segment on one frame.
///
/// Angles are in degrees, clockwise from 3 o'clock, with the wheel rotation already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDraw {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub color: String,
    pub label: String,
    pub label_lines: Vec<String>,
    /// Rotation for the label text, always within [-90, 90] so it never reads upside down.
    pub label_rotation: f64,
}

/// Draw commands for the whole wheel at rotation `angle`. Stateless; safe to call every frame.
pub fn render(pool: &PrizePool, angle: f64) -> Vec<SegmentDraw> {
    pool.entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let (start, end) = pool.bounds_of(index);
            let start_angle = start + angle;
            let end_angle = end + angle;
            let mid_angle = (start_angle + end_angle) / 2.0;

            SegmentDraw {
                index,
                start_angle,
                end_angle,
                mid_angle,
                color: entry.color().to_string(),
                label: entry.label().to_string(),
                label_lines: wrap_label(entry.label()),
                label_rotation: upright_label_rotation(mid_angle),
            }
        })
        .collect()
}

/// Tangential text orientation at `mid_angle`, flipped by half a turn on the lower half of the wheel.
pub fn upright_label_rotation(mid_angle: f64) -> f64 {
    let tangent = (mid_angle + 90.0).rem_euclid(FULL_TURN_DEGREES);
    if tangent > 90.0 && tangent < 270.0 {
        tangent - 180.0
    } else if tangent >= 270.0 {
        tangent - FULL_TURN_DEGREES
    } else {
        tangent
    }
}

/// Splits long labels onto two lines, at the last space when there is one.
pub fn wrap_label(label: &str) -> Vec<String> {
    let label = label.trim();
    if label.chars().count() <= LABEL_WRAP_THRESHOLD {
        return vec![label.to_string()];
    }

    match label.rfind(' ') {
        Some(split) if split > 0 => vec![
            label[..split].trim_end().to_string(),
            label[split + 1..].to_string(),
        ],
        _ => {
            let split = label
                .char_indices()
                .nth(LABEL_FALLBACK_SPLIT)
                .map(|(i, _)| i)
                .unwrap_or(label.len());
            vec![label[..split].to_string(), label[split..].to_string()]
        }
    }
}
