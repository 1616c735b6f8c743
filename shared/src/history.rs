use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::MIN_DISTRIBUTION_BAR_PERCENT;
use crate::prize_pool::PrizeEntry;

/// One completed draw, as kept by the operator's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub username: String,
    pub prize_label: String,
    #[serde(default)]
    pub prize_points: i64,
    pub prize_color: String,
    /// RFC 3339 timestamp.
    pub drawn_at: String,
}

impl DrawRecord {
    /// Points come from the prize payload's `points` field when it has one.
    pub fn new(username: impl Into<String>, prize: &PrizeEntry, drawn_at: impl Into<String>) -> Self {
        let prize_points = prize
            .payload()
            .get("points")
            .and_then(|p| p.as_i64())
            .unwrap_or(0);

        Self {
            username: username.into(),
            prize_label: prize.label().to_string(),
            prize_points,
            prize_color: prize.color().to_string(),
            drawn_at: drawn_at.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeDistribution {
    pub label: String,
    pub count: usize,
    pub total_points: i64,
    pub bar_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawStats {
    pub total_draws: usize,
    pub distribution: Vec<PrizeDistribution>,
}

/// Per-prize win counts, most frequent first.
pub fn summarize(records: &[DrawRecord]) -> DrawStats {
    let mut counts: HashMap<&str, (usize, i64)> = HashMap::new();
    for record in records {
        let slot = counts.entry(record.prize_label.as_str()).or_insert((0, 0));
        slot.0 += 1;
        slot.1 += record.prize_points;
    }

    let total_draws = records.len();
    let mut distribution: Vec<PrizeDistribution> = counts
        .into_iter()
        .map(|(label, (count, total_points))| PrizeDistribution {
            label: label.to_string(),
            count,
            total_points,
            bar_percent: (count as f64 / total_draws as f64 * 100.0)
                .max(MIN_DISTRIBUTION_BAR_PERCENT),
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    DrawStats { total_draws, distribution }
}

/// The newest `limit` records, newest first. `records` is in draw order.
pub fn recent(records: &[DrawRecord], limit: usize) -> Vec<&DrawRecord> {
    records.iter().rev().take(limit).collect()
}
