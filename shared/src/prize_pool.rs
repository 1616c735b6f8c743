use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::{FULL_TURN_DEGREES, POINTER_OFFSET_DEGREES, SEGMENT_PALETTE};
use crate::error::WheelError;
use crate::validation::{validate_color, validate_label, validate_weight};

/// Prize as supplied by the configuration store, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeRecord {
    pub label: String,
    #[serde(alias = "probability")]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl PrizeRecord {
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight,
            color: None,
            payload: Value::Null,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Palette colour for the segment at `index`.
pub fn palette_color(index: usize) -> &'static str {
    SEGMENT_PALETTE[index % SEGMENT_PALETTE.len()]
}

// `#RGB` -> `#RRGGBB`, the only form colour pickers accept. Input is already validated.
fn expand_short_hex(color: &str) -> String {
    if color.len() != 4 {
        return color.to_string();
    }
    color[1..].chars().fold(String::from("#"), |mut out, c| {
        out.push(c);
        out.push(c);
        out
    })
}

/// A validated prize. Label is non-empty, weight is finite and non-negative, colour is `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrizeEntry {
    label: String,
    weight: f64,
    color: String,
    payload: Value,
}

impl PrizeEntry {
    /// Validates `record` as the entry at position `index`; a missing colour comes from the palette.
    pub fn from_record(index: usize, record: PrizeRecord) -> Result<Self, WheelError> {
        let invalid = |e: validator::ValidationError| WheelError::InvalidEntry {
            index,
            reason: e.code.to_string(),
        };

        validate_label(&record.label).map_err(invalid)?;
        validate_weight(record.weight).map_err(invalid)?;
        let color = match record.color {
            Some(color) => {
                validate_color(&color).map_err(invalid)?;
                expand_short_hex(&color)
            }
            None => palette_color(index).to_string(),
        };

        Ok(Self {
            label: record.label,
            weight: record.weight,
            color,
            payload: record.payload,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Zero-weight prizes are drawn on the wheel but can never be won.
    pub fn is_winnable(&self) -> bool {
        self.weight > 0.0
    }

    pub fn to_record(&self) -> PrizeRecord {
        PrizeRecord {
            label: self.label.clone(),
            weight: self.weight,
            color: Some(self.color.clone()),
            payload: self.payload.clone(),
        }
    }
}

/// How the outcome authority names the winning prize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrizeDesignation {
    Index(usize),
    Label(String),
}

impl From<usize> for PrizeDesignation {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PrizeDesignation {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// Display tier for a win probability, as shown in the admin editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rarity {
    Never,
    UltraRare,
    Rare,
    Uncommon,
    Common,
    Frequent,
    AlmostAlways,
}

impl Rarity {
    pub fn from_percent(percent: f64) -> Self {
        if percent <= 0.0 {
            Self::Never
        } else if percent <= 5.0 {
            Self::UltraRare
        } else if percent <= 15.0 {
            Self::Rare
        } else if percent <= 30.0 {
            Self::Uncommon
        } else if percent <= 60.0 {
            Self::Common
        } else if percent <= 90.0 {
            Self::Frequent
        } else {
            Self::AlmostAlways
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::UltraRare => "Ultra Rare",
            Self::Rare => "Rare",
            Self::Uncommon => "Uncommon",
            Self::Common => "Common",
            Self::Frequent => "Frequent",
            Self::AlmostAlways => "Almost Always",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Never => "#666666",
            Self::UltraRare => "#FF4444",
            Self::Rare => "#FF8C00",
            Self::Uncommon => "#FFD700",
            Self::Common => "#DAA520",
            Self::Frequent => "#10B981",
            Self::AlmostAlways => "#06B6D4",
        }
    }
}

/// Weight share of one entry, as a percentage rounded to one decimal.
/// Returns 0 when the total is not positive.
pub fn percent_of(weight: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    (weight / total * 1000.0).round() / 10.0
}

/// Ordered prize snapshot. Always holds at least one entry with unique labels.
///
/// Segment `i` covers `[i * span, (i + 1) * span)` in pointer space, drawn from
/// `POINTER_OFFSET_DEGREES` so that segment 0 starts under the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PrizeRecord>", into = "Vec<PrizeRecord>")]
pub struct PrizePool {
    entries: Vec<PrizeEntry>,
}

impl PrizePool {
    pub fn new(records: Vec<PrizeRecord>) -> Result<Self, WheelError> {
        let entries = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| PrizeEntry::from_record(index, record))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<PrizeEntry>) -> Result<Self, WheelError> {
        if entries.is_empty() {
            return Err(WheelError::EmptyPool);
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.label.as_str()) {
                return Err(WheelError::DuplicateLabel(entry.label.clone()));
            }
        }

        let total: f64 = entries.iter().map(|e| e.weight).sum();
        if total < 0.0 {
            return Err(WheelError::NegativeTotalWeight(total));
        }
        if !total.is_finite() {
            return Err(WheelError::InvalidConfig(format!(
                "total prize weight is not finite: {}",
                total
            )));
        }

        Ok(Self { entries })
    }

    pub fn from_json(json: &str) -> Result<Self, WheelError> {
        let records: Vec<PrizeRecord> =
            serde_json::from_str(json).map_err(|e| WheelError::InvalidConfig(e.to_string()))?;
        Self::new(records)
    }

    /// The eight-prize pool a fresh installation starts with.
    pub fn default_seed() -> Self {
        let seed = [
            ("1000 Points", 1000, "#8B5CF6", 5.0),
            ("500 Points", 500, "#F472B6", 10.0),
            ("250 Points", 250, "#06B6D4", 15.0),
            ("100 Points", 100, "#10B981", 20.0),
            ("75 Points", 75, "#F59E0B", 15.0),
            ("50 Points", 50, "#EF4444", 15.0),
            ("25 Points", 25, "#3B82F6", 10.0),
            ("10 Points", 10, "#EC4899", 10.0),
        ];

        let entries = seed
            .iter()
            .map(|&(label, points, color, weight)| PrizeEntry {
                label: label.to_string(),
                weight,
                color: color.to_string(),
                payload: json!({ "points": points }),
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PrizeEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Result<&PrizeEntry, WheelError> {
        self.entries.get(index).ok_or(WheelError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn win_probability_percent(&self, index: usize) -> Result<f64, WheelError> {
        let entry = self.get(index)?;
        Ok(percent_of(entry.weight, self.total_weight()))
    }

    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total_weight();
        self.entries.iter().map(|e| percent_of(e.weight, total)).collect()
    }

    pub fn rarity(&self, index: usize) -> Result<Rarity, WheelError> {
        Ok(Rarity::from_percent(self.win_probability_percent(index)?))
    }

    pub fn segment_angle_span(&self) -> f64 {
        FULL_TURN_DEGREES / self.entries.len() as f64
    }

    /// Start and end angle of segment `index` in drawing space, before wheel rotation.
    pub fn segment_bounds(&self, index: usize) -> Result<(f64, f64), WheelError> {
        self.get(index)?;
        Ok(self.bounds_of(index))
    }

    pub(crate) fn bounds_of(&self, index: usize) -> (f64, f64) {
        (
            self.boundary(index) + POINTER_OFFSET_DEGREES,
            self.boundary(index + 1) + POINTER_OFFSET_DEGREES,
        )
    }

    // The last boundary is pinned to a full turn so the segments close exactly
    fn boundary(&self, k: usize) -> f64 {
        if k >= self.entries.len() {
            FULL_TURN_DEGREES
        } else {
            k as f64 * self.segment_angle_span()
        }
    }

    /// Index of the entry whose label matches exactly.
    pub fn resolve_label(&self, label: &str) -> Result<usize, WheelError> {
        self.entries
            .iter()
            .position(|e| e.label == label)
            .ok_or_else(|| WheelError::UnknownPrize(label.to_string()))
    }

    /// Resolves a designation to an index that may legally be spun to.
    pub fn resolve_winner(&self, designation: &PrizeDesignation) -> Result<usize, WheelError> {
        let index = match designation {
            PrizeDesignation::Index(index) => *index,
            PrizeDesignation::Label(label) => self.resolve_label(label)?,
        };
        self.ensure_winnable(index)?;
        Ok(index)
    }

    pub fn ensure_winnable(&self, index: usize) -> Result<(), WheelError> {
        let entry = self.get(index)?;
        if !entry.is_winnable() {
            return Err(WheelError::ZeroWeightWinner {
                index,
                label: entry.label.clone(),
            });
        }
        Ok(())
    }

    pub fn to_records(&self) -> Vec<PrizeRecord> {
        self.entries.iter().map(PrizeEntry::to_record).collect()
    }
}

impl TryFrom<Vec<PrizeRecord>> for PrizePool {
    type Error = WheelError;

    fn try_from(records: Vec<PrizeRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<PrizePool> for Vec<PrizeRecord> {
    fn from(pool: PrizePool) -> Self {
        pool.to_records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn pool(weights: &[f64]) -> PrizePool {
        let records = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| PrizeRecord::new(format!("Prize {}", i + 1), w))
            .collect();
        PrizePool::new(records).unwrap()
    }

    #[test]
    fn test_empty_pool_rejected() {
        let err = PrizePool::new(Vec::new()).unwrap_err();
        assert_eq!(err, WheelError::EmptyPool);
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err: Result<PrizePool, _> = serde_json::from_str("[]");
        assert!(err.is_err());
    }

    #[test]
    fn test_invalid_records_rejected() {
        let err = PrizePool::new(vec![PrizeRecord::new("A", 1.0), PrizeRecord::new("", 1.0)])
            .unwrap_err();
        assert_eq!(
            err,
            WheelError::InvalidEntry { index: 1, reason: "empty_label".to_string() }
        );

        let err = PrizePool::new(vec![PrizeRecord::new("A", -5.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = PrizePool::new(vec![PrizeRecord::new("A", 1.0).with_color("blue")]).unwrap_err();
        assert_eq!(
            err,
            WheelError::InvalidEntry { index: 0, reason: "invalid_color".to_string() }
        );

        let err = PrizePool::new(vec![PrizeRecord::new("A", 1.0), PrizeRecord::new("A", 2.0)])
            .unwrap_err();
        assert_eq!(err, WheelError::DuplicateLabel("A".to_string()));
    }

    #[test]
    fn test_percentages() {
        assert_eq!(pool(&[0.0, 50.0, 50.0]).percentages(), vec![0.0, 50.0, 50.0]);
        assert_eq!(pool(&[0.0, 0.0, 0.0]).percentages(), vec![0.0, 0.0, 0.0]);
        assert_eq!(pool(&[1.0, 2.0]).percentages(), vec![33.3, 66.7]);

        let abc = pool(&[10.0, 30.0, 60.0]);
        assert_eq!(abc.total_weight(), 100.0);
        assert_eq!(abc.win_probability_percent(1).unwrap(), 30.0);
        assert!(abc.win_probability_percent(3).is_err());
    }

    #[test]
    fn test_segment_bounds_tile_full_turn() {
        for n in 1..=37 {
            let pool = pool(&vec![1.0; n]);
            let span = pool.segment_angle_span();
            let (first_start, _) = pool.segment_bounds(0).unwrap();
            let (_, last_end) = pool.segment_bounds(n - 1).unwrap();
            assert_eq!(first_start, -90.0);
            assert_eq!(last_end, 270.0);

            for i in 0..n {
                let (start, end) = pool.segment_bounds(i).unwrap();
                assert!(end > start);
                assert!((end - start - span).abs() < 1e-9);
                if i + 1 < n {
                    assert_eq!(end, pool.segment_bounds(i + 1).unwrap().0);
                }
            }
        }
    }

    #[test]
    fn test_resolve_winner() {
        let pool = pool(&[0.0, 30.0, 60.0]);
        assert_eq!(pool.resolve_winner(&"Prize 2".into()).unwrap(), 1);
        assert_eq!(pool.resolve_winner(&PrizeDesignation::Index(2)).unwrap(), 2);

        let err = pool.resolve_winner(&"Prize 9".into()).unwrap_err();
        assert_eq!(err, WheelError::UnknownPrize("Prize 9".to_string()));
        assert_eq!(err.kind(), ErrorKind::ContractViolation);

        let err = pool.resolve_winner(&"Prize 1".into()).unwrap_err();
        assert!(matches!(err, WheelError::ZeroWeightWinner { index: 0, .. }));

        let err = pool.resolve_winner(&PrizeDesignation::Index(3)).unwrap_err();
        assert_eq!(err, WheelError::IndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn test_palette_and_payload_from_json() {
        let json = r##"[
            { "label": "1000 Points", "probability": 0.05, "color": "#8B5CF6", "payload": { "points": 1000 } },
            { "label": "Mystery Box", "weight": 2 }
        ]"##;
        let pool = PrizePool::from_json(json).unwrap();
        assert_eq!(pool.entries()[0].color(), "#8B5CF6");
        assert_eq!(pool.entries()[0].payload()["points"], 1000);
        assert_eq!(pool.entries()[1].color(), SEGMENT_PALETTE[1]);
        assert!(pool.entries()[1].payload().is_null());

        let reparsed: PrizePool = serde_json::from_str(&serde_json::to_string(&pool).unwrap()).unwrap();
        assert_eq!(reparsed, pool);
    }

    #[test]
    fn test_short_hex_colors_expanded() {
        let pool = PrizePool::new(vec![
            PrizeRecord::new("A", 1.0).with_color("#fff"),
            PrizeRecord::new("B", 1.0).with_color("#1aB"),
            PrizeRecord::new("C", 1.0).with_color("#9B1B30"),
        ])
        .unwrap();
        assert_eq!(pool.entries()[0].color(), "#ffffff");
        assert_eq!(pool.entries()[1].color(), "#11aaBB");
        assert_eq!(pool.entries()[2].color(), "#9B1B30");
        assert_eq!(pool.to_records()[0].color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn test_default_seed() {
        let seed = PrizePool::default_seed();
        assert_eq!(seed.len(), 8);
        assert_eq!(seed.total_weight(), 100.0);
        assert_eq!(seed.win_probability_percent(3).unwrap(), 20.0);
        assert_eq!(seed.rarity(0).unwrap(), Rarity::UltraRare);
        assert_eq!(seed.entries()[7].payload()["points"], 10);
    }

    #[test]
    fn test_rarity_tiers() {
        assert_eq!(Rarity::from_percent(0.0), Rarity::Never);
        assert_eq!(Rarity::from_percent(5.0), Rarity::UltraRare);
        assert_eq!(Rarity::from_percent(15.0), Rarity::Rare);
        assert_eq!(Rarity::from_percent(30.0), Rarity::Uncommon);
        assert_eq!(Rarity::from_percent(60.0), Rarity::Common);
        assert_eq!(Rarity::from_percent(90.0), Rarity::Frequent);
        assert_eq!(Rarity::from_percent(90.1), Rarity::AlmostAlways);
        assert_eq!(Rarity::UltraRare.name(), "Ultra Rare");
    }
}
