use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{NEW_PRIZE_LABEL, NEW_PRIZE_WEIGHT, SLIDER_MAX_WEIGHT};
use crate::error::WheelError;
use crate::prize_pool::{palette_color, percent_of, PrizeEntry, PrizePool, PrizeRecord, Rarity};

/// Field edits for one prize. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrizeUpdate {
    pub label: Option<String>,
    pub weight: Option<f64>,
    pub color: Option<String>,
    pub payload: Option<Value>,
}

/// Admin working copy of a prize pool.
///
/// Edits stay local until [`commit`](Self::commit) produces a new snapshot. The copy may be
/// empty while editing; only committing requires a valid pool. Removing an entry shifts
/// every later index down by one, so callers holding indices should re-resolve by label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrizeEditor {
    entries: Vec<PrizeEntry>,
    dirty: bool,
}

impl PrizeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pool(pool: &PrizePool) -> Self {
        Self {
            entries: pool.entries().to_vec(),
            dirty: false,
        }
    }

    pub fn entries(&self) -> &[PrizeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Appends a placeholder prize coloured from the palette. Returns its index.
    pub fn add_entry(&mut self) -> Result<usize, WheelError> {
        let index = self.entries.len();
        let record = PrizeRecord::new(self.unused_label(NEW_PRIZE_LABEL), NEW_PRIZE_WEIGHT)
            .with_color(palette_color(index));
        self.add(record)
    }

    pub fn add(&mut self, record: PrizeRecord) -> Result<usize, WheelError> {
        let index = self.entries.len();
        let entry = PrizeEntry::from_record(index, record)?;
        self.entries.push(entry);
        self.dirty = true;
        Ok(index)
    }

    pub fn remove(&mut self, index: usize) -> Result<PrizeEntry, WheelError> {
        self.check_index(index)?;
        self.dirty = true;
        Ok(self.entries.remove(index))
    }

    pub fn update(&mut self, index: usize, update: PrizeUpdate) -> Result<(), WheelError> {
        self.check_index(index)?;

        let mut record = self.entries[index].to_record();
        if let Some(label) = update.label {
            record.label = label;
        }
        if let Some(weight) = update.weight {
            record.weight = weight;
        }
        if let Some(color) = update.color {
            record.color = Some(color);
        }
        if let Some(payload) = update.payload {
            record.payload = payload;
        }

        self.entries[index] = PrizeEntry::from_record(index, record)?;
        self.dirty = true;
        Ok(())
    }

    /// Weight from the 0-100 slider; out-of-range input is clamped.
    pub fn set_slider_weight(&mut self, index: usize, value: f64) -> Result<(), WheelError> {
        let weight = if value.is_nan() { 0.0 } else { value.clamp(0.0, SLIDER_MAX_WEIGHT) };
        self.update(index, PrizeUpdate { weight: Some(weight), ..Default::default() })
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(PrizeEntry::weight).sum()
    }

    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total_weight();
        self.entries.iter().map(|e| percent_of(e.weight(), total)).collect()
    }

    pub fn rarities(&self) -> Vec<Rarity> {
        self.percentages().into_iter().map(Rarity::from_percent).collect()
    }

    /// Validates the working copy and returns it as a new snapshot.
    pub fn commit(&mut self) -> Result<PrizePool, WheelError> {
        let pool = PrizePool::from_entries(self.entries.clone())?;
        self.dirty = false;
        log::debug!("Committed prize pool with {} prizes", pool.len());
        Ok(pool)
    }

    fn check_index(&self, index: usize) -> Result<(), WheelError> {
        if index >= self.entries.len() {
            return Err(WheelError::IndexOutOfRange { index, len: self.entries.len() });
        }
        Ok(())
    }

    fn unused_label(&self, base: &str) -> String {
        let taken = |label: &str| self.entries.iter().any(|e| e.label() == label);
        if !taken(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{} {}", base, n))
            .find(|label| !taken(label))
            .unwrap_or_else(|| base.to_string())
    }
}
