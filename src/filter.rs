//! Pool filtering and range snapping

use serde::Serialize;

use crate::catalog::{Catalog, PitchDomain};
use crate::pitch::PitchEntry;

/// Inclusive pitch range, always `low <= high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeSelection {
    low: u8,
    high: u8,
}

impl RangeSelection {
    /// Bounds given in either order are swapped into place.
    pub fn new(a: u8, b: u8) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(&self) -> u8 {
        self.low
    }

    pub fn high(&self) -> u8 {
        self.high
    }

    pub fn contains(&self, pitch_number: u8) -> bool {
        self.low <= pitch_number && pitch_number <= self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterState {
    pub range: RangeSelection,
    pub naturals_only: bool,
}

impl FilterState {
    pub fn admits(&self, entry: &PitchEntry) -> bool {
        self.range.contains(entry.pitch_number)
            && (!self.naturals_only || entry.accidental.is_natural())
    }
}

/// Catalog entries currently eligible for selection, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivePool {
    entries: Vec<PitchEntry>,
    naturals_only: bool,
}

impl ActivePool {
    /// A pool over explicit entries, mostly useful for driving the selector directly.
    pub fn from_entries(entries: Vec<PitchEntry>) -> Self {
        let naturals_only = !entries.is_empty() && entries.iter().all(|e| e.accidental.is_natural());
        Self {
            entries,
            naturals_only,
        }
    }

    pub fn entries(&self) -> &[PitchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every entry is natural, either by filter or by content.
    pub fn is_naturals_only(&self) -> bool {
        self.naturals_only
    }
}

/// Select the catalog entries admitted by `state`.
///
/// Pure: the same catalog and state always give the same pool.
pub fn filter(catalog: &Catalog, state: &FilterState) -> ActivePool {
    let entries: Vec<PitchEntry> = catalog
        .entries()
        .iter()
        .filter(|e| state.admits(e))
        .cloned()
        .collect();

    let naturals_only =
        state.naturals_only || (!entries.is_empty() && entries.iter().all(|e| e.accidental.is_natural()));

    ActivePool {
        entries,
        naturals_only,
    }
}

impl PitchDomain {
    /// Greatest domain value `<= desired`, else the domain minimum.
    pub fn snap_low(&self, desired: u8) -> Option<u8> {
        self.options
            .iter()
            .rev()
            .map(|o| o.pitch_number)
            .find(|&v| v <= desired)
            .or_else(|| self.min())
    }

    /// Least domain value `>= desired`, else the domain maximum.
    pub fn snap_high(&self, desired: u8) -> Option<u8> {
        self.options
            .iter()
            .map(|o| o.pitch_number)
            .find(|&v| v >= desired)
            .or_else(|| self.max())
    }

    /// Snap both bounds into the domain and normalize.
    /// `None` only for an empty domain.
    pub fn snap_range(&self, low: u8, high: u8) -> Option<RangeSelection> {
        Some(RangeSelection::new(self.snap_low(low)?, self.snap_high(high)?))
    }

    /// The whole domain as a range.
    pub fn full_range(&self) -> Option<RangeSelection> {
        Some(RangeSelection::new(self.min()?, self.max()?))
    }
}
