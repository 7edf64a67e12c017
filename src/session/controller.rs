//! Session state and operations

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::gate::{TriggerGate, TriggerSource};
use crate::catalog::{Catalog, PitchDomain};
use crate::config::{find_preset, DrillSettings, Preset};
use crate::error::DrillError;
use crate::filter::{filter, ActivePool, FilterState, RangeSelection};
use crate::pitch::{parse_note_name, PitchEntry};
use crate::selector::{Selection, SelectionMemory, Selector, Weighting};

/// All mutable state of one drill session.
///
/// Each operation runs to completion and leaves the filter, pool and memory
/// consistent with each other.
pub struct SessionController<R = SmallRng> {
    catalog: Catalog,
    domain: PitchDomain,
    filter: FilterState,
    /// Unset until the first apply
    pool: Option<ActivePool>,
    memory: SelectionMemory,
    gate: TriggerGate,
    selector: Selector,
    weighting: Weighting,
    presets: Vec<Preset>,
    selections: u64,
    rng: R,
}

impl SessionController<SmallRng> {
    /// Start a session over `catalog`, seeded from system entropy.
    pub fn initialize(catalog: Catalog, settings: &DrillSettings) -> Result<Self, DrillError> {
        Self::with_rng(catalog, settings, SmallRng::from_entropy())
    }
}

impl<R: Rng> SessionController<R> {
    /// Start a session with an explicit random source.
    ///
    /// Range controls default to the whole domain. An empty catalog is
    /// `EmptyCatalog`: there is nothing to drill.
    pub fn with_rng(catalog: Catalog, settings: &DrillSettings, rng: R) -> Result<Self, DrillError> {
        let domain = catalog.domain();
        let range = domain.full_range().ok_or(DrillError::EmptyCatalog)?;

        debug!(
            "Session: {} entries, range {}..{}",
            catalog.len(),
            range.low(),
            range.high()
        );

        Ok(Self {
            catalog,
            domain,
            filter: FilterState {
                range,
                naturals_only: false,
            },
            pool: None,
            memory: SelectionMemory::new(),
            gate: TriggerGate::new(settings.debounce_ms),
            selector: Selector::new(settings.max_attempts),
            weighting: settings.weighting,
            presets: settings.presets.clone(),
            selections: 0,
            rng,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Values for the range controls
    pub fn domain(&self) -> &PitchDomain {
        &self.domain
    }

    /// Current low/high control values
    pub fn controls(&self) -> RangeSelection {
        self.filter.range
    }

    pub fn naturals_only(&self) -> bool {
        self.filter.naturals_only
    }

    /// True once a range or preset has been applied
    pub fn is_started(&self) -> bool {
        self.pool.is_some()
    }

    pub fn pool(&self) -> Option<&ActivePool> {
        self.pool.as_ref()
    }

    pub fn last_shown(&self) -> Option<&PitchEntry> {
        self.memory.last()
    }

    /// Number of selections made so far
    pub fn selection_count(&self) -> u64 {
        self.selections
    }

    /// Apply a range from the controls, then show one note.
    ///
    /// Bounds are snapped into the domain and swapped if reversed. Returns `None`
    /// when the filtered pool is empty.
    pub fn apply_range(&mut self, low: u8, high: u8) -> Option<Selection> {
        let range = self.domain.snap_range(low, high)?;
        if (range.low(), range.high()) != (low.min(high), low.max(high)) {
            debug!(
                "Range {}..{} snapped to {}..{}",
                low,
                high,
                range.low(),
                range.high()
            );
        }

        self.filter.range = range;
        let pool = filter(&self.catalog, &self.filter);
        if pool.is_empty() {
            info!(
                "No notes in {}..{} (naturals only: {})",
                range.low(),
                range.high(),
                self.filter.naturals_only
            );
        }
        self.pool = Some(pool);
        self.select()
    }

    /// Flip the naturals-only filter. A started session is re-filtered and shows a
    /// new note; before start only the flag changes.
    pub fn toggle_naturals_only(&mut self) -> Option<Selection> {
        self.filter.naturals_only = !self.filter.naturals_only;
        if !self.is_started() {
            return None;
        }
        let range = self.filter.range;
        self.apply_range(range.low(), range.high())
    }

    /// Apply a range given as note names, e.g. `("C4", "G5")`.
    pub fn apply_preset(
        &mut self,
        low_name: &str,
        high_name: &str,
    ) -> Result<Option<Selection>, DrillError> {
        let low = parse_note_name(low_name)?.pitch_number();
        let high = parse_note_name(high_name)?.pitch_number();
        Ok(self.apply_range(low, high))
    }

    /// Apply one of the configured presets by name.
    pub fn apply_named_preset(&mut self, name: &str) -> Result<Option<Selection>, DrillError> {
        let (low, high) = find_preset(&self.presets, name)
            .map(|p| (p.low.pitch_number(), p.high.pitch_number()))
            .ok_or_else(|| DrillError::UnknownPreset(name.to_string()))?;
        Ok(self.apply_range(low, high))
    }

    /// A key press at `now_ms`.
    ///
    /// Ignored until the session has started, and coalesced by the trigger gate.
    pub fn trigger(&mut self, now_ms: u64) -> Option<Selection> {
        self.trigger_from(TriggerSource::Key, now_ms)
    }

    /// A trigger from a specific input. The click a browser sends after a touch is
    /// consumed, so one tap gives one note.
    pub fn trigger_from(&mut self, source: TriggerSource, now_ms: u64) -> Option<Selection> {
        if !self.is_started() {
            return None;
        }
        if !self.gate.try_accept_from(source, now_ms) {
            return None;
        }
        self.select()
    }

    fn select(&mut self) -> Option<Selection> {
        let pool = self.pool.as_ref()?;
        let weighting = self.weighting.for_pool(pool);
        let weight_of = |entry: &PitchEntry| weighting.weight_of(entry);

        let selection = self
            .selector
            .next(pool, &mut self.memory, Some(&weight_of), &mut self.rng)?;
        self.selections += 1;
        Some(selection)
    }
}
