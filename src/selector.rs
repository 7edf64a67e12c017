//! Weighted random selection with anti-repetition
//!
//! The selector draws from an [`ActivePool`] using cumulative-weight sampling and tries
//! not to repeat the previously shown entry. It retries a bounded number of times and
//! then accepts whatever the last draw produced, so it never stalls on a skewed pool.
//!
//! ```
//! use notedrill::{ActivePool, Catalog, Selection, SelectionMemory, Selector};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let catalog = Catalog::build(["C4.png", "D4.png", "E4.png"]);
//! let pool = ActivePool::from_entries(catalog.entries().to_vec());
//! let mut memory = SelectionMemory::new();
//! let mut rng = SmallRng::seed_from_u64(7);
//!
//! let first = Selector::default().next(&pool, &mut memory, None, &mut rng).unwrap();
//! assert_eq!(memory.last(), Some(first.entry()));
//! ```

use log::debug;
use rand::Rng;

use crate::filter::ActivePool;
use crate::pitch::PitchEntry;

/// Draws per selection before a repeat is accepted
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;
pub const DEFAULT_NATURAL_WEIGHT: f64 = 1.2;
pub const DEFAULT_ACCIDENTAL_WEIGHT: f64 = 1.0;

/// Per-entry weighting policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Weighting {
    /// Every entry weighs 1
    Uniform,
    /// Naturals and accidentals weigh differently
    NaturalBias { natural: f64, accidental: f64 },
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting::NaturalBias {
            natural: DEFAULT_NATURAL_WEIGHT,
            accidental: DEFAULT_ACCIDENTAL_WEIGHT,
        }
    }
}

impl Weighting {
    pub fn weight_of(&self, entry: &PitchEntry) -> f64 {
        match *self {
            Weighting::Uniform => 1.0,
            Weighting::NaturalBias {
                natural,
                accidental,
            } => {
                if entry.accidental.is_natural() {
                    natural
                } else {
                    accidental
                }
            }
        }
    }

    /// The bias only matters when the pool mixes naturals and accidentals.
    pub fn for_pool(&self, pool: &ActivePool) -> Weighting {
        if pool.is_naturals_only() {
            Weighting::Uniform
        } else {
            *self
        }
    }
}

/// The most recently shown entry
#[derive(Debug, Clone, Default)]
pub struct SelectionMemory {
    last: Option<PitchEntry>,
}

impl SelectionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&PitchEntry> {
        self.last.as_ref()
    }

    pub fn remember(&mut self, entry: PitchEntry) {
        self.last = Some(entry);
    }

    /// Entries are the same image when their filenames match.
    pub fn is_last(&self, entry: &PitchEntry) -> bool {
        self.last
            .as_ref()
            .is_some_and(|last| last.source_id == entry.source_id)
    }
}

/// Outcome of one selection
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Differs from the previous entry
    Fresh(PitchEntry),
    /// The pool has a single entry, repetition is unavoidable
    Sole(PitchEntry),
    /// Every attempt hit the previous entry; the last draw was accepted
    Repeated(PitchEntry),
}

impl Selection {
    pub fn entry(&self) -> &PitchEntry {
        match self {
            Selection::Fresh(e) | Selection::Sole(e) | Selection::Repeated(e) => e,
        }
    }

    pub fn into_entry(self) -> PitchEntry {
        match self {
            Selection::Fresh(e) | Selection::Sole(e) | Selection::Repeated(e) => e,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    max_attempts: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Selector {
    /// `max_attempts` below 1 is treated as 1.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Pick the next entry from `pool` and record it in `memory`.
    ///
    /// `weight_of` defaults to weight 1 for every entry. Returns `None` only for an
    /// empty pool, in which case `memory` is untouched.
    pub fn next<R: Rng + ?Sized>(
        &self,
        pool: &ActivePool,
        memory: &mut SelectionMemory,
        weight_of: Option<&dyn Fn(&PitchEntry) -> f64>,
        rng: &mut R,
    ) -> Option<Selection> {
        let entries = pool.entries();

        let selection = match entries {
            [] => return None,
            [only] => Selection::Sole(only.clone()),
            _ => {
                let weights: Vec<f64> = entries
                    .iter()
                    .map(|e| weight_of.map_or(1.0, |f| sanitize(f(e))))
                    .collect();
                let total: f64 = weights.iter().sum();

                let mut attempt = 1;
                loop {
                    let entry = &entries[draw(&weights, total, rng)];
                    if !memory.is_last(entry) {
                        break Selection::Fresh(entry.clone());
                    }
                    if attempt >= self.max_attempts {
                        debug!(
                            "Accepting repeat of {} after {} attempts",
                            entry.source_id, attempt
                        );
                        break Selection::Repeated(entry.clone());
                    }
                    attempt += 1;
                }
            }
        };

        memory.remember(selection.entry().clone());
        Some(selection)
    }
}

/// Non-positive and non-finite weights count as zero.
fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Index of the first entry whose running weight sum reaches a uniform draw in
/// `[0, total)`. Falls back to a uniform index when no entry carries weight.
fn draw<R: Rng + ?Sized>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    if !(total.is_finite() && total > 0.0) {
        return rng.gen_range(0..weights.len());
    }

    let r = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_weighted = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_weighted = i;
        if r <= cumulative {
            return i;
        }
    }
    // rounding left r above the final sum
    last_weighted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn pool(names: &[&str]) -> ActivePool {
        ActivePool::from_entries(Catalog::build(names.iter().copied()).entries().to_vec())
    }

    #[test]
    fn test_empty_pool() {
        let mut memory = SelectionMemory::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let result = Selector::default().next(&ActivePool::default(), &mut memory, None, &mut rng);
        assert!(result.is_none());
        assert!(memory.last().is_none());
    }

    #[test]
    fn test_single_entry_always_returned() {
        let pool = pool(&["A4.png"]);
        let mut memory = SelectionMemory::new();
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..20 {
            let selection = Selector::default()
                .next(&pool, &mut memory, None, &mut rng)
                .unwrap();
            assert!(matches!(selection, Selection::Sole(_)));
            assert_eq!(selection.entry().source_id, "A4.png");
        }
    }

    #[test]
    fn test_repeats_are_rare_with_constant_memory() {
        let pool = pool(&["C4.png", "D4.png"]);
        let held = pool.entries()[0].clone();
        let selector = Selector::default();
        let mut rng = SmallRng::seed_from_u64(3);

        let mut repeats = 0;
        for _ in 0..1000 {
            let mut memory = SelectionMemory::new();
            memory.remember(held.clone());
            let selection = selector.next(&pool, &mut memory, None, &mut rng).unwrap();
            if selection.entry().source_id == held.source_id {
                assert!(matches!(selection, Selection::Repeated(_)));
                repeats += 1;
            }
        }
        // Expected about 1000 / 2^5
        assert!(repeats > 0, "fallback never accepted a repeat");
        assert!(repeats < 150, "too many repeats: {}", repeats);
    }

    #[test]
    fn test_skewed_weights_do_not_stall() {
        let pool = pool(&["C4.png", "Cs4.png"]);
        let heavy = pool.entries()[0].clone();
        let weight = |e: &PitchEntry| if e.source_id == "C4.png" { 1e12 } else { 1e-12 };
        let mut rng = SmallRng::seed_from_u64(4);

        let mut memory = SelectionMemory::new();
        memory.remember(heavy);
        let selection = Selector::new(3)
            .next(&pool, &mut memory, Some(&weight), &mut rng)
            .unwrap();
        assert!(matches!(selection, Selection::Repeated(_)));
        assert_eq!(memory.last().unwrap().source_id, "C4.png");
    }

    #[test]
    fn test_natural_bias_shifts_distribution() {
        let pool = pool(&["C4.png", "Cs4.png"]);
        let weighting = Weighting::default();
        let weight = |e: &PitchEntry| weighting.weight_of(e);
        let selector = Selector::default();
        let mut rng = SmallRng::seed_from_u64(5);

        let mut naturals = 0;
        let draws = 20_000;
        for _ in 0..draws {
            let mut memory = SelectionMemory::new();
            let selection = selector
                .next(&pool, &mut memory, Some(&weight), &mut rng)
                .unwrap();
            if selection.entry().accidental.is_natural() {
                naturals += 1;
            }
        }
        // 1.2 / 2.2 is about 0.545
        let share = naturals as f64 / draws as f64;
        assert!(share > 0.52 && share < 0.57, "natural share {}", share);
    }

    #[test]
    fn test_zero_weights_never_chosen() {
        let pool = pool(&["C4.png", "D4.png", "E4.png"]);
        let weight = |e: &PitchEntry| if e.source_id == "D4.png" { 0.0 } else { 1.0 };
        let mut rng = SmallRng::seed_from_u64(6);
        for _ in 0..500 {
            let mut memory = SelectionMemory::new();
            let selection = Selector::default()
                .next(&pool, &mut memory, Some(&weight), &mut rng)
                .unwrap();
            assert_ne!(selection.entry().source_id, "D4.png");
        }
    }

    #[test]
    fn test_all_zero_weights_fall_back_to_uniform() {
        let pool = pool(&["C4.png", "D4.png"]);
        let weight = |_: &PitchEntry| f64::NAN;
        let mut rng = SmallRng::seed_from_u64(8);
        let mut memory = SelectionMemory::new();
        assert!(Selector::default()
            .next(&pool, &mut memory, Some(&weight), &mut rng)
            .is_some());
    }

    #[test]
    fn test_bias_ignored_for_naturals_only_pool() {
        let naturals = pool(&["C4.png", "D4.png"]);
        assert_eq!(Weighting::default().for_pool(&naturals), Weighting::Uniform);

        let mixed = pool(&["C4.png", "Db4.png"]);
        assert_eq!(Weighting::default().for_pool(&mixed), Weighting::default());
    }

    #[test]
    fn test_consecutive_selections_rarely_repeat() {
        let pool = pool(&["C4.png", "D4.png", "E4.png", "F4.png"]);
        let mut memory = SelectionMemory::new();
        let mut rng = SmallRng::seed_from_u64(9);
        let selector = Selector::default();

        let mut previous: Option<String> = None;
        let mut repeats = 0;
        for _ in 0..1000 {
            let selection = selector.next(&pool, &mut memory, None, &mut rng).unwrap();
            let id = selection.entry().source_id.clone();
            if previous.as_deref() == Some(id.as_str()) {
                repeats += 1;
            }
            previous = Some(id);
        }
        // (1/4)^5 per call
        assert!(repeats < 10, "repeats: {}", repeats);
    }
}
