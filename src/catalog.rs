//! Catalog building
//!
//! A [`Catalog`] is the sorted set of note entries parsed from the manifest. It is built
//! once and never mutated; a new manifest means a new catalog.

use log::debug;
use serde::Serialize;

use crate::pitch::{parse_filename, PitchEntry};

/// Extension used when none is configured
pub const DEFAULT_EXTENSION: &str = "png";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<PitchEntry>,
}

impl Catalog {
    /// Build from `.png` filenames. Names that are not notes are dropped.
    pub fn build<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build_with_extension(filenames, DEFAULT_EXTENSION)
    }

    pub fn build_with_extension<I, S>(filenames: I, extension: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<PitchEntry> = filenames
            .into_iter()
            .filter_map(|name| match parse_filename(name.as_ref(), extension) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping manifest entry: {}", e);
                    None
                }
            })
            .collect();

        // sort_by_key is stable, so ties keep manifest order
        entries.sort_by_key(|e| e.pitch_number);

        Self { entries }
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

    /// Unique pitch numbers present, ascending
    pub fn distinct_pitch_numbers(&self) -> Vec<u8> {
        let mut numbers: Vec<u8> = self.entries.iter().map(|e| e.pitch_number).collect();
        numbers.dedup();
        numbers
    }

    /// The selectable pitch domain, one label per pitch number
    pub fn domain(&self) -> PitchDomain {
        let mut options: Vec<DomainOption> = Vec::new();
        for entry in &self.entries {
            if options.last().map(|o| o.pitch_number) != Some(entry.pitch_number) {
                options.push(DomainOption {
                    pitch_number: entry.pitch_number,
                    label: entry.label.clone(),
                });
            }
        }
        PitchDomain { options }
    }
}

/// One choice in a range control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainOption {
    pub pitch_number: u8,
    pub label: String,
}

/// Distinct pitch numbers of a catalog, ascending, with the first-seen label for each.
///
/// Range controls are populated from this, and range snapping works against it
/// (see `filter`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PitchDomain {
    pub(crate) options: Vec<DomainOption>,
}

impl PitchDomain {
    pub fn options(&self) -> &[DomainOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn min(&self) -> Option<u8> {
        self.options.first().map(|o| o.pitch_number)
    }

    pub fn max(&self) -> Option<u8> {
        self.options.last().map(|o| o.pitch_number)
    }
}
