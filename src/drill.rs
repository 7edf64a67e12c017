//! Drill front controller
//!
//! [`Drill`] ties the engine to a [`DisplaySurface`]: it shows the startup
//! placeholder, turns the manifest into a session (or a disabled state with an error
//! message), and publishes every selected note to the display.

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::catalog::DomainOption;
use crate::config::DrillSettings;
use crate::display::DisplaySurface;
use crate::error::DrillError;
use crate::filter::RangeSelection;
use crate::locator::{note_locator, startup_locator};
use crate::manifest::load_catalog;
use crate::pitch::PitchEntry;
use crate::selector::Selection;
use crate::session::{SessionController, TriggerSource};

/// Where the drill is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum DrillState {
    /// Waiting for the manifest
    Loading,
    Ready,
    /// The manifest failed or was empty; every operation is ignored
    Disabled(DrillError),
}

pub struct Drill<D: DisplaySurface, R = SmallRng> {
    settings: DrillSettings,
    display: D,
    state: DrillState,
    session: Option<SessionController<R>>,
}

impl<D: DisplaySurface> Drill<D, SmallRng> {
    /// Load the manifest with an entropy-seeded random source.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), DrillError> {
        self.load_manifest_with_rng(json, SmallRng::from_entropy())
    }
}

impl<D: DisplaySurface, R: Rng> Drill<D, R> {
    /// Create a drill and put the startup placeholder on screen.
    pub fn new(settings: DrillSettings, mut display: D) -> Self {
        display.show_image(&startup_locator(&settings.startup_image));
        Self {
            settings,
            display,
            state: DrillState::Loading,
            session: None,
        }
    }

    pub fn load_manifest_with_rng(&mut self, json: &str, rng: R) -> Result<(), DrillError> {
        let loaded = load_catalog(json, &self.settings.extension)
            .and_then(|catalog| SessionController::with_rng(catalog, &self.settings, rng));

        match loaded {
            Ok(session) => {
                info!(
                    "Drill ready: {} notes across {} pitches",
                    session.catalog().len(),
                    session.domain().options().len()
                );
                self.session = Some(session);
                self.state = DrillState::Ready;
                self.display.set_controls_enabled(true);
                Ok(())
            }
            Err(e) => {
                self.disable(e.clone());
                Err(e)
            }
        }
    }

    /// The manifest could not be fetched at all.
    pub fn manifest_failed(&mut self, reason: &str) {
        self.disable(DrillError::ManifestUnavailable {
            reason: reason.to_string(),
        });
    }

    fn disable(&mut self, error: DrillError) {
        warn!("Drill disabled: {}", error);
        self.session = None;
        self.display
            .show_status(&error.status_message(&self.settings));
        self.display.set_controls_enabled(false);
        self.state = DrillState::Disabled(error);
    }

    pub fn state(&self) -> &DrillState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == DrillState::Ready
    }

    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn session(&self) -> Option<&SessionController<R>> {
        self.session.as_ref()
    }

    /// Choices for the range controls; empty unless ready
    pub fn range_options(&self) -> &[DomainOption] {
        self.session
            .as_ref()
            .map(|s| s.domain().options())
            .unwrap_or(&[])
    }

    /// Current control values, after any preset snapping
    pub fn controls(&self) -> Option<RangeSelection> {
        self.session.as_ref().map(|s| s.controls())
    }

    pub fn apply_range(&mut self, low: u8, high: u8) -> Option<PitchEntry> {
        let selection = self.session.as_mut()?.apply_range(low, high);
        self.publish(selection)
    }

    pub fn toggle_naturals_only(&mut self) -> Option<PitchEntry> {
        let selection = self.session.as_mut()?.toggle_naturals_only();
        self.publish(selection)
    }

    /// Apply a configured preset by name, e.g. "beginner".
    pub fn apply_preset(&mut self, name: &str) -> Result<Option<PitchEntry>, DrillError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let selection = session.apply_named_preset(name)?;
        Ok(self.publish(selection))
    }

    pub fn trigger(&mut self, now_ms: u64) -> Option<PitchEntry> {
        self.trigger_from(TriggerSource::Key, now_ms)
    }

    pub fn trigger_from(&mut self, source: TriggerSource, now_ms: u64) -> Option<PitchEntry> {
        let selection = self.session.as_mut()?.trigger_from(source, now_ms);
        self.publish(selection)
    }

    fn publish(&mut self, selection: Option<Selection>) -> Option<PitchEntry> {
        let entry = selection?.into_entry();
        self.display
            .show_image(&note_locator(&self.settings.notes_dir, &entry.source_id));
        if self.settings.show_filename {
            self.display.show_status(&entry.source_id);
        }
        Some(entry)
    }
}
