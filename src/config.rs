//! # Drill Settings
//!
//! Tuning constants and presets, read from an optional YAML document. Every key is
//! optional; missing keys take the defaults below.
//!
//! ```yaml
//! notes-dir: notes/
//! manifest: image_list.json
//! extension: png
//! startup-image: startup.png
//! debounce-ms: 300
//! max-attempts: 5
//! weighted: true
//! natural-weight: 1.2
//! accidental-weight: 1.0
//! show-filename: false
//! presets:
//!   - name: beginner
//!     low: C4
//!     high: G5
//!   - name: pro
//!     low: F#3
//!     high: C6
//! ```

use serde::Deserialize;

use crate::catalog::DEFAULT_EXTENSION;
use crate::error::DrillError;
use crate::pitch::{parse_note_name, Accidental, Letter, Spelling};
use crate::selector::{
    Weighting, DEFAULT_ACCIDENTAL_WEIGHT, DEFAULT_MAX_ATTEMPTS, DEFAULT_NATURAL_WEIGHT,
};

pub const DEFAULT_NOTES_DIR: &str = "notes/";
pub const DEFAULT_MANIFEST: &str = "image_list.json";
pub const DEFAULT_STARTUP_IMAGE: &str = "startup.png";
/// Minimum gap between accepted triggers
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Raw settings for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSettings {
    pub notes_dir: Option<String>,
    pub manifest: Option<String>,
    pub extension: Option<String>,
    pub startup_image: Option<String>,
    pub debounce_ms: Option<u64>,
    pub max_attempts: Option<usize>,
    pub weighted: Option<bool>,
    pub natural_weight: Option<f64>,
    pub accidental_weight: Option<f64>,
    pub show_filename: Option<bool>,
    pub presets: Option<Vec<RawPreset>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RawPreset {
    pub name: String,
    pub low: String,
    pub high: String,
}

/// A named range, e.g. beginner = C4..G5
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub low: Spelling,
    pub high: Spelling,
}

impl Preset {
    pub fn new(name: &str, low: &str, high: &str) -> Result<Self, DrillError> {
        Ok(Self {
            name: name.to_string(),
            low: parse_note_name(low)?,
            high: parse_note_name(high)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrillSettings {
    pub notes_dir: String,
    pub manifest: String,
    pub extension: String,
    pub startup_image: String,
    pub debounce_ms: u64,
    pub max_attempts: usize,
    pub weighting: Weighting,
    /// Show the current filename on the HUD
    pub show_filename: bool,
    pub presets: Vec<Preset>,
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            notes_dir: DEFAULT_NOTES_DIR.to_string(),
            manifest: DEFAULT_MANIFEST.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            startup_image: DEFAULT_STARTUP_IMAGE.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            weighting: Weighting::default(),
            show_filename: false,
            presets: default_presets(),
        }
    }
}

fn default_presets() -> Vec<Preset> {
    let spelled = |letter, accidental, octave| Spelling {
        letter,
        accidental,
        octave,
    };

    vec![
        Preset {
            name: "beginner".to_string(),
            low: spelled(Letter::C, Accidental::Natural, 4),
            high: spelled(Letter::G, Accidental::Natural, 5),
        },
        Preset {
            name: "pro".to_string(),
            low: spelled(Letter::F, Accidental::Sharp, 3),
            high: spelled(Letter::C, Accidental::Natural, 6),
        },
    ]
}

impl DrillSettings {
    /// Parse settings from YAML. An empty document gives the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, DrillError> {
        let raw: RawSettings = if content.trim().is_empty() {
            RawSettings::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| DrillError::Config(e.to_string()))?
        };
        Self::from_raw(raw)
    }

    pub fn from_raw(raw: RawSettings) -> Result<Self, DrillError> {
        let defaults = Self::default();

        let max_attempts = raw.max_attempts.unwrap_or(defaults.max_attempts);
        if max_attempts == 0 {
            return Err(DrillError::Config(
                "max-attempts must be at least 1".to_string(),
            ));
        }

        let natural = positive_weight("natural-weight", raw.natural_weight, DEFAULT_NATURAL_WEIGHT)?;
        let accidental = positive_weight(
            "accidental-weight",
            raw.accidental_weight,
            DEFAULT_ACCIDENTAL_WEIGHT,
        )?;
        let weighting = if raw.weighted.unwrap_or(true) {
            Weighting::NaturalBias {
                natural,
                accidental,
            }
        } else {
            Weighting::Uniform
        };

        let extension = raw
            .extension
            .map(|ext| ext.trim_start_matches('.').to_string())
            .unwrap_or(defaults.extension);
        if extension.is_empty() {
            return Err(DrillError::Config("extension must not be empty".to_string()));
        }

        let notes_dir = match raw.notes_dir {
            Some(dir) if !dir.is_empty() && !dir.ends_with('/') => format!("{}/", dir),
            Some(dir) => dir,
            None => defaults.notes_dir,
        };

        let presets = match raw.presets {
            Some(raw_presets) => raw_presets
                .iter()
                .map(|p| {
                    Preset::new(&p.name, &p.low, &p.high).map_err(|e| {
                        DrillError::Config(format!("preset '{}': {}", p.name, e))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => defaults.presets,
        };

        Ok(Self {
            notes_dir,
            manifest: raw.manifest.unwrap_or(defaults.manifest),
            extension,
            startup_image: raw.startup_image.unwrap_or(defaults.startup_image),
            debounce_ms: raw.debounce_ms.unwrap_or(defaults.debounce_ms),
            max_attempts,
            weighting,
            show_filename: raw.show_filename.unwrap_or(defaults.show_filename),
            presets,
        })
    }

    pub fn preset(&self, name: &str) -> Option<&Preset> {
        find_preset(&self.presets, name)
    }
}

/// Case-insensitive lookup by preset name.
pub fn find_preset<'a>(presets: &'a [Preset], name: &str) -> Option<&'a Preset> {
    let name = name.trim();
    presets.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

fn positive_weight(key: &str, value: Option<f64>, default: f64) -> Result<f64, DrillError> {
    match value {
        None => Ok(default),
        Some(w) if w.is_finite() && w > 0.0 => Ok(w),
        Some(w) => Err(DrillError::Config(format!(
            "{} must be a positive number, got {}",
            key, w
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::note_locator;

    #[test]
    fn test_defaults() {
        let settings = DrillSettings::from_yaml("").unwrap();
        assert_eq!(settings, DrillSettings::default());
        assert_eq!(settings.debounce_ms, 300);
        assert_eq!(settings.max_attempts, 5);
        assert_eq!(
            settings.weighting,
            Weighting::NaturalBias {
                natural: 1.2,
                accidental: 1.0
            }
        );

        let beginner = settings.preset("beginner").unwrap();
        assert_eq!(beginner.low.pitch_number(), 60);
        assert_eq!(beginner.high.pitch_number(), 79);
        let pro = settings.preset("Pro").unwrap();
        assert_eq!(pro.low.pitch_number(), 54);
        assert_eq!(pro.high.pitch_number(), 84);
    }

    #[test]
    fn test_overrides() {
        let yaml = r#"
notes-dir: img/notes/
extension: .svg
debounce-ms: 150
max-attempts: 3
weighted: false
show-filename: true
presets:
  - name: bass
    low: E2
    high: C4
"#;
        let settings = DrillSettings::from_yaml(yaml).unwrap();
        assert_eq!(settings.notes_dir, "img/notes/");
        assert_eq!(settings.extension, "svg");
        assert_eq!(settings.debounce_ms, 150);
        assert_eq!(settings.max_attempts, 3);
        assert_eq!(settings.weighting, Weighting::Uniform);
        assert!(settings.show_filename);
        assert_eq!(settings.presets.len(), 1);
        assert_eq!(settings.preset("bass").unwrap().low.pitch_number(), 40);
        assert!(settings.preset("beginner").is_none());
    }

    #[test]
    fn test_notes_dir_gets_trailing_slash() {
        let settings = DrillSettings::from_yaml("notes-dir: img/notes").unwrap();
        assert_eq!(settings.notes_dir, "img/notes/");
        assert_eq!(
            note_locator(&settings.notes_dir, "C4.png"),
            "img/notes/C4.png"
        );

        // empty means next to the page
        let settings = DrillSettings::from_yaml("notes-dir: ''").unwrap();
        assert_eq!(settings.notes_dir, "");
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            DrillSettings::from_yaml("max-attempts: 0"),
            Err(DrillError::Config(_))
        ));
        assert!(matches!(
            DrillSettings::from_yaml("natural-weight: -1.0"),
            Err(DrillError::Config(_))
        ));
        assert!(matches!(
            DrillSettings::from_yaml("presets:\n  - name: x\n    low: H2\n    high: C4\n"),
            Err(DrillError::Config(_))
        ));
        assert!(matches!(
            DrillSettings::from_yaml("tempo: 120"),
            Err(DrillError::Config(_))
        ));
    }
}
