//! # Error Types
//!
//! All failures in the drill are values of [`DrillError`]. None of them are fatal:
//! the drill degrades to a disabled-but-visible state instead of panicking.
//!
//! ## Error Types
//! - `ManifestUnavailable` - the filename list could not be fetched or is not a JSON array
//! - `EmptyCatalog` - the manifest parsed but no filename describes a note
//! - `UnparseableName` - a filename or note name does not match the note grammar
//! - `UnknownPreset` - a preset name is not configured
//! - `Config` - drill settings could not be read
//!
//! ## Usage
//! ```rust
//! use notedrill::{load_catalog, DrillError};
//!
//! match load_catalog("[\"readme.txt\"]", "png") {
//!     Ok(catalog) => println!("{} notes", catalog.len()),
//!     Err(DrillError::EmptyCatalog) => eprintln!("No images found."),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

use crate::config::DrillSettings;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrillError {
    /// The manifest could not be retrieved or is not a list of filenames.
    ///
    /// # Example
    /// ```
    /// # use notedrill::DrillError;
    /// let err = DrillError::ManifestUnavailable {
    ///     reason: "expected a JSON array".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Manifest unavailable: expected a JSON array");
    /// ```
    #[error("Manifest unavailable: {reason}")]
    ManifestUnavailable { reason: String },

    /// The manifest was readable but yielded zero usable note entries.
    #[error("No usable note images in manifest")]
    EmptyCatalog,

    /// A filename or note name that does not match the note grammar.
    ///
    /// # Example
    /// ```
    /// # use notedrill::DrillError;
    /// let err = DrillError::UnparseableName("H4.png".to_string());
    /// assert_eq!(err.to_string(), "Not a note name: H4.png");
    /// ```
    #[error("Not a note name: {0}")]
    UnparseableName(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Invalid drill settings.
    ///
    /// # Example
    /// ```
    /// # use notedrill::DrillError;
    /// let err = DrillError::Config("max-attempts must be at least 1".to_string());
    /// assert_eq!(err.to_string(), "Invalid settings: max-attempts must be at least 1");
    /// ```
    #[error("Invalid settings: {0}")]
    Config(String),
}

impl DrillError {
    /// The fixed text shown on the HUD when this error disables the drill.
    pub fn status_message(&self, settings: &DrillSettings) -> String {
        match self {
            DrillError::ManifestUnavailable { .. } => {
                format!("Failed to load {}", settings.manifest)
            }
            DrillError::EmptyCatalog => "No images found.".to_string(),
            other => other.to_string(),
        }
    }

    /// Short machine-readable name, used by the browser binding.
    pub fn kind(&self) -> &'static str {
        match self {
            DrillError::ManifestUnavailable { .. } => "manifest-unavailable",
            DrillError::EmptyCatalog => "empty-catalog",
            DrillError::UnparseableName(_) => "unparseable-name",
            DrillError::UnknownPreset(_) => "unknown-preset",
            DrillError::Config(_) => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        let settings = DrillSettings::default();
        let unavailable = DrillError::ManifestUnavailable {
            reason: "network".to_string(),
        };
        assert_eq!(
            unavailable.status_message(&settings),
            "Failed to load image_list.json"
        );
        assert_eq!(
            DrillError::EmptyCatalog.status_message(&settings),
            "No images found."
        );
        assert_ne!(
            unavailable.status_message(&settings),
            DrillError::EmptyCatalog.status_message(&settings)
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(DrillError::EmptyCatalog.kind(), "empty-catalog");
        assert_eq!(
            DrillError::UnknownPreset("x".to_string()).kind(),
            "unknown-preset"
        );
    }
}
