//! # Session Module
//!
//! Orchestrates one drill: range controls, the naturals-only toggle, presets and
//! trigger events.
//!
//! ## Sub-modules
//! - `controller` - [`SessionController`], the owned session state and its operations
//! - `gate` - [`TriggerGate`], coalescing of rapid-fire triggers and touch-then-click pairs
//!
//! ## Lifecycle
//! 1. [`SessionController::initialize`] with a non-empty catalog. Range controls
//!    default to the full domain; no pool exists yet.
//! 2. The first `apply_range` / `apply_preset` builds the pool and shows a note.
//!    Until then `trigger` does nothing, so the startup placeholder stays up.
//! 3. Each accepted `trigger` shows another note from the pool.
//!
//! ## Example
//! ```rust
//! use notedrill::{Catalog, DrillSettings, SessionController};
//!
//! let catalog = Catalog::build(["C4.png", "D4.png", "E4.png", "Fs4.png"]);
//! let mut session = SessionController::initialize(catalog, &DrillSettings::default()).unwrap();
//!
//! assert!(session.trigger(0).is_none()); // not started yet
//!
//! let first = session.apply_preset("C4", "E4").unwrap().unwrap();
//! assert!(first.entry().pitch_number <= 64);
//!
//! assert!(session.trigger(1_000).is_some());
//! assert!(session.trigger(1_100).is_none()); // inside the 300 ms window
//! ```

mod controller;
mod gate;


pub use controller::SessionController;
pub use gate::{TriggerGate, TriggerSource};
