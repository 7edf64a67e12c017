pub mod catalog;
pub mod config;
pub mod display;
pub mod drill;
pub mod error;
pub mod filter;
pub mod locator;
pub mod manifest;
pub mod pitch;
pub mod selector;
pub mod session;

pub use catalog::{Catalog, DomainOption, PitchDomain};
pub use config::{DrillSettings, Preset};
pub use display::DisplaySurface;
pub use drill::{Drill, DrillState};
pub use error::*;
pub use filter::{filter, ActivePool, FilterState, RangeSelection};
pub use manifest::{load_catalog, parse_manifest};
pub use pitch::{parse_filename, parse_note_name, Accidental, Letter, PitchEntry, Spelling};
pub use selector::{Selection, SelectionMemory, Selector, Weighting};
pub use session::{SessionController, TriggerGate, TriggerSource};
