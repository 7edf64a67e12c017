//! WebAssembly bindings for the note drill.
//!
//! # Usage
//!
//! ```bash
//! wasm-pack build --target web
//! ```
//!
//! ```javascript
//! import init, { notedrill_init, NoteDrill } from './notedrill_wasm.js';
//!
//! await init();
//! notedrill_init();
//!
//! const drill = new NoteDrill("note", "hud", ["startBtn", "beginnerBtn", "proBtn", "naturalsBtn"]);
//! fetch("image_list.json", { cache: "no-store" })
//!   .then(r => r.text())
//!   .then(text => drill.load_manifest(text))
//!   .catch(e => drill.manifest_failed(String(e)));
//! ```

mod display;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use notedrill::{Drill, DrillError, DrillSettings, TriggerSource};

pub use display::WebDisplay;

#[derive(Serialize)]
struct JsDrillError {
    message: String,
    kind: &'static str,
}

fn to_js_error(e: DrillError) -> JsValue {
    let error = JsDrillError {
        message: e.to_string(),
        kind: e.kind(),
    };
    match serde_json::to_string(&error) {
        Ok(json) => JsValue::from_str(&json),
        Err(_) => JsValue::from_str(&error.message),
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::UNDEFINED)
}

/// Route `log` output to the browser console and panics to `console.error`.
/// Call once before constructing a drill.
#[wasm_bindgen]
pub fn notedrill_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// One drill bound to page elements
#[wasm_bindgen]
pub struct NoteDrill {
    drill: Drill<WebDisplay>,
}

#[wasm_bindgen]
impl NoteDrill {
    /// `settings_yaml` overrides the defaults (directory, presets, weights, debounce).
    #[wasm_bindgen(constructor)]
    pub fn new(
        image_id: &str,
        hud_id: &str,
        control_ids: Vec<String>,
        settings_yaml: Option<String>,
    ) -> Result<NoteDrill, JsValue> {
        let settings = match settings_yaml {
            Some(yaml) => DrillSettings::from_yaml(&yaml).map_err(to_js_error)?,
            None => DrillSettings::default(),
        };
        let display = WebDisplay::from_ids(image_id, hud_id, &control_ids)?;
        Ok(NoteDrill {
            drill: Drill::new(settings, display),
        })
    }

    /// Feed the fetched manifest text. On failure the drill disables itself and the
    /// error is returned as a JSON `{ message, kind }` string.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), JsValue> {
        self.drill.load_manifest(json).map_err(to_js_error)
    }

    /// Report that the manifest could not be fetched.
    pub fn manifest_failed(&mut self, reason: &str) {
        self.drill.manifest_failed(reason);
    }

    pub fn is_enabled(&self) -> bool {
        self.drill.is_enabled()
    }

    pub fn is_started(&self) -> bool {
        self.drill.session().is_some_and(|s| s.is_started())
    }

    pub fn naturals_only(&self) -> bool {
        self.drill.session().is_some_and(|s| s.naturals_only())
    }

    /// Range control choices as JSON: `[{ "pitchNumber": 60, "label": "C4" }, ...]`
    pub fn range_options(&self) -> String {
        serde_json::to_string(self.drill.range_options()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Current `{ low, high }` control values, or undefined before load
    pub fn controls(&self) -> JsValue {
        to_js(&self.drill.controls())
    }

    pub fn apply_range(&mut self, low: u8, high: u8) -> JsValue {
        to_js(&self.drill.apply_range(low, high))
    }

    pub fn apply_preset(&mut self, name: &str) -> Result<JsValue, JsValue> {
        self.drill
            .apply_preset(name)
            .map(|entry| to_js(&entry))
            .map_err(to_js_error)
    }

    pub fn toggle_naturals_only(&mut self) -> JsValue {
        to_js(&self.drill.toggle_naturals_only())
    }

    /// Space press. Coalesced against the debounce interval.
    pub fn trigger(&mut self) -> JsValue {
        self.trigger_from(TriggerSource::Key)
    }

    pub fn trigger_touch(&mut self) -> JsValue {
        self.trigger_from(TriggerSource::Touch)
    }

    /// A click. The one that follows a handled touch is swallowed.
    pub fn trigger_click(&mut self) -> JsValue {
        self.trigger_from(TriggerSource::Click)
    }
}

impl NoteDrill {
    fn trigger_from(&mut self, source: TriggerSource) -> JsValue {
        let now_ms = js_sys::Date::now() as u64;
        to_js(&self.drill.trigger_from(source, now_ms))
    }
}
