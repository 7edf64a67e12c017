//! DOM-backed display surface

use log::warn;
use notedrill::DisplaySurface;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

pub struct WebDisplay {
    image: HtmlImageElement,
    hud: Option<HtmlElement>,
    controls: Vec<Element>,
}

impl WebDisplay {
    /// Look up the note image, the HUD and the controls to disable on failure.
    /// Missing controls are skipped; a missing image is an error.
    pub fn from_ids(image_id: &str, hud_id: &str, control_ids: &[String]) -> Result<Self, JsValue> {
        let document = document()?;

        let image = document
            .get_element_by_id(image_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", image_id)))?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not an <img>", image_id)))?;

        let hud = document
            .get_element_by_id(hud_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let controls = control_ids
            .iter()
            .filter_map(|id| {
                let el = document.get_element_by_id(id);
                if el.is_none() {
                    warn!("Control '{}' not found", id);
                }
                el
            })
            .collect();

        Ok(Self {
            image,
            hud,
            controls,
        })
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))
}

impl DisplaySurface for WebDisplay {
    fn show_image(&mut self, locator: &str) {
        let preload = match HtmlImageElement::new() {
            Ok(img) => img,
            Err(e) => {
                warn!("Could not create preload image: {:?}", e);
                return;
            }
        };

        // Commit on load. Earlier loads that finish later overwrite later ones.
        let target = self.image.clone();
        let src = locator.to_string();
        let commit = Closure::once_into_js(move || target.set_src(&src));
        preload.set_onload(Some(commit.unchecked_ref()));
        preload.set_src(locator);
    }

    fn show_status(&mut self, text: &str) {
        let Some(hud) = &self.hud else {
            return;
        };
        hud.set_text_content(Some(text));
        if let Err(e) = hud.style().set_property("display", "block") {
            warn!("Could not show HUD: {:?}", e);
        }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        for control in &self.controls {
            let result = if enabled {
                control.remove_attribute("disabled")
            } else {
                control.set_attribute("disabled", "")
            };
            if let Err(e) = result {
                warn!("Could not toggle control {}: {:?}", control.id(), e);
            }
        }
    }
}
