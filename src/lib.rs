//! Click-to-reveal viewer for hCard-style "card" elements.
//!
//! `attach` binds trigger elements; a click dims the page and shows the cards
//! found from the clicked element one at a time, with previous/next links
//! when there is more than one.
//!
//! ```js
//! import init, { attach } from "./card_reveal.js";
//! await init();
//! attach(".vCards", { card: { nextCardTitle: "Forward" } });
//! ```

mod animate;
mod dom;
mod error;
mod registry;
mod revealer;
mod stage;

pub use card_reveal_core::{Phase, ResolvedSettings, SettingValue, Settings, SettingsOverrides};
pub use error::RevealError;

use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Binds every element matching `selector`. `options` is an optional
/// `{ overlay: {...}, card: {...} }` object. Returns the number of elements
/// bound.
#[wasm_bindgen]
pub fn attach(selector: &str, options: JsValue) -> Result<u32, JsValue> {
    let overrides = overrides_from_js(&options)?;
    let document = dom::document()?;
    let elements = dom::query_all(&document, selector)?;
    let count = elements.len() as u32;
    attach_elements(elements, &overrides)?;
    Ok(count)
}

/// Detaches every revealer and removes its overlay, viewer and stylesheet.
#[wasm_bindgen]
pub fn reset() {
    registry::clear();
}

/// Whether the viewer with `viewer_id` is in a session.
#[wasm_bindgen(js_name = isOpen)]
pub fn is_open(viewer_id: &str) -> bool {
    phase(viewer_id).is_some_and(|phase| phase != Phase::Hidden)
}

pub fn attach_elements(elements: Vec<Element>, overrides: &SettingsOverrides) -> Result<(), RevealError> {
    let settings = ResolvedSettings::from_overrides(overrides)?;
    registry::install(settings, elements)
}

pub fn overrides_from_js(options: &JsValue) -> Result<SettingsOverrides, RevealError> {
    if options.is_undefined() || options.is_null() {
        return Ok(SettingsOverrides::default());
    }
    let raw = js_sys::JSON::stringify(options)?;
    let raw = raw.as_string().unwrap_or_default();
    Ok(SettingsOverrides::from_json(&raw)?)
}

pub fn phase(viewer_id: &str) -> Option<Phase> {
    registry::with_revealer(viewer_id, |revealer| revealer.phase())
}

pub fn current_index(viewer_id: &str) -> Option<usize> {
    registry::with_revealer(viewer_id, |revealer| revealer.current_index()).flatten()
}

pub fn attached_count() -> usize {
    registry::count()
}
