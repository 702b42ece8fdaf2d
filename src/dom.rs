use card_reveal_core::{has_class, CardTree, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCollection, HtmlElement, Window};

use crate::error::RevealError;

pub(crate) fn window() -> Result<Window, RevealError> {
    web_sys::window().ok_or(RevealError::MissingGlobal("window"))
}

pub(crate) fn document() -> Result<Document, RevealError> {
    window()?
        .document()
        .ok_or(RevealError::MissingGlobal("document"))
}

/// Visible size of the page plus its scroll offset.
pub(crate) fn viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::default();
    };
    let root = window.document().and_then(|doc| doc.document_element());
    let width = root
        .as_ref()
        .map(|el| el.client_width() as f64)
        .filter(|w| *w > 0.0)
        .or_else(|| window.inner_width().ok().and_then(|v| v.as_f64()))
        .unwrap_or(0.0);
    let height = root
        .as_ref()
        .map(|el| el.client_height() as f64)
        .filter(|h| *h > 0.0)
        .or_else(|| window.inner_height().ok().and_then(|v| v.as_f64()))
        .unwrap_or(0.0);
    let scroll_x = window.scroll_x().unwrap_or(0.0);
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    Viewport::new(width, height, scroll_x, scroll_y)
}

pub(crate) fn set_css<K, V>(element: &HtmlElement, properties: &[(K, V)])
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let style = element.style();
    for (property, value) in properties {
        let _ = style.set_property(property.as_ref(), value.as_ref());
    }
}

pub(crate) fn hide(element: &HtmlElement) {
    let _ = element.style().set_property("display", "none");
}

pub(crate) fn show(element: &HtmlElement) {
    let _ = element.style().remove_property("display");
}

pub(crate) fn is_hidden(element: &HtmlElement) -> bool {
    element
        .style()
        .get_property_value("display")
        .map(|value| value == "none")
        .unwrap_or(false)
}

/// Reads an inline `px` length back, e.g. `"312px"` -> `312.0`.
pub(crate) fn inline_px(element: &HtmlElement, property: &str) -> Option<f64> {
    let raw = element.style().get_property_value(property).ok()?;
    raw.trim().trim_end_matches("px").trim().parse::<f64>().ok()
}

pub(crate) fn inline_number(element: &HtmlElement, property: &str) -> Option<f64> {
    let raw = element.style().get_property_value(property).ok()?;
    raw.trim().parse::<f64>().ok()
}

pub(crate) fn remove_by_id(document: &Document, id: &str) -> bool {
    match document.get_element_by_id(id) {
        Some(element) => {
            element.remove();
            true
        }
        None => false,
    }
}

pub(crate) fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, RevealError> {
    let element = document.create_element(tag)?;
    element
        .dyn_into::<HtmlElement>()
        .map_err(|_| RevealError::Dom(format!("<{tag}> is not an html element")))
}

pub(crate) fn elements(collection: &HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|index| collection.item(index))
        .collect()
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, RevealError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|err| RevealError::Selector {
            selector: selector.to_string(),
            detail: crate::error::js_err(err),
        })?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Cards as found in the live document.
pub(crate) struct PageCards {
    document: Document,
}

impl PageCards {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }
}

impl CardTree for PageCards {
    type Node = Element;

    fn is_card(&self, node: &Element, marker: &str) -> bool {
        node.get_attribute("class")
            .map(|class| has_class(&class, marker))
            .unwrap_or(false)
    }

    fn cards_within(&self, node: &Element, marker: &str) -> Vec<Element> {
        elements(&node.get_elements_by_class_name(marker))
    }

    fn cards_on_page(&self, marker: &str) -> Vec<Element> {
        elements(&self.document.get_elements_by_class_name(marker))
    }
}
