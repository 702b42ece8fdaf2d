use card_reveal_core::{default_stylesheet, ResolvedSettings};
use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::error::RevealError;

/// The overlay and viewer elements of one revealer.
pub(crate) struct Stage {
    pub(crate) overlay: HtmlElement,
    pub(crate) viewer: HtmlElement,
    pub(crate) content: Element,
    pub(crate) navigation: HtmlElement,
    pub(crate) previous: HtmlElement,
    pub(crate) next: HtmlElement,
}

impl Stage {
    /// Replaces any elements already carrying the configured ids with fresh,
    /// hidden ones appended to `body`.
    pub(crate) fn bootstrap(document: &Document, settings: &ResolvedSettings) -> Result<Self, RevealError> {
        let body = document.body().ok_or(RevealError::MissingGlobal("document.body"))?;

        let overlay = dom::create_html(document, "div")?;
        overlay.set_id(&settings.overlay.id);

        let viewer = dom::create_html(document, "div")?;
        viewer.set_id(&settings.card.id);
        let content = document.create_element("div")?;
        content.set_class_name("content");
        let navigation = dom::create_html(document, "div")?;
        navigation.set_class_name("navigation");
        let previous = nav_link(document, "previous", &settings.card.previous_title)?;
        let next = nav_link(document, "next", &settings.card.next_title)?;
        navigation.append_child(&previous)?;
        navigation.append_child(&next)?;
        viewer.append_child(&content)?;
        viewer.append_child(&navigation)?;

        dom::remove_by_id(document, &settings.overlay.id);
        dom::remove_by_id(document, &settings.card.id);
        body.append_child(&overlay)?;
        body.append_child(&viewer)?;

        dom::hide(&overlay);
        dom::hide(&viewer);
        dom::hide(&previous);
        dom::hide(&next);

        sync_stylesheet(document, settings)?;

        Ok(Self {
            overlay,
            viewer,
            content,
            navigation,
            previous,
            next,
        })
    }

    pub(crate) fn hide_navigation(&self) {
        dom::hide(&self.navigation);
        dom::hide(&self.previous);
        dom::hide(&self.next);
    }

    pub(crate) fn show_navigation(&self, previous: bool, next: bool) {
        if previous {
            dom::show(&self.previous);
        }
        if next {
            dom::show(&self.next);
        }
        dom::show(&self.navigation);
    }

    pub(crate) fn clear_content(&self) {
        self.content.set_inner_html("");
    }

    pub(crate) fn remove(&self) {
        self.overlay.remove();
        self.viewer.remove();
    }
}

fn nav_link(document: &Document, class: &str, title: &str) -> Result<HtmlElement, RevealError> {
    let link = dom::create_html(document, "a")?;
    link.set_class_name(class);
    let _ = link.set_attribute("href", "#");
    link.set_title(title);
    link.set_text_content(Some(title));
    Ok(link)
}

/// Keeps at most one default stylesheet for the viewer id: injected when
/// `addStyle` is on and none exists yet, removed when it is off.
fn sync_stylesheet(document: &Document, settings: &ResolvedSettings) -> Result<(), RevealError> {
    let style_id = settings.stylesheet_id();
    if !settings.card.add_style {
        dom::remove_by_id(document, &style_id);
        return Ok(());
    }
    if document.get_element_by_id(&style_id).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(&style_id);
    let _ = style.set_attribute("type", "text/css");
    let _ = style.set_attribute("media", "all");
    style.set_text_content(Some(&default_stylesheet(&settings.card.id)));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => document
            .body()
            .ok_or(RevealError::MissingGlobal("document.body"))?
            .append_child(&style)?,
    };
    Ok(())
}

pub(crate) fn remove_stylesheet(document: &Document, settings: &ResolvedSettings) {
    dom::remove_by_id(document, &settings.stylesheet_id());
}
