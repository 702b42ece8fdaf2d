use std::cell::RefCell;
use std::rc::{Rc, Weak};

use card_reveal_core::{discover_cards, CardSource, Effect, Event, Phase, ResolvedSettings, Session};
use gloo::console;
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::animate::{self, AnimationSlot};
use crate::dom::{self, PageCards};
use crate::error::RevealError;
use crate::stage::{self, Stage};

struct Binding {
    element: Element,
    _listener: EventListener,
}

#[derive(Default)]
struct Slots {
    overlay_fade: AnimationSlot,
    overlay_move: AnimationSlot,
    viewer_fade: AnimationSlot,
    viewer_move: AnimationSlot,
    card_fade: AnimationSlot,
}

impl Slots {
    fn cancel_all(&self) {
        self.overlay_fade.cancel();
        self.overlay_move.cancel();
        self.viewer_fade.cancel();
        self.viewer_move.cancel();
        self.card_fade.cancel();
    }
}

/// One attachment: its settings, its overlay/viewer, the trigger elements
/// bound to it and the state of the current session.
pub(crate) struct Revealer {
    document: Document,
    settings: ResolvedSettings,
    stage: Stage,
    session: RefCell<Session<Element>>,
    slots: Slots,
    obstructed: RefCell<Vec<(HtmlElement, String)>>,
    bindings: RefCell<Vec<Binding>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Revealer {
    pub(crate) fn mount(settings: ResolvedSettings) -> Result<Rc<Self>, RevealError> {
        let document = dom::document()?;
        let stage = Stage::bootstrap(&document, &settings)?;
        let revealer = Rc::new(Self {
            document,
            session: RefCell::new(Session::new(settings.clone())),
            settings,
            stage,
            slots: Slots::default(),
            obstructed: RefCell::new(Vec::new()),
            bindings: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        });
        revealer.install_listeners()?;
        Ok(revealer)
    }

    pub(crate) fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    pub(crate) fn phase(&self) -> Phase {
        self.session.borrow().phase()
    }

    pub(crate) fn current_index(&self) -> Option<usize> {
        self.session.borrow().current_index()
    }

    pub(crate) fn claims_ids(&self, settings: &ResolvedSettings) -> bool {
        let ours = [&self.settings.overlay.id, &self.settings.card.id];
        ours.contains(&&settings.overlay.id) || ours.contains(&&settings.card.id)
    }

    fn install_listeners(self: &Rc<Self>) -> Result<(), RevealError> {
        let mut listeners = Vec::new();

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&self.stage.overlay, "click", move |_event| {
            with(&weak, |revealer| revealer.dispatch(Event::Dismiss));
        }));

        let weak = Rc::downgrade(self);
        listeners.push(active_listener(&self.stage.previous, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            with(&weak, |revealer| revealer.dispatch(Event::Previous));
        }));

        let weak = Rc::downgrade(self);
        listeners.push(active_listener(&self.stage.next, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            with(&weak, |revealer| revealer.dispatch(Event::Next));
        }));

        let window = dom::window()?;
        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "resize", move |_event| {
            with(&weak, |revealer| revealer.dispatch(Event::Resize(dom::viewport())));
        }));

        let weak = Rc::downgrade(self);
        listeners.push(EventListener::new(&window, "scroll", move |_event| {
            with(&weak, |revealer| revealer.dispatch(Event::Scroll(dom::viewport())));
        }));

        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }

    /// Makes clicks on `element` start a session rooted at it.
    pub(crate) fn bind(self: &Rc<Self>, element: Element) {
        if self
            .bindings
            .borrow()
            .iter()
            .any(|binding| binding.element == element)
        {
            return;
        }
        let weak = Rc::downgrade(self);
        let root = element.clone();
        let listener = active_listener(&element, "click", move |event| {
            event.prevent_default();
            with(&weak, |revealer| revealer.reveal_from(&root));
        });
        self.bindings.borrow_mut().push(Binding {
            element,
            _listener: listener,
        });
    }

    pub(crate) fn bound_elements(&self) -> Vec<Element> {
        self.bindings
            .borrow()
            .iter()
            .map(|binding| binding.element.clone())
            .collect()
    }

    pub(crate) fn reveal_from(self: &Rc<Self>, root: &Element) {
        if self.session.borrow().is_active() {
            console::log!("reveal: session already active, trigger ignored");
            return;
        }
        let marker = self.settings.card.marker.clone();
        let tree = PageCards::new(self.document.clone());
        let (source, cards) = discover_cards(&tree, root, &marker);
        if source == CardSource::Nothing {
            console::warn!("reveal: no cards found for marker", marker);
            return;
        }
        console::log!(
            "reveal: showing",
            cards.len() as u32,
            "card(s) from",
            source_label(source)
        );
        self.dispatch(Event::Trigger {
            cards,
            viewport: dom::viewport(),
        });
    }

    pub(crate) fn dispatch(self: &Rc<Self>, event: Event<Element>) {
        let effects = self.session.borrow_mut().apply(event);
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self: &Rc<Self>, effect: Effect) {
        let stage = &self.stage;
        match effect {
            Effect::HideObstructions => self.hide_obstructions(),
            Effect::RestoreObstructions => self.restore_obstructions(),
            Effect::HideNavigation => stage.hide_navigation(),
            Effect::ShowNavigation { previous, next } => stage.show_navigation(previous, next),
            Effect::PlaceOverlay(frame) => {
                self.slots.overlay_move.cancel();
                dom::set_css(&stage.overlay, &self.settings.overlay_css(&frame));
            }
            Effect::FadeInOverlay {
                generation,
                duration_ms,
            } => {
                let weak = Rc::downgrade(self);
                animate::fade_in(
                    &self.slots.overlay_fade,
                    &stage.overlay,
                    self.settings.overlay.opacity,
                    duration_ms,
                    move || {
                        with(&weak, |revealer| {
                            revealer.dispatch(Event::OverlayShown { generation })
                        });
                    },
                );
            }
            Effect::PlaceViewer(position) => {
                self.slots.viewer_move.cancel();
                dom::set_css(&stage.viewer, &self.settings.viewer_css(&position));
            }
            Effect::FadeInViewer {
                generation,
                duration_ms,
            } => {
                let weak = Rc::downgrade(self);
                animate::fade_in(
                    &self.slots.viewer_fade,
                    &stage.viewer,
                    1.0,
                    duration_ms,
                    move || {
                        with(&weak, |revealer| {
                            revealer.dispatch(Event::ViewerShown { generation })
                        });
                    },
                );
            }
            Effect::PresentCard { index, duration_ms } => self.present(index, duration_ms),
            Effect::HideViewer => {
                self.slots.viewer_fade.cancel();
                self.slots.viewer_move.cancel();
                dom::hide(&stage.viewer);
            }
            Effect::ClearContent => {
                self.slots.card_fade.cancel();
                stage.clear_content();
            }
            Effect::FadeOutOverlay { duration_ms } => {
                self.slots.overlay_move.cancel();
                animate::fade_out(
                    &self.slots.overlay_fade,
                    &stage.overlay,
                    self.settings.overlay.opacity,
                    duration_ms,
                );
            }
            Effect::SizeOverlay { width, height } => {
                dom::set_css(
                    &stage.overlay,
                    &[
                        ("width", format!("{width}px")),
                        ("height", format!("{height}px")),
                    ],
                );
            }
            Effect::MoveOverlay { to, duration_ms } => {
                animate::move_to(&self.slots.overlay_move, &stage.overlay, to.left, to.top, duration_ms);
            }
            Effect::MoveViewer { to, duration_ms } => {
                animate::move_to(&self.slots.viewer_move, &stage.viewer, to.left, to.top, duration_ms);
            }
        }
    }

    /// Puts an id-less deep copy of card `index` into the content region and
    /// fades it in. The card on the page is left untouched.
    fn present(&self, index: usize, duration_ms: f64) {
        self.slots.card_fade.cancel();
        self.stage.clear_content();
        let Some(card) = self.session.borrow().card(index).cloned() else {
            console::warn!("reveal: no card at index", index as u32);
            return;
        };
        let copy = match card.clone_node_with_deep(true) {
            Ok(node) => node,
            Err(err) => {
                console::warn!("reveal: card clone failed", err);
                return;
            }
        };
        let Ok(copy) = copy.dyn_into::<Element>() else {
            return;
        };
        copy.remove_attribute("id").ok();
        if let Err(err) = self.stage.content.append_child(&copy) {
            console::warn!("reveal: card insert failed", err);
            return;
        }
        if let Some(copy) = copy.dyn_ref::<HtmlElement>() {
            animate::fade_in(&self.slots.card_fade, copy, 1.0, duration_ms, || {});
        }
    }

    fn hide_obstructions(&self) {
        let selector = self.settings.overlay.obstructions.trim();
        if selector.is_empty() {
            return;
        }
        let found = match dom::query_all(&self.document, selector) {
            Ok(found) => found,
            Err(err) => {
                console::warn!("reveal: obstruction lookup failed", err.to_string());
                return;
            }
        };
        let mut obstructed = self.obstructed.borrow_mut();
        for element in found {
            let Ok(element) = element.dyn_into::<HtmlElement>() else {
                continue;
            };
            if dom::is_hidden(&element) {
                continue;
            }
            let display = element
                .style()
                .get_property_value("display")
                .unwrap_or_default();
            dom::hide(&element);
            obstructed.push((element, display));
        }
    }

    fn restore_obstructions(&self) {
        let obstructed: Vec<_> = self.obstructed.borrow_mut().drain(..).collect();
        for (element, display) in obstructed {
            if display.is_empty() {
                dom::show(&element);
            } else {
                let _ = element.style().set_property("display", &display);
            }
        }
    }

    /// Detaches every listener, stops animations, and removes the overlay
    /// and viewer from the page. With `drop_style` the injected stylesheet
    /// goes too.
    pub(crate) fn unmount(&self, drop_style: bool) {
        self.slots.cancel_all();
        self.restore_obstructions();
        self.listeners.borrow_mut().clear();
        self.bindings.borrow_mut().clear();
        self.stage.remove();
        if drop_style {
            stage::remove_stylesheet(&self.document, &self.settings);
        }
    }
}

fn with<F: FnOnce(&Rc<Revealer>)>(weak: &Weak<Revealer>, action: F) {
    if let Some(revealer) = weak.upgrade() {
        action(&revealer);
    }
}

fn active_listener<F>(target: &Element, event_type: &'static str, callback: F) -> EventListener
where
    F: FnMut(&web_sys::Event) + 'static,
{
    EventListener::new_with_options(
        target,
        event_type,
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        callback,
    )
}

fn source_label(source: CardSource) -> &'static str {
    match source {
        CardSource::Trigger => "trigger",
        CardSource::Descendants => "trigger descendants",
        CardSource::Page => "page",
        CardSource::Nothing => "nowhere",
    }
}
