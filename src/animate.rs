use std::cell::{Cell, RefCell};
use std::rc::Rc;

use card_reveal_core::Tween;
use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::HtmlElement;

use crate::dom;

/// One animated CSS property. `unit` is appended to every sampled value.
#[derive(Clone, Copy)]
pub(crate) struct Track {
    pub(crate) property: &'static str,
    pub(crate) tween: Tween,
    pub(crate) unit: &'static str,
}

impl Track {
    pub(crate) fn px(property: &'static str, from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            property,
            tween: Tween::new(from, to, duration_ms),
            unit: "px",
        }
    }

    pub(crate) fn opacity(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            property: "opacity",
            tween: Tween::new(from, to, duration_ms),
            unit: "",
        }
    }
}

struct Run {
    element: HtmlElement,
    tracks: Vec<Track>,
    duration_ms: f64,
    started_at: Cell<Option<f64>>,
    frame: RefCell<Option<AnimationFrame>>,
    on_done: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Run {
    fn apply(&self, elapsed_ms: f64) {
        let style = self.element.style();
        for track in &self.tracks {
            let value = track.tween.sample(elapsed_ms);
            let _ = style.set_property(track.property, &format!("{value}{}", track.unit));
        }
    }

    fn finish(&self) {
        let done = self.on_done.borrow_mut().take();
        if let Some(done) = done {
            done();
        }
    }

    fn tick(self: &Rc<Self>, timestamp: f64) {
        self.frame.borrow_mut().take();
        let started = match self.started_at.get() {
            Some(started) => started,
            None => {
                self.started_at.set(Some(timestamp));
                timestamp
            }
        };
        let elapsed = timestamp - started;
        self.apply(elapsed);
        if elapsed >= self.duration_ms {
            self.finish();
        } else {
            schedule(self);
        }
    }
}

fn schedule(run: &Rc<Run>) {
    let next = Rc::clone(run);
    let handle = request_animation_frame(move |timestamp| next.tick(timestamp));
    *run.frame.borrow_mut() = Some(handle);
}

/// Holds at most one running animation. Starting another one drops the
/// previous run without calling its completion.
#[derive(Default)]
pub(crate) struct AnimationSlot {
    current: RefCell<Option<Rc<Run>>>,
}

impl AnimationSlot {
    pub(crate) fn start<F>(&self, element: &HtmlElement, tracks: Vec<Track>, duration_ms: f64, on_done: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        let run = Rc::new(Run {
            element: element.clone(),
            tracks,
            duration_ms: duration_ms.max(0.0),
            started_at: Cell::new(None),
            frame: RefCell::new(None),
            on_done: RefCell::new(Some(Box::new(on_done))),
        });
        if run.duration_ms <= 0.0 {
            run.apply(0.0);
            run.finish();
            return;
        }
        run.apply(0.0);
        *self.current.borrow_mut() = Some(Rc::clone(&run));
        schedule(&run);
    }

    pub(crate) fn cancel(&self) {
        let previous = self.current.borrow_mut().take();
        if let Some(run) = previous {
            run.frame.borrow_mut().take();
            run.on_done.borrow_mut().take();
        }
    }
}

/// Fades `element` from transparent up to `target` opacity, making it
/// visible first.
pub(crate) fn fade_in<F>(slot: &AnimationSlot, element: &HtmlElement, target: f64, duration_ms: f64, on_done: F)
where
    F: FnOnce() + 'static,
{
    let _ = element.style().set_property("opacity", "0");
    dom::show(element);
    slot.start(
        element,
        vec![Track::opacity(0.0, target, duration_ms)],
        duration_ms,
        on_done,
    );
}

/// Fades `element` out, hides it and puts its resting opacity back so the
/// next fade-in starts from a clean style.
pub(crate) fn fade_out(slot: &AnimationSlot, element: &HtmlElement, resting: f64, duration_ms: f64) {
    if dom::is_hidden(element) {
        slot.cancel();
        return;
    }
    let from = dom::inline_number(element, "opacity").unwrap_or(resting);
    let target = element.clone();
    slot.start(
        element,
        vec![Track::opacity(from, 0.0, duration_ms)],
        duration_ms,
        move || {
            dom::hide(&target);
            let _ = target.style().set_property("opacity", &resting.to_string());
        },
    );
}

/// Slides `element` to `left`/`top` from wherever its inline style has it.
pub(crate) fn move_to(slot: &AnimationSlot, element: &HtmlElement, left: f64, top: f64, duration_ms: f64) {
    let from_left = dom::inline_px(element, "left").unwrap_or(left);
    let from_top = dom::inline_px(element, "top").unwrap_or(top);
    slot.start(
        element,
        vec![
            Track::px("left", from_left, left, duration_ms),
            Track::px("top", from_top, top, duration_ms),
        ],
        duration_ms,
        || {},
    );
}
