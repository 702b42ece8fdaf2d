use std::cell::RefCell;
use std::rc::Rc;

use card_reveal_core::ResolvedSettings;
use gloo::console;
use web_sys::Element;

use crate::error::RevealError;
use crate::revealer::Revealer;

thread_local! {
    static REVEALERS: RefCell<Vec<Rc<Revealer>>> = RefCell::new(Vec::new());
}

/// Mounts a revealer for `settings` and binds `elements` to it. A revealer
/// already using the same overlay or card id is retired once the new one is
/// mounted; its trigger elements carry over. If mounting fails the existing
/// revealers stay as they were.
pub(crate) fn install(settings: ResolvedSettings, elements: Vec<Element>) -> Result<(), RevealError> {
    let retiring: Vec<Rc<Revealer>> = REVEALERS.with(|slot| {
        slot.borrow()
            .iter()
            .filter(|revealer| revealer.claims_ids(&settings))
            .cloned()
            .collect()
    });

    let revealer = Revealer::mount(settings)?;

    REVEALERS.with(|slot| {
        slot.borrow_mut()
            .retain(|kept| !retiring.iter().any(|old| Rc::ptr_eq(old, kept)))
    });
    let mut adopted = Vec::new();
    for old in &retiring {
        adopted.extend(old.bound_elements());
        // A sheet under a different card id has no viewer left to style.
        let drop_style = old.settings().card.id != revealer.settings().card.id;
        old.unmount(drop_style);
    }
    if !retiring.is_empty() {
        console::log!(
            "reveal: replaced previous viewer, re-binding",
            adopted.len() as u32,
            "trigger(s)"
        );
    }

    for element in adopted.into_iter().chain(elements) {
        revealer.bind(element);
    }
    REVEALERS.with(|slot| slot.borrow_mut().push(revealer));
    Ok(())
}

/// Unmounts every revealer and removes the stylesheets they injected.
pub(crate) fn clear() {
    let revealers = REVEALERS.with(|slot| slot.borrow_mut().drain(..).collect::<Vec<_>>());
    for revealer in revealers {
        revealer.unmount(true);
    }
}

pub(crate) fn with_revealer<R>(viewer_id: &str, action: impl FnOnce(&Rc<Revealer>) -> R) -> Option<R> {
    let revealer = REVEALERS.with(|slot| {
        slot.borrow()
            .iter()
            .find(|revealer| revealer.settings().card.id == viewer_id)
            .cloned()
    })?;
    Some(action(&revealer))
}

pub(crate) fn count() -> usize {
    REVEALERS.with(|slot| slot.borrow().len())
}
