use crate::input::{key_action, KeyAction};
use showcase_core::navigation::Direction;
use showcase_core::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Escape leaves the focused item through the reset fade; the arrow keys step
/// through discovered items.
pub fn handle_global_keydown(ev: &web::KeyboardEvent, showcase: &Rc<RefCell<Showcase>>) {
    if ev.repeat() {
        return;
    }
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    let mut sc = showcase.borrow_mut();
    match action {
        KeyAction::Deselect => {
            if sc.request_deselect() {
                log::info!("[key] deselect");
                ev.prevent_default();
            }
        }
        KeyAction::Next | KeyAction::Previous => {
            if sc.active_name().is_none() {
                return;
            }
            let dir = if action == KeyAction::Next {
                Direction::Next
            } else {
                Direction::Previous
            };
            if let Some(outcome) = sc.navigate(dir) {
                log::info!("[key] navigate {dir:?} -> {outcome:?}");
                ev.prevent_default();
            }
        }
    }
}

pub fn wire_global_keydown(showcase: Rc<RefCell<Showcase>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &showcase);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
