use crate::input::{self, PointerTracker, Release, CLICK_DRAG_THRESHOLD_PX};
use showcase_core::{ClickOutcome, Showcase};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub showcase: Rc<RefCell<Showcase>>,
    pub tracker: Rc<RefCell<PointerTracker>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
}

fn css_to_backing_scale(canvas: &web::HtmlCanvasElement) -> f32 {
    let rect = canvas.get_bounding_client_rect();
    if rect.height() > 0.0 {
        canvas.height() as f32 / rect.height() as f32
    } else {
        1.0
    }
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        w.tracker.borrow_mut().press(input::pointer_css_px(&ev));
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev);
        let drag = w
            .tracker
            .borrow_mut()
            .move_to(pos, CLICK_DRAG_THRESHOLD_PX);
        let mut sc = w.showcase.borrow_mut();
        if let Some(delta) = drag {
            let scale = css_to_backing_scale(&w.canvas);
            sc.orbit_drag(delta.x * scale, delta.y * scale);
            return;
        }
        if w.tracker.borrow().is_down() {
            return;
        }
        // Hover feedback: pointer cursor over anything clickable.
        let px = input::pointer_canvas_px(&ev, &w.canvas);
        let ndc = input::px_to_ndc(px, [w.canvas.width(), w.canvas.height()]);
        let clickable = sc.pick(ndc).is_some_and(|name| sc.clickable(&name));
        _ = w
            .canvas
            .style()
            .set_property("cursor", if clickable { "pointer" } else { "default" });
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let release = w.tracker.borrow_mut().release(input::pointer_css_px(&ev));
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        if !matches!(release, Release::Click(_)) {
            return;
        }
        let px = input::pointer_canvas_px(&ev, &w.canvas);
        let ndc = input::px_to_ndc(px, [w.canvas.width(), w.canvas.height()]);
        let mut sc = w.showcase.borrow_mut();
        let Some(name) = sc.pick(ndc) else {
            return;
        };
        match sc.click(&name) {
            ClickOutcome::Focused(n) => log::info!("[click] focus {n}"),
            ClickOutcome::PortalStarted => log::info!("[click] portal"),
            ClickOutcome::Ignored => log::debug!("[click] ignored {name}"),
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
