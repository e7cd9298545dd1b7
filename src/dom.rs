use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] #{element_id} not found; click handler not wired");
    }
}

/// Match the canvas backing store to its CSS size times the (capped) device
/// pixel ratio. Returns the new size when it changed.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Option<(u32, u32)> {
    let w = web::window()?;
    let dpr = w.device_pixel_ratio().min(MAX_DEVICE_PIXEL_RATIO);
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() == w_px && canvas.height() == h_px {
        return None;
    }
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    Some((w_px, h_px))
}

pub fn viewport_width() -> f64 {
    web::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Toggle the `hidden` class, with an inline style fallback for pages
/// without the stylesheet.
pub fn set_visible(document: &web::Document, id: &str, visible: bool) {
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    let cl = el.class_list();
    if visible {
        _ = cl.remove_1("hidden");
    } else {
        _ = cl.add_1("hidden");
    }
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html
            .style()
            .set_property("display", if visible { "" } else { "none" });
    }
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(document: &web::Document, id: &str, property: &str, value: &str) {
    if let Some(html) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        _ = html.style().set_property(property, value);
    }
}
