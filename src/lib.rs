#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use instant::Instant;
use showcase_core::navigation::Direction;
use showcase_core::progression::DesktopGate;
use showcase_core::{ModelRegistry, Showcase};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod video;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, showcase: &Rc<RefCell<Showcase>>) {
    if let Some((w, h)) = dom::sync_canvas_backing_size(canvas) {
        showcase.borrow_mut().resize(w, h);
    } else {
        showcase.borrow_mut().resize(canvas.width(), canvas.height());
    }
    let canvas_resize = canvas.clone();
    let showcase = showcase.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        if let Some((w, h)) = dom::sync_canvas_backing_size(&canvas_resize) {
            showcase.borrow_mut().resize(w, h);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_buttons(document: &web::Document, showcase: &Rc<RefCell<Showcase>>, retry: &Rc<Cell<bool>>) {
    let sc = showcase.clone();
    dom::add_click_listener(document, INTRO_ENTER_ID, move || {
        if sc.borrow_mut().finish_intro() {
            log::info!("[ui] intro finished");
        }
    });
    let sc = showcase.clone();
    dom::add_click_listener(document, QUIT_ID, move || {
        sc.borrow_mut().request_deselect();
    });
    let sc = showcase.clone();
    dom::add_click_listener(document, NAV_PREV_ID, move || {
        sc.borrow_mut().navigate(Direction::Previous);
    });
    let sc = showcase.clone();
    dom::add_click_listener(document, NAV_NEXT_ID, move || {
        sc.borrow_mut().navigate(Direction::Next);
    });
    let sc = showcase.clone();
    dom::add_click_listener(document, CONTINUE_ID, move || {
        if sc.borrow_mut().request_continue() {
            log::info!("[ui] continue to landing");
        }
    });
    let sc = showcase.clone();
    dom::add_click_listener(document, LANDING_DONE_ID, move || {
        sc.borrow_mut().complete_landing();
    });
    let retry = retry.clone();
    dom::add_click_listener(document, RENDER_RETRY_ID, move || {
        retry.set(true);
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showcase-web starting");

    let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
    let gate = Rc::new(RefCell::new(DesktopGate::default()));
    observe_viewport(&document, &gate);
    wire_desktop_gate(document, gate);
    Ok(())
}

fn boot(document: web::Document) {
    spawn_local(async move {
        if let Err(e) = init(&document).await {
            log::error!("init error: {:?}", e);
            overlay::show_render_error(&document, &e.to_string());
        }
    });
}

/// Re-check the viewport width: toggle the desktop notice and boot the
/// showcase the first time the window is wide enough.
fn observe_viewport(document: &web::Document, gate: &Rc<RefCell<DesktopGate>>) {
    let width = dom::viewport_width();
    let update = gate.borrow_mut().observe(width);
    if update.changed {
        if !update.desktop {
            log::info!("[init] viewport {width}px is below the desktop minimum");
        }
        overlay::set_desktop_notice(document, !update.desktop);
    }
    if update.start {
        boot(document.clone());
    }
}

fn wire_desktop_gate(document: web::Document, gate: Rc<RefCell<DesktopGate>>) {
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move || {
        observe_viewport(&document, &gate);
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

async fn init(document: &web::Document) -> anyhow::Result<()> {
    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let registry_text = assets::fetch_text(MODELS_URL).await?;
    let registry = ModelRegistry::from_json(&registry_text)?;
    log::info!("[init] registry with {} models", registry.len());
    let showcase = Rc::new(RefCell::new(Showcase::new(registry)));

    wire_canvas_resize(&canvas, &showcase);

    let retry = Rc::new(Cell::new(false));
    wire_buttons(document, &showcase, &retry);
    events::wire_global_keydown(showcase.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        showcase: showcase.clone(),
        tracker: Rc::new(RefCell::new(input::PointerTracker::default())),
    });

    let video = document
        .get_element_by_id(PORTAL_VIDEO_ID)
        .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok());
    match &video {
        Some(v) => video::wire_video_events(v, showcase.clone()),
        None => log::warn!("[init] #{PORTAL_VIDEO_ID} missing; portal runs without video"),
    }

    let uploads: assets::UploadQueue = Rc::new(RefCell::new(Vec::new()));
    assets::load_all(showcase.clone(), uploads.clone());

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        overlay::show_render_error(document, "WebGPU is not available in this browser");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        showcase,
        canvas,
        video,
        document: document.clone(),
        overlay: overlay::Overlay::new(document.clone()),
        uploads,
        gpu,
        retry,
        render_halted: false,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
