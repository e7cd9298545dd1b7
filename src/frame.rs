use crate::assets::UploadQueue;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::overlay::{self, Overlay};
use crate::render::{self, NodeDraw};
use crate::video;
use instant::Instant;
use showcase_core::portal::TransitionCommand;
use showcase_core::Showcase;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub showcase: Rc<RefCell<Showcase>>,
    pub canvas: web::HtmlCanvasElement,
    pub video: Option<web::HtmlVideoElement>,
    pub document: web::Document,
    pub overlay: Overlay,
    pub uploads: UploadQueue,
    pub gpu: Option<render::GpuState<'a>>,
    // Set by the render-error retry button.
    pub retry: Rc<Cell<bool>>,
    pub render_halted: bool,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        if let Some((w, h)) = dom::sync_canvas_backing_size(&self.canvas) {
            self.showcase.borrow_mut().resize(w, h);
        }

        let out = self.showcase.borrow_mut().frame(dt_sec);
        let started = out
            .commands
            .iter()
            .any(|c| matches!(c, TransitionCommand::PlayVideo { .. }));
        match &self.video {
            Some(v) => {
                video::apply_commands(v, &out.commands);
                // Metadata already loaded on an earlier run fires no event.
                if started {
                    if let Some(d) = video::known_duration(v) {
                        self.showcase.borrow_mut().on_video_duration(Some(d));
                    }
                }
            }
            // No clip to wait for: treat playback as already over.
            None if started => self.showcase.borrow_mut().on_video_ended(),
            None => {}
        }
        self.overlay.apply(&out.view);

        let Some(g) = &mut self.gpu else {
            return;
        };

        if self.retry.take() {
            g.reconfigure();
            self.render_halted = false;
            overlay::hide_render_error(&self.document);
            log::info!("[render] retrying");
        }
        if self.render_halted {
            return;
        }

        for (index, asset) in self.uploads.borrow_mut().drain(..) {
            g.upload_mesh(index, &asset);
        }

        g.resize_if_needed(self.canvas.width(), self.canvas.height());

        let sc = self.showcase.borrow();
        let draws: Vec<NodeDraw> = sc
            .scene()
            .mounted()
            .filter(|(_, n)| !n.hidden())
            .map(|(index, n)| NodeDraw {
                index,
                model: n.world_matrix(),
                exposure: n.exposure(),
                opacity: n.opacity(),
                layer: n.layer(),
            })
            .collect();

        match g.render(&out.plan, sc.camera(), &draws) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[render] surface lost; reconfiguring");
                g.reconfigure();
            }
            Err(e) => {
                log::error!("render error: {:?}", e);
                self.render_halted = true;
                overlay::show_render_error(&self.document, &e.to_string());
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let tick = tick.borrow();
    let (Some(w), Some(cb)) = (web::window(), tick.as_ref()) else {
        return;
    };
    _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
}
