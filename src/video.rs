use showcase_core::portal::TransitionCommand;
use showcase_core::Showcase;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Carry out the media side of the portal transition.
pub fn apply_commands(video: &web::HtmlVideoElement, commands: &[TransitionCommand]) {
    for cmd in commands {
        match *cmd {
            TransitionCommand::ResetVideo => video.set_current_time(0.0),
            TransitionCommand::PlayVideo { rate } => {
                video.set_playback_rate(rate);
                play(video);
            }
            TransitionCommand::PauseVideo => {
                _ = video.pause();
            }
            TransitionCommand::ResumeVideo => play(video),
            // Facet switches never leave the core.
            TransitionCommand::SetFacet(_) => {}
        }
    }
}

// Autoplay rejections surface as a rejected promise; the transition carries
// on either way.
fn play(video: &web::HtmlVideoElement) {
    if let Ok(promise) = video.play() {
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                log::warn!("[video] play rejected: {:?}", e);
            }
        });
    }
}

pub fn known_duration(video: &web::HtmlVideoElement) -> Option<f64> {
    let d = video.duration();
    (d.is_finite() && d > 0.0).then_some(d)
}

pub fn wire_video_events(video: &web::HtmlVideoElement, showcase: Rc<RefCell<Showcase>>) {
    let sc = showcase.clone();
    let v = video.clone();
    let on_meta = Closure::wrap(Box::new(move || {
        let known = known_duration(&v);
        log::info!("[video] duration {:?}", known);
        sc.borrow_mut().on_video_duration(known);
    }) as Box<dyn FnMut()>);
    _ = video.add_event_listener_with_callback("loadedmetadata", on_meta.as_ref().unchecked_ref());
    on_meta.forget();

    let sc = showcase.clone();
    let on_ended = Closure::wrap(Box::new(move || {
        sc.borrow_mut().on_video_ended();
    }) as Box<dyn FnMut()>);
    _ = video.add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref());
    on_ended.forget();

    let on_error = Closure::wrap(Box::new(move || {
        log::error!("[video] playback error; aborting portal");
        showcase.borrow_mut().abort_portal();
    }) as Box<dyn FnMut()>);
    _ = video.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    on_error.forget();
}
