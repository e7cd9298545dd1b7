use crate::constants::*;
use crate::dom;
use showcase_core::progression::Phase;
use showcase_core::view::{NavDot, ShowcaseView};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Applies `ShowcaseView` snapshots to the page, touching only what changed
/// since the last frame.
pub struct Overlay {
    document: web::Document,
    last: Option<ShowcaseView>,
}

impl Overlay {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            last: None,
        }
    }

    pub fn apply(&mut self, view: &ShowcaseView) {
        let doc = &self.document;
        let prev = self.last.as_ref();
        let changed = |f: fn(&ShowcaseView) -> bool| prev.map_or(true, |p| f(p) != f(view));

        if prev.map_or(true, |p| p.phase != view.phase) {
            apply_phase(doc, view.phase);
        }
        if prev.map_or(true, |p| p.title != view.title || p.link != view.link) {
            apply_title(doc, view.title.as_deref(), view.link.as_deref());
        }
        if changed(|v| v.nav_enabled) {
            dom::set_visible(doc, NAV_ID, view.nav_enabled);
        }
        if prev.map_or(true, |p| p.dots != view.dots) {
            apply_dots(doc, &view.dots);
        }
        if changed(|v| v.quit_visible) {
            dom::set_visible(doc, QUIT_ID, view.quit_visible);
        }
        if changed(|v| v.continue_available) {
            dom::set_visible(doc, CONTINUE_ID, view.continue_available);
        }
        if changed(|v| v.portal_unlocked) {
            if let Some(root) = doc.get_element_by_id(APP_ROOT_ID) {
                _ = root
                    .class_list()
                    .toggle_with_force("portal-unlocked", view.portal_unlocked);
            }
        }
        if changed(|v| v.transition_visible) {
            dom::set_visible(doc, TRANSITION_ID, view.transition_visible);
        }
        if changed(|v| v.interstitial_visible) {
            dom::set_visible(doc, INTERSTITIAL_ID, view.interstitial_visible);
        }
        if prev.map_or(true, |p| p.reset_opacity != view.reset_opacity) {
            apply_fade(doc, RESET_FADE_ID, view.reset_opacity);
        }
        if prev.map_or(true, |p| p.phase_fade_opacity != view.phase_fade_opacity) {
            apply_fade(doc, PHASE_FADE_ID, view.phase_fade_opacity);
        }
        if prev.map_or(true, |p| p.background_origin != view.background_origin) {
            let origin = view
                .background_origin
                .map(|o| format!("{:.2}% {:.2}%", o.x, o.y))
                .unwrap_or_else(|| "50% 50%".to_string());
            dom::set_style(doc, BACKGROUND_ID, "transform-origin", &origin);
            let scale = if view.background_origin.is_some() { "scale(1.15)" } else { "scale(1)" };
            dom::set_style(doc, BACKGROUND_ID, "transform", scale);
        }
        if prev.map_or(true, |p| {
            p.loading_visible != view.loading_visible
                || p.loading_progress != view.loading_progress
                || p.loading_error != view.loading_error
        }) {
            apply_loading(doc, view);
        }
        if prev.map_or(true, |p| p.facet != view.facet) {
            if let Some(root) = doc.get_element_by_id(APP_ROOT_ID) {
                _ = root.set_attribute("data-facet", &format!("{:?}", view.facet).to_lowercase());
            }
        }

        self.last = Some(view.clone());
    }
}

fn apply_phase(doc: &web::Document, phase: Phase) {
    dom::set_visible(doc, INTRO_ID, phase == Phase::Intro);
    dom::set_visible(doc, MAIN_ID, phase == Phase::Main);
    dom::set_visible(doc, LANDING_ID, phase == Phase::AlternateLanding);
    dom::set_visible(doc, THANKS_ID, phase == Phase::Thanks);
    if let Some(root) = doc.get_element_by_id(APP_ROOT_ID) {
        _ = root.set_attribute("data-phase", phase.as_str());
    }
    log::info!("[phase] {}", phase.as_str());
}

fn apply_title(doc: &web::Document, title: Option<&str>, link: Option<&str>) {
    dom::set_text(doc, TITLE_ID, title.unwrap_or(""));
    dom::set_visible(doc, TITLE_ID, title.is_some());
    let Some(anchor) = doc
        .get_element_by_id(LINK_ID)
        .and_then(|el| el.dyn_into::<web::HtmlAnchorElement>().ok())
    else {
        return;
    };
    match link {
        Some(href) => {
            anchor.set_href(href);
            dom::set_visible(doc, LINK_ID, true);
        }
        None => {
            _ = anchor.remove_attribute("href");
            dom::set_visible(doc, LINK_ID, false);
        }
    }
}

fn apply_dots(doc: &web::Document, dots: &[NavDot]) {
    let Some(container) = doc.get_element_by_id(NAV_DOTS_ID) else {
        return;
    };
    container.set_inner_html("");
    for dot in dots {
        let Ok(el) = doc.create_element("span") else {
            continue;
        };
        let mut class = String::from("nav-dot");
        if dot.active {
            class.push_str(" active");
        }
        if dot.discovered {
            class.push_str(" discovered");
        }
        el.set_class_name(&class);
        _ = el.set_attribute("title", if dot.discovered { &dot.name } else { "?" });
        _ = container.append_child(&el);
    }
}

fn apply_fade(doc: &web::Document, id: &str, opacity: f32) {
    dom::set_style(doc, id, "opacity", &format!("{opacity:.3}"));
    dom::set_visible(doc, id, opacity > 0.0);
}

fn apply_loading(doc: &web::Document, view: &ShowcaseView) {
    dom::set_visible(doc, LOADING_ID, view.loading_visible);
    dom::set_text(doc, LOADING_PROGRESS_ID, &format!("{}%", view.loading_progress));
    match &view.loading_error {
        Some(msg) => {
            dom::set_text(doc, LOADING_ERROR_ID, msg);
            dom::set_visible(doc, LOADING_ERROR_ID, true);
        }
        None => dom::set_visible(doc, LOADING_ERROR_ID, false),
    }
}

pub fn show_render_error(doc: &web::Document, message: &str) {
    dom::set_text(doc, &format!("{RENDER_ERROR_ID}-message"), message);
    dom::set_visible(doc, RENDER_ERROR_ID, true);
}

pub fn hide_render_error(doc: &web::Document) {
    dom::set_visible(doc, RENDER_ERROR_ID, false);
}

/// Swap the app for the "desktop only" notice, or back.
pub fn set_desktop_notice(doc: &web::Document, visible: bool) {
    dom::set_visible(doc, DESKTOP_NOTICE_ID, visible);
    dom::set_visible(doc, APP_ROOT_ID, !visible);
}
