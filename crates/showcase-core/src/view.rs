//! Read-only snapshot handed to the DOM overlays once per frame.

use crate::framing::PercentPoint;
use crate::progression::Phase;
use crate::registry::Facet;

#[derive(Clone, Debug, PartialEq)]
pub struct NavDot {
    pub name: String,
    pub active: bool,
    pub discovered: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShowcaseView {
    pub phase: Phase,
    pub facet: Facet,
    pub title: Option<String>,
    pub link: Option<String>,
    pub nav_enabled: bool,
    pub dots: Vec<NavDot>,
    pub quit_visible: bool,
    pub portal_unlocked: bool,
    pub continue_available: bool,
    pub transition_visible: bool,
    pub interstitial_visible: bool,
    pub reset_opacity: f32,
    pub phase_fade_opacity: f32,
    pub background_origin: Option<PercentPoint>,
    pub loading_visible: bool,
    pub loading_progress: u32,
    pub loading_error: Option<String>,
}
