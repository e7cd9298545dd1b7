//! The single-writer context that ties selection, camera, nodes and
//! choreography together.
//!
//! The web layer owns one `Showcase` behind `Rc<RefCell<_>>`, feeds it
//! input and frame deltas, and executes the `FrameOutput` it returns.

use crate::camera::{ray_from_ndc, Camera};
use crate::constants::CAMERA_ARRIVAL_EPSILON_SQ;
use crate::framing::{world_to_percent, Aabb};
use crate::loading::LoadingState;
use crate::navigation::{self, Direction};
use crate::orbit::OrbitControls;
use crate::passes::{plan_frame, PassPlan, HIT_TEST_LAYERS};
use crate::portal::{Commands, PortalTransition, TransitionCommand};
use crate::progression::{Phase, PhaseFlow};
use crate::registry::{Facet, ModelRegistry};
use crate::reset::ResetFade;
use crate::rig::CameraRig;
use crate::scene::Scene;
use crate::selection::{CameraTarget, SelectOutcome, SelectionState};
use crate::view::{NavDot, ShowcaseView};
use glam::{Vec2, Vec3};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Focused(String),
    PortalStarted,
    Ignored,
}

#[derive(Debug)]
pub struct FrameOutput {
    pub plan: PassPlan,
    pub commands: Commands,
    pub view: ShowcaseView,
}

#[derive(Debug)]
pub struct Showcase {
    registry: ModelRegistry,
    selection: SelectionState,
    scene: Scene,
    camera: Camera,
    rig: CameraRig,
    orbit: OrbitControls,
    portal: PortalTransition,
    reset: ResetFade,
    flow: PhaseFlow,
    loading: LoadingState,
    pending: Commands,
    rest_origins_fresh: bool,
}

impl Showcase {
    pub fn new(registry: ModelRegistry) -> Self {
        let scene = Scene::new(&registry);
        let loading = LoadingState::new(registry.len());
        Self {
            registry,
            selection: SelectionState::new(),
            scene,
            camera: Camera::default(),
            rig: CameraRig::default(),
            orbit: OrbitControls::default(),
            portal: PortalTransition::default(),
            reset: ResetFade::default(),
            flow: PhaseFlow::default(),
            loading,
            pending: Commands::new(),
            rest_origins_fresh: false,
        }
    }

    #[inline]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    #[inline]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn loading(&self) -> &LoadingState {
        &self.loading
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.flow.phase()
    }

    #[inline]
    pub fn portal(&self) -> &PortalTransition {
        &self.portal
    }

    #[inline]
    pub fn active_name(&self) -> Option<&str> {
        self.selection.active_name()
    }

    #[inline]
    pub fn camera_target(&self) -> &CameraTarget {
        self.selection.camera_target()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
        self.rest_origins_fresh = false;
    }

    /// Focus an item by name, or clear the focus with an empty name. Items
    /// outside the current facet and the portal are reported unavailable.
    pub fn select_by_name(&mut self, name: &str) -> SelectOutcome {
        if !name.is_empty()
            && (self.registry.is_portal(name)
                || !self.registry.in_facet(name, self.selection.facet()))
        {
            return SelectOutcome::Unavailable;
        }
        let outcome = self.selection.select(name, &self.scene, &self.camera);
        match outcome {
            SelectOutcome::Focused => {
                self.orbit.reset(self.selection.camera_target().look);
                self.orbit.enabled = true;
            }
            SelectOutcome::Cleared => self.release_orbit(),
            SelectOutcome::Unchanged | SelectOutcome::Unavailable => {}
        }
        outcome
    }

    fn release_orbit(&mut self) {
        self.orbit.reset(Vec3::ZERO);
        self.orbit.enabled = false;
        self.rest_origins_fresh = false;
    }

    pub fn navigate(&mut self, dir: Direction) -> Option<SelectOutcome> {
        let ordered = self.registry.facet_names(self.selection.facet());
        let next = navigation::step(
            &ordered,
            self.selection.discovered(),
            self.selection.active_name(),
            dir,
        )?
        .to_string();
        Some(self.select_by_name(&next))
    }

    /// Whether a click on `name` would do anything right now. The portal
    /// answers to its unlock gate in the default facet; everything else only
    /// while nothing is focused.
    pub fn clickable(&self, name: &str) -> bool {
        let facet = self.selection.facet();
        if self.registry.is_portal(name) {
            return facet == Facet::Default && self.portal_unlocked() && !self.portal.is_active();
        }
        self.selection.active_name().is_none() && self.registry.in_facet(name, facet)
    }

    /// Pointer click on a render node.
    pub fn click(&mut self, name: &str) -> ClickOutcome {
        if !self.clickable(name) {
            return ClickOutcome::Ignored;
        }
        if self.registry.is_portal(name) {
            let cmds = self.portal.start();
            self.route(cmds);
            return ClickOutcome::PortalStarted;
        }
        match self.select_by_name(name) {
            SelectOutcome::Focused => ClickOutcome::Focused(name.to_string()),
            _ => ClickOutcome::Ignored,
        }
    }

    /// Start the black reset fade; the selection clears when it is opaque.
    pub fn request_deselect(&mut self) -> bool {
        if self.selection.active_name().is_none() {
            return false;
        }
        self.reset.request()
    }

    pub fn portal_unlocked(&self) -> bool {
        navigation::portal_unlocked(&self.registry, self.selection.discovered())
    }

    pub fn continue_available(&self) -> bool {
        navigation::continue_available(
            &self.registry,
            self.selection.discovered(),
            self.selection.active_name(),
        )
    }

    pub fn on_asset_loaded(&mut self, index: usize, bounds: Aabb) {
        if self.scene.is_loaded(index) {
            return;
        }
        self.scene.attach_bounds(index, bounds);
        self.loading.mark_loaded();
        self.scene.sync_mounts(&self.registry, self.selection.facet());
        self.rest_origins_fresh = false;
    }

    pub fn on_asset_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("[assets] {message}");
        self.loading.fail(message);
    }

    /// Rotate around the focused item. Returns `false` when nothing is
    /// focused.
    pub fn orbit_drag(&mut self, dx: f32, dy: f32) -> bool {
        if !self.orbit.rotate(dx, dy, self.camera.viewport[1] as f32) {
            return false;
        }
        self.rig.interrupt();
        true
    }

    pub fn on_video_duration(&mut self, duration_sec: Option<f64>) {
        self.portal.on_duration_known(duration_sec);
    }

    pub fn on_video_ended(&mut self) {
        let cmds = self.portal.on_video_ended();
        self.route(cmds);
    }

    pub fn abort_portal(&mut self) {
        let cmds = self.portal.abort();
        self.route(cmds);
    }

    pub fn finish_intro(&mut self) -> bool {
        self.flow.finish_intro()
    }

    pub fn request_continue(&mut self) -> bool {
        self.continue_available() && self.flow.begin_continue()
    }

    pub fn complete_landing(&mut self) -> bool {
        self.flow.complete_landing()
    }

    fn route(&mut self, cmds: Commands) {
        for cmd in cmds {
            match cmd {
                TransitionCommand::SetFacet(facet) => self.apply_facet(facet),
                other => self.pending.push(other),
            }
        }
    }

    fn apply_facet(&mut self, facet: Facet) {
        let registry = &self.registry;
        if let Some(dropped) = self
            .selection
            .set_facet(facet, |n| registry.in_facet(n, facet))
        {
            log::info!("[facet] {dropped} left the facet; focus cleared");
            self.release_orbit();
        }
        self.scene.sync_mounts(&self.registry, facet);
        self.rest_origins_fresh = false;
    }

    /// Name under an NDC point, resolved from the top pass down with each
    /// pass's own pose and projection.
    pub fn pick(&self, ndc: Vec2) -> Option<String> {
        let plan = self.current_plan();
        plan.iter().rev().find_map(|pass| {
            let (origin, dir) = ray_from_ndc(&pass.view_proj(&self.camera), ndc);
            self.scene
                .raycast(origin, dir, pass.layers.and(HIT_TEST_LAYERS))
                .map(|(_, name)| name.to_string())
        })
    }

    fn current_plan(&self) -> PassPlan {
        plan_frame(
            self.selection.facet(),
            self.selection.active_name().is_some(),
            &self.camera,
            self.rig.frozen_pose(),
        )
    }

    /// Advance everything by `dt_sec` and describe the frame.
    pub fn frame(&mut self, dt_sec: f32) -> FrameOutput {
        if self.reset.advance(dt_sec) {
            self.select_by_name("");
        }
        let cmds = self.portal.advance(dt_sec as f64);
        self.route(cmds);
        self.flow.advance(dt_sec);

        let active = self.selection.active_name().map(str::to_string);
        self.scene.update(active.as_deref(), dt_sec);
        let target = *self.selection.camera_target();
        self.rig
            .update(&mut self.camera, active.as_deref(), &target, dt_sec);
        self.orbit.update(&mut self.camera);

        if active.is_none() && !self.rest_origins_fresh && self.settled_at(&target) {
            self.remember_rest_origins();
        }

        FrameOutput {
            plan: self.current_plan(),
            commands: std::mem::take(&mut self.pending),
            view: self.view(),
        }
    }

    fn settled_at(&self, target: &CameraTarget) -> bool {
        self.camera.pose.eye.distance_squared(target.eye) < CAMERA_ARRIVAL_EPSILON_SQ
    }

    fn remember_rest_origins(&mut self) {
        let view_proj = self.camera.view_proj();
        let origins: Vec<(String, Aabb)> = self
            .scene
            .mounted()
            .filter_map(|(i, n)| Some((n.name.clone(), self.scene.node_world_bounds(i)?)))
            .collect();
        for (name, bounds) in origins {
            self.selection
                .remember_rest_origin(&name, world_to_percent(bounds.center(), &view_proj));
        }
        self.rest_origins_fresh = true;
    }

    pub fn view(&self) -> ShowcaseView {
        let facet = self.selection.facet();
        let active = self.selection.active_name();
        let discovered = self.selection.discovered();
        let ordered = self.registry.facet_names(facet);
        let config = active.and_then(|n| self.registry.get(n));

        ShowcaseView {
            phase: self.flow.phase(),
            facet,
            title: config.map(|c| c.display_title().to_string()),
            link: config.and_then(|c| c.link.clone()),
            nav_enabled: active.is_some() && navigation::navigation_enabled(&ordered, discovered),
            dots: ordered
                .iter()
                .map(|n| NavDot {
                    name: n.to_string(),
                    active: active == Some(*n),
                    discovered: discovered.contains(*n),
                })
                .collect(),
            quit_visible: active.is_some(),
            portal_unlocked: self.portal_unlocked(),
            continue_available: self.continue_available(),
            transition_visible: self.portal.is_active(),
            interstitial_visible: self.portal.interstitial_visible(),
            reset_opacity: self.reset.opacity(),
            phase_fade_opacity: self.flow.fade_opacity(),
            background_origin: self.selection.background_origin(),
            loading_visible: self.loading.screen_visible(),
            loading_progress: self.loading.progress(),
            loading_error: self.loading.error.clone(),
        }
    }
}
