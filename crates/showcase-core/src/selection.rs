//! The single source of truth for what is focused, what has been discovered
//! and which facet is showing.
//!
//! Overlays only ever get `&SelectionState`; the `Showcase` context is the
//! only writer.

use crate::camera::Camera;
use crate::constants::{overview_eye, overview_look};
use crate::framing::{offset_by_framing, world_to_percent, Aabb, FocusFrame, PercentPoint};
use crate::registry::Facet;
use fnv::{FnvHashMap, FnvHashSet};
use glam::Vec3;

/// Desired camera pose, written on selection changes and read every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
    pub eye: Vec3,
    pub look: Vec3,
}

impl CameraTarget {
    pub fn overview() -> Self {
        Self {
            eye: overview_eye(),
            look: overview_look(),
        }
    }

    pub fn from_frame(frame: &FocusFrame) -> Self {
        Self {
            eye: frame.eye(),
            look: frame.center,
        }
    }
}

/// Source of live world-space bounds by model name.
pub trait BoundsLookup {
    fn live_bounds(&self, name: &str) -> Option<Aabb>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Selection cleared, camera heading back to the overview.
    Cleared,
    /// A new item is focused.
    Focused,
    /// The name was already active (or nothing was active on clear).
    Unchanged,
    /// No bounds are known for the name yet; nothing changed.
    Unavailable,
}

#[derive(Clone, Debug)]
pub struct SelectionState {
    active: Option<String>,
    camera_target: CameraTarget,
    facet: Facet,
    discovered: FnvHashSet<String>,
    background_origin: Option<PercentPoint>,
    rest_origins: FnvHashMap<String, PercentPoint>,
    focused_origins: FnvHashMap<String, PercentPoint>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            active: None,
            camera_target: CameraTarget::overview(),
            facet: Facet::Default,
            discovered: FnvHashSet::default(),
            background_origin: None,
            rest_origins: FnvHashMap::default(),
            focused_origins: FnvHashMap::default(),
        }
    }

    #[inline]
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[inline]
    pub fn camera_target(&self) -> &CameraTarget {
        &self.camera_target
    }

    #[inline]
    pub fn facet(&self) -> Facet {
        self.facet
    }

    #[inline]
    pub fn discovered(&self) -> &FnvHashSet<String> {
        &self.discovered
    }

    pub fn is_discovered(&self, name: &str) -> bool {
        self.discovered.contains(name)
    }

    #[inline]
    pub fn background_origin(&self) -> Option<PercentPoint> {
        self.background_origin
    }

    /// Focus `name`, or clear the focus when `name` is empty.
    ///
    /// The camera target is derived from the item's live bounds; `camera` is
    /// only used to project a background origin when none was remembered.
    pub fn select(
        &mut self,
        name: &str,
        bounds: &impl BoundsLookup,
        camera: &Camera,
    ) -> SelectOutcome {
        if name.is_empty() {
            return self.clear();
        }
        if self.active.as_deref() == Some(name) {
            return SelectOutcome::Unchanged;
        }
        let Some(live) = bounds.live_bounds(name) else {
            log::warn!("[select] no bounds for {name}; ignoring");
            return SelectOutcome::Unavailable;
        };
        let frame = FocusFrame::from_bounds(&live, camera.fovy_radians);

        self.background_origin = Some(self.resolve_origin(name, frame.center, camera));
        self.discovered.insert(name.to_string());
        self.active = Some(name.to_string());
        self.camera_target = CameraTarget::from_frame(&frame);
        log::info!(
            "[select] {name} center=({:.2},{:.2},{:.2}) distance={:.2}",
            frame.center.x,
            frame.center.y,
            frame.center.z,
            frame.distance
        );
        SelectOutcome::Focused
    }

    fn clear(&mut self) -> SelectOutcome {
        let was_active = self.active.take().is_some();
        self.camera_target = CameraTarget::overview();
        self.background_origin = None;
        if was_active {
            log::info!("[select] cleared");
            SelectOutcome::Cleared
        } else {
            SelectOutcome::Unchanged
        }
    }

    fn resolve_origin(&mut self, name: &str, center: Vec3, camera: &Camera) -> PercentPoint {
        if let Some(exact) = self.focused_origins.get(name) {
            return *exact;
        }
        let base = self
            .rest_origins
            .get(name)
            .copied()
            .unwrap_or_else(|| world_to_percent(center, &camera.view_proj()));
        let origin = offset_by_framing(base);
        self.focused_origins.insert(name.to_string(), origin);
        origin
    }

    /// Remember where an item sits on screen while the camera rests at the
    /// overview.
    pub fn remember_rest_origin(&mut self, name: &str, origin: PercentPoint) {
        self.rest_origins.insert(name.to_string(), origin);
    }

    /// Switch the eligible subset. Returns the name that lost focus if the
    /// active item does not belong to the new facet.
    pub fn set_facet(&mut self, facet: Facet, in_facet: impl Fn(&str) -> bool) -> Option<String> {
        if self.facet == facet {
            return None;
        }
        log::info!("[facet] {:?} -> {:?}", self.facet, facet);
        self.facet = facet;
        match self.active.as_deref() {
            Some(name) if !in_facet(name) => {
                let dropped = self.active.take();
                self.camera_target = CameraTarget::overview();
                self.background_origin = None;
                dropped
            }
            _ => None,
        }
    }
}
