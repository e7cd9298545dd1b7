//! One live render node per mounted registry entry.

use crate::constants::{FADE_HALF_LIFE_SEC, HIDE_OPACITY_THRESHOLD};
use crate::passes::LayerMask;
use crate::registry::{DepthTier, ModelConfig};
use glam::Mat4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
    Idle,
    Focused,
    /// Non-foreground tier while something else is focused.
    Background,
}

/// Fraction of the remaining opacity gap closed over `dt_sec`.
#[inline]
pub fn fade_factor(dt_sec: f32) -> f32 {
    1.0 - 0.5f32.powf(dt_sec.max(0.0) / FADE_HALF_LIFE_SEC)
}

#[derive(Clone, Debug)]
pub struct RenderNode {
    pub name: String,
    tier: DepthTier,
    base: Mat4,
    focused_transform: Mat4,
    brightness: f32,
    opacity: f32,
    hidden: bool,
    state: NodeState,
}

impl RenderNode {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            name: config.name.clone(),
            tier: config.tier(),
            base: config.transform(config.scale),
            focused_transform: config.transform(config.scale * config.focus_scale()),
            brightness: config.brightness(),
            opacity: 1.0,
            hidden: false,
            state: NodeState::Idle,
        }
    }

    /// Recompute state and advance the tier fade.
    pub fn update(&mut self, active: Option<&str>, dt_sec: f32) {
        let is_focused = active == Some(self.name.as_str());
        let other_focused = active.is_some() && !is_focused;

        self.state = if is_focused {
            NodeState::Focused
        } else if other_focused && self.tier.fades() {
            NodeState::Background
        } else {
            NodeState::Idle
        };

        match self.state {
            NodeState::Focused => {
                self.opacity = 1.0;
                self.hidden = false;
            }
            NodeState::Background | NodeState::Idle if self.tier.fades() => {
                let goal = if other_focused { 0.0 } else { 1.0 };
                self.opacity += (goal - self.opacity) * fade_factor(dt_sec);
                self.hidden = self.opacity < HIDE_OPACITY_THRESHOLD;
            }
            _ => {
                self.opacity = 1.0;
                self.hidden = false;
            }
        }
    }

    #[inline]
    pub fn state(&self) -> NodeState {
        self.state
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Not drawn, writes no depth and is skipped by picking.
    #[inline]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    pub fn hit_testable(&self) -> bool {
        !self.hidden
    }

    #[inline]
    pub fn layer(&self) -> LayerMask {
        match self.state {
            NodeState::Focused => LayerMask::ACTIVE,
            _ => LayerMask::INACTIVE,
        }
    }

    /// Light multiplier; a focused node is shown neutral.
    #[inline]
    pub fn exposure(&self) -> f32 {
        match self.state {
            NodeState::Focused => 1.0,
            _ => self.brightness,
        }
    }

    #[inline]
    pub fn world_matrix(&self) -> Mat4 {
        match self.state {
            NodeState::Focused => self.focused_transform,
            _ => self.base,
        }
    }
}
