//! Per-frame render description.
//!
//! The orchestrator never draws; it emits an ordered `PassPlan` that the web
//! render loop executes as-is.

use crate::camera::{Camera, CameraPose};
use crate::constants::FOCUS_FRAME_NDC;
use crate::registry::Facet;
use crate::rig::background_pose;
use glam::{Mat4, Vec2};
use smallvec::{smallvec, SmallVec};

/// Bit set of render layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerMask(pub u8);

impl LayerMask {
    pub const INACTIVE: LayerMask = LayerMask(1 << 0);
    pub const ACTIVE: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(Self::INACTIVE.0 | Self::ACTIVE.0);

    #[inline]
    pub fn contains(self, other: LayerMask) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn and(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 & other.0)
    }
}

/// Layers visible to picking, independent of the pass split.
pub const HIT_TEST_LAYERS: LayerMask = LayerMask::ALL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
    Desaturated,
    Color,
}

impl Shading {
    #[inline]
    pub fn saturation(self) -> f32 {
        match self {
            Shading::Desaturated => 0.0,
            Shading::Color => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearOp {
    ColorAndDepth,
    DepthOnly,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderPass {
    pub label: &'static str,
    pub layers: LayerMask,
    pub pose: CameraPose,
    pub view_offset: Option<Vec2>,
    pub shading: Shading,
    pub clear: ClearOp,
}

impl RenderPass {
    pub fn view_proj(&self, camera: &Camera) -> Mat4 {
        camera.pass_view_proj(&self.pose, self.view_offset)
    }
}

pub type PassPlan = SmallVec<[RenderPass; 2]>;

/// Build this frame's passes.
///
/// Default facet: a desaturated pass over the inactive layer seen from the
/// frozen pose (or the live pose when nothing is frozen), then a color pass
/// over the active layer that only clears depth. Alternate facet: one color
/// pass over everything. The off-center framing applies to the color pass
/// whenever something is focused.
pub fn plan_frame(
    facet: Facet,
    focused: bool,
    camera: &Camera,
    frozen: Option<CameraPose>,
) -> PassPlan {
    let view_offset = focused.then(|| camera.view_offset_ndc(Vec2::from_array(FOCUS_FRAME_NDC)));
    match facet {
        Facet::Alternate => smallvec![RenderPass {
            label: "single",
            layers: LayerMask::ALL,
            pose: camera.pose,
            view_offset,
            shading: Shading::Color,
            clear: ClearOp::ColorAndDepth,
        }],
        Facet::Default => smallvec![
            RenderPass {
                label: "inactive",
                layers: LayerMask::INACTIVE,
                pose: background_pose(camera.pose, frozen),
                view_offset: None,
                shading: Shading::Desaturated,
                clear: ClearOp::ColorAndDepth,
            },
            RenderPass {
                label: "active",
                layers: LayerMask::ACTIVE,
                pose: camera.pose,
                view_offset,
                shading: Shading::Color,
                clear: ClearOp::DepthOnly,
            },
        ],
    }
}
