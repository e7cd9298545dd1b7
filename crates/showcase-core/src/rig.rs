//! Per-frame camera easing toward the selection's camera target.

use crate::camera::{Camera, CameraPose};
use crate::constants::{
    CAMERA_ARRIVAL_EPSILON_SQ, CAMERA_LERP_BASE, CAMERA_TARGET_MOVED_EPSILON_SQ,
};
use crate::selection::CameraTarget;
use glam::Vec3;

/// Frame-rate independent smoothing factor: after one second of frames the
/// remaining error is `CAMERA_LERP_BASE` regardless of frame count.
#[inline]
pub fn lerp_factor(dt_sec: f32) -> f32 {
    1.0 - CAMERA_LERP_BASE.powf(dt_sec.max(0.0))
}

/// Eases the live camera and owns the frozen pose used by the background pass.
#[derive(Clone, Debug, Default)]
pub struct CameraRig {
    arrived: bool,
    last_active: Option<String>,
    last_target_eye: Option<Vec3>,
    frozen: Option<CameraPose>,
}

impl CameraRig {
    /// Advance the live camera one frame.
    ///
    /// While focused, the eye eases toward the target until it arrives and
    /// then leaves orientation and position to the orbit controls. While
    /// unfocused, it eases back and keeps looking at the target look point.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        active: Option<&str>,
        target: &CameraTarget,
        dt_sec: f32,
    ) {
        let desired = target.eye;
        let t = lerp_factor(dt_sec);

        if let Some(name) = active {
            let switched = self.last_active.as_deref() != Some(name);
            let moved = self
                .last_target_eye
                .map_or(true, |e| e.distance_squared(desired) > CAMERA_TARGET_MOVED_EPSILON_SQ);
            if switched || moved {
                self.arrived = false;
                self.last_active = Some(name.to_string());
                self.last_target_eye = Some(desired);
                self.frozen = Some(camera.pose);
            }
            if !self.arrived {
                camera.pose.eye = camera.pose.eye.lerp(desired, t);
                if camera.pose.eye.distance_squared(desired) < CAMERA_ARRIVAL_EPSILON_SQ {
                    camera.pose.eye = desired;
                    self.arrived = true;
                }
            }
            return;
        }

        camera.pose.eye = camera.pose.eye.lerp(desired, t);
        camera.pose.look = target.look;
        self.arrived = false;
        self.last_active = None;
        self.last_target_eye = Some(desired);
        self.frozen = None;
    }

    /// User rotation takes over from the automatic ease.
    pub fn interrupt(&mut self) {
        if self.last_active.is_some() {
            self.arrived = true;
        }
    }

    #[inline]
    pub fn arrived(&self) -> bool {
        self.arrived
    }

    /// Pose captured when the current focus started.
    #[inline]
    pub fn frozen_pose(&self) -> Option<CameraPose> {
        self.frozen
    }
}

/// The pose the background pass should use: frozen while focused, live
/// otherwise.
#[inline]
pub fn background_pose(live: CameraPose, frozen: Option<CameraPose>) -> CameraPose {
    frozen.unwrap_or(live)
}
