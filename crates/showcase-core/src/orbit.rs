//! Damped orbit rotation around the focused item.
//!
//! Zoom and pan are not supported; only rotation is exposed.

use crate::camera::Camera;
use crate::constants::{
    ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_POLAR_EPSILON,
    ORBIT_ROTATE_SPEED,
};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enabled: bool,
    pub target: Vec3,
    delta_theta: f32,
    delta_phi: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: false,
            target: Vec3::ZERO,
            delta_theta: 0.0,
            delta_phi: 0.0,
        }
    }
}

impl OrbitControls {
    /// Queue a rotation from a pointer drag of `dx`, `dy` pixels. Returns
    /// `false` when the controls are disabled and the drag was ignored.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let h = viewport_height.max(1.0);
        self.delta_theta -= TAU * dx / h * ORBIT_ROTATE_SPEED;
        self.delta_phi -= TAU * dy / h * ORBIT_ROTATE_SPEED;
        true
    }

    /// Whether queued rotation is still being applied.
    pub fn is_moving(&self) -> bool {
        self.delta_theta.abs() > 1e-5 || self.delta_phi.abs() > 1e-5
    }

    pub fn reset(&mut self, target: Vec3) {
        self.target = target;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
    }

    /// Apply one damped step: orbit the eye around `target` and aim at it.
    pub fn update(&mut self, camera: &mut Camera) {
        if !self.enabled {
            return;
        }
        let offset = camera.pose.eye - self.target;
        let radius = offset
            .length()
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        // Spherical coordinates with +Y up, theta around Y measured from +Z.
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if offset.length_squared() > f32::EPSILON {
            (offset.y / offset.length()).clamp(-1.0, 1.0).acos()
        } else {
            PI * 0.5
        };

        theta += self.delta_theta * ORBIT_DAMPING;
        phi += self.delta_phi * ORBIT_DAMPING;
        phi = phi.clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.pose.eye = self.target + new_offset;
        camera.pose.look = self.target;

        self.delta_theta *= 1.0 - ORBIT_DAMPING;
        self.delta_phi *= 1.0 - ORBIT_DAMPING;
    }
}
