//! Perspective camera shared by the rig, the pass plan and picking.
//!
//! Nothing here touches platform APIs; the web frontend turns these matrices
//! into uniforms.

use crate::constants::{
    fov_y_radians, overview_eye, overview_look, CAMERA_ZFAR, CAMERA_ZNEAR,
};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Position plus look point. This is the transform the background pass
/// freezes while an item is focused.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub look: Vec3,
}

impl CameraPose {
    pub const fn new(eye: Vec3, look: Vec3) -> Self {
        Self { eye, look }
    }

    pub fn overview() -> Self {
        Self::new(overview_eye(), overview_look())
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look, Vec3::Y)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub pose: CameraPose,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Backing size in pixels; view offsets are rounded to whole pixels.
    pub viewport: [u32; 2],
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pose: CameraPose::overview(),
            aspect: 16.0 / 9.0,
            fovy_radians: fov_y_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
            viewport: [1600, 900],
        }
    }
}

impl Camera {
    pub fn resize(&mut self, width: u32, height: u32) {
        let (w, h) = (width.max(1), height.max(1));
        self.viewport = [w, h];
        self.aspect = w as f32 / h as f32;
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        self.pose.view_matrix()
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Whole-pixel NDC shift that moves the projection center so a point on
    /// the view axis lands at `target_ndc`.
    pub fn view_offset_ndc(&self, target_ndc: Vec2) -> Vec2 {
        let [w, h] = self.viewport;
        let (w, h) = (w.max(1) as f32, h.max(1) as f32);
        let offset_x_px = (-target_ndc.x * w * 0.5).round();
        let offset_y_px = (target_ndc.y * h * 0.5).round();
        Vec2::new(-2.0 * offset_x_px / w, 2.0 * offset_y_px / h)
    }

    /// Projection for `pose` with an optional off-center shift.
    pub fn pass_view_proj(&self, pose: &CameraPose, offset_ndc: Option<Vec2>) -> Mat4 {
        let proj = match offset_ndc {
            Some(shift) => off_center_projection(self.projection_matrix(), shift),
            None => self.projection_matrix(),
        };
        proj * pose.view_matrix()
    }
}

/// Translate the projected image by `shift` NDC units. Equivalent to a
/// viewport offset on the full-size frustum.
#[inline]
pub fn off_center_projection(proj: Mat4, shift: Vec2) -> Mat4 {
    Mat4::from_translation(shift.extend(0.0)) * proj
}

/// World-space ray through an NDC point for the given view-projection.
pub fn ray_from_ndc(view_proj: &Mat4, ndc: Vec2) -> (Vec3, Vec3) {
    let inv = view_proj.inverse();
    let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
    let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let p0: Vec3 = p_near.truncate() / p_near.w;
    let p1: Vec3 = p_far.truncate() / p_far.w;
    (p0, (p1 - p0).normalize())
}
