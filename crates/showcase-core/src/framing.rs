//! Bounding volumes and the math that frames a focused item.

use crate::constants::{FOCUS_DISTANCE_MULTIPLIER, FOCUS_FRAME_NDC};
use glam::{Mat4, Vec3, Vec4Swizzles};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut b = Self::EMPTY;
        for p in points {
            b.extend(p);
        }
        b
    }

    #[inline]
    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Radius of the sphere circumscribing the box.
    #[inline]
    pub fn bounding_radius(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        (self.max - self.min).length() * 0.5
    }

    /// Box enclosing this one after `m` is applied to all eight corners.
    pub fn transformed(&self, m: &Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let (a, b) = (self.min, self.max);
        Aabb::from_points((0..8).map(|i| {
            let c = Vec3::new(
                if i & 1 == 0 { a.x } else { b.x },
                if i & 2 == 0 { a.y } else { b.y },
                if i & 4 == 0 { a.z } else { b.z },
            );
            m.transform_point3(c)
        }))
    }
}

/// Distance at which a sphere of `radius` fits a vertical field of view,
/// padded by the comfort multiplier. Degenerate radii count as 1.
pub fn focus_distance(radius: f32, fov_y_radians: f32) -> f32 {
    let r = if radius.is_finite() && radius > 0.0 {
        radius
    } else {
        1.0
    };
    (r / (fov_y_radians * 0.5).tan()) * FOCUS_DISTANCE_MULTIPLIER
}

/// Camera goal derived from an item's live bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusFrame {
    pub center: Vec3,
    pub distance: f32,
}

impl FocusFrame {
    pub fn from_bounds(bounds: &Aabb, fov_y_radians: f32) -> Self {
        Self {
            center: bounds.center(),
            distance: focus_distance(bounds.bounding_radius(), fov_y_radians),
        }
    }

    /// Eye straight in front of the item along +Z.
    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.center + Vec3::Z * self.distance
    }
}

/// A screen point in percent of the viewport (0..100 when on screen).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PercentPoint {
    pub x: f32,
    pub y: f32,
}

/// Project a world point and express it as a clamped viewport percentage,
/// with y growing downwards like CSS.
pub fn world_to_percent(world: Vec3, view_proj: &Mat4) -> PercentPoint {
    let clip = *view_proj * world.extend(1.0);
    let w = if clip.w.abs() > f32::EPSILON { clip.w } else { 1.0 };
    let ndc = clip.xy() / w;
    PercentPoint {
        x: (((ndc.x + 1.0) * 0.5) * 100.0).clamp(0.0, 100.0),
        y: (((-ndc.y + 1.0) * 0.5) * 100.0).clamp(0.0, 100.0),
    }
}

/// Shift a rest origin by the off-center framing. The result is unclamped.
pub fn offset_by_framing(base: PercentPoint) -> PercentPoint {
    PercentPoint {
        x: base.x - FOCUS_FRAME_NDC[0] * 50.0,
        y: base.y - FOCUS_FRAME_NDC[1] * 50.0,
    }
}

/// Slab test; returns the entry distance along the ray when it hits.
pub fn ray_aabb(origin: Vec3, dir: Vec3, bounds: &Aabb) -> Option<f32> {
    if bounds.is_empty() {
        return None;
    }
    let inv = dir.recip();
    let t0 = (bounds.min - origin) * inv;
    let t1 = (bounds.max - origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();
    if t_near > t_far || t_far < 0.0 || t_near.is_nan() {
        return None;
    }
    Some(t_near.max(0.0))
}
