// Host-side tests for selection state, framing and camera targets.

use glam::{Vec2, Vec3, Vec4Swizzles};
use showcase_core::camera::Camera;
use showcase_core::constants::{fov_y_radians, FOCUS_FRAME_NDC};
use showcase_core::framing::{focus_distance, Aabb, PercentPoint};
use showcase_core::selection::{BoundsLookup, CameraTarget, SelectOutcome, SelectionState};
use showcase_core::Facet;
use std::collections::HashMap;

struct Bounds(HashMap<&'static str, Aabb>);

impl BoundsLookup for Bounds {
    fn live_bounds(&self, name: &str) -> Option<Aabb> {
        self.0.get(name).copied()
    }
}

fn unit_at(center: Vec3) -> Aabb {
    Aabb::new(center - Vec3::splat(0.5), center + Vec3::splat(0.5))
}

fn bounds() -> Bounds {
    Bounds(HashMap::from([
        ("Knight", unit_at(Vec3::new(0.0, -1.0, 2.0))),
        ("Dragon", unit_at(Vec3::new(4.0, 2.0, 2.0))),
        ("Archive", unit_at(Vec3::new(-6.0, 0.0, -2.0))),
    ]))
}

#[test]
fn select_then_clear_returns_to_overview() {
    let cam = Camera::default();
    let b = bounds();
    for name in ["Knight", "Dragon", "Archive"] {
        let mut s = SelectionState::new();
        assert_eq!(s.select(name, &b, &cam), SelectOutcome::Focused);
        assert_eq!(s.active_name(), Some(name));
        assert_eq!(s.select("", &b, &cam), SelectOutcome::Cleared);
        assert_eq!(s.active_name(), None);
        let t = s.camera_target();
        assert_eq!(t.eye, Vec3::new(0.0, 0.0, 12.0));
        assert_eq!(t.look, Vec3::ZERO);
        assert!(s.background_origin().is_none());
    }
}

#[test]
fn clearing_with_nothing_focused_is_unchanged() {
    let mut s = SelectionState::new();
    assert_eq!(s.select("", &bounds(), &Camera::default()), SelectOutcome::Unchanged);
    assert_eq!(*s.camera_target(), CameraTarget::overview());
}

#[test]
fn reselecting_the_active_item_changes_nothing() {
    let cam = Camera::default();
    let b = bounds();
    let mut s = SelectionState::new();
    s.select("Knight", &b, &cam);
    let target = *s.camera_target();
    let origin = s.background_origin();
    assert_eq!(s.select("Knight", &b, &cam), SelectOutcome::Unchanged);
    assert_eq!(*s.camera_target(), target);
    assert_eq!(s.background_origin(), origin);
}

#[test]
fn unknown_bounds_leave_state_untouched() {
    let mut s = SelectionState::new();
    assert_eq!(
        s.select("Ghost", &bounds(), &Camera::default()),
        SelectOutcome::Unavailable
    );
    assert!(s.active_name().is_none());
    assert!(s.discovered().is_empty());
}

#[test]
fn discovered_only_grows() {
    let cam = Camera::default();
    let b = bounds();
    let mut s = SelectionState::new();
    s.select("Knight", &b, &cam);
    s.select("Dragon", &b, &cam);
    s.select("", &b, &cam);
    s.select("Knight", &b, &cam);
    s.select("", &b, &cam);
    assert_eq!(s.discovered().len(), 2);
    assert!(s.is_discovered("Knight"));
    assert!(s.is_discovered("Dragon"));
    assert!(!s.is_discovered("Archive"));
}

#[test]
fn camera_target_frames_the_live_bounds() {
    let cam = Camera::default();
    let b = bounds();
    let mut s = SelectionState::new();
    s.select("Dragon", &b, &cam);
    let box_ = b.live_bounds("Dragon").unwrap();
    let t = s.camera_target();
    assert_eq!(t.look, box_.center());
    let expected = focus_distance(box_.bounding_radius(), fov_y_radians());
    assert!((t.eye.distance(t.look) - expected).abs() < 1e-4);
    assert!(t.eye.z > t.look.z);
}

#[test]
fn remembered_rest_origin_is_shifted_by_the_framing() {
    let cam = Camera::default();
    let b = bounds();
    let mut s = SelectionState::new();
    s.remember_rest_origin("Knight", PercentPoint { x: 50.0, y: 50.0 });
    s.select("Knight", &b, &cam);
    let o = s.background_origin().unwrap();
    assert!((o.x - (50.0 - FOCUS_FRAME_NDC[0] * 50.0)).abs() < 1e-4);
    assert!((o.y - (50.0 - FOCUS_FRAME_NDC[1] * 50.0)).abs() < 1e-4);
}

#[test]
fn first_focused_origin_is_reused() {
    let cam = Camera::default();
    let b = bounds();
    let mut s = SelectionState::new();
    s.select("Dragon", &b, &cam);
    let first = s.background_origin();
    s.select("", &b, &cam);
    s.remember_rest_origin("Dragon", PercentPoint { x: 1.0, y: 1.0 });
    s.select("Dragon", &b, &cam);
    assert_eq!(s.background_origin(), first);
}

#[test]
fn facet_switch_drops_a_focus_outside_the_new_facet() {
    let cam = Camera::default();
    let b = bounds();
    let mut s = SelectionState::new();
    s.select("Knight", &b, &cam);
    let dropped = s.set_facet(Facet::Alternate, |_| false);
    assert_eq!(dropped.as_deref(), Some("Knight"));
    assert_eq!(s.facet(), Facet::Alternate);
    assert!(s.active_name().is_none());
    assert_eq!(*s.camera_target(), CameraTarget::overview());
    assert!(s.is_discovered("Knight"));
}

#[test]
fn focus_distance_is_positive_for_tiny_and_huge_radii() {
    let fov = fov_y_radians();
    let mut last = 0.0;
    for r in [0.001_f32, 1.0, 100.0] {
        let d = focus_distance(r, fov);
        assert!(d.is_finite() && d > 0.0);
        assert!(d > last);
        last = d;
    }
    assert_eq!(focus_distance(0.0, fov), focus_distance(1.0, fov));
    assert_eq!(focus_distance(-3.0, fov), focus_distance(1.0, fov));
}

#[test]
fn off_center_projection_lands_the_look_point_on_the_focus_frame() {
    let cam = Camera::default();
    let offset = cam.view_offset_ndc(Vec2::from_array(FOCUS_FRAME_NDC));
    let vp = cam.pass_view_proj(&cam.pose, Some(offset));
    let clip = vp * cam.pose.look.extend(1.0);
    let ndc = clip.xy() / clip.w;
    // Offsets are rounded to whole pixels.
    let px = Vec2::new(2.0 / cam.viewport[0] as f32, 2.0 / cam.viewport[1] as f32);
    assert!((ndc.x - FOCUS_FRAME_NDC[0]).abs() <= px.x);
    assert!((ndc.y - FOCUS_FRAME_NDC[1]).abs() <= px.y);
}
