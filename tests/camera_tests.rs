// Orbit controls and the camera rig, exercised directly on a bare camera.

use glam::Vec3;
use showcase_core::camera::{Camera, CameraPose};
use showcase_core::orbit::OrbitControls;
use showcase_core::rig::CameraRig;
use showcase_core::selection::CameraTarget;

const DT: f32 = 1.0 / 60.0;

fn orbit_at(eye: Vec3) -> (OrbitControls, Camera) {
    let mut orbit = OrbitControls::default();
    orbit.reset(Vec3::ZERO);
    orbit.enabled = true;
    let mut camera = Camera::default();
    camera.pose = CameraPose::new(eye, Vec3::ZERO);
    (orbit, camera)
}

#[test]
fn orbit_distance_is_clamped_between_one_and_fifty() {
    let (mut orbit, mut camera) = orbit_at(Vec3::new(0.0, 0.0, 100.0));
    orbit.update(&mut camera);
    assert!((camera.pose.eye.length() - 50.0).abs() < 1e-3);

    let (mut orbit, mut camera) = orbit_at(Vec3::new(0.0, 0.0, 0.2));
    orbit.update(&mut camera);
    assert!((camera.pose.eye.length() - 1.0).abs() < 1e-4);

    let (mut orbit, mut camera) = orbit_at(Vec3::new(0.0, 3.0, 4.0));
    orbit.update(&mut camera);
    assert!((camera.pose.eye.length() - 5.0).abs() < 1e-4);
    assert_eq!(camera.pose.look, Vec3::ZERO);
}

#[test]
fn disabled_orbit_ignores_drags_and_leaves_the_camera() {
    let mut orbit = OrbitControls::default();
    let mut camera = Camera::default();
    let before = camera.pose;
    assert!(!orbit.rotate(100.0, 0.0, 900.0));
    assert!(!orbit.is_moving());
    orbit.update(&mut camera);
    assert_eq!(camera.pose, before);
}

#[test]
fn drag_rotation_damps_out() {
    let (mut orbit, mut camera) = orbit_at(Vec3::new(0.0, 0.0, 6.0));
    assert!(orbit.rotate(100.0, 0.0, 900.0));
    assert!(orbit.is_moving());
    for _ in 0..300 {
        orbit.update(&mut camera);
    }
    assert!(!orbit.is_moving());
    assert!((camera.pose.eye.length() - 6.0).abs() < 1e-3);
    // Horizontal drags stay on the horizontal circle.
    assert!(camera.pose.eye.y.abs() < 1e-3);

    let settled = camera.pose.eye;
    orbit.update(&mut camera);
    assert!(camera.pose.eye.distance(settled) < 1e-4);
}

#[test]
fn polar_angle_never_flips_over_the_pole() {
    let (mut orbit, mut camera) = orbit_at(Vec3::new(0.0, 0.0, 6.0));
    orbit.rotate(0.0, 50_000.0, 900.0);
    for _ in 0..300 {
        orbit.update(&mut camera);
    }
    let eye = camera.pose.eye;
    assert!(eye.y < 6.0 && eye.y > -6.0);
    assert!(eye.y.abs() > 5.9);
}

#[test]
fn rig_arrives_and_snaps_to_the_focus_eye() {
    let mut rig = CameraRig::default();
    let mut camera = Camera::default();
    let start = camera.pose;
    let target = CameraTarget {
        eye: Vec3::new(0.0, 0.0, 3.0),
        look: Vec3::ZERO,
    };

    rig.update(&mut camera, Some("Knight"), &target, DT);
    assert!(!rig.arrived());
    assert_eq!(rig.frozen_pose(), Some(start));

    for _ in 0..180 {
        rig.update(&mut camera, Some("Knight"), &target, DT);
    }
    assert!(rig.arrived());
    assert_eq!(camera.pose.eye, target.eye);
    // The background pose stays where the focus started.
    assert_eq!(rig.frozen_pose(), Some(start));
}

#[test]
fn interrupt_stops_the_fly_in_until_focus_changes() {
    let mut rig = CameraRig::default();
    let mut camera = Camera::default();
    let target = CameraTarget {
        eye: Vec3::new(0.0, 0.0, 3.0),
        look: Vec3::ZERO,
    };

    // Nothing focused: interrupt has nothing to stop.
    rig.interrupt();
    assert!(!rig.arrived());

    rig.update(&mut camera, Some("Knight"), &target, DT);
    rig.interrupt();
    assert!(rig.arrived());
    let held = camera.pose.eye;
    for _ in 0..60 {
        rig.update(&mut camera, Some("Knight"), &target, DT);
    }
    assert_eq!(camera.pose.eye, held);

    // A new focus restarts the ease.
    rig.update(&mut camera, Some("Dragon"), &target, DT);
    assert!(!rig.arrived());
    assert!(camera.pose.eye.z < held.z);

    rig.update(&mut camera, None, &CameraTarget::overview(), DT);
    assert!(!rig.arrived());
    assert_eq!(rig.frozen_pose(), None);
}
