// Scene plumbing: slab picking, the name -> node side table, the asset cache
// and screen-space origins.

use glam::{Mat4, Vec3};
use showcase_core::cache::ModelCache;
use showcase_core::framing::{offset_by_framing, ray_aabb, world_to_percent, Aabb, PercentPoint};
use showcase_core::rendered::{NodeHandle, RenderedObjectRegistry};
use showcase_core::passes::LayerMask;
use showcase_core::scene::Scene;
use showcase_core::{Facet, ModelConfig, ModelRegistry, PortalGate};

fn unit() -> Aabb {
    Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5))
}

#[test]
fn slab_test_hits_misses_and_starts_inside() {
    let b = unit();
    let down_z = Vec3::new(0.0, 0.0, -1.0);
    let t = ray_aabb(Vec3::new(0.0, 0.0, 10.0), down_z, &b).unwrap();
    assert!((t - 9.5).abs() < 1e-5);
    assert!(ray_aabb(Vec3::new(2.0, 0.0, 10.0), down_z, &b).is_none());
    // Box behind the ray origin.
    assert!(ray_aabb(Vec3::new(0.0, 0.0, -10.0), down_z, &b).is_none());
    assert_eq!(ray_aabb(Vec3::new(0.0, 0.0, 0.1), down_z, &b), Some(0.0));
    assert!(ray_aabb(Vec3::ZERO, down_z, &Aabb::EMPTY).is_none());
}

#[test]
fn transformed_bounds_enclose_rotated_corners() {
    let m = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4);
    let b = unit().transformed(&m);
    let half_diag = 0.5 * std::f32::consts::SQRT_2;
    assert!((b.max.x - half_diag).abs() < 1e-5);
    assert!((b.min.z + half_diag).abs() < 1e-5);
    assert!((b.max.y - 0.5).abs() < 1e-6);
}

#[test]
fn stale_unregister_keeps_the_newer_node() {
    let mut table = RenderedObjectRegistry::default();
    table.register("Knight", NodeHandle(1));
    table.register("Knight", NodeHandle(7));
    assert!(!table.unregister("Knight", Some(NodeHandle(1))));
    assert_eq!(table.get("Knight"), Some(NodeHandle(7)));
    assert!(table.unregister("Knight", Some(NodeHandle(7))));
    assert!(table.is_empty());
    assert!(!table.unregister("Knight", None));
}

#[test]
fn cache_keeps_the_first_asset_per_path() {
    let reg = ModelRegistry::new(
        vec![
            ModelConfig::new("A", "models/shared.glb", [0.0; 3]),
            ModelConfig::new("B", "models/shared.glb", [1.0, 0.0, 0.0]),
        ],
        None,
        PortalGate::Strict,
    )
    .unwrap();
    let mut cache: ModelCache<&'static str> = ModelCache::default();
    let first = cache.insert("models/shared.glb", "first");
    let second = cache.insert("models/shared.glb", "second");
    assert_eq!(*second, "first");
    assert!(std::rc::Rc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("models/shared.glb"));
    assert!(!cache.contains("models/other.glb"));
    assert_eq!(cache.get_by_name(&reg, "B").as_deref(), Some(&"first"));
    assert!(cache.get_by_name(&reg, "C").is_none());
    assert!(cache.get("models/other.glb").is_none());
}

#[test]
fn only_loaded_items_mount_and_raycast() {
    let reg = ModelRegistry::new(
        vec![
            ModelConfig::new("Near", "near.glb", [0.0, 0.0, 2.0]),
            ModelConfig::new("Far", "far.glb", [0.0, 0.0, -2.0]),
        ],
        None,
        PortalGate::Strict,
    )
    .unwrap();
    let mut scene = Scene::new(&reg);
    scene.attach_bounds(1, unit());
    scene.sync_mounts(&reg, Facet::Default);
    assert_eq!(scene.mounted().count(), 1);
    assert!(scene.node("Near").is_none());
    assert_eq!(scene.node("Far").map(|n| n.name.as_str()), Some("Far"));

    let origin = Vec3::new(0.0, 0.0, 10.0);
    let dir = Vec3::new(0.0, 0.0, -1.0);
    assert_eq!(scene.raycast(origin, dir, LayerMask::ALL).map(|h| h.1), Some("Far"));

    scene.attach_bounds(0, unit());
    scene.sync_mounts(&reg, Facet::Default);
    assert_eq!(scene.raycast(origin, dir, LayerMask::ALL).map(|h| h.1), Some("Near"));
    // Nothing is focused, so nothing sits on the active layer.
    assert!(scene.raycast(origin, dir, LayerMask::ACTIVE).is_none());
}

#[test]
fn screen_origins_are_percent_with_css_y() {
    let view_proj = Mat4::IDENTITY;
    let center = world_to_percent(Vec3::ZERO, &view_proj);
    assert_eq!(center, PercentPoint { x: 50.0, y: 50.0 });
    let top_left = world_to_percent(Vec3::new(-1.0, 1.0, 0.0), &view_proj);
    assert_eq!(top_left, PercentPoint { x: 0.0, y: 0.0 });
    // Off-screen points clamp.
    let off = world_to_percent(Vec3::new(5.0, -5.0, 0.0), &view_proj);
    assert_eq!(off, PercentPoint { x: 100.0, y: 100.0 });

    let shifted = offset_by_framing(PercentPoint { x: 90.0, y: 90.0 });
    assert!((shifted.x - 105.0).abs() < 1e-4 && (shifted.y - 105.0).abs() < 1e-4);
}
