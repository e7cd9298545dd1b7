// End-to-end tests of the showcase context: clicks, navigation, deselect
// and the portal, driven frame by frame without a browser.

use glam::{Vec2, Vec3};
use showcase_core::framing::Aabb;
use showcase_core::navigation::Direction;
use showcase_core::passes::{ClearOp, LayerMask, Shading};
use showcase_core::portal::TransitionCommand;
use showcase_core::progression::Phase;
use showcase_core::selection::SelectOutcome;
use showcase_core::{
    ClickOutcome, DepthTier, Facet, ModelConfig, ModelRegistry, PortalGate, Showcase,
};

const DT: f32 = 1.0 / 60.0;

fn model(name: &str, position: [f32; 3], facet: Facet) -> ModelConfig {
    let mut m = ModelConfig::new(name, format!("models/{name}.glb"), position);
    m.facet = Some(facet);
    m
}

fn showcase(gate: PortalGate) -> Showcase {
    let mut archive = model("Archive", [-5.0, 0.0, -2.0], Facet::Default);
    archive.tier = Some(DepthTier::Background);
    let reg = ModelRegistry::new(
        vec![
            model("Knight", [0.0, 0.0, 0.0], Facet::Default),
            model("Dragon", [4.0, 0.0, 0.0], Facet::Default),
            archive,
            model("Flower", [0.0, 3.5, 0.0], Facet::Default),
            model("Cradle", [0.0, 0.0, 0.0], Facet::Alternate),
            model("Music Box", [3.0, 0.0, 0.0], Facet::Alternate),
        ],
        Some("Flower"),
        gate,
    )
    .unwrap();
    let mut sc = Showcase::new(reg);
    sc.resize(1600, 900);
    let unit = Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5));
    for i in 0..6 {
        sc.on_asset_loaded(i, unit);
    }
    sc.finish_intro();
    sc
}

fn run(sc: &mut Showcase, seconds: f32) -> Vec<TransitionCommand> {
    let mut cmds = Vec::new();
    let mut t = 0.0;
    while t < seconds {
        cmds.extend(sc.frame(DT).commands);
        t += DT;
    }
    cmds
}

fn discover_all_default(sc: &mut Showcase) {
    for name in ["Knight", "Dragon", "Archive"] {
        assert_eq!(sc.select_by_name(name), SelectOutcome::Focused);
    }
    assert_eq!(sc.select_by_name(""), SelectOutcome::Cleared);
}

#[test]
fn loading_completes_and_mounts_the_default_facet() {
    let sc = showcase(PortalGate::Strict);
    assert!(sc.loading().complete());
    assert_eq!(sc.loading().progress(), 100);
    assert_eq!(sc.scene().mounted().count(), 4);
    assert!(sc.scene().rendered().get("Cradle").is_none());
    assert_eq!(sc.phase(), Phase::Main);
}

#[test]
fn center_click_focuses_the_item_under_the_pointer() {
    let mut sc = showcase(PortalGate::Strict);
    run(&mut sc, 0.1);
    assert_eq!(sc.pick(Vec2::ZERO).as_deref(), Some("Knight"));
    assert_eq!(sc.click("Knight"), ClickOutcome::Focused("Knight".into()));
    assert_eq!(sc.active_name(), Some("Knight"));
    assert!(sc.selection().is_discovered("Knight"));
    assert!(sc.pick(Vec2::new(0.99, -0.99)).is_none());
}

#[test]
fn clicks_are_ignored_while_something_is_focused() {
    let mut sc = showcase(PortalGate::Strict);
    assert!(sc.clickable("Dragon"));
    assert!(!sc.clickable("Cradle"));
    sc.click("Knight");
    assert!(!sc.clickable("Dragon"));
    assert!(!sc.clickable("Knight"));
    assert_eq!(sc.click("Dragon"), ClickOutcome::Ignored);
    assert_eq!(sc.click("Knight"), ClickOutcome::Ignored);
    assert_eq!(sc.active_name(), Some("Knight"));
}

#[test]
fn deselect_goes_through_the_reset_fade() {
    let mut sc = showcase(PortalGate::Strict);
    assert!(!sc.request_deselect());
    sc.click("Knight");
    assert!(sc.request_deselect());
    let out = sc.frame(0.1);
    assert_eq!(sc.active_name(), Some("Knight"));
    assert!(out.view.reset_opacity > 0.0);
    sc.frame(0.25);
    assert_eq!(sc.active_name(), None);
    assert_eq!(sc.camera_target().eye, Vec3::new(0.0, 0.0, 12.0));
    run(&mut sc, 1.5);
    assert_eq!(sc.view().reset_opacity, 0.0);
}

#[test]
fn camera_eases_onto_the_focus_target() {
    let mut sc = showcase(PortalGate::Strict);
    sc.click("Dragon");
    let target = *sc.camera_target();
    run(&mut sc, 3.0);
    assert!(sc.camera().pose.eye.distance(target.eye) < 0.05);
    assert!(sc.camera().pose.look.distance(target.look) < 1e-3);
}

#[test]
fn default_facet_renders_two_passes() {
    let mut sc = showcase(PortalGate::Strict);
    let plan = sc.frame(DT).plan;
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].layers, LayerMask::INACTIVE);
    assert_eq!(plan[0].shading, Shading::Desaturated);
    assert_eq!(plan[0].clear, ClearOp::ColorAndDepth);
    assert_eq!(plan[1].layers, LayerMask::ACTIVE);
    assert!(!plan[1].layers.contains(LayerMask::ALL));
    assert_eq!(plan[1].shading, Shading::Color);
    assert_eq!(plan[1].clear, ClearOp::DepthOnly);
    assert!(plan[1].view_offset.is_none());

    sc.click("Knight");
    let before = sc.camera().pose;
    let plan = sc.frame(DT).plan;
    // Background keeps the pose from the moment of the click.
    assert_eq!(plan[0].pose, before);
    assert!(plan[0].view_offset.is_none());
    assert!(plan[1].view_offset.is_some());
}

#[test]
fn navigation_steps_through_discovered_items() {
    let mut sc = showcase(PortalGate::Strict);
    sc.select_by_name("Knight");
    assert!(!sc.view().nav_enabled);
    assert_eq!(sc.navigate(Direction::Next), None);
    sc.select_by_name("Archive");
    assert!(sc.view().nav_enabled);
    assert_eq!(sc.navigate(Direction::Next), Some(SelectOutcome::Focused));
    assert_eq!(sc.active_name(), Some("Knight"));
    assert_eq!(sc.navigate(Direction::Previous), Some(SelectOutcome::Focused));
    assert_eq!(sc.active_name(), Some("Archive"));
}

#[test]
fn portal_and_other_facet_items_cannot_be_selected_by_name() {
    let mut sc = showcase(PortalGate::Open);
    assert_eq!(sc.select_by_name("Flower"), SelectOutcome::Unavailable);
    assert_eq!(sc.select_by_name("Cradle"), SelectOutcome::Unavailable);
    assert!(sc.active_name().is_none());
}

#[test]
fn strict_portal_stays_locked_until_everything_is_discovered() {
    let mut sc = showcase(PortalGate::Strict);
    assert!(!sc.portal_unlocked());
    assert_eq!(sc.click("Flower"), ClickOutcome::Ignored);
    discover_all_default(&mut sc);
    assert!(sc.portal_unlocked());
    assert!(sc.view().portal_unlocked);
    assert!(sc.clickable("Flower"));
    assert_eq!(sc.click("Flower"), ClickOutcome::PortalStarted);
    // A running transition can't be restarted.
    assert!(!sc.clickable("Flower"));
    assert_eq!(sc.click("Flower"), ClickOutcome::Ignored);
}

#[test]
fn portal_transition_switches_to_the_alternate_facet() {
    let mut sc = showcase(PortalGate::Strict);
    discover_all_default(&mut sc);
    assert_eq!(sc.click("Flower"), ClickOutcome::PortalStarted);

    let out = sc.frame(DT);
    assert_eq!(
        out.commands.as_slice(),
        &[
            TransitionCommand::ResetVideo,
            TransitionCommand::PlayVideo { rate: 4.0 }
        ]
    );
    assert!(out.view.transition_visible);

    sc.on_video_duration(Some(2.0));
    // (1.0 + 0.21) / 4
    let cmds = run(&mut sc, 0.35);
    assert!(cmds.contains(&TransitionCommand::PauseVideo));
    assert!(!cmds.iter().any(|c| matches!(c, TransitionCommand::SetFacet(_))));
    assert_eq!(sc.selection().facet(), Facet::Alternate);
    assert!(sc.view().interstitial_visible);
    assert!(sc.scene().rendered().get("Cradle").is_some());
    assert!(sc.scene().rendered().get("Knight").is_none());

    let plan = sc.frame(DT).plan;
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].layers, LayerMask::ALL);
    assert!(plan[0].layers.contains(LayerMask::ACTIVE));
    assert!(plan[0].layers.contains(LayerMask::INACTIVE));

    let cmds = run(&mut sc, 2.6);
    assert!(cmds.contains(&TransitionCommand::ResumeVideo));
    sc.on_video_ended();
    assert!(!sc.view().transition_visible);
    // The portal stays put in the alternate facet but does nothing.
    assert!(!sc.clickable("Flower"));
    assert!(sc.clickable("Cradle"));
    assert!(!sc.clickable("Knight"));
}

#[test]
fn video_error_aborts_without_switching() {
    let mut sc = showcase(PortalGate::Open);
    sc.click("Flower");
    sc.on_video_duration(Some(2.0));
    sc.abort_portal();
    let cmds = run(&mut sc, 1.0);
    assert!(cmds.contains(&TransitionCommand::PauseVideo));
    assert_eq!(sc.selection().facet(), Facet::Default);
    assert!(!sc.portal().is_active());
}

#[test]
fn continue_leads_to_the_landing_then_thanks() {
    let mut sc = showcase(PortalGate::Open);
    assert!(!sc.request_continue());
    sc.click("Flower");
    sc.on_video_ended();
    assert_eq!(sc.selection().facet(), Facet::Alternate);
    sc.select_by_name("Cradle");
    sc.select_by_name("Music Box");
    assert!(!sc.continue_available());
    sc.select_by_name("");
    assert!(sc.continue_available());
    assert!(sc.request_continue());
    run(&mut sc, 2.0);
    assert_eq!(sc.phase(), Phase::AlternateLanding);
    assert!(sc.complete_landing());
    run(&mut sc, 2.0);
    assert_eq!(sc.phase(), Phase::Thanks);
}

#[test]
fn asset_failure_keeps_the_loading_screen_up() {
    let reg = ModelRegistry::from_json(
        r#"{"models":[{"name":"A","path":"a.glb"},{"name":"B","path":"b.glb"}]}"#,
    )
    .unwrap();
    let mut sc = Showcase::new(reg);
    sc.on_asset_loaded(0, Aabb::new(Vec3::ZERO, Vec3::ONE));
    sc.on_asset_loaded(0, Aabb::new(Vec3::ZERO, Vec3::ONE));
    assert_eq!(sc.loading().progress(), 50);
    sc.on_asset_failed("b.glb: 404");
    sc.on_asset_failed("later");
    let view = sc.view();
    assert!(view.loading_visible);
    assert_eq!(view.loading_error.as_deref(), Some("b.glb: 404"));
}

#[test]
fn orbit_is_refused_without_a_focus() {
    let mut sc = showcase(PortalGate::Strict);
    run(&mut sc, 0.1);
    let before = sc.camera().pose;
    assert!(!sc.orbit_drag(50.0, 0.0));
    run(&mut sc, 0.5);
    assert_eq!(sc.camera().pose.look, before.look);
    assert!(sc.camera().pose.eye.distance(Vec3::new(0.0, 0.0, 12.0)) < 1e-3);
}

#[test]
fn orbit_drag_interrupts_the_fly_in() {
    let mut sc = showcase(PortalGate::Strict);
    sc.click("Knight");
    let target = *sc.camera_target();
    run(&mut sc, 0.1);
    let radius = sc.camera().pose.eye.distance(target.look);
    // Still well short of the framed eye.
    assert!(sc.camera().pose.eye.distance(target.eye) > 1.0);

    assert!(sc.orbit_drag(80.0, 0.0));
    run(&mut sc, 2.0);
    let pose = sc.camera().pose;
    assert!((pose.eye.distance(target.look) - radius).abs() < 1e-3);
    assert!(pose.eye.distance(target.eye) > 1.0);
    assert_eq!(pose.look, target.look);
    // Rotation around Y moved the eye off the +Z axis.
    assert!(pose.eye.x.abs() > 0.1);
}

#[test]
fn deselect_returns_the_camera_to_rest() {
    let mut sc = showcase(PortalGate::Strict);
    sc.click("Dragon");
    run(&mut sc, 0.5);
    assert!(sc.orbit_drag(40.0, 20.0));
    run(&mut sc, 0.5);

    assert!(sc.request_deselect());
    run(&mut sc, 3.0);
    assert_eq!(sc.active_name(), None);
    let pose = sc.camera().pose;
    assert!(pose.eye.distance(Vec3::new(0.0, 0.0, 12.0)) < 1e-3);
    assert_eq!(pose.look, Vec3::ZERO);
    assert!(!sc.orbit_drag(10.0, 0.0));
}
