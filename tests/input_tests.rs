// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn keys_map_to_actions() {
    assert_eq!(key_action("Escape"), Some(KeyAction::Deselect));
    assert_eq!(key_action("Esc"), Some(KeyAction::Deselect));
    assert_eq!(key_action("ArrowRight"), Some(KeyAction::Next));
    assert_eq!(key_action("ArrowLeft"), Some(KeyAction::Previous));
    assert_eq!(key_action("ArrowUp"), None);
    assert_eq!(key_action("a"), None);
}

#[test]
fn small_movement_is_still_a_click() {
    let mut t = PointerTracker::default();
    t.press(Vec2::new(100.0, 100.0));
    assert_eq!(
        t.move_to(Vec2::new(103.0, 101.0), CLICK_DRAG_THRESHOLD_PX),
        None
    );
    assert_eq!(
        t.release(Vec2::new(103.0, 101.0)),
        Release::Click(Vec2::new(103.0, 101.0))
    );
    assert!(!t.is_down());
}

#[test]
fn movement_past_threshold_becomes_a_drag() {
    let mut t = PointerTracker::default();
    t.press(Vec2::new(0.0, 0.0));
    let d = t.move_to(Vec2::new(10.0, 0.0), CLICK_DRAG_THRESHOLD_PX);
    assert_eq!(d, Some(Vec2::new(10.0, 0.0)));
    // Deltas are relative to the previous event, and the drag sticks even
    // when the pointer comes back near the start.
    let d = t.move_to(Vec2::new(1.0, 2.0), CLICK_DRAG_THRESHOLD_PX);
    assert_eq!(d, Some(Vec2::new(-9.0, 2.0)));
    assert_eq!(t.release(Vec2::new(1.0, 2.0)), Release::DragEnd);

    // The next press starts clean.
    t.press(Vec2::new(5.0, 5.0));
    assert_eq!(t.release(Vec2::new(5.0, 5.0)), Release::Click(Vec2::new(5.0, 5.0)));
}

#[test]
fn release_without_press_is_ignored() {
    let mut t = PointerTracker::default();
    assert_eq!(t.move_to(Vec2::new(50.0, 50.0), CLICK_DRAG_THRESHOLD_PX), None);
    assert_eq!(t.release(Vec2::new(50.0, 50.0)), Release::None);
}

#[test]
fn px_to_ndc_maps_corners_and_center() {
    let size = [800, 600];
    assert_eq!(px_to_ndc(Vec2::new(0.0, 0.0), size), Vec2::new(-1.0, 1.0));
    assert_eq!(px_to_ndc(Vec2::new(800.0, 600.0), size), Vec2::new(1.0, -1.0));
    assert_eq!(px_to_ndc(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
}

#[test]
fn px_to_ndc_tolerates_zero_size() {
    let ndc = px_to_ndc(Vec2::new(0.0, 0.0), [0, 0]);
    assert!(ndc.is_finite());
}
