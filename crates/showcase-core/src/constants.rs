use glam::Vec3;

// Shared camera/choreography tuning constants used by the core and the web frontend.

// Camera
pub const FOV_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const OVERVIEW_EYE: [f32; 3] = [0.0, 0.0, 12.0];
pub const OVERVIEW_LOOK: [f32; 3] = [0.0, 0.0, 0.0];

// Focus framing
pub const FOCUS_DISTANCE_MULTIPLIER: f32 = 2.3; // breathing room around a focused item
pub const FOCUS_FRAME_NDC: [f32; 2] = [-0.3, -0.3]; // where the focused item lands on screen

// Camera easing: fraction of the remaining error left after one second
pub const CAMERA_LERP_BASE: f32 = 0.001;
pub const CAMERA_ARRIVAL_EPSILON_SQ: f32 = 1e-4;
pub const CAMERA_TARGET_MOVED_EPSILON_SQ: f32 = 1e-6;

// Orbit controls (active only while an item is focused)
pub const ORBIT_DAMPING: f32 = 0.08;
pub const ORBIT_ROTATE_SPEED: f32 = 0.9;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3;

// Render nodes
pub const DEFAULT_FOCUS_SCALE: f32 = 1.3;
pub const FADE_HALF_LIFE_SEC: f32 = 0.5;
pub const HIDE_OPACITY_THRESHOLD: f32 = 0.02;

// Navigation
pub const MIN_DISCOVERED_FOR_NAVIGATION: usize = 2;

// Portal transition
pub const PORTAL_PLAYBACK_RATE: f64 = 4.0;
pub const PORTAL_MID_OFFSET_SEC: f64 = 0.21; // just past the middle of the clip
pub const INTERSTITIAL_DISPLAY_SEC: f64 = 2.5;

// Deselect reset fade (black)
pub const RESET_FADE_IN_SEC: f32 = 0.3;
pub const RESET_HOLD_SEC: f32 = 0.4;
pub const RESET_FADE_OUT_SEC: f32 = 0.6;

// Phase change fade (white)
pub const PHASE_FADE_SWITCH_SEC: f32 = 0.6;
pub const PHASE_FADE_CLEAR_SEC: f32 = 1.2;

// Layout
pub const DESKTOP_MIN_WIDTH: u32 = 1024;

#[inline]
pub fn overview_eye() -> Vec3 {
    Vec3::from_array(OVERVIEW_EYE)
}

#[inline]
pub fn overview_look() -> Vec3 {
    Vec3::from_array(OVERVIEW_LOOK)
}

#[inline]
pub fn fov_y_radians() -> f32 {
    FOV_DEG.to_radians()
}
