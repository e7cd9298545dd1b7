/// Page wiring and render constants for the web front-end.
///
/// Camera, framing and choreography tuning lives in `showcase_core::constants`;
/// this file only holds what the browser side needs.
// Registry location, relative to the page
pub const MODELS_URL: &str = "models.json";

// Canvas backing store
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0; // cap for dense displays
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after a stalled or backgrounded tab

// Offscreen formats
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

// Transparent; the CSS background layers sit behind the canvas
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

// Upper bound on passes per frame; uniform buffers are allocated per pass
pub const MAX_PASSES: usize = 2;

// Initial node uniform slots; grows on demand
pub const NODE_SLOTS_INITIAL: usize = 16;

// DOM ids
pub const CANVAS_ID: &str = "app-canvas";
pub const APP_ROOT_ID: &str = "app-root";
pub const DESKTOP_NOTICE_ID: &str = "desktop-only";
pub const INTRO_ID: &str = "intro";
pub const INTRO_ENTER_ID: &str = "intro-enter";
pub const MAIN_ID: &str = "main-stage";
pub const LANDING_ID: &str = "alternate-landing";
pub const LANDING_DONE_ID: &str = "landing-complete";
pub const THANKS_ID: &str = "thanks";
pub const BACKGROUND_ID: &str = "parallax-background";
pub const LOADING_ID: &str = "loading-screen";
pub const LOADING_PROGRESS_ID: &str = "loading-progress";
pub const LOADING_ERROR_ID: &str = "loading-error";
pub const RENDER_ERROR_ID: &str = "render-error";
pub const RENDER_RETRY_ID: &str = "render-retry";
pub const NAV_ID: &str = "model-nav";
pub const NAV_PREV_ID: &str = "nav-prev";
pub const NAV_NEXT_ID: &str = "nav-next";
pub const NAV_DOTS_ID: &str = "nav-dots";
pub const TITLE_ID: &str = "model-title";
pub const LINK_ID: &str = "model-link";
pub const QUIT_ID: &str = "quit-button";
pub const CONTINUE_ID: &str = "continue-button";
pub const RESET_FADE_ID: &str = "reset-fade";
pub const PHASE_FADE_ID: &str = "phase-fade";
pub const TRANSITION_ID: &str = "portal-transition";
pub const PORTAL_VIDEO_ID: &str = "portal-video";
pub const INTERSTITIAL_ID: &str = "portal-quote";
