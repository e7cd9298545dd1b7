pub mod asset;
pub mod cache;
pub mod camera;
pub mod constants;
pub mod error;
pub mod framing;
pub mod loading;
pub mod navigation;
pub mod node;
pub mod orbit;
pub mod passes;
pub mod portal;
pub mod progression;
pub mod registry;
pub mod rendered;
pub mod reset;
pub mod rig;
pub mod scene;
pub mod schedule;
pub mod selection;
pub mod showcase;
pub mod view;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use error::{AssetError, RegistryError};
pub use registry::{DepthTier, Facet, ModelConfig, ModelRegistry, PortalGate};
pub use showcase::{ClickOutcome, FrameOutput, Showcase};
