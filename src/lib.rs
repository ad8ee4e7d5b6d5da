//! Whirl is a small wgpu playground for interactive 3D demo scenes: a scene
//! graph with one animated group, an orbit camera with inertial damping, and
//! an ImGui debug panel driven by typed parameter bindings.
//!
//! Each demo is a [`SceneConfig`] preset handed to [`SceneApp`]:
//!
//! ```no_run
//! use whirl::{SceneApp, SceneConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     env_logger::init();
//!     SceneApp::new(SceneConfig::spinning_box())?.run()
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod frame;
pub mod gfx;
pub mod host;
pub mod scene;
pub mod ui;
pub mod wgpu_utils;

pub use app::SceneApp;
pub use config::{CameraConfig, GeometryKind, MeshSpec, SceneConfig};
pub use error::ConfigError;
