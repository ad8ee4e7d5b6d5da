//! A half-transparent red box spinning above the origin.

use whirl::{SceneApp, SceneConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    SceneApp::new(SceneConfig::spinning_box())?.run()
}
