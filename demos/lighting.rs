//! Lighting showcase: sphere and box under ambient plus two point lights,
//! with live intensity sliders.

use whirl::{SceneApp, SceneConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    SceneApp::new(SceneConfig::lighting_showcase())?.run()
}
