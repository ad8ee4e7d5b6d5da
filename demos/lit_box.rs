//! The lit box with the full debug panel: position, wireframe, opacity,
//! color, metallic, roughness and ambient intensity.

use whirl::{SceneApp, SceneConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    SceneApp::new(SceneConfig::lit_box())?.run()
}
