//! An animated centerpiece torus among 100 randomly scattered donuts, all
//! arriving through the async content loader.

use whirl::{SceneApp, SceneConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    SceneApp::new(SceneConfig::torus_field())?.run()
}
