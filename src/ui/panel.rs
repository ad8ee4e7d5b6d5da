// src/ui/panel.rs
//! Debug-parameter panel.
//!
//! Renders one widget per binding in the table and writes edits back to the
//! scene immediately, through the binding's clamped setter.

use crate::scene::Scene;

use super::bindings::{BindingTable, ParamKind, ParamValue};

/// Draws the debug panel and applies any edits to the scene.
///
/// Bindings whose target doesn't exist yet (async content still loading) are
/// skipped for the frame.
pub fn draw_debug_panel(ui: &imgui::Ui, scene: &mut Scene, table: &BindingTable) {
    if table.is_empty() {
        return;
    }

    let display_size = ui.io().display_size;
    // Guard against invalid display size that could cause crashes
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Debug Parameters")
        .size([320.0, 0.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            for binding in table.iter() {
                let Some(value) = binding.read(scene) else {
                    continue;
                };

                match (binding.kind, value) {
                    (ParamKind::Slider(range), ParamValue::Scalar(mut v)) => {
                        if ui.slider(&binding.label, range.min, range.max, &mut v) {
                            binding.apply(scene, ParamValue::Scalar(v));
                        }
                    }
                    (ParamKind::Toggle, ParamValue::Toggle(mut v)) => {
                        if ui.checkbox(&binding.label, &mut v) {
                            binding.apply(scene, ParamValue::Toggle(v));
                        }
                    }
                    (ParamKind::Color, ParamValue::Color(mut v)) => {
                        if ui.color_edit3(&binding.label, &mut v) {
                            binding.apply(scene, ParamValue::Color(v));
                        }
                    }
                    _ => (),
                }
            }
        });
}
