//! Debug-parameter panel: typed bindings and the ImGui overlay that renders
//! them.

pub mod bindings;
pub mod manager;
pub mod panel;

pub use bindings::{BindingTable, ParamBinding, ParamKind, ParamValue, SliderRange};
pub use manager::UiManager;
pub use panel::draw_debug_panel;
