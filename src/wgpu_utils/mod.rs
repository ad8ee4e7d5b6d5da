//! WGPU helper utilities shared by the rendering code.

pub mod binding;
pub mod uniform_buffer;

pub use binding::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::UniformBuffer;
