//! Graphics: camera, geometry, materials, lights and the wgpu render surface.

pub mod camera;
pub mod geometry;
pub mod light;
pub mod material;
pub mod pipeline;
pub mod surface;
pub mod vertex;

pub use camera::{CameraController, CameraManager, OrbitCamera};
pub use light::Light;
pub use material::Material;
pub use surface::RenderSurface;
