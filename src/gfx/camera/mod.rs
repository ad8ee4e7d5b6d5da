//! Orbit camera and its interactive controller.

pub mod controller;
pub mod orbit_camera;

pub use controller::CameraController;
pub use orbit_camera::{OrbitCamera, OrbitCameraBounds};

use cgmath::Matrix4;
use winit::{event::DeviceEvent, window::Window};

/// GPU uniform data for the camera; must match the shader's globals.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

pub(crate) fn convert_matrix4_to_array(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    matrix.into()
}

/// Owns the camera together with the controller that drives it.
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Routes a raw device event into the controller.
    pub fn process_event(&mut self, event: &DeviceEvent, window: &Window) {
        self.controller
            .process_event(event, window, &mut self.camera);
    }

    /// Per-frame controller advance (inertial damping decay).
    pub fn update(&mut self) {
        self.controller.update(&mut self.camera);
    }
}
