use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseScrollDelta},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Base drag sensitivity; the config's rotate-speed multiplier scales this.
const BASE_ROTATE_SPEED: f32 = 0.005;

/// Fraction of the residual orbit velocity that decays each frame.
const DAMPING_FACTOR: f32 = 0.1;

/// Velocities below this are snapped to zero to end the glide.
const VELOCITY_EPSILON: f32 = 1e-5;

/// Mouse-driven orbit controller with inertial damping.
///
/// While the left button is held, drags rotate the camera directly and feed
/// the residual velocity; after release `update()` keeps applying the decaying
/// velocity so the orbit glides to a stop.
pub struct CameraController {
    pub rotate_speed: f32,
    pub pan_enabled: bool,
    yaw_velocity: f32,
    pitch_velocity: f32,
    is_mouse_pressed: bool,
}

impl CameraController {
    /// `rotate_multiplier` scales the base drag sensitivity (the demos use 2).
    pub fn new(rotate_multiplier: f32) -> Self {
        Self {
            rotate_speed: BASE_ROTATE_SPEED * rotate_multiplier,
            pan_enabled: false,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            is_mouse_pressed: false,
        }
    }

    pub fn process_event(
        &mut self,
        event: &DeviceEvent,
        window: &Window,
        camera: &mut OrbitCamera,
    ) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                // A no-op while the orbit distance is locked, which the demos
                // all do.
                camera.add_distance(scroll_amount);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    let delta_yaw = -delta.0 as f32 * self.rotate_speed;
                    let delta_pitch = delta.1 as f32 * self.rotate_speed;

                    camera.add_yaw(delta_yaw);
                    camera.add_pitch(delta_pitch);

                    // Remember the last drag step for the post-release glide.
                    self.yaw_velocity = delta_yaw;
                    self.pitch_velocity = delta_pitch;

                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    /// Advances the damped orbit state. Called once per frame, after the
    /// animation step and before the draw.
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        if self.is_mouse_pressed {
            return;
        }
        if self.yaw_velocity.abs() < VELOCITY_EPSILON
            && self.pitch_velocity.abs() < VELOCITY_EPSILON
        {
            self.yaw_velocity = 0.0;
            self.pitch_velocity = 0.0;
            return;
        }

        camera.add_yaw(self.yaw_velocity);
        camera.add_pitch(self.pitch_velocity);

        self.yaw_velocity *= 1.0 - DAMPING_FACTOR;
        self.pitch_velocity *= 1.0 - DAMPING_FACTOR;
    }

    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Vector3, Zero};

    #[test]
    fn test_velocity_decays_to_rest() {
        let mut controller = CameraController::new(2.0);
        let mut camera = OrbitCamera::new(5.0, 0.2, 0.4, Vector3::zero(), 1.0);

        controller.yaw_velocity = 0.1;
        let yaw_before = camera.yaw;

        for _ in 0..500 {
            controller.update(&mut camera);
        }

        assert_eq!(controller.yaw_velocity, 0.0);
        assert!(camera.yaw > yaw_before);
        // Geometric series: total glide is bounded by v0 / damping.
        assert!(camera.yaw - yaw_before <= 0.1 / DAMPING_FACTOR + 1e-3);
    }

    #[test]
    fn test_update_idle_without_velocity() {
        let mut controller = CameraController::new(2.0);
        let mut camera = OrbitCamera::new(5.0, 0.2, 0.4, Vector3::zero(), 1.0);
        let yaw = camera.yaw;
        let pitch = camera.pitch;

        controller.update(&mut camera);

        assert_eq!(camera.yaw, yaw);
        assert_eq!(camera.pitch, pitch);
    }

    #[test]
    fn test_rotate_multiplier_scales_speed() {
        let controller = CameraController::new(2.0);
        assert_eq!(controller.rotate_speed, BASE_ROTATE_SPEED * 2.0);
        assert!(!controller.pan_enabled);
    }
}
