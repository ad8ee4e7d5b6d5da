use super::{convert_matrix4_to_array, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Perspective camera orbiting a target point.
///
/// The eye sits on a sphere of radius `distance` around `target`; `pitch` is
/// the elevation from the horizon (so the full polar range [0, π] maps to
/// pitch ∈ [-π/2, π/2]) and `yaw` the azimuth around the vertical axis.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Recomputed in `update()`.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Deg(40.0).into(),
            znear: 1.0,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Fixes the orbit radius: zoom input becomes a no-op while rotation
    /// stays free.
    pub fn lock_distance(&mut self, distance: f32) {
        self.bounds.min_distance = Some(distance);
        self.bounds.max_distance = Some(distance);
        self.set_distance(distance);
    }

    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    /// Recomputes the projection aspect ratio from a new viewport size.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            min_pitch: -std::f32::consts::FRAC_PI_2 + f32::EPSILON,
            max_pitch: std::f32::consts::FRAC_PI_2 - f32::EPSILON,
        }
    }
}

/// Y-up spherical to Cartesian conversion.
fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(5.0, 0.2, 0.4, Vector3::zero(), 1.5)
    }

    #[test]
    fn test_aspect_follows_resize() {
        let mut camera = camera();
        camera.resize_projection(1920, 1080);
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
        camera.resize_projection(800, 600);
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut camera = camera();
        camera.resize_projection(1024, 768);
        let first = camera.aspect;
        camera.resize_projection(1024, 768);
        assert_eq!(camera.aspect, first);
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut camera = camera();
        let before = camera.aspect;
        camera.resize_projection(640, 0);
        assert_eq!(camera.aspect, before);
    }

    #[test]
    fn test_locked_distance_rejects_zoom() {
        let mut camera = camera();
        camera.lock_distance(5.0);
        camera.add_distance(-3.0);
        assert_eq!(camera.distance, 5.0);
        camera.add_distance(10.0);
        assert_eq!(camera.distance, 5.0);
    }

    #[test]
    fn test_pitch_clamped_to_polar_range() {
        let mut camera = camera();
        camera.set_pitch(10.0);
        assert!(camera.pitch <= std::f32::consts::FRAC_PI_2);
        camera.set_pitch(-10.0);
        assert!(camera.pitch >= -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_eye_stays_on_orbit_sphere() {
        let mut camera = camera();
        camera.add_yaw(1.3);
        camera.add_pitch(0.7);
        let radius = (camera.eye - camera.target).magnitude();
        assert!((radius - camera.distance).abs() < 1e-4);
    }
}
