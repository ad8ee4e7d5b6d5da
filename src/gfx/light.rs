//! Light types and their GPU uniform representation.
//!
//! Every demo scene carries one ambient term plus up to [`MAX_POINT_LIGHTS`]
//! point lights, packed into the global uniform buffer each frame.

/// Maximum number of point lights the shader's light array holds.
pub const MAX_POINT_LIGHTS: usize = 4;

/// A light source attached to the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: [f32; 3],
        intensity: f32,
    },
    Point {
        color: [f32; 3],
        intensity: f32,
        position: [f32; 3],
    },
}

impl Light {
    pub fn ambient(color: [f32; 3], intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    pub fn point(color: [f32; 3], intensity: f32, position: [f32; 3]) -> Self {
        Light::Point {
            color,
            intensity,
            position,
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient { intensity, .. } | Light::Point { intensity, .. } => *intensity,
        }
    }

    pub fn set_intensity(&mut self, value: f32) {
        match self {
            Light::Ambient { intensity, .. } | Light::Point { intensity, .. } => {
                *intensity = value;
            }
        }
    }
}

/// Per-point-light GPU data; 32 bytes, std140-compatible.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    _padding: f32,
}

/// Aggregated light state for the global uniform buffer.
///
/// Ambient contributions from all ambient lights are pre-multiplied into a
/// single rgb term. Point lights beyond the array capacity are dropped.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub ambient: [f32; 4],
    pub point_count: u32,
    _padding: [u32; 3],
    pub points: [PointLightUniform; MAX_POINT_LIGHTS],
}

impl LightsUniform {
    /// Packs a slice of scene lights (paired with their world positions for
    /// point lights) into the fixed-size uniform layout.
    pub fn pack(lights: &[(Light, [f32; 3])]) -> Self {
        let mut uniform = LightsUniform::default();
        let mut ambient = [0.0f32; 3];

        for (light, world_position) in lights {
            match light {
                Light::Ambient { color, intensity } => {
                    for i in 0..3 {
                        ambient[i] += color[i] * intensity;
                    }
                }
                Light::Point {
                    color, intensity, ..
                } => {
                    let slot = uniform.point_count as usize;
                    if slot >= MAX_POINT_LIGHTS {
                        continue;
                    }
                    uniform.points[slot] = PointLightUniform {
                        position: *world_position,
                        intensity: *intensity,
                        color: *color,
                        _padding: 0.0,
                    };
                    uniform.point_count += 1;
                }
            }
        }

        uniform.ambient = [ambient[0], ambient[1], ambient[2], 1.0];
        uniform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_accumulates_ambient() {
        let lights = vec![
            (Light::ambient([1.0, 1.0, 1.0], 0.5), [0.0; 3]),
            (Light::ambient([0.0, 1.0, 0.0], 0.5), [0.0; 3]),
        ];
        let uniform = LightsUniform::pack(&lights);
        assert_eq!(uniform.point_count, 0);
        assert_eq!(uniform.ambient[0], 0.5);
        assert_eq!(uniform.ambient[1], 1.0);
    }

    #[test]
    fn test_pack_caps_point_lights() {
        let lights: Vec<_> = (0..6)
            .map(|i| {
                (
                    Light::point([1.0, 0.5, 0.2], 1.0, [i as f32, 0.0, 0.0]),
                    [i as f32, 0.0, 0.0],
                )
            })
            .collect();
        let uniform = LightsUniform::pack(&lights);
        assert_eq!(uniform.point_count as usize, MAX_POINT_LIGHTS);
        // World position is the one that ends up on the GPU
        assert_eq!(uniform.points[2].position, [2.0, 0.0, 0.0]);
    }
}
