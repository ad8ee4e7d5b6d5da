//! Material definitions for the demo meshes.
//!
//! Materials live on the mesh that uses them and are re-uploaded to the GPU
//! whenever the debug panel mutates them.

/// Surface material with a PBR-ish parameter set.
///
/// `base_color` carries opacity in its alpha channel; `wireframe` switches the
/// mesh to the line-polygon pipeline when the adapter supports it.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            wireframe: false,
        }
    }
}

impl Material {
    /// Creates a new material, clamping factors to their valid ranges.
    pub fn new(base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            wireframe: false,
        }
    }

    /// Builder pattern: set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Builder pattern: set alpha transparency
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: set metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    pub fn opacity(&self) -> f32 {
        self.base_color[3]
    }

    pub fn set_opacity(&mut self, alpha: f32) {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
    }

    pub fn rgb(&self) -> [f32; 3] {
        [self.base_color[0], self.base_color[1], self.base_color[2]]
    }

    pub fn set_rgb(&mut self, rgb: [f32; 3]) {
        self.base_color[0] = rgb[0];
        self.base_color[1] = rgb[1];
        self.base_color[2] = rgb[2];
    }

    pub(crate) fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            metallic: self.metallic,
            roughness: self.roughness,
            _padding: [0.0; 2],
        }
    }
}

/// GPU uniform data for materials; must match the shader's `MaterialUniform`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    _padding: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_clamped() {
        let material = Material::new([1.0, 0.0, 0.0, 0.5], 1.5, -0.2);
        assert_eq!(material.metallic, 1.0);
        assert_eq!(material.roughness, 0.0);
    }

    #[test]
    fn test_opacity_roundtrip() {
        let mut material = Material::default();
        material.set_opacity(0.25);
        assert_eq!(material.opacity(), 0.25);
        material.set_opacity(2.0);
        assert_eq!(material.opacity(), 1.0);
    }
}
