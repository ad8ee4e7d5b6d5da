//! Scene configuration.
//!
//! One [`SceneConfig`] describes everything that varies between the
//! near-identical demo variants: geometry, material, lights, debug-panel
//! bindings and optional async content. The presets below are the four
//! shipped demos.

use std::f32::consts::PI;

use rand::Rng;

use crate::gfx::geometry::{self, GeometryData};
use crate::gfx::light::Light;
use crate::gfx::material::Material;
use crate::scene::{
    AxesHelper, ContentLoader, Group, LoadedContent, Mesh, Node, Scene, ANIMATED_GROUP,
};
use crate::ui::{ParamBinding, SliderRange};

/// Shared background of all demos: rgb(38, 38, 38).
pub const BACKGROUND: [f32; 3] = [38.0 / 255.0, 38.0 / 255.0, 38.0 / 255.0];

/// Initial orbit state and controller sensitivity.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Orbit radius; locked, so zoom is disabled while rotation stays free.
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub rotate_multiplier: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 5.0,
            pitch: 0.2,
            yaw: 0.4,
            rotate_multiplier: 2.0,
        }
    }
}

/// Procedural geometry selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryKind {
    Cube {
        size: f32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Sphere {
        longitude_segments: u32,
        latitude_segments: u32,
    },
}

impl GeometryKind {
    pub fn build(&self) -> GeometryData {
        match *self {
            GeometryKind::Cube { size } => geometry::generate_cube(size),
            GeometryKind::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => geometry::generate_torus(radius, tube, radial_segments, tubular_segments),
            GeometryKind::Sphere {
                longitude_segments,
                latitude_segments,
            } => geometry::generate_sphere(longitude_segments, latitude_segments),
        }
    }
}

/// A mesh placed in the animated group at construction time.
#[derive(Debug, Clone)]
pub struct MeshSpec {
    pub name: String,
    pub geometry: GeometryKind,
    pub material: Material,
    pub position: [f32; 3],
}

impl MeshSpec {
    pub fn new(name: &str, geometry: GeometryKind, material: Material) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material,
            position: [0.0; 3],
        }
    }

    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }
}

/// Everything that distinguishes one demo from another.
pub struct SceneConfig {
    pub title: String,
    pub background: [f32; 3],
    pub camera: CameraConfig,
    pub meshes: Vec<MeshSpec>,
    pub lights: Vec<Light>,
    pub bindings: Vec<ParamBinding>,
    pub content: Option<ContentLoader>,
}

impl SceneConfig {
    /// Builds the scene graph: root → animated group (meshes), lights and a
    /// zero-length axes helper as root children.
    pub fn build_scene(&self) -> Scene {
        let mut scene = Scene::new(self.background);

        let mut animated = Group::new(ANIMATED_GROUP);
        for spec in &self.meshes {
            let mut mesh = Mesh::new(&spec.name, spec.geometry.build(), spec.material.clone());
            mesh.transform.position = spec.position.into();
            animated.add(Node::Mesh(mesh));
        }
        scene.root.add(Node::Group(animated));

        for light in &self.lights {
            scene.root.add(Node::Light(light.clone()));
        }
        scene.root.add(Node::Axes(AxesHelper::new(0.0)));

        scene
    }

    /// A red half-transparent box, no panel bindings.
    pub fn spinning_box() -> Self {
        Self {
            title: "whirl - spinning box".to_string(),
            background: BACKGROUND,
            camera: CameraConfig::default(),
            meshes: vec![MeshSpec::new(
                "box",
                GeometryKind::Cube { size: 1.0 },
                Material::new([1.0, 0.0, 0.0, 0.5], 0.0, 0.5),
            )],
            lights: vec![
                Light::ambient([0.133, 0.133, 0.133], 1.0),
                Light::point([1.0, 1.0, 1.0], 1.0, [1.0, 1.0, 6.0]),
            ],
            bindings: Vec::new(),
            content: None,
        }
    }

    /// The lit box with the full debug-panel binding set.
    pub fn lit_box() -> Self {
        Self {
            title: "whirl - lit box".to_string(),
            background: BACKGROUND,
            camera: CameraConfig::default(),
            meshes: vec![MeshSpec::new(
                "box",
                GeometryKind::Cube { size: 1.0 },
                Material::new([1.0, 0.0, 0.0, 1.0], 0.5, 0.5),
            )],
            lights: vec![
                Light::ambient([1.0, 1.0, 1.0], 0.5),
                Light::point([1.0, 0.565, 0.0], 2.0, [1.0, 1.0, 1.0]),
            ],
            bindings: lit_box_bindings(),
            content: None,
        }
    }

    /// Lighting showcase: two shapes, ambient plus two point lights with
    /// live intensity bindings.
    pub fn lighting_showcase() -> Self {
        Self {
            title: "whirl - lighting".to_string(),
            background: BACKGROUND,
            camera: CameraConfig::default(),
            meshes: vec![
                MeshSpec::new(
                    "sphere",
                    GeometryKind::Sphere {
                        longitude_segments: 32,
                        latitude_segments: 24,
                    },
                    Material::new([0.9, 0.9, 0.9, 1.0], 0.3, 0.4),
                )
                .at([-0.9, 0.0, 0.0]),
                MeshSpec::new(
                    "box",
                    GeometryKind::Cube { size: 1.0 },
                    Material::new([0.9, 0.9, 0.9, 1.0], 0.0, 0.7),
                )
                .at([0.9, 0.0, 0.0]),
            ],
            lights: vec![
                Light::ambient([1.0, 1.0, 1.0], 0.5),
                Light::point([1.0, 1.0, 1.0], 0.5, [2.0, 3.0, 4.0]),
                Light::point([1.0, 0.565, 0.0], 1.0, [-2.0, 1.0, -1.0]),
            ],
            bindings: vec![
                light_intensity_binding(0, "ambient", "Ambient intensity"),
                light_intensity_binding(1, "key_light", "Key light intensity"),
                light_intensity_binding(2, "fill_light", "Fill light intensity"),
            ],
            content: None,
        }
    }

    /// Torus field: the animated centerpiece and 100 scattered donuts arrive
    /// through the async content loader.
    pub fn torus_field() -> Self {
        Self {
            title: "whirl - torus field".to_string(),
            background: BACKGROUND,
            camera: CameraConfig::default(),
            meshes: Vec::new(),
            lights: vec![
                Light::ambient([1.0, 1.0, 1.0], 0.5),
                Light::point([1.0, 1.0, 1.0], 0.5, [2.0, 3.0, 4.0]),
            ],
            bindings: Vec::new(),
            content: Some(ContentLoader::from_fn("torus field", || {
                Ok(build_torus_field())
            })),
        }
    }
}

/// Panel bindings of the lit-box demo.
fn lit_box_bindings() -> Vec<ParamBinding> {
    vec![
        ParamBinding::slider(
            "position_y",
            "Position Y",
            SliderRange::new(-2.0, 2.0, 0.01),
            |scene| scene.primary_mesh_mut().map(|m| m.transform.position.y),
            |scene, v| {
                if let Some(mesh) = scene.primary_mesh_mut() {
                    mesh.transform.position.y = v;
                }
            },
        ),
        ParamBinding::toggle(
            "wireframe",
            "Wireframe",
            |scene| scene.primary_mesh_mut().map(|m| m.material.wireframe),
            |scene, v| {
                if let Some(mesh) = scene.primary_mesh_mut() {
                    mesh.material.wireframe = v;
                }
            },
        ),
        ParamBinding::slider(
            "opacity",
            "Opacity",
            SliderRange::new(0.0, 1.0, 0.01),
            |scene| scene.primary_mesh_mut().map(|m| m.material.opacity()),
            |scene, v| {
                if let Some(mesh) = scene.primary_mesh_mut() {
                    mesh.material.set_opacity(v);
                }
            },
        ),
        ParamBinding::color(
            "mesh_color",
            "Mesh color",
            |scene| scene.primary_mesh_mut().map(|m| m.material.rgb()),
            |scene, v| {
                if let Some(mesh) = scene.primary_mesh_mut() {
                    mesh.material.set_rgb(v);
                }
            },
        ),
        ParamBinding::slider(
            "metallic",
            "Metallic",
            SliderRange::new(0.0, 1.0, 0.0001),
            |scene| scene.primary_mesh_mut().map(|m| m.material.metallic),
            |scene, v| {
                if let Some(mesh) = scene.primary_mesh_mut() {
                    mesh.material.metallic = v;
                }
            },
        ),
        ParamBinding::slider(
            "roughness",
            "Roughness",
            SliderRange::new(0.0, 1.0, 0.0001),
            |scene| scene.primary_mesh_mut().map(|m| m.material.roughness),
            |scene, v| {
                if let Some(mesh) = scene.primary_mesh_mut() {
                    mesh.material.roughness = v;
                }
            },
        ),
        light_intensity_binding(0, "ambient_intensity", "Ambient intensity"),
    ]
}

fn light_intensity_binding(index: usize, id: &str, label: &str) -> ParamBinding {
    ParamBinding::slider(
        id,
        label,
        SliderRange::new(0.0, 2.0, 0.01),
        move |scene| scene.light_mut(index).map(|l| l.intensity()),
        move |scene, v| {
            if let Some(light) = scene.light_mut(index) {
                light.set_intensity(v);
            }
        },
    )
}

/// Builds the torus-field content: one centerpiece torus for the animated
/// group and 100 randomly placed donuts for the scene root.
fn build_torus_field() -> LoadedContent {
    let mut rng = rand::rng();
    let material = Material::new([0.85, 0.75, 0.6, 1.0], 0.8, 0.35);

    let centerpiece = {
        let mut mesh = Mesh::new(
            "centerpiece",
            geometry::generate_torus(0.6, 0.25, 24, 48),
            material.clone(),
        );
        mesh.transform.rotation.x = PI / 2.0;
        mesh
    };

    let donut_geometry = geometry::generate_torus(0.3, 0.2, 20, 45);
    let mut donuts = Vec::with_capacity(100);
    for i in 0..100 {
        let mut donut = Mesh::new(
            &format!("donut_{i}"),
            donut_geometry.clone(),
            material.clone(),
        );
        donut.transform.position.x = rng.random_range(-5.0..5.0);
        donut.transform.position.y = rng.random_range(-5.0..5.0);
        donut.transform.position.z = rng.random_range(-5.0..5.0);
        donut.transform.rotation.x = rng.random_range(0.0..PI);
        donut.transform.rotation.y = rng.random_range(0.0..PI);
        donut.transform.scale = rng.random::<f32>().max(0.05);
        donuts.push(Node::Mesh(donut));
    }

    LoadedContent {
        animated: vec![Node::Mesh(centerpiece)],
        root: donuts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::BindingTable;

    #[test]
    fn test_presets_build_scenes() {
        let spinning = SceneConfig::spinning_box().build_scene();
        assert_eq!(spinning.mesh_count(), 1);
        assert_eq!(spinning.lights().len(), 2);

        let showcase = SceneConfig::lighting_showcase().build_scene();
        assert_eq!(showcase.mesh_count(), 2);
        assert_eq!(showcase.lights().len(), 3);
    }

    #[test]
    fn test_animated_group_always_exists() {
        let mut scene = SceneConfig::torus_field().build_scene();
        assert_eq!(scene.mesh_count(), 0);
        assert!(scene.animated_group_mut().is_some());
    }

    #[test]
    fn test_preset_bindings_validate() {
        for bindings in [
            SceneConfig::spinning_box().bindings,
            SceneConfig::lit_box().bindings,
            SceneConfig::lighting_showcase().bindings,
            SceneConfig::torus_field().bindings,
        ] {
            assert!(BindingTable::new(bindings).is_ok());
        }
    }

    #[test]
    fn test_lit_box_bindings_target_scene() {
        let config = SceneConfig::lit_box();
        let mut scene = config.build_scene();
        let table = BindingTable::new(config.bindings).unwrap();

        let opacity = table.get("opacity").unwrap();
        opacity.apply(&mut scene, crate::ui::ParamValue::Scalar(0.3));
        assert_eq!(
            scene.primary_mesh_mut().unwrap().material.opacity(),
            0.3
        );

        let ambient = table.get("ambient_intensity").unwrap();
        ambient.apply(&mut scene, crate::ui::ParamValue::Scalar(0.9));
        assert_eq!(scene.light_mut(0).unwrap().intensity(), 0.9);
    }

    #[test]
    fn test_torus_field_content_shape() {
        let config = SceneConfig::torus_field();
        let content = config.content.unwrap().run_blocking().unwrap();
        assert_eq!(content.animated.len(), 1);
        assert_eq!(content.root.len(), 100);

        for node in &content.root {
            let Node::Mesh(mesh) = node else {
                panic!("expected donut mesh");
            };
            assert!(mesh.transform.position.x.abs() <= 5.0);
            assert!(mesh.transform.scale > 0.0);
        }
    }
}
