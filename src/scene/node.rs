//! Scene-graph node types.
//!
//! The scene owns a tree of nodes: groups with local transforms, meshes
//! (geometry + material), lights, and the axes helper. Nodes are never shared
//! between scenes.

use cgmath::{Matrix4, Vector3};

use crate::gfx::geometry::GeometryData;
use crate::gfx::light::Light;
use crate::gfx::material::Material;
use crate::gfx::surface::MeshGpu;

/// Local transform: position, XYZ Euler rotation in radians, uniform scale.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_y(cgmath::Rad(self.rotation.y))
            * Matrix4::from_angle_x(cgmath::Rad(self.rotation.x))
            * Matrix4::from_angle_z(cgmath::Rad(self.rotation.z))
            * Matrix4::from_scale(self.scale)
    }
}

/// A visual node in the scene tree.
pub enum Node {
    Group(Group),
    Mesh(Mesh),
    Light(Light),
    Axes(AxesHelper),
}

/// A named sub-tree with a shared transform.
pub struct Group {
    pub name: String,
    pub transform: Transform,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::default(),
            children: Vec::new(),
        }
    }

    /// Appends a child; chainable.
    pub fn add(&mut self, node: Node) -> &mut Self {
        self.children.push(node);
        self
    }

    /// Depth-first search for a descendant group by name.
    pub fn find_group_mut(&mut self, name: &str) -> Option<&mut Group> {
        if self.name == name {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Group(group) = child {
                if let Some(found) = group.find_group_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Collects every visible mesh in the sub-tree with its composed world
    /// matrix.
    pub fn collect_meshes_mut<'a>(
        &'a mut self,
        parent: Matrix4<f32>,
        out: &mut Vec<(Matrix4<f32>, &'a mut Mesh)>,
    ) {
        let world = parent * self.transform.matrix();
        for child in &mut self.children {
            match child {
                Node::Group(group) => group.collect_meshes_mut(world, out),
                Node::Mesh(mesh) => {
                    if mesh.visible {
                        out.push((world * mesh.transform.matrix(), mesh));
                    }
                }
                _ => (),
            }
        }
    }

    /// Collects every light in the sub-tree together with its world position
    /// (the group transform applied to a point light's local position).
    pub fn collect_lights(&self, parent: Matrix4<f32>, out: &mut Vec<(Light, [f32; 3])>) {
        let world = parent * self.transform.matrix();
        for child in &self.children {
            match child {
                Node::Group(group) => group.collect_lights(world, out),
                Node::Light(light) => {
                    let position = match light {
                        Light::Point { position, .. } => {
                            let p = world
                                * cgmath::Vector4::new(position[0], position[1], position[2], 1.0);
                            [p.x, p.y, p.z]
                        }
                        Light::Ambient { .. } => [0.0; 3],
                    };
                    out.push((light.clone(), position));
                }
                _ => (),
            }
        }
    }

    pub(crate) fn collect_lights_mut<'a>(&'a mut self, out: &mut Vec<&'a mut Light>) {
        for child in &mut self.children {
            match child {
                Node::Group(group) => group.collect_lights_mut(out),
                Node::Light(light) => out.push(light),
                _ => (),
            }
        }
    }

    pub(crate) fn first_mesh_mut(&mut self) -> Option<&mut Mesh> {
        for child in &mut self.children {
            match child {
                Node::Mesh(mesh) => return Some(mesh),
                Node::Group(group) => {
                    if let Some(mesh) = group.first_mesh_mut() {
                        return Some(mesh);
                    }
                }
                _ => (),
            }
        }
        None
    }

    pub fn mesh_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| match child {
                Node::Mesh(_) => 1,
                Node::Group(group) => group.mesh_count(),
                _ => 0,
            })
            .sum()
    }
}

/// A renderable mesh: geometry, material and a local transform.
pub struct Mesh {
    pub name: String,
    pub transform: Transform,
    pub geometry: GeometryData,
    pub material: Material,
    pub visible: bool,
    pub(crate) gpu: Option<MeshGpu>,
}

impl Mesh {
    pub fn new(name: &str, geometry: GeometryData, material: Material) -> Self {
        Self {
            name: name.to_string(),
            transform: Transform::default(),
            geometry,
            material,
            visible: true,
            gpu: None,
        }
    }
}

/// Axis helper reserved for debugging. The demos construct it with size 0,
/// so it never draws; the renderer skips zero-size helpers.
#[derive(Debug, Clone, Copy)]
pub struct AxesHelper {
    pub size: f32,
}

impl AxesHelper {
    pub fn new(size: f32) -> Self {
        Self { size }
    }

    pub fn is_visible(&self) -> bool {
        self.size > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use cgmath::SquareMatrix;

    fn mesh(name: &str) -> Mesh {
        Mesh::new(name, generate_cube(1.0), Material::default())
    }

    #[test]
    fn test_world_transform_composes_group_and_mesh() {
        let mut root = Group::new("root");
        let mut inner = Group::new("inner");
        inner.transform.position.y = 2.0;
        let mut m = mesh("cube");
        m.transform.position.x = 3.0;
        inner.add(Node::Mesh(m));
        root.add(Node::Group(inner));

        let mut meshes = Vec::new();
        root.collect_meshes_mut(Matrix4::identity(), &mut meshes);

        assert_eq!(meshes.len(), 1);
        let origin = meshes[0].0 * cgmath::Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(origin.x, 3.0);
        assert_eq!(origin.y, 2.0);
    }

    #[test]
    fn test_hidden_meshes_are_skipped() {
        let mut root = Group::new("root");
        let mut hidden = mesh("hidden");
        hidden.visible = false;
        root.add(Node::Mesh(hidden)).add(Node::Mesh(mesh("shown")));

        let mut meshes = Vec::new();
        root.collect_meshes_mut(Matrix4::identity(), &mut meshes);

        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].1.name, "shown");
    }

    #[test]
    fn test_find_group_by_name() {
        let mut root = Group::new("root");
        root.add(Node::Group(Group::new("animated")));
        assert!(root.find_group_mut("animated").is_some());
        assert!(root.find_group_mut("missing").is_none());
    }

    #[test]
    fn test_light_world_position_follows_group() {
        let mut root = Group::new("root");
        root.transform.position.x = 1.0;
        root.add(Node::Light(Light::point([1.0; 3], 1.0, [1.0, 1.0, 1.0])));

        let mut lights = Vec::new();
        root.collect_lights(Matrix4::identity(), &mut lights);

        assert_eq!(lights.len(), 1);
        assert_eq!(lights[0].1, [2.0, 1.0, 1.0]);
    }

    #[test]
    fn test_zero_size_axes_helper_is_invisible() {
        assert!(!AxesHelper::new(0.0).is_visible());
        assert!(AxesHelper::new(1.0).is_visible());
    }
}
