//! Scene graph: an owning tree of groups, meshes, lights and helpers.

pub mod animation;
pub mod content;
pub mod node;

pub use animation::{Animator, ROTATION_STEP};
pub use content::{ContentLoader, LoadedContent};
pub use node::{AxesHelper, Group, Mesh, Node, Transform};

use cgmath::{Matrix4, SquareMatrix};

use crate::gfx::light::Light;

/// Name of the group the animator drives each frame.
pub const ANIMATED_GROUP: &str = "animated";

/// Root of the visual tree, exclusively owned by one app instance.
pub struct Scene {
    pub background: [f32; 3],
    pub root: Group,
}

impl Scene {
    pub fn new(background: [f32; 3]) -> Self {
        Self {
            background,
            root: Group::new("root"),
        }
    }

    /// The group mutated by the per-frame animation step.
    pub fn animated_group_mut(&mut self) -> Option<&mut Group> {
        self.root.find_group_mut(ANIMATED_GROUP)
    }

    /// First mesh in the tree, the one the panel bindings target.
    pub fn primary_mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.root.first_mesh_mut()
    }

    /// Collects every visible mesh with its world matrix, in tree order.
    pub fn meshes_mut(&mut self) -> Vec<(Matrix4<f32>, &mut Mesh)> {
        let mut out = Vec::new();
        self.root.collect_meshes_mut(Matrix4::identity(), &mut out);
        out
    }

    /// Snapshot of all lights with their world positions.
    pub fn lights(&self) -> Vec<(Light, [f32; 3])> {
        let mut out = Vec::new();
        self.root.collect_lights(Matrix4::identity(), &mut out);
        out
    }

    /// Nth light in tree order, for panel bindings on light intensity.
    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        let mut lights = Vec::new();
        self.root.collect_lights_mut(&mut lights);
        lights.into_iter().nth(index)
    }

    pub fn mesh_count(&self) -> usize {
        self.root.mesh_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use crate::gfx::material::Material;

    fn scene_with_animated_cube() -> Scene {
        let mut scene = Scene::new([0.15, 0.15, 0.15]);
        let mut animated = Group::new(ANIMATED_GROUP);
        animated.add(Node::Mesh(Mesh::new(
            "cube",
            generate_cube(1.0),
            Material::default(),
        )));
        scene.root.add(Node::Group(animated));
        scene
    }

    #[test]
    fn test_animated_group_lookup() {
        let mut scene = scene_with_animated_cube();
        assert!(scene.animated_group_mut().is_some());
        assert_eq!(scene.mesh_count(), 1);
    }

    #[test]
    fn test_primary_mesh_is_first_in_tree() {
        let mut scene = scene_with_animated_cube();
        assert_eq!(scene.primary_mesh_mut().unwrap().name, "cube");
    }

    #[test]
    fn test_light_mut_indexing() {
        let mut scene = scene_with_animated_cube();
        scene
            .root
            .add(Node::Light(Light::ambient([1.0; 3], 0.5)))
            .add(Node::Light(Light::point([1.0; 3], 2.0, [1.0, 1.0, 1.0])));

        assert_eq!(scene.light_mut(0).unwrap().intensity(), 0.5);
        assert_eq!(scene.light_mut(1).unwrap().intensity(), 2.0);
        assert!(scene.light_mut(2).is_none());
    }
}
