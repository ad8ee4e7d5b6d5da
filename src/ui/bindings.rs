//! Typed debug-parameter bindings.
//!
//! Each panel widget is bound to a scene property through an explicit
//! getter/setter pair instead of a dynamic property path. The table is
//! validated once at construction; at runtime, scalar writes are clamped to
//! the declared range before they touch the scene — an out-of-range value is
//! never applied as-is.

use crate::error::ConfigError;
use crate::scene::Scene;

/// Value carried between a widget and its bound scene property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Scalar(f32),
    Toggle(bool),
    Color([f32; 3]),
}

/// Numeric range and step for slider parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }
}

/// Widget kind for a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    Slider(SliderRange),
    Toggle,
    Color,
}

type Getter = Box<dyn Fn(&mut Scene) -> Option<ParamValue>>;
type Setter = Box<dyn Fn(&mut Scene, ParamValue)>;

/// One live binding between a panel widget and a scene property.
///
/// The getter returns `None` while the target node doesn't exist yet (for
/// example before async content has arrived); the panel then skips the
/// widget for that frame.
pub struct ParamBinding {
    pub id: String,
    pub label: String,
    pub kind: ParamKind,
    get: Getter,
    set: Setter,
}

impl ParamBinding {
    pub fn slider<G, S>(id: &str, label: &str, range: SliderRange, get: G, set: S) -> Self
    where
        G: Fn(&mut Scene) -> Option<f32> + 'static,
        S: Fn(&mut Scene, f32) + 'static,
    {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: ParamKind::Slider(range),
            get: Box::new(move |scene| get(scene).map(ParamValue::Scalar)),
            set: Box::new(move |scene, value| {
                if let ParamValue::Scalar(v) = value {
                    set(scene, v);
                }
            }),
        }
    }

    pub fn toggle<G, S>(id: &str, label: &str, get: G, set: S) -> Self
    where
        G: Fn(&mut Scene) -> Option<bool> + 'static,
        S: Fn(&mut Scene, bool) + 'static,
    {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: ParamKind::Toggle,
            get: Box::new(move |scene| get(scene).map(ParamValue::Toggle)),
            set: Box::new(move |scene, value| {
                if let ParamValue::Toggle(v) = value {
                    set(scene, v);
                }
            }),
        }
    }

    pub fn color<G, S>(id: &str, label: &str, get: G, set: S) -> Self
    where
        G: Fn(&mut Scene) -> Option<[f32; 3]> + 'static,
        S: Fn(&mut Scene, [f32; 3]) + 'static,
    {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind: ParamKind::Color,
            get: Box::new(move |scene| get(scene).map(ParamValue::Color)),
            set: Box::new(move |scene, value| {
                if let ParamValue::Color(v) = value {
                    set(scene, v);
                }
            }),
        }
    }

    /// Current value of the bound property, if the target exists.
    pub fn read(&self, scene: &mut Scene) -> Option<ParamValue> {
        (self.get)(scene)
    }

    /// Writes a value to the bound property immediately. Scalars are clamped
    /// to the declared range first.
    pub fn apply(&self, scene: &mut Scene, value: ParamValue) {
        let value = match (self.kind, value) {
            (ParamKind::Slider(range), ParamValue::Scalar(v)) => {
                ParamValue::Scalar(v.clamp(range.min, range.max))
            }
            (ParamKind::Toggle, v @ ParamValue::Toggle(_)) => v,
            (ParamKind::Color, v @ ParamValue::Color(_)) => v,
            // Kind mismatch: drop the write rather than corrupt the target.
            _ => return,
        };
        (self.set)(scene, value);
    }
}

/// Validated set of panel bindings.
pub struct BindingTable {
    bindings: Vec<ParamBinding>,
}

impl BindingTable {
    /// Validates ranges, steps and id uniqueness up front.
    pub fn new(bindings: Vec<ParamBinding>) -> Result<Self, ConfigError> {
        for (i, binding) in bindings.iter().enumerate() {
            if let ParamKind::Slider(range) = binding.kind {
                if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
                    return Err(ConfigError::InvalidRange {
                        id: binding.id.clone(),
                        min: range.min,
                        max: range.max,
                    });
                }
                if !(range.step > 0.0) || range.step > range.max - range.min {
                    return Err(ConfigError::InvalidStep {
                        id: binding.id.clone(),
                    });
                }
            }
            if bindings[..i].iter().any(|other| other.id == binding.id) {
                return Err(ConfigError::DuplicateParam {
                    id: binding.id.clone(),
                });
            }
        }
        Ok(Self { bindings })
    }

    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamBinding> {
        self.bindings.iter()
    }

    pub fn get(&self, id: &str) -> Option<&ParamBinding> {
        self.bindings.iter().find(|binding| binding.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cube;
    use crate::gfx::material::Material;
    use crate::scene::{Group, Mesh, Node, ANIMATED_GROUP};

    fn test_scene() -> Scene {
        let mut scene = Scene::new([0.0; 3]);
        let mut animated = Group::new(ANIMATED_GROUP);
        animated.add(Node::Mesh(Mesh::new(
            "cube",
            generate_cube(1.0),
            Material::new([1.0, 0.0, 0.0, 0.5], 0.0, 0.5),
        )));
        scene.root.add(Node::Group(animated));
        scene
    }

    fn opacity_binding() -> ParamBinding {
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
        )
    }

    #[test]
    fn test_set_applies_immediately() {
        let mut scene = test_scene();
        let binding = opacity_binding();

        binding.apply(&mut scene, ParamValue::Scalar(0.75));
        assert_eq!(binding.read(&mut scene), Some(ParamValue::Scalar(0.75)));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut scene = test_scene();
        let binding = opacity_binding();

        binding.apply(&mut scene, ParamValue::Scalar(7.0));
        assert_eq!(binding.read(&mut scene), Some(ParamValue::Scalar(1.0)));

        binding.apply(&mut scene, ParamValue::Scalar(-3.0));
        assert_eq!(binding.read(&mut scene), Some(ParamValue::Scalar(0.0)));
    }

    #[test]
    fn test_kind_mismatch_is_dropped() {
        let mut scene = test_scene();
        let binding = opacity_binding();
        let before = binding.read(&mut scene);

        binding.apply(&mut scene, ParamValue::Toggle(true));
        assert_eq!(binding.read(&mut scene), before);
    }

    #[test]
    fn test_missing_target_reads_none() {
        let mut scene = Scene::new([0.0; 3]);
        let binding = opacity_binding();
        assert_eq!(binding.read(&mut scene), None);
    }

    #[test]
    fn test_table_rejects_inverted_range() {
        let binding = ParamBinding::slider(
            "bad",
            "Bad",
            SliderRange::new(1.0, 0.0, 0.1),
            |_| Some(0.0),
            |_, _| (),
        );
        assert!(matches!(
            BindingTable::new(vec![binding]),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_table_rejects_bad_step() {
        let binding = ParamBinding::slider(
            "bad_step",
            "Bad step",
            SliderRange::new(0.0, 1.0, 0.0),
            |_| Some(0.0),
            |_, _| (),
        );
        assert!(matches!(
            BindingTable::new(vec![binding]),
            Err(ConfigError::InvalidStep { .. })
        ));
    }

    #[test]
    fn test_table_rejects_duplicate_ids() {
        let table = BindingTable::new(vec![opacity_binding(), opacity_binding()]);
        assert!(matches!(table, Err(ConfigError::DuplicateParam { .. })));
    }

    #[test]
    fn test_table_lookup() {
        let table = BindingTable::new(vec![opacity_binding()]).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get("opacity").is_some());
        assert!(table.get("missing").is_none());
    }
}
