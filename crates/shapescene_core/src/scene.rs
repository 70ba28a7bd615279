//! Scene graph produced by a conversion run.
//!
//! The scene is a flat list of nodes. Placements are baked into vertex
//! positions, so every node produced by the assembler carries an identity
//! transform; a writer for a concrete container format only has to walk
//! `nodes` and emit their primitives and materials.

use serde::{Deserialize, Serialize};
use shapescene_math::{Aabb, Mat4};

use crate::context::InstanceLabel;
use crate::primitive::ScenePrimitive;

/// Anything that can accept converted nodes.
pub trait SceneSink {
    /// Append a node made of `primitives`, placed by `transform`.
    fn add_node(&mut self, instance: InstanceLabel, primitives: Vec<ScenePrimitive>, transform: Mat4);
}

/// A rigid mesh placed in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Node name, derived from the source instance
    pub name: String,

    /// Shape instance this node was converted from
    pub instance: InstanceLabel,

    pub primitives: Vec<ScenePrimitive>,

    /// Node placement (identity when vertices are pre-transformed)
    pub transform: Mat4,
}

impl SceneNode {
    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(|p| p.triangle_count()).sum()
    }

    /// Node bounds in scene space, including the node transform.
    pub fn world_bounds(&self) -> Aabb {
        self.primitives
            .iter()
            .filter(|p| !p.bounds.is_empty())
            .fold(Aabb::empty(), |acc, p| {
                let local = &p.bounds;
                let (min, max) = (local.min(), local.max());
                let corners = [
                    min,
                    max,
                    min.with_x(max.x),
                    min.with_y(max.y),
                    min.with_z(max.z),
                    max.with_x(min.x),
                    max.with_y(min.y),
                    max.with_z(min.z),
                ];
                corners
                    .iter()
                    .fold(acc, |acc, c| acc.include_point(self.transform.transform_point3(*c)))
            })
    }
}

/// The converted scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (usually the model name)
    pub name: String,

    /// Nodes in conversion order
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Get node count.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total primitive count across all nodes.
    pub fn primitive_count(&self) -> usize {
        self.nodes.iter().map(|n| n.primitives.len()).sum()
    }

    /// Get total triangle count across all nodes.
    pub fn total_triangle_count(&self) -> usize {
        self.nodes.iter().map(SceneNode::triangle_count).sum()
    }

    /// Compute the bounding box of every node.
    pub fn world_bounds(&self) -> Aabb {
        self.nodes
            .iter()
            .fold(Aabb::empty(), |acc, node| Aabb::surrounding(&acc, &node.world_bounds()))
    }

    /// Find the node converted from `instance`.
    pub fn node_for(&self, instance: InstanceLabel) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.instance == instance)
    }
}

impl SceneSink for Scene {
    fn add_node(&mut self, instance: InstanceLabel, primitives: Vec<ScenePrimitive>, transform: Mat4) {
        self.nodes.push(SceneNode {
            name: format!("shape{}", instance),
            instance,
            primitives,
            transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use shapescene_math::Vec3;

    fn primitive(corners: [Vec3; 3]) -> ScenePrimitive {
        ScenePrimitive {
            triangles: vec![corners],
            normals: vec![[Vec3::Y; 3]],
            material: Material::default(),
            bounds: Aabb::from_positions(&corners),
        }
    }

    #[test]
    fn test_scene_creation() {
        let mut scene = Scene::new("test");

        scene.add_node(
            InstanceLabel(7),
            vec![primitive([Vec3::ZERO, Vec3::X, Vec3::Z])],
            Mat4::IDENTITY,
        );
        scene.add_node(
            InstanceLabel(3),
            vec![primitive([Vec3::ZERO, Vec3::X, Vec3::Z])],
            Mat4::IDENTITY,
        );

        assert_eq!(scene.node_count(), 2);
        assert_eq!(scene.primitive_count(), 2);
        assert_eq!(scene.total_triangle_count(), 2);
        assert_eq!(scene.nodes[0].instance, InstanceLabel(7));
        assert_eq!(scene.nodes[0].name, "shape#7");
        assert!(scene.node_for(InstanceLabel(3)).is_some());
        assert!(scene.node_for(InstanceLabel(4)).is_none());
    }

    #[test]
    fn test_world_bounds() {
        let mut scene = Scene::new("test");
        scene.add_node(
            InstanceLabel(1),
            vec![primitive([Vec3::ZERO, Vec3::X, Vec3::Z])],
            Mat4::IDENTITY,
        );
        scene.add_node(
            InstanceLabel(2),
            vec![primitive([Vec3::ZERO, Vec3::X, Vec3::Z])],
            Mat4::from_translation(Vec3::new(0.0, 5.0, 0.0)),
        );

        let bounds = scene.world_bounds();
        assert!((bounds.min() - Vec3::ZERO).length() < 0.001);
        assert!((bounds.max() - Vec3::new(1.0, 5.0, 1.0)).length() < 0.001);
    }

    #[test]
    fn test_empty_scene_bounds() {
        assert!(Scene::new("empty").world_bounds().is_empty());
    }
}
