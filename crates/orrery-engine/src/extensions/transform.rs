// extensions/transform.rs
//
// Transform hierarchy extension: tracks parent-child relationships by EntityId.
// Completely decoupled from Entity/Scene internals.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(planet, LocalTransform::new().with_offset(pos));
//   graph.register_with(ring, LocalTransform::new().with_rotation(tilt));
//   graph.set_parent(ring, Some(planet));
//   graph.propagate(&mut scene);  // Updates world transforms from local ones

use std::collections::HashMap;
use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Local transform data for entities in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub offset: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy graph. Manages parent-child relationships.
///
/// Exists separately from Scene; only entities registered here get their
/// world transform rewritten by `propagate`.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent (top-level).
    roots: Vec<EntityId>,
    /// Set when hierarchy or a local transform changes, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            self.nodes.entry(p).or_default();
            if !self.roots.contains(&p) && self.nodes.get(&p).and_then(|n| n.parent).is_none() {
                self.roots.push(p);
            }
        }

        // Detach from old parent
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Replace the local transform for an entity.
    pub fn set_local(&mut self, id: EntityId, local: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local = local;
            self.dirty = true;
        }
    }

    pub fn get_local(&self, id: EntityId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Propagate transforms from roots down through the hierarchy.
    /// Updates Entity.pos/rotation/scale based on parent transforms.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        for &root in &self.roots {
            self.propagate_recursive(root, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(
        &self,
        id: EntityId,
        parent_pos: Vec3,
        parent_rot: Quat,
        parent_scale: Vec3,
        scene: &mut Scene,
    ) {
        let Some(node) = self.nodes.get(&id) else { return };
        let local = &node.local;

        let world_pos = parent_pos + parent_rot * (local.offset * parent_scale);
        let world_rot = parent_rot * local.rotation;
        let world_scale = parent_scale * local.scale;

        if let Some(entity) = scene.get_mut(id) {
            entity.pos = world_pos;
            entity.rotation = world_rot;
            entity.scale = world_scale;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world_pos, world_rot, world_scale, scene);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of entities in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register_with(parent, LocalTransform::new());
        graph.register_with(child, LocalTransform::new());
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(!graph.roots.contains(&child));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn child_follows_parent_offset() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = EntityId(1);
        let child = EntityId(2);
        scene.spawn(Entity::new(parent));
        scene.spawn(Entity::new(child));

        graph.register_with(parent, LocalTransform::new().with_offset(Vec3::new(10.0, 0.0, 0.0)));
        graph.register_with(child, LocalTransform::new().with_offset(Vec3::new(0.0, 1.0, 0.0)));
        graph.set_parent(child, Some(parent));
        graph.propagate(&mut scene);

        assert!(approx(scene.get(child).unwrap().pos, Vec3::new(10.0, 1.0, 0.0)));
        assert!(!graph.is_dirty());
    }

    #[test]
    fn child_inherits_parent_rotation() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = EntityId(1);
        let child = EntityId(2);
        scene.spawn(Entity::new(parent));
        scene.spawn(Entity::new(child));

        graph.register_with(parent, LocalTransform::new().with_rotation(Quat::from_rotation_y(FRAC_PI_2)));
        graph.register_with(child, LocalTransform::new().with_offset(Vec3::X));
        graph.set_parent(child, Some(parent));
        graph.propagate(&mut scene);

        // +X rotated a quarter turn about Y lands on -Z
        let c = scene.get(child).unwrap();
        assert!(approx(c.pos, Vec3::new(0.0, 0.0, -1.0)));
        assert!(approx(c.rotation * Vec3::X, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn set_local_marks_dirty_and_moves_children() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = EntityId(1);
        let child = EntityId(2);
        scene.spawn(Entity::new(parent));
        scene.spawn(Entity::new(child));

        graph.register_with(parent, LocalTransform::new());
        graph.register_with(child, LocalTransform::new());
        graph.set_parent(child, Some(parent));
        graph.propagate(&mut scene);

        graph.set_local(parent, LocalTransform::new().with_offset(Vec3::new(0.0, 0.0, 5.0)));
        assert!(graph.is_dirty());
        graph.propagate(&mut scene);
        assert!(approx(scene.get(child).unwrap().pos, Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn unregistered_entities_are_untouched() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(9)).with_pos(Vec3::new(3.0, 3.0, 3.0)));
        graph.register_with(EntityId(1), LocalTransform::new());
        graph.propagate(&mut scene);
        assert_eq!(scene.get(EntityId(9)).unwrap().pos, Vec3::new(3.0, 3.0, 3.0));
    }
}
