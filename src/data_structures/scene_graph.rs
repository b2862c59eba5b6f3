//! Scene graph and hierarchical scene organization.
//!
//! The graph is a strict tree of transform nodes stored in an arena and addressed by
//! [`NodeId`]. Each node keeps a `(local, world)` transform pair; world transforms are
//! recomputed top-down by [`SceneGraph::update_world_transforms`] once per frame, so a
//! child's world transform is always `parent_world * local`.

use log::warn;

use crate::data_structures::transform::Transform;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A container node: a named transform whose children inherit it.
#[derive(Clone, Debug)]
pub struct ContainerNode {
    pub name: String,
    pub local: Transform,
    world: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ContainerNode {
    fn new(name: &str, local: Transform, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            local,
            world: local,
            parent,
            children: Vec::new(),
        }
    }

    pub fn world(&self) -> &Transform {
        &self.world
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<ContainerNode>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level node (a direct child of the scene).
    pub fn add_root(&mut self, name: &str, local: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ContainerNode::new(name, local, None));
        self.roots.push(id);
        id
    }

    /// Adds a node below `parent`. An unknown parent falls back to a root node.
    pub fn add_child(&mut self, parent: NodeId, name: &str, local: Transform) -> NodeId {
        if parent.0 >= self.nodes.len() {
            warn!(
                "Parent {:?} of node '{}' does not exist, the node is attached to the scene root.",
                parent, name
            );
            return self.add_root(name, local);
        }
        let id = NodeId(self.nodes.len());
        let world = &self.nodes[parent.0].world * &local;
        let mut node = ContainerNode::new(name, local, Some(parent));
        node.world = world;
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&ContainerNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get_local_transform(&self, id: NodeId) -> Option<Transform> {
        self.nodes.get(id.0).map(|node| node.local)
    }

    pub fn set_local_transform(&mut self, id: NodeId, transform: Transform) {
        match self.nodes.get_mut(id.0) {
            Some(node) => node.local = transform,
            None => warn!("You tried to transform node {:?}, which does not exist.", id),
        }
    }

    pub fn set_local_transform_with(&mut self, id: NodeId, mutation: impl FnOnce(&mut Transform)) {
        match self.nodes.get_mut(id.0) {
            Some(node) => mutation(&mut node.local),
            None => warn!("You tried to transform node {:?}, which does not exist.", id),
        }
    }

    /// World transform as of the last [`Self::update_world_transforms`] call.
    pub fn get_world_transform(&self, id: NodeId) -> Option<Transform> {
        self.nodes.get(id.0).map(|node| node.world)
    }

    /// Walks the tree from every root and recomputes all world transforms.
    pub fn update_world_transforms(&mut self) {
        let identity = Transform::default();
        // explicit stack instead of recursion to keep borrows local
        let mut stack: Vec<(NodeId, Transform)> =
            self.roots.iter().rev().map(|&root| (root, identity)).collect();
        while let Some((id, parent_world)) = stack.pop() {
            let node = &mut self.nodes[id.0];
            node.world = &parent_world * &node.local;
            let world = node.world;
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cgmath::{Rad, Rotation3, Vector3};

    use super::*;

    #[test]
    fn world_transform_composes_parent_and_local() {
        let mut graph = SceneGraph::new();
        let container = graph.add_root(
            "container",
            Transform::new().with_rotation(cgmath::Quaternion::from_angle_y(Rad(
                std::f32::consts::FRAC_PI_2,
            ))),
        );
        let child = graph.add_child(container, "child", Vector3::new(0.0, 0.0, 120.0).into());
        graph.update_world_transforms();

        let world = graph.get_world_transform(child).unwrap();
        assert_abs_diff_eq!(world.position.x, 120.0, epsilon = 1e-4);
        assert_abs_diff_eq!(world.position.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn local_changes_take_effect_after_update() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_root("parent", Transform::new());
        let child = graph.add_child(parent, "child", Vector3::new(1.0, 0.0, 0.0).into());
        graph.set_local_transform(parent, Vector3::new(0.0, 5.0, 0.0).into());

        assert_eq!(graph.get_world_transform(child).unwrap().position.y, 0.0);
        graph.update_world_transforms();
        let world = graph.get_world_transform(child).unwrap();
        assert_eq!(world.position, Vector3::new(1.0, 5.0, 0.0));
    }

    #[test]
    fn nested_containers_inherit_transitively() {
        let mut graph = SceneGraph::new();
        let a = graph.add_root("a", Vector3::new(1.0, 0.0, 0.0).into());
        let b = graph.add_child(a, "b", Vector3::new(0.0, 2.0, 0.0).into());
        let c = graph.add_child(b, "c", Vector3::new(0.0, 0.0, 3.0).into());
        graph.update_world_transforms();
        assert_eq!(graph.get_world_transform(c).unwrap().position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(graph.get(b).unwrap().children(), &[c]);
        assert_eq!(graph.get(c).unwrap().parent(), Some(b));
    }

    #[test]
    fn unknown_parent_becomes_root() {
        let mut graph = SceneGraph::new();
        let orphan = graph.add_child(NodeId(42), "orphan", Transform::new());
        assert_eq!(graph.roots(), &[orphan]);
    }
}
