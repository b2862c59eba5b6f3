use rand::Rng;

use crate::{
    data_structures::{scene_graph::NodeId, uniform::UniformSet},
    point_cloud::PointCloud,
    scene::{SceneObject, dust::PointsUniform},
};

/// A shell of white stars around the origin.
pub struct SkySphere {
    node: NodeId,
    pub cloud: PointCloud,
    pub material: UniformSet<PointsUniform>,
}

impl SkySphere {
    pub fn new<R: Rng>(node: NodeId, radius: f32, star_count: usize, rng: &mut R) -> Self {
        Self {
            node,
            cloud: PointCloud::sphere_shell(radius, star_count, rng),
            material: UniformSet::new(PointsUniform { colour: [1.0; 4] }),
        }
    }
}

impl SceneObject for SkySphere {
    fn node(&self) -> NodeId {
        self.node
    }
}
