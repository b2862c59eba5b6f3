use std::f32::consts::FRAC_PI_2;

use cgmath::Rad;
use rand::Rng;

use crate::{
    data_structures::{scene_graph::NodeId, uniform::UniformSet},
    point_cloud::PointCloud,
    scene::SceneObject,
};

/// Flat colour of a point cloud.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointsUniform {
    pub colour: [f32; 4],
}

/// A ring of dust: a torus point cloud stood upright and blown up to scene scale.
pub struct Dust {
    node: NodeId,
    pub cloud: PointCloud,
    pub material: UniformSet<PointsUniform>,
}

impl Dust {
    pub fn new<R: Rng>(node: NodeId, count: usize, scale: f32, colour: [f32; 4], rng: &mut R) -> Self {
        let cloud = PointCloud::torus(count, rng)
            .rotate_x(Rad(FRAC_PI_2))
            .scale(scale);
        Self {
            node,
            cloud,
            material: UniformSet::new(PointsUniform { colour }),
        }
    }
}

impl SceneObject for Dust {
    fn node(&self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        data_structures::scene_graph::SceneGraph,
        point_cloud::{TORUS_MAJOR_RADIUS, TORUS_TUBE_RADIUS},
    };

    #[test]
    fn ring_lies_in_the_xz_plane_at_scene_scale() {
        let node = SceneGraph::new().add_root("dust", Default::default());
        let dust = Dust::new(node, 500, 20.0, [1.0; 4], &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(dust.cloud.len(), 500);
        let max_radius = 20.0 * (TORUS_MAJOR_RADIUS + TORUS_TUBE_RADIUS) + 1e-2;
        let max_height = 20.0 * TORUS_TUBE_RADIUS + 1e-2;
        for p in dust.cloud.positions() {
            assert!((p[0] * p[0] + p[2] * p[2]).sqrt() <= max_radius);
            assert!(p[1].abs() <= max_height);
        }
    }
}
