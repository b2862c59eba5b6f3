use crate::{
    config::hex_to_linear_rgb,
    data_structures::{mesh::MeshData, scene_graph::NodeId, uniform::UniformSet},
    scene::SceneObject,
};

/// Base colour of a Lambert-lit surface.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LambertUniform {
    pub colour: [f32; 4],
}

/// A matte sphere lit by the scene's directional light.
pub struct Moon {
    node: NodeId,
    radius: f32,
    pub mesh: MeshData,
    pub material: UniformSet<LambertUniform>,
}

impl Moon {
    pub fn new(node: NodeId, radius: f32, colour: u32) -> Self {
        let [r, g, b] = hex_to_linear_rgb(colour);
        Self {
            node,
            radius,
            mesh: MeshData::sphere(radius, 64, 32),
            material: UniformSet::new(LambertUniform {
                colour: [r, g, b, 1.0],
            }),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl SceneObject for Moon {
    fn node(&self) -> NodeId {
        self.node
    }
}
