use cgmath::Vector3;

use crate::{
    data_structures::{mesh::MeshData, scene_graph::NodeId, uniform::UniformSet},
    scene::SceneObject,
};

/// Rayleigh and Mie mean densities used by the scattering approximation.
const MEAN_DENSITY_RAYLEIGH: f32 = 1.2;
const MEAN_DENSITY_MIE: f32 = 0.5;

/// Uniforms of the atmosphere shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AtmosphereUniform {
    pub sun_direction: [f32; 3],
    pub atmosphere_radius: f32,
    pub planet_radius: f32,
    pub density_rayleigh: f32,
    pub density_mie: f32,
    _padding: f32,
}

/// A planet drawn as its atmosphere shell only: the ground sphere (80% of the
/// radius) is traced inside the shader.
pub struct Planet {
    node: NodeId,
    radius: f32,
    pub mesh: MeshData,
    pub atmosphere: UniformSet<AtmosphereUniform>,
}

impl Planet {
    pub fn new(node: NodeId, radius: f32) -> Self {
        let atmosphere = UniformSet::new(AtmosphereUniform {
            sun_direction: [0.0; 3],
            atmosphere_radius: radius,
            planet_radius: radius * 0.8,
            density_rayleigh: MEAN_DENSITY_RAYLEIGH,
            density_mie: MEAN_DENSITY_MIE,
            _padding: 0.0,
        });
        Self {
            node,
            radius,
            // slightly oversized so the shell encloses the whole atmosphere
            mesh: MeshData::sphere(radius * 1.04, 16, 8),
            atmosphere,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl SceneObject for Planet {
    fn node(&self) -> NodeId {
        self.node
    }

    fn update(&mut self, sun_direction: Vector3<f32>, _: f64) {
        self.atmosphere
            .modify(|uniform| uniform.sun_direction = sun_direction.into());
    }
}
