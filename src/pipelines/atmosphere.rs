use crate::{
    data_structures::mesh::MeshVertex,
    pipelines::basic::{PipelineOptions, mk_scene_pipeline},
};

/// Single-scattering atmosphere drawn on the planet's shell mesh.
///
/// Transparent: the shell is blended over whatever lies behind the planet.
pub fn mk_atmosphere_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Atmosphere Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("atmosphere.wgsl").into()),
    };
    mk_scene_pipeline::<MeshVertex>(
        device,
        config,
        camera_bind_group_layout,
        light_bind_group_layout,
        material_bind_group_layout,
        shader,
        PipelineOptions::TRANSPARENT,
    )
}
