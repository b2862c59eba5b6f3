use crate::{
    data_structures::mesh::MeshVertex,
    pipelines::basic::{PipelineOptions, mk_scene_pipeline},
};

/// Diffuse-only shading of solid meshes by the directional light.
pub fn mk_lambert_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Lambert Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("lambert.wgsl").into()),
    };
    mk_scene_pipeline::<MeshVertex>(
        device,
        config,
        camera_bind_group_layout,
        light_bind_group_layout,
        material_bind_group_layout,
        shader,
        PipelineOptions::OPAQUE,
    )
}
