use crate::{
    data_structures::mesh::MeshVertex,
    pipelines::basic::{PipelineOptions, mk_scene_pipeline},
};

pub fn mk_ship_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Ship Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("ship.wgsl").into()),
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
