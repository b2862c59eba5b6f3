use crate::{
    data_structures::mesh::PointVertex,
    pipelines::basic::{PipelineOptions, mk_scene_pipeline},
};

/// Flat coloured points, one vertex each, for the dust ring and the star shell.
pub fn mk_points_pipeline(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Points Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("points.wgsl").into()),
    };
    mk_scene_pipeline::<PointVertex>(
        device,
        config,
        camera_bind_group_layout,
        light_bind_group_layout,
        material_bind_group_layout,
        shader,
        PipelineOptions::POINTS,
    )
}
