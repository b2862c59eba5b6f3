//! Render pipelines of the scene.
//!
//! - `basic` holds the shared pipeline builder and bind group plan
//! - `light` holds the directional light's GPU resources
//! - `lambert`, `atmosphere`, `ship` and `points` build one pipeline per material

pub mod atmosphere;
pub mod basic;
pub mod lambert;
pub mod light;
pub mod points;
pub mod ship;

use crate::pipelines::basic::mk_uniform_layout;

/// Every pipeline the scene draws with, plus the layout all material uniforms share.
#[derive(Debug)]
pub struct Pipelines {
    pub lambert: wgpu::RenderPipeline,
    pub atmosphere: wgpu::RenderPipeline,
    pub ship: wgpu::RenderPipeline,
    pub points: wgpu::RenderPipeline,
    pub material_bind_group_layout: wgpu::BindGroupLayout,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let material_bind_group_layout = mk_uniform_layout(device, "material_bind_group_layout");
        let (camera, light, material) = (
            camera_bind_group_layout,
            light_bind_group_layout,
            &material_bind_group_layout,
        );
        let lambert = lambert::mk_lambert_pipeline(device, config, camera, light, material);
        let atmosphere = atmosphere::mk_atmosphere_pipeline(device, config, camera, light, material);
        let ship = ship::mk_ship_pipeline(device, config, camera, light, material);
        let points = points::mk_points_pipeline(device, config, camera, light, material);
        log::info!("Scene pipelines created for {:?}", config.format);

        Self {
            lambert,
            atmosphere,
            ship,
            points,
            material_bind_group_layout,
        }
    }
}
