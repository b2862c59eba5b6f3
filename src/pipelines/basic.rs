use crate::data_structures::{mesh::Vertex, texture::Texture, transform::TransformRaw};

/// What differs between the scene's pipelines besides shader and vertex layout.
#[derive(Clone, Copy, Debug)]
pub struct PipelineOptions {
    pub topology: wgpu::PrimitiveTopology,
    pub blend: Option<wgpu::BlendState>,
    pub depth_write: bool,
}

impl PipelineOptions {
    pub const OPAQUE: Self = Self {
        topology: wgpu::PrimitiveTopology::TriangleList,
        blend: Some(wgpu::BlendState::REPLACE),
        depth_write: true,
    };

    /// Alpha blended, depth tested but not written so that later transparent
    /// draws are not rejected by earlier ones.
    pub const TRANSPARENT: Self = Self {
        topology: wgpu::PrimitiveTopology::TriangleList,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        depth_write: false,
    };

    pub const POINTS: Self = Self {
        topology: wgpu::PrimitiveTopology::PointList,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        depth_write: false,
    };
}

/// A bind group layout holding a single uniform buffer at binding 0.
pub fn mk_uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

/// Builds one of the scene pipelines.
///
/// Every pipeline shares the same bind group plan: camera at group 0, light at
/// group 1 and the material uniform at group 2. The geometry sits in vertex slot 0
/// and the object's [`TransformRaw`] in slot 1.
pub fn mk_scene_pipeline<V: Vertex>(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    light_bind_group_layout: &wgpu::BindGroupLayout,
    material_bind_group_layout: &wgpu::BindGroupLayout,
    shader: wgpu::ShaderModuleDescriptor,
    options: PipelineOptions,
) -> wgpu::RenderPipeline {
    let label = shader.label;
    let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label,
        bind_group_layouts: &[
            camera_bind_group_layout,
            light_bind_group_layout,
            material_bind_group_layout,
        ],
        immediate_size: 0,
    });

    mk_render_pipeline(
        device,
        &render_pipeline_layout,
        config.format,
        Some(Texture::DEPTH_FORMAT),
        &[V::desc(), TransformRaw::desc()],
        shader,
        options,
    )
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    shader: wgpu::ShaderModuleDescriptor,
    options: PipelineOptions,
) -> wgpu::RenderPipeline {
    let label = shader.label;
    let shader = device.create_shader_module(shader);

    // culling only makes sense for closed triangle meshes
    let cull_mode = match options.topology {
        wgpu::PrimitiveTopology::TriangleList => Some(wgpu::Face::Back),
        _ => None,
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label,
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: options.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: options.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: options.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
