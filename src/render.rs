//! Render composition and pipeline batching.
//!
//! Each scene object owns a [`GpuObject`]: its geometry, a one-element instance
//! buffer with its world transform and its material uniform. [`SceneGpu::get_render`]
//! describes the frame as a [`Render`] tree, which the app flattens into one batch
//! per pipeline and draws opaque batches before transparent ones.
//!
//! # Key types
//!
//! - [`Render<'a>`] tags each draw with the pipeline it needs
//! - [`Instanced<'a>`] contains what a single draw binds (geometry, transform, material)
//! - [`Batches<'a>`] collects draws per pipeline in drawing order

use wgpu::util::DeviceExt;

use crate::{
    context::Context,
    data_structures::{mesh::MeshData, transform::Transform, uniform::UniformSet},
    point_cloud::PointCloud,
    scene::{Scene, SceneObject},
};

/// Vertex and (for meshes) index buffers of one piece of geometry.
#[derive(Debug)]
pub struct GpuGeometry {
    pub vertex: wgpu::Buffer,
    pub index: Option<wgpu::Buffer>,
    pub count: u32,
}

impl GpuGeometry {
    pub fn from_mesh(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex,
            index: Some(index),
            count: mesh.num_elements(),
        }
    }

    pub fn from_points(device: &wgpu::Device, label: &str, cloud: &PointCloud) -> Self {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Point Buffer", label)),
            contents: bytemuck::cast_slice(cloud.as_flat()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex,
            index: None,
            count: cloud.len() as u32,
        }
    }
}

/// A material's uniform buffer and the bind group that exposes it at group 2.
#[derive(Debug)]
pub struct UniformBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    pub fn new<U: bytemuck::Pod>(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        uniforms: &UniformSet<U>,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(uniforms.get()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self { buffer, bind_group }
    }

    /// Uploads the set if it changed since the last upload.
    pub fn upload<U: bytemuck::Pod>(&self, queue: &wgpu::Queue, uniforms: &mut UniformSet<U>) {
        if let Some(bytes) = uniforms.take_dirty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

#[derive(Debug)]
pub struct GpuObject {
    pub geometry: GpuGeometry,
    pub instance: wgpu::Buffer,
    pub material: UniformBinding,
}

impl GpuObject {
    fn new<U: bytemuck::Pod>(
        ctx: &Context,
        label: &str,
        geometry: GpuGeometry,
        world: &Transform,
        uniforms: &UniformSet<U>,
    ) -> Self {
        let instance = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Instance Buffer", label)),
                contents: bytemuck::cast_slice(&[world.to_raw()]),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        let material = UniformBinding::new(
            &ctx.device,
            &ctx.pipelines.material_bind_group_layout,
            label,
            uniforms,
        );
        Self {
            geometry,
            instance,
            material,
        }
    }

    fn write_transform(&self, queue: &wgpu::Queue, world: &Transform) {
        queue.write_buffer(&self.instance, 0, bytemuck::cast_slice(&[world.to_raw()]));
    }

    fn instanced(&self) -> Instanced<'_> {
        Instanced {
            geometry: &self.geometry,
            instance: &self.instance,
            material: &self.material.bind_group,
        }
    }
}

/// GPU resources of every object in a [`Scene`].
#[derive(Debug)]
pub struct SceneGpu {
    pub planet: GpuObject,
    pub moon: GpuObject,
    pub ship: GpuObject,
    pub dust: GpuObject,
    pub sky: Option<GpuObject>,
}

impl SceneGpu {
    pub fn new(ctx: &Context, scene: &Scene) -> Self {
        let device = &ctx.device;
        let world = |object: &dyn SceneObject| scene.world_transform(object.node());
        let sky = scene.sky.as_ref().map(|sky| {
            GpuObject::new(
                ctx,
                "sky",
                GpuGeometry::from_points(device, "sky", &sky.cloud),
                &world(sky),
                &sky.material,
            )
        });
        Self {
            planet: GpuObject::new(
                ctx,
                "planet",
                GpuGeometry::from_mesh(device, "planet", &scene.planet.mesh),
                &world(&scene.planet),
                &scene.planet.atmosphere,
            ),
            moon: GpuObject::new(
                ctx,
                "moon",
                GpuGeometry::from_mesh(device, "moon", &scene.moon.mesh),
                &world(&scene.moon),
                &scene.moon.material,
            ),
            ship: GpuObject::new(
                ctx,
                "ship",
                GpuGeometry::from_mesh(device, "ship", &scene.ship.mesh),
                &world(&scene.ship),
                &scene.ship.material,
            ),
            dust: GpuObject::new(
                ctx,
                "dust",
                GpuGeometry::from_points(device, "dust", &scene.dust.cloud),
                &world(&scene.dust),
                &scene.dust.material,
            ),
            sky,
        }
    }

    /// Copies this frame's world transforms and every dirty uniform to the GPU.
    pub fn write_to_buffers(&self, queue: &wgpu::Queue, scene: &mut Scene) {
        self.planet
            .write_transform(queue, &scene.world_transform(scene.planet.node()));
        self.moon
            .write_transform(queue, &scene.world_transform(scene.moon.node()));
        self.ship
            .write_transform(queue, &scene.world_transform(scene.ship.node()));
        self.dust
            .write_transform(queue, &scene.world_transform(scene.dust.node()));

        self.planet.material.upload(queue, &mut scene.planet.atmosphere);
        self.moon.material.upload(queue, &mut scene.moon.material);
        self.ship.material.upload(queue, &mut scene.ship.material);
        self.dust.material.upload(queue, &mut scene.dust.material);

        if let (Some(gpu), Some(sky)) = (&self.sky, scene.sky.as_mut()) {
            let world = scene
                .graph
                .get_world_transform(sky.node())
                .unwrap_or_default();
            gpu.write_transform(queue, &world);
            gpu.material.upload(queue, &mut sky.material);
        }
    }

    pub fn get_render(&self) -> Render<'_> {
        Render::Composed(vec![
            Render::Lambert(self.moon.instanced()),
            Render::Atmosphere(self.planet.instanced()),
            Render::Ship(self.ship.instanced()),
            Render::Points(self.dust.instanced()),
            self.sky
                .as_ref()
                .map_or(Render::None, |sky| Render::Points(sky.instanced())),
        ])
    }
}

/// What one draw binds besides the pipeline and the shared camera and light.
pub struct Instanced<'a> {
    pub geometry: &'a GpuGeometry,
    pub instance: &'a wgpu::Buffer,
    pub material: &'a wgpu::BindGroup,
}

impl<'a> Instanced<'a> {
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.geometry.count == 0 {
            log::warn!("you attempted to render something with zero elements");
            return;
        }
        render_pass.set_bind_group(2, self.material, &[]);
        render_pass.set_vertex_buffer(0, self.geometry.vertex.slice(..));
        render_pass.set_vertex_buffer(1, self.instance.slice(..));
        match &self.geometry.index {
            Some(index) => {
                render_pass.set_index_buffer(index.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..self.geometry.count, 0, 0..1);
            }
            None => render_pass.draw(0..self.geometry.count, 0..1),
        }
    }
}

/// Specifies how a scene object should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Lambert(Instanced)` renders an opaque diffuse-lit mesh
/// - `Atmosphere(Instanced)` renders a transparent scattering shell
/// - `Ship(Instanced)` renders the transparent ship
/// - `Points(Instanced)` renders a point cloud
/// - `Composed(Vec<Render>)` recursively renders composition of multiple renders
pub enum Render<'a> {
    None,
    Lambert(Instanced<'a>),
    Atmosphere(Instanced<'a>),
    Ship(Instanced<'a>),
    Points(Instanced<'a>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    pub fn set_pipelines(self, batches: &mut Batches<'a>) {
        match self {
            Render::Lambert(instanced) => batches.lambert.push(instanced),
            Render::Atmosphere(instanced) => batches.atmosphere.push(instanced),
            Render::Ship(instanced) => batches.ship.push(instanced),
            Render::Points(instanced) => batches.points.push(instanced),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(batches)),
            Render::None => (),
        }
    }
}

#[derive(Default)]
pub struct Batches<'a> {
    pub lambert: Vec<Instanced<'a>>,
    pub atmosphere: Vec<Instanced<'a>>,
    pub ship: Vec<Instanced<'a>>,
    pub points: Vec<Instanced<'a>>,
}

impl<'a> Batches<'a> {
    /// Opaque geometry first, then everything blended.
    pub fn draw(&self, ctx: &Context, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
        render_pass.set_bind_group(1, &ctx.light.bind_group, &[]);
        let ordered = [
            (&ctx.pipelines.lambert, &self.lambert),
            (&ctx.pipelines.atmosphere, &self.atmosphere),
            (&ctx.pipelines.ship, &self.ship),
            (&ctx.pipelines.points, &self.points),
        ];
        for (pipeline, batch) in ordered {
            if batch.is_empty() {
                continue;
            }
            render_pass.set_pipeline(pipeline);
            batch.iter().for_each(|instanced| instanced.draw(render_pass));
        }
    }
}
