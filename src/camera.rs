//! Perspective camera, projection and the camera uniform.
//!
//! The camera is a node of the scene graph. Its eye is the node's world position
//! and its orientation comes from aiming at a world-space target with world +Y up.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};

use wgpu::util::DeviceExt;

use crate::{data_structures::scene_graph::NodeId, pipelines::basic::mk_uniform_layout};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Debug)]
pub struct Camera {
    pub node: NodeId,
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(node: NodeId, eye: Point3<f32>, target: Point3<f32>) -> Self {
        Self {
            node,
            eye,
            target,
            up: Vector3::unit_y(),
        }
    }

    /// Re-aims the camera from `eye` at `target`.
    pub fn look_at(&mut self, eye: Point3<f32>, target: Point3<f32>) {
        self.eye = eye;
        self.target = target;
    }

    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.eye).normalize()
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye, self.target, self.up)
    }
}

#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Adopts the aspect ratio of a resized surface; zero-sized surfaces are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring projection resize to {}x{}", width, height);
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.eye.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }

    pub fn view_proj(&self) -> Matrix4<f32> {
        self.view_proj.into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU side of the camera: the uniform, its buffer and bind group.
#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, uniform: CameraUniform) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = mk_uniform_layout(device, "camera_bind_group_layout");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, uniform: CameraUniform) {
        self.uniform = uniform;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cgmath::{Deg, Vector4};

    use super::*;
    use crate::data_structures::scene_graph::SceneGraph;

    fn camera() -> Camera {
        let node = SceneGraph::new().add_root("camera", Default::default());
        Camera::new(node, Point3::new(0.0, 0.0, 100.0), Point3::new(0.0, 0.0, 0.0))
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero() {
        let mut projection = Projection::new(800, 600, Deg(50.0), 1.0, 1000.0);
        assert_abs_diff_eq!(projection.aspect(), 800.0 / 600.0);
        projection.resize(1920, 1080);
        assert_abs_diff_eq!(projection.aspect(), 1920.0 / 1080.0);
        projection.resize(0, 1080);
        assert_abs_diff_eq!(projection.aspect(), 1920.0 / 1080.0);
    }

    #[test]
    fn target_projects_to_the_screen_centre() {
        let camera = camera();
        let projection = Projection::new(800, 600, Deg(50.0), 1.0, 1000.0);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, &projection);

        let clip = uniform.view_proj() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth), "depth {} outside wgpu range", depth);
    }

    #[test]
    fn forward_points_at_the_target() {
        let camera = camera();
        let forward = camera.forward();
        assert_abs_diff_eq!(forward.z, -1.0, epsilon = 1e-6);
    }
}
