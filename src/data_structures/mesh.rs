//! CPU-side geometry: vertex layouts and primitive mesh generation.

use std::f32::consts::PI;

/// Describes how the bytes of a vertex type map onto shader locations.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// A bare position, one per point of a point cloud.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

impl Vertex for PointVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Indexed triangle geometry ready to be uploaded into vertex/index buffers.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /**
     * Builds a UV sphere centred at the origin.
     *
     * The vertex grid has `(width_segments + 1) * (height_segments + 1)` entries, rows
     * running from the north pole (+Y) to the south pole. The seam column is duplicated so
     * that every row closes. The degenerate triangles at both poles are skipped and all
     * faces wind counter-clockwise when seen from outside.
     */
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut vertices =
            Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let normal = [
                    -(u * 2.0 * PI).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * 2.0 * PI).sin() * (v * PI).sin(),
                ];
                vertices.push(MeshVertex {
                    position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                    normal,
                });
            }
        }

        let row = width_segments + 1;
        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    pub fn num_elements(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cgmath::{InnerSpace, Vector3};

    use super::*;

    #[test]
    fn sphere_vertices_lie_on_the_radius() {
        let mesh = MeshData::sphere(20.8, 16, 8);
        assert_eq!(mesh.vertices.len(), 17 * 9);
        for vertex in &mesh.vertices {
            let length = Vector3::from(vertex.position).magnitude();
            assert_abs_diff_eq!(length, 20.8, epsilon = 1e-4);
        }
    }

    #[test]
    fn sphere_skips_degenerate_pole_triangles() {
        let mesh = MeshData::sphere(10.0, 64, 32);
        // every band contributes two triangles except the two polar bands
        let triangles = 64 * 32 * 2 - 2 * 64;
        assert_eq!(mesh.indices.len(), triangles * 3);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn sphere_faces_point_outwards() {
        let mesh = MeshData::sphere(2.0, 16, 8);
        for tri in mesh.indices.chunks(3) {
            let p0 = Vector3::from(mesh.vertices[tri[0] as usize].position);
            let p1 = Vector3::from(mesh.vertices[tri[1] as usize].position);
            let p2 = Vector3::from(mesh.vertices[tri[2] as usize].position);
            let face_normal = (p1 - p0).cross(p2 - p0);
            let centroid = (p0 + p1 + p2) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }
}
