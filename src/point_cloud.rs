//! Procedural point clouds.
//!
//! Two generators are provided: a volume sampler for a torus (the dust ring) and a
//! surface sampler for a sphere shell (the star sky). Both draw their angles and radii
//! with plain uniform parameter sampling. This is not area/volume uniform: the torus is
//! denser near its tube centerline and the shell is denser near its poles. The resulting
//! look is part of the scene and is kept as is.

use std::f32::consts::{PI, TAU};

use cgmath::{Rad, Rotation3};
use rand::Rng;

/// Distance from the torus centre to the centerline of its tube.
pub const TORUS_MAJOR_RADIUS: f32 = 5.0;
/// Upper (exclusive) bound of the sampled distance from the tube centerline.
pub const TORUS_TUBE_RADIUS: f32 = 4.0;

/// An immutable set of positions, stored contiguously for GPU upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<[f32; 3]>,
}

impl PointCloud {
    /**
     * Samples `count` points inside a torus lying in the XY plane.
     *
     * Per point: azimuth φ ∈ [0, 2π), tube angle θ ∈ [0, 2π), tube distance r ∈ [0, 4):
     *
     * x = (R + r·cos θ)·cos φ
     * y = (R + r·cos θ)·sin φ
     * z = r·sin θ
     *
     * with R = [`TORUS_MAJOR_RADIUS`].
     */
    pub fn torus<R: Rng>(count: usize, rng: &mut R) -> Self {
        let positions = (0..count)
            .map(|_| {
                let phi = rng.random::<f32>() * TAU;
                let theta = rng.random::<f32>() * TAU;
                let radius = rng.random::<f32>() * TORUS_TUBE_RADIUS;

                let ring = TORUS_MAJOR_RADIUS + radius * theta.cos();
                [ring * phi.cos(), ring * phi.sin(), radius * theta.sin()]
            })
            .collect();
        Self { positions }
    }

    /// Samples `count` points on a sphere shell of the given radius, φ ∈ [0, 2π) and θ ∈ [0, π).
    pub fn sphere_shell<R: Rng>(radius: f32, count: usize, rng: &mut R) -> Self {
        let positions = (0..count)
            .map(|_| {
                let phi = rng.random::<f32>() * TAU;
                let theta = rng.random::<f32>() * PI;

                [
                    radius * theta.sin() * phi.cos(),
                    radius * theta.sin() * phi.sin(),
                    radius * theta.cos(),
                ]
            })
            .collect();
        Self { positions }
    }

    /// Rotates every point about the X axis by `angle`.
    pub fn rotate_x(mut self, angle: Rad<f32>) -> Self {
        let rotation = cgmath::Quaternion::from_angle_x(angle);
        self.positions.iter_mut().for_each(|p| {
            *p = (rotation * cgmath::Vector3::from(*p)).into();
        });
        self
    }

    /// Scales every point uniformly about the origin.
    pub fn scale(mut self, factor: f32) -> Self {
        self.positions
            .iter_mut()
            .flat_map(|p| p.iter_mut())
            .for_each(|c| *c *= factor);
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// The flat `3·N` float view of the positions, laid out as consecutive
    /// [`PointVertex`](crate::data_structures::mesh::PointVertex)es.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    /// Distance of a point from the torus centerline (circle of radius R in the XY plane).
    fn centerline_distance(p: &[f32; 3]) -> f64 {
        let (x, y, z) = (p[0] as f64, p[1] as f64, p[2] as f64);
        let planar = (x * x + y * y).sqrt() - TORUS_MAJOR_RADIUS as f64;
        (planar * planar + z * z).sqrt()
    }

    fn distance(a: &[f32; 3], b: &[f32; 3]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (*x as f64 - *y as f64).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    #[test]
    fn torus_with_thousand_points_stays_in_annular_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let cloud = PointCloud::torus(1000, &mut rng);
        assert_eq!(cloud.len(), 1000);
        assert_eq!(cloud.as_flat().len(), 3000);
        for p in cloud.positions() {
            let d = centerline_distance(p);
            assert!(d < TORUS_TUBE_RADIUS as f64 + 1e-4, "{:?} is {} off the centerline", p, d);
        }
    }

    #[test]
    fn generators_produce_exactly_the_requested_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for n in [0, 1, 2, 17, 256] {
            assert_eq!(PointCloud::torus(n, &mut rng).len(), n);
            assert_eq!(PointCloud::sphere_shell(3.0, n, &mut rng).as_flat().len(), 3 * n);
        }
        assert!(PointCloud::torus(0, &mut rng).is_empty());
    }

    #[test]
    fn sphere_shell_points_sit_on_the_radius() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let cloud = PointCloud::sphere_shell(50.0, 10_000, &mut rng);
        assert_eq!(cloud.len(), 10_000);
        for p in cloud.positions() {
            let d = distance(p, &[0.0; 3]);
            assert_abs_diff_eq!(d, 50.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn same_seed_gives_same_cloud() {
        let a = PointCloud::torus(64, &mut ChaCha8Rng::seed_from_u64(5));
        let b = PointCloud::torus(64, &mut ChaCha8Rng::seed_from_u64(5));
        let c = PointCloud::torus(64, &mut ChaCha8Rng::seed_from_u64(6));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rotate_then_scale_maps_y_to_z_and_scales_distances_by_twenty() {
        let raw = PointCloud::torus(200, &mut ChaCha8Rng::seed_from_u64(3));
        let transformed = raw.clone().rotate_x(Rad(FRAC_PI_2)).scale(20.0);

        for (p, q) in raw.positions().iter().zip(transformed.positions()) {
            // (x, y, z) -> 20 * (x, -z, y)
            assert_abs_diff_eq!(q[0], 20.0 * p[0], epsilon = 1e-3);
            assert_abs_diff_eq!(q[1], -20.0 * p[2], epsilon = 1e-3);
            assert_abs_diff_eq!(q[2], 20.0 * p[1], epsilon = 1e-3);
        }

        let raw = raw.positions();
        let transformed = transformed.positions();
        for i in 0..raw.len() - 1 {
            let before = distance(&raw[i], &raw[i + 1]);
            let after = distance(&transformed[i], &transformed[i + 1]);
            assert_relative_eq!(after, before * 20.0, epsilon = 1e-3, max_relative = 1e-5);
        }
    }
}
