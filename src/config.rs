//! Scene configuration.
//!
//! All tunables of the scene live in [`SceneConfig`]. `Default` reproduces the
//! reference composition; embedders pass a modified copy to [`crate::app::run_with`].

use std::f32::consts::FRAC_PI_4;

/// Time scales (radians per millisecond) of the animated quantities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Rotation about +Y of the container holding ship, dust and camera.
    pub orbit: f64,
    /// Counter-rotation about +Y of the dust ring.
    pub dust_spin: f64,
    /// Sideways camera sway.
    pub camera_sway: f64,
    /// Vertical bob and forward/backward drift of the camera.
    pub camera_bob: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            orbit: 0.0001,
            dust_spin: 0.001,
            camera_sway: 0.0002,
            camera_bob: 0.0005,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Initial offset of the camera relative to the ship, in ship-container space.
    pub initial_offset: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy_degrees: 50.0,
            znear: 1.0,
            zfar: 1000.0,
            initial_offset: [-2.5, 0.0, 6.0],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyConfig {
    pub radius: f32,
    pub star_count: usize,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            radius: 50.0,
            star_count: 10_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub title: String,
    /// Background colour as `0xRRGGBB`.
    pub clear_colour: u32,
    pub camera: CameraConfig,
    pub animation: AnimationConfig,
    /// Position of the directional light; it shines from there towards the origin.
    pub light_position: [f32; 3],
    pub light_colour: [f32; 3],
    pub light_intensity: f32,
    pub planet_radius: f32,
    pub moon_radius: f32,
    pub moon_position: [f32; 3],
    /// Lambert base colour of the moon as `0xRRGGBB`.
    pub moon_colour: u32,
    /// Distance of the ship beyond the planet surface along +Z.
    pub ship_altitude: f32,
    /// Euler angles (XYZ order) of the ship.
    pub ship_rotation: [f32; 3],
    /// Initial rotation about +Y of the ship container.
    pub ship_container_yaw: f32,
    pub dust_count: usize,
    pub dust_position: [f32; 3],
    pub dust_scale: f32,
    /// Tilt about +X of the container holding the dust.
    pub dust_tilt: f32,
    pub dust_colour: [f32; 4],
    /// Star shell; `None` leaves it out of the scene.
    pub sky: Option<SkyConfig>,
    /// Seed of the point-cloud generator; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "orbit-scene".to_string(),
            clear_colour: 0x10181F,
            camera: CameraConfig::default(),
            animation: AnimationConfig::default(),
            light_position: [1.0, 0.5, -1.0],
            light_colour: [1.0, 1.0, 1.0],
            light_intensity: 1.0,
            planet_radius: 20.0,
            moon_radius: 10.0,
            moon_position: [0.0, 120.0, 400.0],
            moon_colour: 0xcccccc,
            ship_altitude: 100.0,
            ship_rotation: [0.4, -FRAC_PI_4, 0.0],
            ship_container_yaw: 0.6,
            dust_count: 1000,
            dust_position: [-100.0, 0.0, 0.0],
            dust_scale: 20.0,
            dust_tilt: 0.3,
            dust_colour: [0.75, 0.8, 0.9, 0.35],
            sky: None,
            seed: None,
        }
    }
}

/// Splits `0xRRGGBB` into linear `[r, g, b]` components in `[0, 1]`.
///
/// Hex colours are authored in sRGB and the surface is sRGB, so they are converted
/// to linear space here.
pub fn hex_to_linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

impl SceneConfig {
    pub fn clear_colour(&self) -> wgpu::Color {
        let [r, g, b] = hex_to_linear_rgb(self.clear_colour);
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn hex_channels_are_split_in_rgb_order() {
        assert_eq!(hex_to_linear_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_linear_rgb(0x00ff00), [0.0, 1.0, 0.0]);
        assert_eq!(hex_to_linear_rgb(0x0000ff), [0.0, 0.0, 1.0]);
        let [r, g, b] = hex_to_linear_rgb(0x808080);
        assert_abs_diff_eq!(r, 0.2158, epsilon = 1e-3);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn default_sky_is_disabled() {
        let config = SceneConfig::default();
        assert!(config.sky.is_none());
        assert_eq!(config.clear_colour().a, 1.0);
    }
}
