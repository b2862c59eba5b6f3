use cgmath::{InnerSpace, Vector3};

/// A light infinitely far away, shining from `position` towards the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub position: Vector3<f32>,
    pub colour: [f32; 3],
    pub intensity: f32,
}

impl DirectionalLight {
    pub fn new(position: Vector3<f32>, colour: [f32; 3], intensity: f32) -> Self {
        Self {
            position,
            colour,
            intensity,
        }
    }

    /// Direction from the scene towards the light. Not normalized, shaders normalize it.
    pub fn sun_direction(&self) -> Vector3<f32> {
        self.position
    }

    pub fn to_uniform(&self) -> LightUniform {
        LightUniform {
            direction: self.position.normalize().into(),
            intensity: self.intensity,
            colour: self.colour,
            _padding: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub direction: [f32; 3],
    pub intensity: f32,
    pub colour: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: u32,
}
