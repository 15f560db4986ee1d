/// Scene lighting: one ambient term plus a list of directional lights.
///
/// Lights are persistent and serialized to wasm memory every frame for the
/// host's lighting pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self { color: Color::WHITE, intensity: 1.0 }
    }
}

/// A light at infinity shining from `position` toward the origin.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, intensity, r, g, b, pad]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct DirectionalLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub _pad: f32,
}

impl DirectionalLight {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            intensity,
            r: color.r,
            g: color.g,
            b: color.b,
            _pad: 0.0,
        }
    }

    /// Unit vector from the lit surface toward the light.
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z).normalize_or_zero()
    }
}

pub struct LightState {
    lights: Vec<DirectionalLight>,
    ambient: AmbientLight,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(4)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: AmbientLight::default(),
        }
    }

    pub fn add(&mut self, light: DirectionalLight) {
        self.lights.push(light);
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectionalLight> {
        self.lights.iter()
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = AmbientLight { color, intensity };
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    /// Pointer to the light array for the host.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
