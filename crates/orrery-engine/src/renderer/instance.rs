use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use crate::components::material::Material;
use crate::components::mesh::Color;

/// Instance flag: render both faces.
pub const FLAG_DOUBLE_SIDED: u32 = 1 << 0;

/// Per-instance render data read by the host renderer.
/// Must match the host protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major model matrix.
    pub model: [f32; 16],
    /// Base color, alpha carries material opacity.
    pub color: [f32; 4],
    /// Emissive rgb, w = emissive intensity.
    pub emissive: [f32; 4],
    /// [geometry id, texture id or -1, material kind, flags]
    pub params: [f32; 4],
}

impl MeshInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(model: Mat4, geometry: u32, material: &Material) -> Self {
        let mut flags = 0u32;
        if material.double_sided {
            flags |= FLAG_DOUBLE_SIDED;
        }
        let texture = material.active_texture().map_or(-1.0, |t| t.0 as f32);
        let color = material.color.with_alpha(material.color.a * material.opacity);
        Self {
            model: model.to_cols_array(),
            color: color.to_array(),
            emissive: [
                material.emissive.r,
                material.emissive.g,
                material.emissive.b,
                material.emissive_intensity,
            ],
            params: [geometry as f32, texture, material.kind as u8 as f32, flags as f32],
        }
    }
}

/// Per-frame uniforms: camera matrices and scene-wide colors.
/// 44 floats = 176 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view: [f32; 16],
    pub projection: [f32; 16],
    /// xyz = camera position, w = point size scale (1.0).
    pub camera_pos: [f32; 4],
    /// Clear color.
    pub background: [f32; 4],
    /// Ambient rgb, w = intensity.
    pub ambient: [f32; 4],
}

impl FrameUniforms {
    pub const FLOATS: usize = 44;

    pub fn new(view: Mat4, projection: Mat4, camera_pos: glam::Vec3, background: Color) -> Self {
        Self {
            view: view.to_cols_array(),
            projection: projection.to_cols_array(),
            camera_pos: [camera_pos.x, camera_pos.y, camera_pos.z, 1.0],
            background: background.to_array(),
            ambient: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn with_ambient(mut self, color: Color, intensity: f32) -> Self {
        self.ambient = [color.r, color.g, color.b, intensity];
        self
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Mat4::IDENTITY, glam::Vec3::ZERO, Color::BLACK)
    }
}

/// Everything the host needs to draw one frame.
pub struct RenderBuffer {
    /// Opaque instances first, then blended ones from `transparent_start`.
    pub instances: Vec<MeshInstance>,
    pub transparent_start: u32,
    pub frame: FrameUniforms,
    /// Bumped every rebuild so the host can skip redundant uploads.
    pub frame_counter: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            transparent_start: 0,
            frame: FrameUniforms::default(),
            frame_counter: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_start = 0;
    }

    pub fn set_transparent_start(&mut self, index: u32) {
        self.transparent_start = index;
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data (for the host to read from wasm memory).
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn frame_ptr(&self) -> *const f32 {
        &self.frame as *const FrameUniforms as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
