/// Frame buffer layout shared with the host renderer.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Frame uniforms: 44 floats]
/// [Instances: max_instances × 28 floats]
/// [Lights: max_lights × 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header on every frame.
/// The host reads them from the header to compute offsets dynamically.

use bytemuck::cast_slice;
use crate::api::game::GameConfig;
use crate::api::types::{GameEvent, Viewport};
use crate::renderer::instance::RenderBuffer;
use crate::systems::lighting::LightState;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TRANSPARENT_START: usize = 4;
pub const HEADER_MAX_LIGHTS: usize = 5;
pub const HEADER_LIGHT_COUNT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_PROTOCOL_VERSION: usize = 9;
pub const HEADER_VIEWPORT_WIDTH: usize = 10;
pub const HEADER_VIEWPORT_HEIGHT: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per mesh instance (wire format, never changes).
pub const MESH_INSTANCE_FLOATS: usize = 28;

/// Floats per frame uniform block.
pub const FRAME_FLOATS: usize = 44;

/// Floats per directional light: x, y, z, intensity, r, g, b, pad.
pub const LIGHT_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

pub const DEFAULT_MAX_LIGHTS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,
    pub max_events: usize,

    pub instance_data_floats: usize,
    pub light_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where the frame uniforms begin.
    pub frame_data_offset: usize,
    pub instance_data_offset: usize,
    pub light_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_lights: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * MESH_INSTANCE_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let frame_data_offset = HEADER_FLOATS;
        let instance_data_offset = frame_data_offset + FRAME_FLOATS;
        let light_data_offset = instance_data_offset + instance_data_floats;
        let event_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_lights,
            max_events,
            instance_data_floats,
            light_data_floats,
            event_data_floats,
            frame_data_offset,
            instance_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_lights, config.max_events)
    }

    /// Pack one frame into `out`, which must hold `buffer_total_floats`.
    /// Sections past their capacity are truncated.
    pub fn write_frame(
        &self,
        out: &mut [f32],
        render: &RenderBuffer,
        lights: &LightState,
        events: &[GameEvent],
        viewport: Viewport,
    ) {
        if out.len() < self.buffer_total_floats {
            return;
        }

        let instances = &render.instances[..render.instances.len().min(self.max_instances)];
        let light_list: Vec<_> = lights.iter().take(self.max_lights).copied().collect();
        let events = &events[..events.len().min(self.max_events)];

        let header = &mut out[..HEADER_FLOATS];
        header.fill(0.0);
        header[HEADER_FRAME_COUNTER] = render.frame_counter as f32;
        header[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        header[HEADER_TRANSPARENT_START] = (render.transparent_start as usize).min(instances.len()) as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = light_list.len() as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.len() as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_VIEWPORT_WIDTH] = viewport.width;
        header[HEADER_VIEWPORT_HEIGHT] = viewport.height;

        let frame: &[f32] = cast_slice(std::slice::from_ref(&render.frame));
        out[self.frame_data_offset..self.frame_data_offset + FRAME_FLOATS].copy_from_slice(frame);

        let inst: &[f32] = cast_slice(instances);
        out[self.instance_data_offset..self.instance_data_offset + inst.len()].copy_from_slice(inst);

        let lit: &[f32] = cast_slice(&light_list);
        out[self.light_data_offset..self.light_data_offset + lit.len()].copy_from_slice(lit);

        let ev: &[f32] = cast_slice(events);
        out[self.event_data_offset..self.event_data_offset + ev.len()].copy_from_slice(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use crate::components::material::Material;
    use crate::renderer::instance::{FrameUniforms, MeshInstance};
    use crate::components::mesh::Color;
    use crate::systems::lighting::DirectionalLight;

    #[test]
    fn wire_sizes_match_structs() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MESH_INSTANCE_FLOATS * 4);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), FRAME_FLOATS * 4);
        assert_eq!(std::mem::size_of::<GameEvent>(), EVENT_FLOATS * 4);
    }

    #[test]
    fn from_default_config() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);
        assert_eq!(layout.max_instances, config.max_instances);
        assert_eq!(layout.max_lights, DEFAULT_MAX_LIGHTS);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 4, 20);
        assert_eq!(layout.frame_data_offset, HEADER_FLOATS);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS + FRAME_FLOATS);
        assert_eq!(layout.light_data_offset, layout.instance_data_offset + 100 * 28);
        assert_eq!(layout.event_data_offset, layout.light_data_offset + 4 * 8);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 20 * 4);
    }

    #[test]
    fn write_frame_packs_sections() {
        let layout = ProtocolLayout::new(2, 1, 2);
        let mut out = vec![0.0; layout.buffer_total_floats];

        let mut render = RenderBuffer::new();
        for i in 0..3 {
            let model = Mat4::from_translation(Vec3::new(i as f32, 0.0, 0.0));
            render.push(MeshInstance::new(model, i, &Material::default()));
        }
        render.frame_counter = 7;

        let mut lights = LightState::new();
        lights.add(DirectionalLight::new(Vec3::new(10.0, 20.0, 15.0), Color::WHITE, 1.0));
        lights.add(DirectionalLight::new(Vec3::Y, Color::WHITE, 1.0));
        let events = [GameEvent { kind: 5.0, a: 1.0, b: 0.0, c: 1.0 }];

        layout.write_frame(&mut out, &render, &lights, &events, Viewport::new(640.0, 480.0));

        assert_eq!(out[HEADER_FRAME_COUNTER], 7.0);
        // Truncated to capacity
        assert_eq!(out[HEADER_INSTANCE_COUNT], 2.0);
        assert_eq!(out[HEADER_LIGHT_COUNT], 1.0);
        assert_eq!(out[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(out[HEADER_VIEWPORT_WIDTH], 640.0);

        // Second instance translation x sits at model[12]
        let second = layout.instance_data_offset + MESH_INSTANCE_FLOATS;
        assert_eq!(out[second + 12], 1.0);
        assert_eq!(out[layout.light_data_offset + 1], 20.0);
        assert_eq!(out[layout.event_data_offset], 5.0);
    }

    #[test]
    fn short_buffer_is_left_untouched() {
        let layout = ProtocolLayout::new(4, 1, 1);
        let mut out = vec![9.0; 8];
        layout.write_frame(&mut out, &RenderBuffer::new(), &LightState::new(), &[], Viewport::default());
        assert!(out.iter().all(|&v| v == 9.0));
    }
}
