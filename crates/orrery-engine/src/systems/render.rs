use crate::components::entity::Entity;
use crate::components::mesh::Color;
use crate::renderer::camera::Camera3D;
use crate::renderer::instance::{FrameUniforms, MeshInstance, RenderBuffer};
use crate::systems::lighting::LightState;

/// Fill the frame uniforms from the camera, background and ambient light.
pub fn build_frame_uniforms(camera: &Camera3D, lights: &LightState, background: Color) -> FrameUniforms {
    let ambient = lights.ambient();
    FrameUniforms::new(camera.view_matrix(), camera.projection_matrix(), camera.position, background)
        .with_ambient(ambient.color, ambient.intensity)
}

/// Build the render buffer from a set of entities.
/// Hidden entities and entities without a mesh are skipped. Opaque instances
/// come first; blended ones (opacity < 1) follow from `transparent_start`.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &Camera3D,
    lights: &LightState,
    background: Color,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    let mut opaque: Vec<MeshInstance> = Vec::new();
    let mut blended: Vec<MeshInstance> = Vec::new();

    for entity in entities {
        if !entity.visible {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        let instance = MeshInstance::new(entity.model_matrix(), mesh.geometry.0, &mesh.material);
        if mesh.material.opacity < 1.0 {
            blended.push(instance);
        } else {
            opaque.push(instance);
        }
    }

    let split = opaque.len() as u32;
    for inst in opaque {
        buffer.push(inst);
    }
    buffer.set_transparent_start(split);
    for inst in blended {
        buffer.push(inst);
    }

    buffer.frame = build_frame_uniforms(camera, lights, background);
    buffer.frame_counter = buffer.frame_counter.wrapping_add(1);
}
