/// Builds the static scene from the body table: star field, lights, sun,
/// planets, orbit paths and accessories. Runs once at init.

use std::f64::consts::TAU;
use glam::{Quat, Vec3};
use orrery_engine::*;

use crate::bodies::{self, Accessory, BodySpec};
use crate::orbit::OrbitState;
use crate::state::{Body, SimulationState};

/// Populate `ctx` and return the simulation state that drives it.
pub fn build(ctx: &mut EngineContext, table: &[BodySpec]) -> Result<SimulationState, GeometryError> {
    let mut state = SimulationState::new();

    ctx.background = Color::hex(state.background_hex());
    ctx.lights.set_ambient(Color::hex(bodies::AMBIENT_COLOR), bodies::AMBIENT_INTENSITY);
    ctx.lights.add(DirectionalLight::new(
        Vec3::from(bodies::KEY_LIGHT_POSITION),
        Color::hex(bodies::KEY_LIGHT_COLOR),
        bodies::KEY_LIGHT_INTENSITY,
    ));

    spawn_stars(ctx);
    state.sun = Some(spawn_sun(ctx));

    for spec in table {
        let start_angle = ctx.rng.next_f64() * TAU;
        state.bodies.push(spawn_body(ctx, spec, start_angle)?);
    }

    log::info!("scene built: {} bodies, {} entities", state.bodies.len(), ctx.scene.len());
    Ok(state)
}

fn spawn_stars(ctx: &mut EngineContext) {
    let half = bodies::STAR_FIELD_SIZE / 2.0;
    let positions: Vec<Vec3> = (0..bodies::STAR_COUNT)
        .map(|_| {
            Vec3::new(
                ctx.rng.next_f32() * bodies::STAR_FIELD_SIZE - half,
                ctx.rng.next_f32() * bodies::STAR_FIELD_SIZE - half,
                ctx.rng.next_f32() * bodies::STAR_FIELD_SIZE - half,
            )
        })
        .collect();
    let geometry = ctx.geometry.points(&positions);

    let size = bodies::STAR_SPRITE_PX;
    let sprite = ctx.textures.register_pixels("star", size, size, radial_sprite(size));

    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id).with_tag("stars").with_mesh(MeshComponent::new(
            geometry,
            Shape::Points { count: bodies::STAR_COUNT as u32 },
            Material::points(Color::WHITE, bodies::STAR_SIZE).with_ready_texture(sprite),
        )),
    );
}

fn spawn_sun(ctx: &mut EngineContext) -> EntityId {
    let geometry = ctx.geometry.sphere(bodies::SUN_RADIUS, bodies::SPHERE_SEGMENTS, bodies::SPHERE_SEGMENTS);
    let texture = ctx.textures.request(bodies::SUN_TEXTURE);
    let fallback = Material::basic(Color::hex(bodies::SUN_FALLBACK_COLOR));
    let material = Material::standard(Color::hex(bodies::SUN_COLOR))
        .with_emissive(Color::hex(bodies::SUN_EMISSIVE), bodies::SUN_EMISSIVE_INTENSITY)
        .with_texture(texture, TextureFallback::Replace(Box::new(fallback)));

    let id = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(id).with_tag(bodies::SUN_NAME).with_mesh(MeshComponent::new(
            geometry,
            Shape::Sphere { radius: bodies::SUN_RADIUS },
            material,
        )),
    );
    id
}

fn spawn_body(ctx: &mut EngineContext, spec: &BodySpec, start_angle: f64) -> Result<Body, GeometryError> {
    let orbit = OrbitState::new(spec.orbit_radius as f64, spec.speed, start_angle);

    // Planet
    let geometry = ctx.geometry.sphere(spec.radius, bodies::SPHERE_SEGMENTS, bodies::SPHERE_SEGMENTS);
    let texture = ctx.textures.request(spec.texture);
    let material = Material::standard(Color::hex(spec.color)).with_texture(texture, TextureFallback::KeepColor);
    let entity = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(entity).with_tag(spec.name).with_mesh(MeshComponent::new(
            geometry,
            Shape::Sphere { radius: spec.radius },
            material,
        )),
    );
    let (x, z) = orbit.position();
    ctx.graph.register_with(entity, LocalTransform::new().with_offset(Vec3::new(x as f32, 0.0, z as f32)));

    // Orbit path
    let inner = spec.orbit_radius - bodies::ORBIT_PATH_HALF_WIDTH;
    let outer = spec.orbit_radius + bodies::ORBIT_PATH_HALF_WIDTH;
    let path_geometry = ctx.geometry.ring(inner, outer, RING_SEGMENTS)?;
    let orbit_path = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(orbit_path)
            .with_tag(format!("{} orbit", spec.name))
            .with_rotation(Quat::from_rotation_x(bodies::ORBIT_PATH_TILT))
            .with_mesh(MeshComponent::new(
                path_geometry,
                Shape::Ring { inner, outer },
                Material::basic(Color::hex(bodies::ORBIT_PATH_COLOR))
                    .with_opacity(bodies::ORBIT_PATH_OPACITY)
                    .double_sided(),
            )),
    );

    let accessory = match spec.accessory {
        Some(Accessory::Ring(ring)) => {
            let inner = spec.radius + ring.inner_margin;
            let outer = spec.radius + ring.outer_margin;
            let ring_geometry = ctx.geometry.ring(inner, outer, RING_SEGMENTS)?;
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(format!("{} ring", spec.name))
                    .with_mesh(MeshComponent::new(
                        ring_geometry,
                        Shape::Ring { inner, outer },
                        Material::basic(Color::hex(ring.color))
                            .with_opacity(ring.opacity)
                            .double_sided(),
                    )),
            );
            ctx.graph.register_with(
                id,
                LocalTransform::new().with_rotation(Quat::from_rotation_x(ring.tilt_x)),
            );
            ctx.graph.set_parent(id, Some(entity));
            Some(id)
        }
        None => None,
    };

    Ok(Body { spec: *spec, orbit, entity, orbit_path, accessory })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{PLANETS, PLANET_COUNT, SATURN};

    fn built() -> (EngineContext, SimulationState) {
        let mut ctx = EngineContext::new(&GameConfig::default(), 3);
        let state = build(&mut ctx, &PLANETS).expect("scene");
        ctx.graph.propagate(&mut ctx.scene);
        (ctx, state)
    }

    #[test]
    fn one_record_per_planet() {
        let (ctx, state) = built();
        assert_eq!(state.bodies.len(), PLANET_COUNT);
        for (body, spec) in state.bodies.iter().zip(PLANETS.iter()) {
            assert_eq!(body.spec.name, spec.name);
            assert_eq!(ctx.scene.get(body.entity).map(|e| e.tag.as_str()), Some(spec.name));
            assert!(ctx.scene.get(body.orbit_path).is_some());
        }
        // stars + sun + 8 planets + 8 paths + 1 ring
        assert_eq!(ctx.scene.len(), 2 + PLANET_COUNT * 2 + 1);
    }

    #[test]
    fn planets_start_on_their_orbits() {
        let (ctx, state) = built();
        for body in &state.bodies {
            let pos = ctx.scene.get(body.entity).unwrap().pos;
            assert!(pos.y.abs() < 1e-6);
            let r = (pos.x * pos.x + pos.z * pos.z).sqrt();
            assert!((r - body.spec.orbit_radius).abs() < 1e-3);
            assert!((0.0..TAU).contains(&body.orbit.angle));
        }
    }

    #[test]
    fn saturn_ring_follows_saturn() {
        let (ctx, state) = built();
        let saturn = &state.bodies[SATURN];
        let ring = saturn.accessory.expect("ring");
        assert_eq!(ctx.graph.get_parent(ring), Some(saturn.entity));
        let planet_pos = ctx.scene.get(saturn.entity).unwrap().pos;
        let ring_pos = ctx.scene.get(ring).unwrap().pos;
        assert!((planet_pos - ring_pos).length() < 1e-5);
        assert!(state.bodies.iter().filter(|b| b.accessory.is_some()).count() == 1);
    }

    #[test]
    fn textures_are_requested_once_each() {
        let (mut ctx, _) = built();
        let manifest = ctx.textures.take_requests();
        // sun + 8 planets + star sprite
        assert_eq!(manifest.textures.len(), PLANET_COUNT + 2);
        assert_eq!(ctx.textures.pending_count(), PLANET_COUNT + 1);
    }

    #[test]
    fn star_field_fills_cube() {
        let (ctx, _) = built();
        let stars = ctx.scene.find_by_tag("stars").unwrap();
        let geometry = stars.mesh.as_ref().unwrap().geometry;
        let data = ctx.geometry.get(geometry).unwrap();
        assert_eq!(data.vertices.len(), bodies::STAR_COUNT);
        let half = bodies::STAR_FIELD_SIZE / 2.0;
        assert!(data.vertices.iter().all(|v| v.position.iter().all(|c| c.abs() <= half)));
    }

    #[test]
    fn lights_and_background_are_set() {
        let (ctx, _) = built();
        assert_eq!(ctx.lights.count(), 1);
        assert_eq!(ctx.lights.ambient().intensity, bodies::AMBIENT_INTENSITY);
        assert_eq!(ctx.background, Color::hex(bodies::BACKGROUND_DARK));
    }
}
