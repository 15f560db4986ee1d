/// Solar System: an orrery of eight planets on circular orbits around an
/// emissive sun, viewed through a damped orbit camera.
///
/// The control panel drives the simulation through custom events; hovering
/// a planet shows its name next to the pointer.

use glam::{Quat, Vec2, Vec3};
use orrery_engine::*;

use crate::bodies::PLANETS;
use crate::scene_builder;
use crate::state::{ControlMessage, SimulationState, CUSTOM_SET_SPEED};

pub struct SolarSystem {
    state: SimulationState,
    /// Emit a status event on the next processed frame.
    status_dirty: bool,
    /// Planet entities, in table order, for picking.
    pickable: Vec<EntityId>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            state: SimulationState::new(),
            status_dirty: true,
            pickable: Vec::new(),
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    fn handle_message(&mut self, ctx: &mut EngineContext, message: ControlMessage) {
        if !self.state.apply(message) {
            log::warn!("ignored {message:?}: no such body");
            return;
        }
        match message {
            ControlMessage::ResetView => ctx.reset_view(),
            ControlMessage::SetSpeed { .. } => {}
            _ => self.status_dirty = true,
        }
    }

    /// Write simulation state into entity transforms and scene settings.
    fn sync_scene(&self, ctx: &mut EngineContext) {
        for body in &self.state.bodies {
            let (x, z) = body.orbit.position();
            ctx.graph.set_local(
                body.entity,
                LocalTransform::new()
                    .with_offset(Vec3::new(x as f32, 0.0, z as f32))
                    .with_rotation(Quat::from_rotation_y(body.orbit.spin as f32)),
            );
            if let Some(path) = ctx.scene.get_mut(body.orbit_path) {
                path.visible = self.state.orbits_visible;
            }
        }
        if let Some(sun) = self.state.sun.and_then(|id| ctx.scene.get_mut(id)) {
            sun.rotation = Quat::from_rotation_y(self.state.sun_spin as f32);
        }
        ctx.background = Color::hex(self.state.background_hex());
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_instances: 64,
            max_events: 16,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        match scene_builder::build(ctx, &PLANETS) {
            Ok(state) => {
                self.pickable = state.bodies.iter().map(|b| b.entity).collect();
                self.state = state;
            }
            Err(err) => log::error!("scene construction failed: {err}"),
        }
        self.sync_scene(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            if let InputEvent::Custom { kind, a, b, .. } = *event {
                match ControlMessage::from_custom(kind, a, b) {
                    Some(message) => self.handle_message(ctx, message),
                    None if kind == CUSTOM_SET_SPEED => {
                        log::warn!("ignored malformed speed event: body {a}, speed {b}")
                    }
                    None => log::debug!("unhandled custom event kind {kind}"),
                }
            }
        }

        self.state.advance();
        self.sync_scene(ctx);

        if self.status_dirty {
            ctx.emit_event(self.state.status_event());
            self.status_dirty = false;
        }
    }

    fn hover(&mut self, ctx: &mut EngineContext, pointer: Vec2) {
        let name = ctx
            .pick(pointer, &self.pickable)
            .and_then(|hit| self.state.body_by_entity(hit.id))
            .map(|body| body.spec.name);
        match name {
            Some(name) => ctx.tooltip.show_at(name, pointer),
            None => ctx.tooltip.hide(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_web::GameRunner;
    use crate::bodies::{self, MERCURY, PLANET_COUNT};
    use crate::state::{CUSTOM_RESET_VIEW, CUSTOM_TOGGLE_ORBITS, CUSTOM_TOGGLE_PAUSE, EVENT_STATUS};

    fn setup() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let config = GameConfig { viewport: Viewport::new(1000.0, 800.0), ..game.config() };
        let mut ctx = EngineContext::new(&config, 11);
        game.init(&mut ctx);
        ctx.graph.propagate(&mut ctx.scene);
        (game, ctx)
    }

    fn frame(game: &mut SolarSystem, ctx: &mut EngineContext, events: &[InputEvent]) {
        let mut input = InputQueue::new();
        for e in events {
            input.push(*e);
        }
        ctx.clear_frame_data();
        game.update(ctx, &input);
        ctx.graph.propagate(&mut ctx.scene);
    }

    fn custom(kind: u32, a: f32, b: f32) -> InputEvent {
        InputEvent::Custom { kind, a, b, c: 0.0 }
    }

    #[test]
    fn planet_moves_along_orbit_each_frame() {
        let (mut game, mut ctx) = setup();
        let mercury = game.state().bodies[MERCURY].entity;
        let start = game.state().bodies[MERCURY].orbit.angle;

        frame(&mut game, &mut ctx, &[]);

        let angle = game.state().bodies[MERCURY].orbit.angle;
        assert!((angle - (start + bodies::PLANETS[MERCURY].speed)).abs() < 1e-12);
        let pos = ctx.scene.get(mercury).unwrap().pos;
        assert!((pos.x - (angle.cos() * 10.0) as f32).abs() < 1e-4);
        assert!((pos.z - (angle.sin() * 10.0) as f32).abs() < 1e-4);
    }

    #[test]
    fn first_frame_reports_status() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[]);
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, EVENT_STATUS);
        frame(&mut game, &mut ctx, &[]);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn paused_frames_freeze_positions_and_spin() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_PAUSE, 0.0, 0.0)]);
        let earth = game.state().bodies[2].entity;
        let pos = ctx.scene.get(earth).unwrap().pos;
        let rot = ctx.scene.get(earth).unwrap().rotation;
        for _ in 0..10 {
            frame(&mut game, &mut ctx, &[]);
        }
        assert_eq!(ctx.scene.get(earth).unwrap().pos, pos);
        assert_eq!(ctx.scene.get(earth).unwrap().rotation, rot);
        assert_eq!(ctx.events.len(), 0);
    }

    #[test]
    fn orbit_toggle_hides_paths_only() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_TOGGLE_ORBITS, 0.0, 0.0)]);
        for body in &game.state().bodies {
            assert!(!ctx.scene.get(body.orbit_path).unwrap().visible);
            assert!(ctx.scene.get(body.entity).unwrap().visible);
        }
        assert_eq!(ctx.events[0].c, 0.0);
    }

    #[test]
    fn slider_changes_speed() {
        let (mut game, mut ctx) = setup();
        frame(&mut game, &mut ctx, &[custom(CUSTOM_SET_SPEED, 4.0, 0.015)]);
        assert!((game.state().bodies[4].orbit.speed - 0.015).abs() < 1e-6);
    }

    #[test]
    fn reset_view_restores_camera() {
        let (mut game, mut ctx) = setup();
        ctx.camera.position = Vec3::new(100.0, 5.0, 0.0);
        ctx.camera.target = Vec3::new(3.0, 0.0, 3.0);
        frame(&mut game, &mut ctx, &[custom(CUSTOM_RESET_VIEW, 0.0, 0.0)]);
        assert_eq!(ctx.camera.position, Vec3::new(0.0, 30.0, 50.0));
        assert_eq!(ctx.camera.target, Vec3::ZERO);
    }

    #[test]
    fn saturn_ring_spins_with_saturn() {
        let (mut game, mut ctx) = setup();
        for _ in 0..5 {
            frame(&mut game, &mut ctx, &[]);
        }
        let saturn = &game.state().bodies[bodies::SATURN];
        let ring = ctx.scene.get(saturn.accessory.unwrap()).unwrap();
        let planet = ctx.scene.get(saturn.entity).unwrap();
        assert!((ring.pos - planet.pos).length() < 1e-4);
        let expected = planet.rotation * Quat::from_rotation_x(-std::f32::consts::PI / 2.5);
        assert!(ring.rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn hover_labels_the_planet_under_the_pointer() {
        let (mut game, mut ctx) = setup();
        let jupiter = &game.state().bodies[bodies::JUPITER];
        let pos = ctx.scene.get(jupiter.entity).unwrap().pos;
        let ndc = ctx.camera.world_to_ndc(pos);
        let pointer = Vec2::new(
            (ndc.x + 1.0) / 2.0 * ctx.viewport.width,
            (1.0 - ndc.y) / 2.0 * ctx.viewport.height,
        );

        game.hover(&mut ctx, pointer);
        assert_eq!(ctx.tooltip.label.as_deref(), Some("Jupiter"));
        assert_eq!(ctx.tooltip.left, pointer.x + 10.0);

        // Empty corner of the sky hides it again
        game.hover(&mut ctx, Vec2::new(1.0, 1.0));
        assert!(ctx.tooltip.label.is_none());
    }

    fn runner(width: f32, height: f32) -> GameRunner<SolarSystem> {
        let mut r = GameRunner::new(SolarSystem::new(), 7);
        r.resize(width, height);
        r.init();
        r
    }

    fn angles(r: &GameRunner<SolarSystem>) -> Vec<f64> {
        r.game().state().bodies.iter().map(|b| b.orbit.angle).collect()
    }

    #[test]
    fn paused_simulation_still_damps_the_camera() {
        let mut r = runner(1280.0, 720.0);
        r.push_input(custom(CUSTOM_TOGGLE_PAUSE, 0.0, 0.0));
        assert!(r.tick(0.0));
        assert!(r.game().state().paused);
        let frozen = angles(&r);

        r.push_input(InputEvent::PointerDown { x: 400.0, y: 300.0, button: PointerButton::Primary });
        r.push_input(InputEvent::PointerMove { x: 600.0, y: 300.0 });
        r.push_input(InputEvent::PointerUp { x: 600.0, y: 300.0 });

        let mut last = r.context().camera.position;
        for frame in 1..=4 {
            assert!(r.tick(frame as f64 * 20.0));
            let pos = r.context().camera.position;
            assert!((pos - last).length() > 1e-3, "camera settled at frame {frame}");
            last = pos;
            assert_eq!(angles(&r), frozen);
        }
    }

    #[test]
    fn throttled_frame_leaves_orbits_untouched() {
        let mut r = runner(400.0, 800.0);
        assert!(r.tick(100.0));
        let admitted = angles(&r);

        assert!(!r.tick(110.0));
        assert_eq!(angles(&r), admitted);

        assert!(r.tick(116.0));
        for (i, angle) in angles(&r).into_iter().enumerate() {
            assert!((angle - (admitted[i] + bodies::PLANETS[i].speed)).abs() < 1e-12);
        }
    }

    #[test]
    fn hover_ignores_the_sun() {
        let (mut game, mut ctx) = setup();
        let center = Vec2::new(ctx.viewport.width / 2.0, ctx.viewport.height / 2.0);
        game.hover(&mut ctx, center);
        // The sun sits at the view center, planets may not
        let label = ctx.tooltip.label.clone();
        assert_ne!(label.as_deref(), Some(bodies::SUN_NAME));
        assert_eq!(game.state().bodies.len(), PLANET_COUNT);
    }
}
