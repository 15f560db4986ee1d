use glam::Vec2;
use orrery_engine::{
    Game, GameConfig, EngineContext, FrameThrottle,
    InputEvent, InputQueue, RenderBuffer, ProtocolLayout, TextureId,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `solar-system`) creates a `thread_local!`
/// GameRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    throttle: FrameThrottle,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Packed frame, laid out per `ProtocolLayout`.
    frame_buffer: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    /// `host_seed` is used when the game config does not fix a seed.
    pub fn new(game: G, host_seed: u64) -> Self {
        let config = game.config();
        let seed = config.seed.unwrap_or(host_seed);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::new(&config, seed),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            throttle: FrameThrottle::new(config.throttle),
            frame_buffer: vec![0.0; layout.buffer_total_floats],
            layout,
            config,
            game,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ctx.graph.propagate(&mut self.ctx.scene);
        self.ctx.controls.save_state(&self.ctx.camera);
        self.rebuild_frame();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at host time `now_ms`. Returns false when the frame was
    /// skipped (not initialized, or throttled on a narrow viewport).
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.initialized {
            return false;
        }
        if !self.throttle.admit(now_ms, self.ctx.viewport.width) {
            return false;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        for event in self.input.iter() {
            self.ctx.controls.handle_input(event, &self.ctx.camera, self.ctx.viewport);
        }

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.ctx.graph.propagate(&mut self.ctx.scene);
        self.ctx.controls.update(&mut self.ctx.camera);

        self.rebuild_frame();
        true
    }

    /// Pointer hover, handled immediately against current transforms.
    pub fn hover(&mut self, x: f32, y: f32) {
        if self.initialized {
            self.game.hover(&mut self.ctx, Vec2::new(x, y));
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.resize(width, height);
    }

    pub fn texture_loaded(&mut self, id: u32) {
        self.ctx.resolve_texture(TextureId(id), Ok(()));
    }

    pub fn texture_failed(&mut self, id: u32, reason: String) {
        self.ctx.resolve_texture(TextureId(id), Err(reason));
    }

    /// Texture requests not yet handed to the host, as JSON.
    pub fn texture_requests_json(&mut self) -> String {
        match self.ctx.textures.take_requests().to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("texture manifest serialization failed: {err}");
                String::from(r#"{"textures":[]}"#)
            }
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    fn rebuild_frame(&mut self) {
        build_render_buffer(
            self.ctx.scene.iter(),
            &self.ctx.camera,
            &self.ctx.lights,
            self.ctx.background,
            &mut self.render_buffer,
        );
        self.layout.write_frame(
            &mut self.frame_buffer,
            &self.render_buffer,
            &self.ctx.lights,
            &self.ctx.events,
            self.ctx.viewport,
        );
    }

    // ---- Pointer accessors for host reads ----

    pub fn frame_buffer_ptr(&self) -> *const f32 {
        self.frame_buffer.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn transparent_start(&self) -> u32 {
        self.render_buffer.transparent_start
    }

    pub fn frame_uniforms_ptr(&self) -> *const f32 {
        self.render_buffer.frame_ptr()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    // ---- Geometry and textures ----

    pub fn geometry_count(&self) -> u32 {
        self.ctx.geometry.len() as u32
    }

    pub fn geometry_vertices_ptr(&self, id: u32) -> *const f32 {
        self.ctx.geometry.vertices_ptr(orrery_engine::GeometryId(id))
    }

    pub fn geometry_vertex_count(&self, id: u32) -> u32 {
        self.ctx.geometry.vertex_count(orrery_engine::GeometryId(id))
    }

    pub fn geometry_indices_ptr(&self, id: u32) -> *const u32 {
        self.ctx.geometry.indices_ptr(orrery_engine::GeometryId(id))
    }

    pub fn geometry_index_count(&self, id: u32) -> u32 {
        self.ctx.geometry.index_count(orrery_engine::GeometryId(id))
    }

    /// 0 = triangles, 1 = points, -1 = unknown id.
    pub fn geometry_topology(&self, id: u32) -> i32 {
        self.ctx
            .geometry
            .topology(orrery_engine::GeometryId(id))
            .map_or(-1, |t| t as i32)
    }

    pub fn texture_pixels_ptr(&self, id: u32) -> *const u8 {
        self.ctx.textures.pixels_ptr(TextureId(id))
    }

    pub fn texture_pixels_len(&self, id: u32) -> u32 {
        self.ctx.textures.pixels_len(TextureId(id))
    }

    // ---- Tooltip ----

    pub fn tooltip_text(&self) -> Option<String> {
        self.ctx.tooltip.label.clone()
    }

    pub fn tooltip_left(&self) -> f32 {
        self.ctx.tooltip.left
    }

    pub fn tooltip_top(&self) -> f32 {
        self.ctx.tooltip.top
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
