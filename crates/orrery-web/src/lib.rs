pub mod runner;

pub use runner::GameRunner;
pub use js_sys;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers,
///   texture callbacks, tooltip and buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `orrery_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init(width: f32, height: f32) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let seed = $crate::js_sys::Date::now() as u64;
            let runner = $crate::GameRunner::new(game, seed);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| {
                r.resize(width, height);
                r.init();
            });
            log::info!("{}: initialized", $game_name);
        }

        /// Returns false when the frame was throttled; the host may skip
        /// its draw call.
        #[wasm_bindgen]
        pub fn game_tick(now_ms: f64) -> bool {
            with_runner(|r| r.tick(now_ms))
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32, button: u32) {
            let button = PointerButton::from_dom(button);
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y, button }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| {
                r.push_input(InputEvent::PointerMove { x, y });
                r.hover(x, y);
            });
        }

        #[wasm_bindgen]
        pub fn game_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn game_pinch_start(x: f32, y: f32, distance: f32) {
            with_runner(|r| r.push_input(InputEvent::PinchStart { x, y, distance }));
        }

        #[wasm_bindgen]
        pub fn game_pinch_move(x: f32, y: f32, distance: f32) {
            with_runner(|r| r.push_input(InputEvent::PinchMove { x, y, distance }));
        }

        #[wasm_bindgen]
        pub fn game_pinch_end() {
            with_runner(|r| r.push_input(InputEvent::PinchEnd));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Textures ----

        #[wasm_bindgen]
        pub fn get_texture_requests() -> String {
            with_runner(|r| r.texture_requests_json())
        }

        #[wasm_bindgen]
        pub fn game_texture_loaded(id: u32) {
            with_runner(|r| r.texture_loaded(id));
        }

        #[wasm_bindgen]
        pub fn game_texture_failed(id: u32, reason: String) {
            with_runner(|r| r.texture_failed(id, reason));
        }

        #[wasm_bindgen]
        pub fn get_texture_pixels_ptr(id: u32) -> *const u8 {
            with_runner(|r| r.texture_pixels_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_texture_pixels_len(id: u32) -> u32 {
            with_runner(|r| r.texture_pixels_len(id))
        }

        // ---- Geometry ----

        #[wasm_bindgen]
        pub fn get_geometry_count() -> u32 {
            with_runner(|r| r.geometry_count())
        }

        #[wasm_bindgen]
        pub fn get_geometry_vertices_ptr(id: u32) -> *const f32 {
            with_runner(|r| r.geometry_vertices_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_vertex_count(id: u32) -> u32 {
            with_runner(|r| r.geometry_vertex_count(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_indices_ptr(id: u32) -> *const u32 {
            with_runner(|r| r.geometry_indices_ptr(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_index_count(id: u32) -> u32 {
            with_runner(|r| r.geometry_index_count(id))
        }

        #[wasm_bindgen]
        pub fn get_geometry_topology(id: u32) -> i32 {
            with_runner(|r| r.geometry_topology(id))
        }

        // ---- Tooltip ----

        #[wasm_bindgen]
        pub fn get_tooltip_text() -> Option<String> {
            with_runner(|r| r.tooltip_text())
        }

        #[wasm_bindgen]
        pub fn get_tooltip_left() -> f32 {
            with_runner(|r| r.tooltip_left())
        }

        #[wasm_bindgen]
        pub fn get_tooltip_top() -> f32 {
            with_runner(|r| r.tooltip_top())
        }

        // ---- Frame data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_buffer_ptr() -> *const f32 {
            with_runner(|r| r.frame_buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_transparent_start() -> u32 {
            with_runner(|r| r.transparent_start())
        }

        #[wasm_bindgen]
        pub fn get_frame_uniforms_ptr() -> *const f32 {
            with_runner(|r| r.frame_uniforms_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
