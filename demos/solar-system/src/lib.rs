use wasm_bindgen::prelude::*;
use orrery_engine::*;

pub mod bodies;
pub mod game;
pub mod orbit;
pub mod scene_builder;
pub mod state;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

/// Slider rows (name, default speed, range, step) for the control panel.
#[wasm_bindgen]
pub fn solar_body_table() -> String {
    bodies::slider_table_json().unwrap_or_else(|err| {
        log::error!("body table serialization failed: {err}");
        String::from("[]")
    })
}
