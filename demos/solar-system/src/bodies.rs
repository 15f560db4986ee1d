/// Body table and visual constants for the orrery.
///
/// Distances and radii are scene units, speeds are radians per processed
/// frame. Values favor readability over astronomical accuracy.

use std::f32::consts::PI;
use serde::Serialize;

/// Planet index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const PLANET_COUNT: usize = 8;

/// Sphere tessellation for every body.
pub const SPHERE_SEGMENTS: u32 = 32;

// ── Speed sliders ────────────────────────────────────────────────────

pub const SPEED_MIN: f64 = 0.0001;
pub const SPEED_MAX: f64 = 0.02;
pub const SPEED_STEP: f64 = 0.0001;
/// Slider positions per unit of speed, `1 / SPEED_STEP`.
pub const SPEED_STEPS_PER_UNIT: f64 = 10_000.0;

// ── Self-rotation per processed frame ────────────────────────────────

pub const PLANET_SPIN_STEP: f64 = 0.01;
pub const SUN_SPIN_STEP: f64 = 0.005;

// ── Background palette ───────────────────────────────────────────────

pub const BACKGROUND_DARK: u32 = 0x020c1b;
pub const BACKGROUND_LIGHT: u32 = 0xadd8e6;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_NAME: &str = "Sun";
pub const SUN_RADIUS: f32 = 6.0;
pub const SUN_TEXTURE: &str = "./textures/planets/sun.jpg";
pub const SUN_COLOR: u32 = 0xffffff;
pub const SUN_EMISSIVE: u32 = 0xffaa00;
pub const SUN_EMISSIVE_INTENSITY: f32 = 1.0;
/// Unlit color used when the sun texture cannot be loaded.
pub const SUN_FALLBACK_COLOR: u32 = 0xfdb813;

// ── Lights ───────────────────────────────────────────────────────────

pub const AMBIENT_COLOR: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const KEY_LIGHT_COLOR: u32 = 0x88ccff;
pub const KEY_LIGHT_INTENSITY: f32 = 1.0;
pub const KEY_LIGHT_POSITION: [f32; 3] = [10.0, 20.0, 15.0];

// ── Orbit paths ──────────────────────────────────────────────────────

/// Half-width of the orbit path band around the orbit radius.
pub const ORBIT_PATH_HALF_WIDTH: f32 = 0.1;
pub const ORBIT_PATH_COLOR: u32 = 0x00ffff;
pub const ORBIT_PATH_OPACITY: f32 = 0.3;
/// Rotation about X that lays an XY-plane ring flat on the orbital plane.
pub const ORBIT_PATH_TILT: f32 = -PI / 2.0;

// ── Star field ───────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 1000;
/// Edge length of the cube the stars are scattered in, centered on the sun.
pub const STAR_FIELD_SIZE: f32 = 300.0;
pub const STAR_SIZE: f32 = 1.5;
pub const STAR_SPRITE_PX: u32 = 64;

/// Flat ring carried by a body, e.g. Saturn's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    /// Inner edge distance beyond the body radius.
    pub inner_margin: f32,
    /// Outer edge distance beyond the body radius.
    pub outer_margin: f32,
    pub color: u32,
    pub opacity: f32,
    /// Rotation about the body's X axis.
    pub tilt_x: f32,
}

/// Extra geometry attached to a body and carried along with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accessory {
    Ring(RingSpec),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub name: &'static str,
    pub radius: f32,
    pub orbit_radius: f32,
    /// Default angular speed (radians per frame).
    pub speed: f64,
    pub color: u32,
    pub texture: &'static str,
    pub accessory: Option<Accessory>,
}

const SATURN_RING: RingSpec = RingSpec {
    inner_margin: 0.5,
    outer_margin: 2.0,
    color: 0xffe0aa,
    opacity: 0.7,
    tilt_x: -PI / 2.5,
};

pub const PLANETS: [BodySpec; PLANET_COUNT] = [
    BodySpec {
        name: "Mercury", radius: 0.8, orbit_radius: 10.0, speed: 0.006,
        color: 0xaaaaaa, texture: "./textures/planets/mercury.jpg", accessory: None,
    },
    BodySpec {
        name: "Venus", radius: 1.2, orbit_radius: 14.0, speed: 0.004,
        color: 0xffcc99, texture: "./textures/planets/venus.jpg", accessory: None,
    },
    BodySpec {
        name: "Earth", radius: 1.3, orbit_radius: 18.0, speed: 0.0035,
        color: 0x3399ff, texture: "./textures/planets/earth_atmos_2048.jpg", accessory: None,
    },
    BodySpec {
        name: "Mars", radius: 1.1, orbit_radius: 22.0, speed: 0.003,
        color: 0xff3300, texture: "./textures/planets/mars.jpg", accessory: None,
    },
    BodySpec {
        name: "Jupiter", radius: 2.5, orbit_radius: 28.0, speed: 0.0023,
        color: 0xff9966, texture: "./textures/planets/jupiter.jpg", accessory: None,
    },
    BodySpec {
        name: "Saturn", radius: 2.2, orbit_radius: 34.0, speed: 0.002,
        color: 0xffcc66, texture: "./textures/planets/saturn.jpg",
        accessory: Some(Accessory::Ring(SATURN_RING)),
    },
    BodySpec {
        name: "Uranus", radius: 1.8, orbit_radius: 40.0, speed: 0.0018,
        color: 0x66ccff, texture: "./textures/planets/uranus.jpg", accessory: None,
    },
    BodySpec {
        name: "Neptune", radius: 1.7, orbit_radius: 46.0, speed: 0.0015,
        color: 0x3366ff, texture: "./textures/planets/neptune.jpg", accessory: None,
    },
];

/// One slider row for the control panel.
#[derive(Debug, Clone, Serialize)]
pub struct SliderRow {
    pub index: usize,
    pub name: &'static str,
    pub speed: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub fn slider_rows() -> Vec<SliderRow> {
    PLANETS
        .iter()
        .enumerate()
        .map(|(index, spec)| SliderRow {
            index,
            name: spec.name,
            speed: spec.speed,
            min: SPEED_MIN,
            max: SPEED_MAX,
            step: SPEED_STEP,
        })
        .collect()
}

/// Slider table as JSON for the host page.
pub fn slider_table_json() -> Result<String, serde_json::Error> {
    serde_json::to_string(&slider_rows())
}
