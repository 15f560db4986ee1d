/// Simulation state and the control messages that change it.
///
/// UI input never mutates the scene directly: custom events decode into
/// `ControlMessage`s, `apply` folds them into `SimulationState`, and the
/// game writes the resulting state into entity transforms each frame.

use orrery_engine::{EntityId, GameEvent};
use crate::bodies::{self, BodySpec, SPEED_MAX, SPEED_MIN, SPEED_STEPS_PER_UNIT};
use crate::orbit::OrbitState;

// ── Custom event kinds from the control panel ────────────────────────

/// a = body index, b = new speed.
pub const CUSTOM_SET_SPEED: u32 = 1;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 2;
pub const CUSTOM_TOGGLE_BACKGROUND: u32 = 3;
pub const CUSTOM_TOGGLE_ORBITS: u32 = 4;
pub const CUSTOM_RESET_VIEW: u32 = 5;

// ── Game event kinds to the control panel ────────────────────────────

/// a = paused, b = dark background, c = orbits visible (each 0 or 1).
pub const EVENT_STATUS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMessage {
    SetSpeed { body: usize, speed: f64 },
    TogglePause,
    ToggleBackground,
    ToggleOrbits,
    ResetView,
}

impl ControlMessage {
    /// Decode a custom input event. Unknown kinds, and speed events whose
    /// index is not a whole non-negative number, yield `None`.
    pub fn from_custom(kind: u32, a: f32, b: f32) -> Option<Self> {
        match kind {
            CUSTOM_SET_SPEED => {
                if !a.is_finite() || a < 0.0 || a.fract() != 0.0 || !b.is_finite() {
                    return None;
                }
                Some(ControlMessage::SetSpeed { body: a as usize, speed: snap_speed(b) })
            }
            CUSTOM_TOGGLE_PAUSE => Some(ControlMessage::TogglePause),
            CUSTOM_TOGGLE_BACKGROUND => Some(ControlMessage::ToggleBackground),
            CUSTOM_TOGGLE_ORBITS => Some(ControlMessage::ToggleOrbits),
            CUSTOM_RESET_VIEW => Some(ControlMessage::ResetView),
            _ => None,
        }
    }
}

/// Snap a slider value (sent as f32) to the nearest slider step, so 0.01
/// decodes to exactly `0.01_f64`.
fn snap_speed(raw: f32) -> f64 {
    (raw as f64 * SPEED_STEPS_PER_UNIT).round() / SPEED_STEPS_PER_UNIT
}

/// Everything the scene keeps per planet, in one record.
#[derive(Debug, Clone)]
pub struct Body {
    pub spec: BodySpec,
    pub orbit: OrbitState,
    pub entity: EntityId,
    pub orbit_path: EntityId,
    pub accessory: Option<EntityId>,
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub bodies: Vec<Body>,
    pub sun: Option<EntityId>,
    pub sun_spin: f64,
    pub paused: bool,
    pub dark_background: bool,
    pub orbits_visible: bool,
}

impl SimulationState {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            sun: None,
            sun_spin: 0.0,
            paused: false,
            dark_background: true,
            orbits_visible: true,
        }
    }

    /// Fold one control message into the state. Returns false when the
    /// message referred to a body that does not exist.
    ///
    /// `ResetView` carries no simulation state; the caller resets the camera.
    pub fn apply(&mut self, message: ControlMessage) -> bool {
        match message {
            ControlMessage::SetSpeed { body, speed } => match self.bodies.get_mut(body) {
                Some(b) => {
                    b.orbit.speed = speed.clamp(SPEED_MIN, SPEED_MAX);
                    true
                }
                None => false,
            },
            ControlMessage::TogglePause => {
                self.paused = !self.paused;
                true
            }
            ControlMessage::ToggleBackground => {
                self.dark_background = !self.dark_background;
                true
            }
            ControlMessage::ToggleOrbits => {
                self.orbits_visible = !self.orbits_visible;
                true
            }
            ControlMessage::ResetView => true,
        }
    }

    /// One processed frame. Frozen while paused.
    pub fn advance(&mut self) {
        if self.paused {
            return;
        }
        for body in &mut self.bodies {
            body.orbit.advance(bodies::PLANET_SPIN_STEP);
        }
        self.sun_spin += bodies::SUN_SPIN_STEP;
    }

    pub fn body_by_entity(&self, id: EntityId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.entity == id)
    }

    pub fn background_hex(&self) -> u32 {
        if self.dark_background {
            bodies::BACKGROUND_DARK
        } else {
            bodies::BACKGROUND_LIGHT
        }
    }

    pub fn status_event(&self) -> GameEvent {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        GameEvent {
            kind: EVENT_STATUS,
            a: flag(self.paused),
            b: flag(self.dark_background),
            c: flag(self.orbits_visible),
        }
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}
