/// Which pointer button started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button or single-finger touch: orbit.
    Primary,
    /// Right mouse button: pan.
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: u32) -> Self {
        match button {
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }
}

/// Input event types the engine understands.
/// Generic, with no game-specific semantics. Coordinates are client-space CSS px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32, button: PointerButton },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel; positive `delta_y` scrolls down (zoom out).
    Wheel { delta_y: f32 },
    /// Two-finger gesture began: centroid and finger distance.
    PinchStart { x: f32, y: f32, distance: f32 },
    /// Two-finger gesture moved.
    PinchMove { x: f32, y: f32, distance: f32 },
    /// Two-finger gesture ended.
    PinchEnd,
    /// A custom event from the UI layer (buttons, sliders).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each processed frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
