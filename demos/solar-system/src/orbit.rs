/// Circular orbit integration. Pure math, no engine dependencies.
///
/// Uses f64 throughout so long sessions do not accumulate f32 drift in the
/// phase angle. Only convert to f32 when writing entity transforms.

/// Orbital phase and self-rotation of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Phase angle along the orbit (radians, unbounded).
    pub angle: f64,
    /// Angular speed in radians per processed frame.
    pub speed: f64,
    pub orbit_radius: f64,
    /// Self-rotation about the body's Y axis (radians, unbounded).
    pub spin: f64,
}

impl OrbitState {
    pub fn new(orbit_radius: f64, speed: f64, start_angle: f64) -> Self {
        Self { angle: start_angle, speed, orbit_radius, spin: 0.0 }
    }

    /// One processed frame: advance the phase by `speed` and the spin by
    /// `spin_step`.
    pub fn advance(&mut self, spin_step: f64) {
        self.angle += self.speed;
        self.spin += spin_step;
    }

    /// Position on the orbital plane as (x, z).
    pub fn position(&self) -> (f64, f64) {
        (
            self.angle.cos() * self.orbit_radius,
            self.angle.sin() * self.orbit_radius,
        )
    }
}
