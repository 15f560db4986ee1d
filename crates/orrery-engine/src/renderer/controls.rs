//! Damped orbit camera controller.
//!
//! The camera orbits `camera.target` on a sphere. User input accumulates
//! spherical deltas, a pan offset and a dolly scale; `update()` applies a
//! `damping_factor` share of them each frame and decays the rest, so the
//! camera eases toward the requested pose instead of snapping.

use std::f32::consts::{PI, TAU};
use glam::{Vec2, Vec3};
use crate::api::types::Viewport;
use crate::input::queue::{InputEvent, PointerButton};
use crate::renderer::camera::Camera3D;

const EPS: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians (0 = straight down from above).
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub enable_pan: bool,
    /// Pan in the camera plane instead of the ground plane.
    pub screen_space_panning: bool,
    pub enable_touch: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 20.0,
            max_distance: 200.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            enable_pan: true,
            screen_space_panning: true,
            enable_touch: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    Idle,
    Rotate { last: Vec2 },
    Pan { last: Vec2 },
    Pinch { center: Vec2, distance: f32 },
}

/// Radius/polar/azimuth coordinates of the camera offset from its target.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y.
    phi: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < EPS {
            return Self { radius: 0.0, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

pub struct OrbitControls {
    pub config: ControlsConfig,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
    mode: DragMode,
    saved_position: Vec3,
    saved_target: Vec3,
}

impl OrbitControls {
    /// Create controls for `camera`, saving its current pose for `reset`.
    pub fn new(config: ControlsConfig, camera: &Camera3D) -> Self {
        Self {
            config,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            mode: DragMode::Idle,
            saved_position: camera.position,
            saved_target: camera.target,
        }
    }

    /// Remember the camera's current pose as the reset pose.
    pub fn save_state(&mut self, camera: &Camera3D) {
        self.saved_position = camera.position;
        self.saved_target = camera.target;
    }

    /// Snap the camera back to the saved pose and drop pending motion.
    pub fn reset(&mut self, camera: &mut Camera3D) {
        camera.position = self.saved_position;
        camera.target = self.saved_target;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
        self.mode = DragMode::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        self.mode != DragMode::Idle
    }

    /// Feed one input event. Custom events are ignored.
    pub fn handle_input(&mut self, event: &InputEvent, camera: &Camera3D, viewport: Viewport) {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                let at = Vec2::new(x, y);
                self.mode = match button {
                    PointerButton::Primary => DragMode::Rotate { last: at },
                    PointerButton::Secondary if self.config.enable_pan => DragMode::Pan { last: at },
                    PointerButton::Secondary => DragMode::Idle,
                };
            }
            InputEvent::PointerMove { x, y } => {
                let at = Vec2::new(x, y);
                match self.mode {
                    DragMode::Rotate { last } => {
                        self.rotate_by_pixels(at - last, viewport);
                        self.mode = DragMode::Rotate { last: at };
                    }
                    DragMode::Pan { last } => {
                        self.pan_by_pixels(at - last, camera, viewport);
                        self.mode = DragMode::Pan { last: at };
                    }
                    _ => {}
                }
            }
            InputEvent::PointerUp { .. } => {
                if !matches!(self.mode, DragMode::Pinch { .. }) {
                    self.mode = DragMode::Idle;
                }
            }
            InputEvent::Wheel { delta_y } => {
                if delta_y < 0.0 {
                    self.dolly_in(self.zoom_scale());
                } else if delta_y > 0.0 {
                    self.dolly_out(self.zoom_scale());
                }
            }
            InputEvent::PinchStart { x, y, distance } => {
                if self.config.enable_touch {
                    self.mode = DragMode::Pinch { center: Vec2::new(x, y), distance };
                }
            }
            InputEvent::PinchMove { x, y, distance } => {
                if let DragMode::Pinch { center, distance: start } = self.mode {
                    if start > EPS && distance > EPS {
                        self.dolly_out((distance / start).powf(self.config.zoom_speed));
                    }
                    let at = Vec2::new(x, y);
                    if self.config.enable_pan {
                        self.pan_by_pixels(at - center, camera, viewport);
                    }
                    self.mode = DragMode::Pinch { center: at, distance };
                }
            }
            InputEvent::PinchEnd => {
                self.mode = DragMode::Idle;
            }
            InputEvent::Custom { .. } => {}
        }
    }

    /// Apply accumulated motion to the camera. Call once per processed frame.
    pub fn update(&mut self, camera: &mut Camera3D) {
        let mut spherical = Spherical::from_offset(camera.position - camera.target);

        let (step_theta, step_phi, step_pan) = if self.config.enable_damping {
            let f = self.config.damping_factor;
            (self.delta_theta * f, self.delta_phi * f, self.pan_offset * f)
        } else {
            (self.delta_theta, self.delta_phi, self.pan_offset)
        };

        spherical.theta += step_theta;
        spherical.phi = (spherical.phi + step_phi)
            .clamp(self.config.min_polar_angle, self.config.max_polar_angle)
            .clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale)
            .clamp(self.config.min_distance, self.config.max_distance);

        camera.target += step_pan;
        camera.position = camera.target + spherical.to_offset();

        if self.config.enable_damping {
            let keep = 1.0 - self.config.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.config.zoom_speed)
    }

    fn dolly_in(&mut self, factor: f32) {
        self.scale *= factor;
    }

    fn dolly_out(&mut self, factor: f32) {
        self.scale /= factor;
    }

    fn rotate_by_pixels(&mut self, delta: Vec2, viewport: Viewport) {
        let height = viewport.height.max(1.0);
        self.delta_theta -= TAU * delta.x / height * self.config.rotate_speed;
        self.delta_phi -= TAU * delta.y / height * self.config.rotate_speed;
    }

    fn pan_by_pixels(&mut self, delta: Vec2, camera: &Camera3D, viewport: Viewport) {
        let height = viewport.height.max(1.0);
        let offset = camera.position - camera.target;
        // Half-height of the view frustum at the target distance
        let target_distance = offset.length() * (camera.fov_y_deg.to_radians() / 2.0).tan();
        let left = 2.0 * delta.x * target_distance / height * self.config.pan_speed;
        let up = 2.0 * delta.y * target_distance / height * self.config.pan_speed;

        let right_axis = camera.right();
        let up_axis = if self.config.screen_space_panning {
            camera.camera_up()
        } else {
            Vec3::Y.cross(right_axis).normalize_or_zero()
        };
        self.pan_offset += -right_axis * left + up_axis * up;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraConfig;

    fn rig() -> (Camera3D, OrbitControls) {
        let camera = Camera3D::new(&CameraConfig::default(), 1.0);
        let controls = OrbitControls::new(ControlsConfig::default(), &camera);
        (camera, controls)
    }

    fn viewport() -> Viewport {
        Viewport::new(800.0, 800.0)
    }

    fn drag(controls: &mut OrbitControls, camera: &Camera3D, button: PointerButton, from: Vec2, to: Vec2) {
        controls.handle_input(&InputEvent::PointerDown { x: from.x, y: from.y, button }, camera, viewport());
        controls.handle_input(&InputEvent::PointerMove { x: to.x, y: to.y }, camera, viewport());
        controls.handle_input(&InputEvent::PointerUp { x: to.x, y: to.y }, camera, viewport());
    }

    #[test]
    fn idle_update_keeps_pose() {
        let (mut camera, mut controls) = rig();
        let before = camera.position;
        controls.update(&mut camera);
        assert!((camera.position - before).length() < 1e-3);
    }

    #[test]
    fn rotation_eases_in_over_frames() {
        let (mut camera, mut controls) = rig();
        let start = camera.position;
        drag(&mut controls, &camera.clone(), PointerButton::Primary, Vec2::new(400.0, 400.0), Vec2::new(500.0, 400.0));

        controls.update(&mut camera);
        let first_step = (camera.position - start).length();
        assert!(first_step > 0.0);

        for _ in 0..200 {
            controls.update(&mut camera);
        }
        let total = (camera.position - start).length();
        assert!(total > first_step * 5.0, "damping should spread motion over frames");
        // Orbiting keeps the distance to the target
        let distance = (camera.position - camera.target).length();
        assert!((distance - start.length()).abs() < 1e-2);
    }

    #[test]
    fn wheel_zoom_respects_distance_limits() {
        let (mut camera, mut controls) = rig();
        for _ in 0..200 {
            controls.handle_input(&InputEvent::Wheel { delta_y: 100.0 }, &camera, viewport());
            controls.update(&mut camera);
        }
        let far = (camera.position - camera.target).length();
        assert!((far - 200.0).abs() < 1e-2, "max distance clamp, got {far}");

        for _ in 0..200 {
            controls.handle_input(&InputEvent::Wheel { delta_y: -100.0 }, &camera, viewport());
            controls.update(&mut camera);
        }
        let near = (camera.position - camera.target).length();
        assert!((near - 20.0).abs() < 1e-2, "min distance clamp, got {near}");
    }

    #[test]
    fn polar_angle_is_clamped() {
        let (mut camera, mut controls) = rig();
        controls.config.max_polar_angle = PI / 2.0;
        drag(&mut controls, &camera.clone(), PointerButton::Primary, Vec2::new(400.0, 0.0), Vec2::new(400.0, -4000.0));
        for _ in 0..300 {
            controls.update(&mut camera);
        }
        // Never dips below the orbital plane
        assert!(camera.position.y >= -1e-3);
    }

    #[test]
    fn pan_moves_target() {
        let (mut camera, mut controls) = rig();
        drag(&mut controls, &camera.clone(), PointerButton::Secondary, Vec2::new(400.0, 400.0), Vec2::new(300.0, 400.0));
        for _ in 0..200 {
            controls.update(&mut camera);
        }
        // Dragging left moves the view to the right
        assert!(camera.target.x > 0.0);
    }

    #[test]
    fn pan_disabled_ignores_secondary_drag() {
        let (mut camera, mut controls) = rig();
        controls.config.enable_pan = false;
        drag(&mut controls, &camera.clone(), PointerButton::Secondary, Vec2::new(400.0, 400.0), Vec2::new(100.0, 100.0));
        controls.update(&mut camera);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn pinch_apart_zooms_in() {
        let (mut camera, mut controls) = rig();
        let start = (camera.position - camera.target).length();
        controls.handle_input(&InputEvent::PinchStart { x: 400.0, y: 400.0, distance: 100.0 }, &camera, viewport());
        controls.handle_input(&InputEvent::PinchMove { x: 400.0, y: 400.0, distance: 150.0 }, &camera, viewport());
        controls.handle_input(&InputEvent::PinchEnd, &camera, viewport());
        controls.update(&mut camera);
        let after = (camera.position - camera.target).length();
        assert!(after < start);
        assert!(!controls.is_dragging());
    }

    #[test]
    fn reset_restores_saved_pose() {
        let (mut camera, mut controls) = rig();
        let home = camera.clone();
        drag(&mut controls, &camera.clone(), PointerButton::Secondary, Vec2::new(0.0, 0.0), Vec2::new(300.0, 200.0));
        for _ in 0..50 {
            controls.update(&mut camera);
        }
        assert_ne!(camera.target, home.target);

        controls.reset(&mut camera);
        assert_eq!(camera.position, home.position);
        assert_eq!(camera.target, home.target);
        // Pending motion is gone too
        controls.update(&mut camera);
        assert!((camera.position - home.position).length() < 1e-3);
    }
}
