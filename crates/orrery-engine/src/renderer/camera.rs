use glam::{Mat4, Vec2, Vec3};
use crate::systems::picking::Ray;

/// Perspective camera parameters and home pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    pub near: f32,
    pub far: f32,
    pub home_position: Vec3,
    pub home_target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            home_position: Vec3::new(0.0, 30.0, 50.0),
            home_target: Vec3::ZERO,
        }
    }
}

/// Perspective camera looking at a target point, Y-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera3D {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.home_position,
            target: config.home_target,
            up: Vec3::Y,
            fov_y_deg: config.fov_y_deg,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Right-handed perspective projection, depth in [0, 1] (WebGPU).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Camera-space +X axis in world space.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    /// Camera-space +Y axis in world space.
    pub fn camera_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Project a world point into normalized device coordinates.
    pub fn world_to_ndc(&self, point: Vec3) -> Vec3 {
        self.view_projection().project_point3(point)
    }

    /// Build the picking ray from the camera through an NDC point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far_point = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far_point - self.position)
    }
}
