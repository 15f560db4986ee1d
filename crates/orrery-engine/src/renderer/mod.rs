pub mod camera;
pub mod controls;
pub mod geometry;
pub mod instance;
