use crate::api::types::GeometryId;
use crate::components::material::Material;

/// Linear RGBA color (components 0.0 - 1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Analytic description of a mesh's geometry, kept next to the tessellated
/// data so picking and bounds do not need the vertex buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32 },
    Points { count: u32 },
}

impl Shape {
    /// Radius of a sphere centered on the entity origin enclosing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
            Shape::Ring { outer, .. } => outer,
            Shape::Points { .. } => 0.0,
        }
    }
}

/// Renderable component: tessellated geometry plus its surface material.
#[derive(Debug, Clone)]
pub struct MeshComponent {
    pub geometry: GeometryId,
    pub shape: Shape,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: GeometryId, shape: Shape, material: Material) -> Self {
        Self {
            geometry,
            shape,
            material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let c = Color::hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn bounding_radius_per_shape() {
        assert_eq!(Shape::Sphere { radius: 2.5 }.bounding_radius(), 2.5);
        assert_eq!(Shape::Ring { inner: 1.0, outer: 3.0 }.bounding_radius(), 3.0);
        assert_eq!(Shape::Points { count: 10 }.bounding_radius(), 0.0);
    }
}
