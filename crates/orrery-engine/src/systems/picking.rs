//! Pointer picking against bounding spheres, plus the hover tooltip.

use glam::{Vec2, Vec3};
use crate::api::types::{EntityId, Viewport};

/// Tooltip offset from the pointer, in CSS pixels.
pub const TOOLTIP_OFFSET_PX: f32 = 10.0;

/// A half-line with a unit-length direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction: direction.normalize_or_zero() }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first intersection with a sphere.
    /// A ray starting inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sqrt_disc = disc.sqrt();
        let near = -b - sqrt_disc;
        if near >= 0.0 {
            return Some(near);
        }
        let far = -b + sqrt_disc;
        if far >= 0.0 { Some(far) } else { None }
    }
}

/// Convert a canvas-relative pointer position to normalized device coordinates.
pub fn pointer_to_ndc(pointer: Vec2, viewport: Viewport) -> Vec2 {
    let width = viewport.width.max(1.0);
    let height = viewport.height.max(1.0);
    Vec2::new(
        pointer.x / width * 2.0 - 1.0,
        -(pointer.y / height) * 2.0 + 1.0,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: EntityId,
    pub distance: f32,
}

/// Nearest sphere hit by `ray` among `(id, center, radius)` candidates.
pub fn pick_nearest<I>(ray: &Ray, candidates: I) -> Option<PickHit>
where
    I: IntoIterator<Item = (EntityId, Vec3, f32)>,
{
    let mut best: Option<PickHit> = None;
    for (id, center, radius) in candidates {
        if let Some(distance) = ray.intersect_sphere(center, radius) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(PickHit { id, distance });
            }
        }
    }
    best
}

/// Hover label state read by the host page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub label: Option<String>,
    pub left: f32,
    pub top: f32,
}

impl Tooltip {
    pub fn show_at(&mut self, text: &str, pointer: Vec2) {
        self.label = Some(text.to_string());
        self.left = pointer.x + TOOLTIP_OFFSET_PX;
        self.top = pointer.y + TOOLTIP_OFFSET_PX;
    }

    pub fn hide(&mut self) {
        self.label = None;
    }

    pub fn is_visible(&self) -> bool {
        self.label.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(pointer_to_ndc(Vec2::new(0.0, 0.0), vp), Vec2::new(-1.0, 1.0));
        assert_eq!(pointer_to_ndc(Vec2::new(800.0, 600.0), vp), Vec2::new(1.0, -1.0));
        assert_eq!(pointer_to_ndc(Vec2::new(400.0, 300.0), vp), Vec2::ZERO);
    }

    #[test]
    fn sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let t = ray.intersect_sphere(Vec3::ZERO, 2.0);
        assert_eq!(t, Some(8.0));
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(ray.intersect_sphere(Vec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn ray_inside_sphere_hits_exit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.intersect_sphere(Vec3::ZERO, 3.0), Some(3.0));
    }

    #[test]
    fn nearest_of_overlapping_spheres_wins() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, -1.0));
        let far = (EntityId(1), Vec3::ZERO, 6.0);
        let near = (EntityId(2), Vec3::new(0.0, 0.0, 10.0), 1.0);
        let hit = pick_nearest(&ray, [far, near]).expect("hit");
        assert_eq!(hit.id, EntityId(2));
        assert!((hit.distance - 39.0).abs() < 1e-4);
    }

    #[test]
    fn empty_candidates_pick_nothing() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(pick_nearest(&ray, Vec::<(EntityId, Vec3, f32)>::new()).is_none());
    }

    #[test]
    fn tooltip_follows_pointer_with_offset() {
        let mut tip = Tooltip::default();
        assert!(!tip.is_visible());
        tip.show_at("Earth", Vec2::new(100.0, 40.0));
        assert_eq!(tip.label.as_deref(), Some("Earth"));
        assert_eq!((tip.left, tip.top), (110.0, 50.0));
        tip.hide();
        assert!(!tip.is_visible());
    }
}
