//! Box colliders and the raycast query used for ground probing.
//!
//! The game only needs axis-aligned boxes: platforms, trigger volumes and the
//! actor's own bounds. `StaticColliders` is rebuilt from the ECS each physics
//! step and answers `Raycast` queries for the ground tracker.

use bevy::prelude::*;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build a box from its center and half extents.
    #[must_use]
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test; boxes that only touch faces do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Slab test. Returns the distance along `dir` to the first hit, if it is
    /// within `max_distance`. A ray starting inside the box hits at 0.
    ///
    /// # Arguments
    /// * `origin` - ray start
    /// * `dir` - ray direction, expected to be normalized
    /// * `max_distance` - maximum ray length
    #[must_use]
    pub fn ray_distance(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f32::EPSILON {
                // parallel to this slab: must already be inside it
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

/// Solid box collider attached to an entity; centered on its `Transform`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub half_extents: Vec3,
}

impl Collider {
    #[must_use]
    pub fn cuboid(size: Vec3) -> Self {
        Self { half_extents: size * 0.5 }
    }

    #[must_use]
    pub fn aabb_at(&self, translation: Vec3) -> Aabb {
        Aabb::from_center(translation, self.half_extents)
    }
}

/// Result of a successful raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
}

/// Physics query provider consumed by the ground tracker.
pub trait Raycast {
    /// Cast a ray and return the closest hit within `max_distance`.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

/// Snapshot of every solid collider in the level for the current physics step.
#[derive(Resource, Debug, Default, Clone)]
pub struct StaticColliders {
    boxes: Vec<Aabb>,
}

impl StaticColliders {
    #[must_use]
    pub fn new(boxes: Vec<Aabb>) -> Self {
        Self { boxes }
    }

    pub fn push(&mut self, aabb: Aabb) {
        self.boxes.push(aabb);
    }

    /// First collider overlapping `aabb`, if any.
    #[must_use]
    pub fn overlapping(&self, aabb: &Aabb) -> Option<&Aabb> {
        self.boxes.iter().find(|b| b.intersects(aabb))
    }
}

impl Raycast for StaticColliders {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }
        self.boxes
            .iter()
            .filter_map(|b| b.ray_distance(origin, dir, max_distance))
            .min_by(f32::total_cmp)
            .map(|distance| RayHit {
                point: origin + dir * distance,
                distance,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Aabb {
        Aabb::from_center(Vec3::new(0.0, -0.5, 0.0), Vec3::new(5.0, 0.5, 5.0))
    }

    #[test]
    fn ray_down_hits_floor_within_range() {
        let world = StaticColliders::new(vec![floor()]);
        let hit = world
            .raycast(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y, 2.0)
            .expect("floor should be hit");
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert!(hit.point.y.abs() < 1e-5);
    }

    #[test]
    fn ray_too_short_misses() {
        let world = StaticColliders::new(vec![floor()]);
        assert!(world.raycast(Vec3::new(0.0, 2.5, 0.0), Vec3::NEG_Y, 2.0).is_none());
    }

    #[test]
    fn ray_beside_box_misses() {
        let world = StaticColliders::new(vec![floor()]);
        assert!(world.raycast(Vec3::new(6.0, 1.0, 0.0), Vec3::NEG_Y, 10.0).is_none());
    }

    #[test]
    fn closest_hit_wins() {
        let upper = Aabb::from_center(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.25));
        let world = StaticColliders::new(vec![floor(), upper]);
        let hit = world.raycast(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 5.0).unwrap();
        assert!((hit.distance - 1.25).abs() < 1e-5);
    }

    #[test]
    fn zero_direction_never_hits() {
        let world = StaticColliders::new(vec![floor()]);
        assert!(world.raycast(Vec3::ZERO, Vec3::ZERO, 5.0).is_none());
    }

    #[test]
    fn touching_faces_do_not_overlap() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
        let b = Aabb::from_center(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5));
        assert!(!a.intersects(&b));
        let c = Aabb::from_center(Vec3::new(0.9, 0.0, 0.0), Vec3::splat(0.5));
        assert!(a.intersects(&c));
    }
}
