//! Player physics: gravity, integration and ground probing.
//!
//! Everything here runs in `FixedUpdate`. `integrate_bodies` moves the body
//! axis by axis against the level's box colliders, then `probe_ground` runs
//! the ground tracker and turns a fatal fall into a `GameOverRequested`.

use crate::collision::{Collider, StaticColliders};
use crate::ground::{FallTick, FallTracker, GroundState};
use crate::player::respawn::{GameOverReason, GameOverRequested};
use crate::player::{Body, Player};
use crate::settings::Settings;
use bevy::prelude::*;

/// Terminal fall speed.
pub const MAX_FALL_SPEED: f32 = 50.0;
/// Gap kept between a resting body and the surface under it.
const SKIN: f32 = 1e-3;

/// Step one body through `dt` seconds of gravity and movement.
///
/// Extracted helper so systems and benchmarks exercise identical logic.
pub fn body_step(pos: &mut Vec3, body: &mut Body, world: &StaticColliders, gravity: f32, dt: f32) {
    body.velocity.y = (body.velocity.y - gravity * dt).max(-MAX_FALL_SPEED);

    let mut next = *pos;

    next.x += body.velocity.x * dt;
    if world.overlapping(&body.aabb_at(next)).is_some() {
        next.x = pos.x;
    }

    next.z += body.velocity.z * dt;
    if world.overlapping(&body.aabb_at(next)).is_some() {
        next.z = pos.z;
    }

    next.y += body.velocity.y * dt;
    if let Some(hit) = world.overlapping(&body.aabb_at(next)) {
        next.y = if body.velocity.y <= 0.0 {
            hit.max.y + body.half_extents.y + SKIN
        } else {
            hit.min.y - body.half_extents.y - SKIN
        };
        body.velocity.y = 0.0;
    }

    *pos = next;
}

/// Snapshot solid colliders for this physics step.
#[allow(clippy::needless_pass_by_value)]
pub fn collect_colliders(mut world: ResMut<StaticColliders>, q: Query<(&Transform, &Collider), Without<Body>>) {
    *world = StaticColliders::new(
        q.iter()
            .map(|(tf, c)| c.aabb_at(tf.translation))
            .collect(),
    );
}

/// Apply gravity and move every body.
#[allow(clippy::needless_pass_by_value)]
pub fn integrate_bodies(
    time: Res<Time>,
    world: Res<StaticColliders>,
    settings: Res<Settings>,
    mut q: Query<(&mut Transform, &mut Body)>,
) {
    let dt = time.delta_seconds();
    for (mut tf, mut body) in &mut q {
        let mut pos = tf.translation;
        body_step(&mut pos, &mut body, &world, settings.movement.gravity, dt);
        tf.translation = pos;
    }
}

/// Probe for ground under each player and advance its fall timer.
#[allow(clippy::needless_pass_by_value)]
pub fn probe_ground(
    time: Res<Time>,
    world: Res<StaticColliders>,
    mut q: Query<(&Transform, &FallTracker, &mut GroundState), With<Player>>,
    mut game_over: EventWriter<GameOverRequested>,
) {
    let dt = time.delta_seconds();
    for (tf, tracker, mut ground) in &mut q {
        tracker.check_grounded(&mut ground, tf.translation, &*world);
        if tracker.tick(&mut ground, dt) == FallTick::ThresholdCrossed {
            info!("fell for {:.2}s, ending run", ground.airborne_secs());
            game_over.send(GameOverRequested {
                reason: GameOverReason::Fell,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Aabb;
    use crate::player::PLAYER_HALF_EXTENTS;

    const DT: f32 = 1.0 / 50.0;
    const G: f32 = 9.81;

    fn floor() -> StaticColliders {
        StaticColliders::new(vec![Aabb::from_center(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(10.0, 0.5, 10.0),
        )])
    }

    #[test]
    fn falls_and_comes_to_rest_on_floor() {
        let world = floor();
        let mut body = Body::new(1.0, PLAYER_HALF_EXTENTS);
        let mut pos = Vec3::new(0.0, 4.0, 0.0);
        for _ in 0..200 {
            body_step(&mut pos, &mut body, &world, G, DT);
        }
        assert!((pos.y - PLAYER_HALF_EXTENTS.y).abs() < 0.01);
        assert!(body.velocity.y.abs() <= G * DT + 1e-4);
    }

    #[test]
    fn free_fall_is_capped() {
        let world = StaticColliders::default();
        let mut body = Body::new(1.0, PLAYER_HALF_EXTENTS);
        let mut pos = Vec3::ZERO;
        for _ in 0..1000 {
            body_step(&mut pos, &mut body, &world, G, DT);
        }
        assert_eq!(body.velocity.y, -MAX_FALL_SPEED);
    }

    #[test]
    fn walks_along_floor_without_snagging() {
        let world = floor();
        let mut body = Body::new(1.0, PLAYER_HALF_EXTENTS);
        let mut pos = Vec3::new(0.0, PLAYER_HALF_EXTENTS.y + 0.01, 0.0);
        for _ in 0..50 {
            body.velocity.x = 5.0;
            body_step(&mut pos, &mut body, &world, G, DT);
        }
        assert!((pos.x - 5.0).abs() < 0.01);
    }

    #[test]
    fn wall_blocks_horizontal_motion() {
        let mut world = floor();
        world.push(Aabb::from_center(Vec3::new(2.0, 2.0, 0.0), Vec3::new(0.5, 2.0, 5.0)));
        let mut body = Body::new(1.0, PLAYER_HALF_EXTENTS);
        let mut pos = Vec3::new(0.0, PLAYER_HALF_EXTENTS.y + 0.01, 0.0);
        for _ in 0..100 {
            body.velocity.x = 5.0;
            body_step(&mut pos, &mut body, &world, G, DT);
        }
        assert!(pos.x + PLAYER_HALF_EXTENTS.x <= 1.5 + 1e-4);
    }
}
