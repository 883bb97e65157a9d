//! Player components and systems (body physics, movement, look, respawn).
//!
//! The module provides the `Player` marker, the rigid `Body` it moves with and
//! a bundle assembling the core controllers (`Locomotion`, `GroundState`,
//! `FallTracker`) onto one entity.
//!
//! # Example:
//!
//! ```ignore
//! commands.spawn(PlayerBundle::new(&settings, spawn, yaw, mesh, material));
//! app.add_systems(FixedUpdate, (collect_colliders, integrate_bodies, probe_ground).chain());
//! app.add_systems(Update, drive_locomotion);
//! ```
pub mod camera;
pub mod movement;
pub mod physics;
pub mod respawn;

use crate::ground::{FallTracker, GroundState};
use crate::locomotion::Locomotion;
use crate::settings::Settings;
use crate::trigger::Occupancy;
use bevy::prelude::*;

pub use camera::*;
pub use movement::*;
pub use physics::*;
pub use respawn::*;

/// Half extents of the player's box.
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.4, 1.0, 0.4);

/// Marks the player-controlled actor.
#[derive(Component, Debug, Clone)]
pub struct Player {
    /// Inactive players receive no input.
    pub active: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self { active: true }
    }
}

/// Kinematic body integrated by `integrate_bodies`.
#[derive(Component, Debug, Clone)]
pub struct Body {
    /// Current velocity in world units per second.
    pub velocity: Vec3,
    pub mass: f32,
    pub half_extents: Vec3,
}

impl Body {
    #[must_use]
    pub fn new(mass: f32, half_extents: Vec3) -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass,
            half_extents,
        }
    }

    #[must_use]
    pub fn aabb_at(&self, translation: Vec3) -> crate::collision::Aabb {
        crate::collision::Aabb::from_center(translation, self.half_extents)
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub body: Body,
    pub locomotion: Locomotion,
    pub ground: GroundState,
    pub fall: FallTracker,
    pub occupancy: Occupancy,
    pub look: PlayerLook,
    pub pbr: PbrBundle,
}

impl PlayerBundle {
    /// Assemble a player at `spawn` facing `yaw_deg` with tuning from `settings`.
    #[must_use]
    pub fn new(
        settings: &Settings,
        spawn: Vec3,
        yaw_deg: f32,
        mesh: Handle<Mesh>,
        material: Handle<StandardMaterial>,
    ) -> Self {
        let yaw = yaw_deg.to_radians();
        Self {
            player: Player::default(),
            body: Body::new(settings.movement.mass, PLAYER_HALF_EXTENTS),
            locomotion: Locomotion::new(settings.movement.locomotion()),
            ground: GroundState::default(),
            fall: settings.fall.tracker(),
            occupancy: Occupancy::default(),
            look: PlayerLook { yaw },
            pbr: PbrBundle {
                mesh,
                material,
                transform: Transform::from_translation(spawn).with_rotation(Quat::from_rotation_y(yaw)),
                ..default()
            },
        }
    }
}
