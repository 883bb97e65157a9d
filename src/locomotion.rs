//! Frame-rate locomotion: directional movement, sprint and jump.
//!
//! Movement is computed in the actor's local basis so that "forward" keeps
//! meaning forward after the actor turns. Horizontal velocity is overwritten
//! each frame; the vertical component belongs to the physics step and is only
//! touched by a jump impulse.

use crate::ground::GroundState;
use bevy::prelude::*;

/// One frame of player intent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    /// Strafe axis in [-1, 1], positive is right.
    pub horizontal: f32,
    /// Forward axis in [-1, 1], positive is forward.
    pub vertical: f32,
    pub sprint: bool,
    /// Whether jump is currently held; edges are detected by the controller.
    pub jump: bool,
}

/// Forward/right directions of the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl LocalBasis {
    #[must_use]
    pub fn from_transform(tf: &Transform) -> Self {
        Self {
            forward: tf.forward().into(),
            right: tf.right().into(),
        }
    }
}

impl Default for LocalBasis {
    fn default() -> Self {
        Self::from_transform(&Transform::IDENTITY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionConfig {
    pub base_speed: f32,
    pub sprint_speed: f32,
    /// Upward impulse (N·s) applied on jump.
    pub jump_impulse: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            base_speed: 5.0,
            sprint_speed: 10.0,
            jump_impulse: 5.0,
        }
    }
}

/// Per-actor locomotion controller.
#[derive(Component, Debug, Clone)]
pub struct Locomotion {
    pub config: LocomotionConfig,
    control_enabled: bool,
    jump_was_held: bool,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl Locomotion {
    #[must_use]
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            control_enabled: true,
            jump_was_held: false,
        }
    }

    #[must_use]
    pub fn control_enabled(&self) -> bool {
        self.control_enabled
    }

    /// Gate `handle_input`. Disabling treats jump as held until a release is
    /// seen, so a key held across the disable does not fire on re-enable.
    pub fn set_control_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.jump_was_held = true;
        }
        self.control_enabled = enabled;
    }

    /// Record the jump button while control is disabled, so a release during
    /// the disable arms the next press.
    pub fn track_jump(&mut self, held: bool) {
        self.jump_was_held = held;
    }

    /// Unit movement direction for `input` in `basis`, or zero for no input.
    #[must_use]
    pub fn direction(input: &MoveInput, basis: &LocalBasis) -> Vec3 {
        (basis.forward * input.vertical + basis.right * input.horizontal).normalize_or_zero()
    }

    /// Apply one frame of input to `velocity`. Returns `true` if a jump fired.
    ///
    /// # Arguments
    /// * `input` - axes and buttons for this frame
    /// * `basis` - actor forward/right
    /// * `velocity` - rigid body velocity; x/z overwritten, y preserved
    /// * `mass` - body mass used to convert the jump impulse to a velocity change
    /// * `ground` - ground state; cleared optimistically on jump
    pub fn handle_input(
        &mut self,
        input: &MoveInput,
        basis: &LocalBasis,
        velocity: &mut Vec3,
        mass: f32,
        ground: &mut GroundState,
    ) -> bool {
        let jump_edge = input.jump && !self.jump_was_held;
        self.jump_was_held = input.jump;

        if !self.control_enabled {
            return false;
        }

        let grounded = ground.is_grounded();
        let speed = if input.sprint && grounded {
            self.config.sprint_speed
        } else {
            self.config.base_speed
        };

        let dir = Self::direction(input, basis);
        velocity.x = dir.x * speed;
        velocity.z = dir.z * speed;

        if jump_edge && grounded {
            velocity.y += self.config.jump_impulse / mass.max(f32::EPSILON);
            ground.mark_airborne();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grounded() -> GroundState {
        let mut g = GroundState::default();
        g.set_grounded(true);
        g
    }

    #[test]
    fn zero_input_gives_zero_horizontal_velocity() {
        let mut loco = Locomotion::default();
        let mut v = Vec3::new(3.0, -2.0, 4.0);
        loco.handle_input(&MoveInput::default(), &LocalBasis::default(), &mut v, 1.0, &mut grounded());
        assert_eq!(v.x, 0.0);
        assert_eq!(v.z, 0.0);
        assert_eq!(v.y, -2.0);
        assert!(v.is_finite());
    }

    #[test]
    fn diagonal_input_is_normalized() {
        let mut loco = Locomotion::default();
        let mut v = Vec3::ZERO;
        let input = MoveInput { horizontal: 1.0, vertical: 1.0, ..default() };
        loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded());
        assert_relative_eq!(Vec2::new(v.x, v.z).length(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn forward_follows_actor_orientation() {
        let mut loco = Locomotion::default();
        let mut v = Vec3::ZERO;
        // turned 90 degrees left: forward is now -X
        let tf = Transform::from_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let input = MoveInput { vertical: 1.0, ..default() };
        loco.handle_input(&input, &LocalBasis::from_transform(&tf), &mut v, 1.0, &mut grounded());
        assert_relative_eq!(v.x, -5.0, epsilon = 1e-4);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn sprint_only_when_grounded() {
        let mut loco = Locomotion::default();
        let input = MoveInput { vertical: 1.0, sprint: true, ..default() };

        let mut v = Vec3::ZERO;
        loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded());
        assert_relative_eq!(v.length(), 10.0, epsilon = 1e-5);

        let mut v = Vec3::ZERO;
        loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut GroundState::default());
        assert_relative_eq!(v.length(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn jump_applies_impulse_and_leaves_ground() {
        let mut loco = Locomotion::default();
        let mut g = grounded();
        let mut v = Vec3::new(0.0, 0.5, 0.0);
        let input = MoveInput { jump: true, ..default() };
        assert!(loco.handle_input(&input, &LocalBasis::default(), &mut v, 2.0, &mut g));
        assert_relative_eq!(v.y, 0.5 + 2.5);
        assert!(!g.is_grounded());
    }

    #[test]
    fn held_jump_fires_once() {
        let mut loco = Locomotion::default();
        let mut v = Vec3::ZERO;
        let input = MoveInput { jump: true, ..default() };
        assert!(loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded()));
        // still held and grounded again: no second jump
        assert!(!loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded()));
        let released = MoveInput::default();
        loco.handle_input(&released, &LocalBasis::default(), &mut v, 1.0, &mut grounded());
        assert!(loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded()));
    }

    #[test]
    fn no_jump_while_airborne() {
        let mut loco = Locomotion::default();
        let mut v = Vec3::ZERO;
        let input = MoveInput { jump: true, ..default() };
        assert!(!loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut GroundState::default()));
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn disabled_control_leaves_velocity_alone() {
        let mut loco = Locomotion::default();
        loco.set_control_enabled(false);
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        let input = MoveInput { vertical: 1.0, jump: true, ..default() };
        assert!(!loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded()));
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn jump_held_across_reenable_does_not_fire() {
        let mut loco = Locomotion::default();
        loco.set_control_enabled(false);
        loco.set_control_enabled(true);
        let mut v = Vec3::ZERO;
        let input = MoveInput { jump: true, ..default() };
        assert!(!loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded()));
    }

    #[test]
    fn fresh_press_after_reenable_fires() {
        let mut loco = Locomotion::default();
        loco.set_control_enabled(false);
        loco.track_jump(true);
        loco.track_jump(false);
        loco.set_control_enabled(true);
        let mut v = Vec3::ZERO;
        let input = MoveInput { jump: true, ..default() };
        assert!(loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded()));
        assert_relative_eq!(v.y, 5.0);
    }

    #[test]
    fn enabling_keeps_released_jump_armed() {
        let mut loco = Locomotion::default();
        loco.set_control_enabled(true);
        let mut v = Vec3::ZERO;
        let input = MoveInput { jump: true, ..default() };
        assert!(loco.handle_input(&input, &LocalBasis::default(), &mut v, 1.0, &mut grounded()));
    }
}
