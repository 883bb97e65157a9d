//! Mouse turning, cursor grab and the third-person follow camera.
//!
//! `turn_player` accumulates mouse motion for the current update and applies
//! yaw to the player's transform, which is what rotates the locomotion basis.
//! `cursor_grab` toggles cursor lock/visibility in response to input.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::player::Player;
use crate::settings::Settings;

/// Stores the player's facing around +Y in radians.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayerLook {
    pub yaw: f32,
}

impl PlayerLook {
    /// Apply a horizontal mouse delta. `rotation_speed` is degrees per 1000
    /// units of motion, scaled by the mouse sensitivity.
    pub fn apply_delta(&mut self, delta_x: f32, settings: &Settings) {
        let dx = if settings.controls.invert_x { -delta_x } else { delta_x };
        let per_unit = settings.movement.rotation_speed.to_radians() / 1000.0;
        self.yaw -= dx * per_unit * settings.controls.mouse_sensitivity;
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }
}

/// Third-person camera rig following the player.
#[derive(Component, Debug, Clone, Copy)]
pub struct FollowCamera {
    /// Distance behind the player.
    pub distance: f32,
    /// Height above the player origin.
    pub height: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self { distance: 7.0, height: 3.5 }
    }
}

impl FollowCamera {
    /// Camera transform behind `target`, looking at a point just above it.
    #[must_use]
    pub fn place(&self, target: &Transform) -> Transform {
        let back: Vec3 = target.back().into();
        let eye = target.translation + back * self.distance + Vec3::Y * self.height;
        Transform::from_translation(eye).looking_at(target.translation + Vec3::Y, Vec3::Y)
    }
}

/// Turn active players with the mouse while the cursor is grabbed.
#[allow(clippy::needless_pass_by_value)]
pub fn turn_player(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut motion: EventReader<MouseMotion>,
    settings: Res<Settings>,
    mut query: Query<(&Player, &mut Transform, &mut PlayerLook)>,
) {
    let delta: f32 = motion.read().map(|ev| ev.delta.x).sum();
    if delta == 0.0 {
        return;
    }

    let Ok(window) = windows.get_single() else { return };
    if window.cursor.visible {
        return;
    }

    for (player, mut transform, mut look) in &mut query {
        if !player.active {
            continue;
        }
        look.apply_delta(delta, &settings);
        transform.rotation = Quat::from_rotation_y(look.yaw);
    }
}

/// Keep follow cameras behind the player.
#[allow(clippy::type_complexity)]
pub fn follow_player(
    players: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<(&mut Transform, &FollowCamera), Without<Player>>,
) {
    let Ok(target) = players.get_single() else { return };
    for (mut tf, rig) in &mut cameras {
        *tf = rig.place(target);
    }
}

/// Lock the pointer on left click; the pause key gives it back.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    let Ok(mut window) = windows.get_single_mut() else { return };
    let (mode, visible) = if keys.just_pressed(settings.controls.key("pause", KeyCode::Escape)) {
        (CursorGrabMode::None, true)
    } else if mouse.just_pressed(MouseButton::Left) {
        (CursorGrabMode::Locked, false)
    } else {
        return;
    };
    window.cursor.grab_mode = mode;
    window.cursor.visible = visible;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mouse_right_turns_clockwise() {
        let settings = Settings::defaults();
        let mut look = PlayerLook::default();
        // 100 deg per 1000 units: 900 units is a quarter turn
        look.apply_delta(900.0, &settings);
        assert_relative_eq!(look.yaw, std::f32::consts::TAU - std::f32::consts::FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn invert_x_flips_direction() {
        let mut settings = Settings::defaults();
        settings.controls.invert_x = true;
        let mut look = PlayerLook::default();
        look.apply_delta(900.0, &settings);
        assert_relative_eq!(look.yaw, std::f32::consts::FRAC_PI_2, epsilon = 1e-4);
    }

    #[test]
    fn camera_sits_behind_and_above() {
        let rig = FollowCamera::default();
        let target = Transform::from_xyz(0.0, 1.0, 0.0);
        let cam = rig.place(&target);
        // player faces -Z, so behind is +Z
        assert_relative_eq!(cam.translation.z, 7.0, epsilon = 1e-4);
        assert_relative_eq!(cam.translation.y, 4.5, epsilon = 1e-4);
    }
}
