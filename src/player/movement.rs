//! Player movement input.
//!
//! Reads the keyboard through the configurable keybinds and feeds one
//! `MoveInput` per frame into the player's `Locomotion` controller.

use crate::ground::GroundState;
use crate::locomotion::{LocalBasis, Locomotion, MoveInput};
use crate::player::{Body, Player};
use crate::settings::{ControlsSettings, Settings};
use bevy::prelude::*;

/// Build this frame's `MoveInput` from keyboard state.
#[must_use]
pub fn read_move_input(kb: &ButtonInput<KeyCode>, controls: &ControlsSettings) -> MoveInput {
    let axis = |pos: KeyCode, neg: KeyCode| -> f32 {
        let mut v = 0.0;
        if kb.pressed(pos) {
            v += 1.0;
        }
        if kb.pressed(neg) {
            v -= 1.0;
        }
        v
    };

    MoveInput {
        horizontal: axis(
            controls.key("right", KeyCode::KeyD),
            controls.key("left", KeyCode::KeyA),
        ),
        vertical: axis(
            controls.key("forward", KeyCode::KeyW),
            controls.key("back", KeyCode::KeyS),
        ),
        sprint: kb.pressed(controls.key("sprint", KeyCode::ShiftLeft))
            || kb.pressed(controls.key("sprint_alt", KeyCode::ShiftRight)),
        jump: kb.pressed(controls.key("jump", KeyCode::Space)),
    }
}

/// Drive locomotion for active players whose control is enabled.
#[allow(clippy::needless_pass_by_value)]
pub fn drive_locomotion(
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut q: Query<(&Player, &Transform, &mut Body, &mut Locomotion, &mut GroundState)>,
) {
    let input = read_move_input(&kb, &settings.controls);
    for (player, tf, mut body, mut loco, mut ground) in &mut q {
        if !player.active {
            continue;
        }
        if !loco.control_enabled() {
            loco.track_jump(input.jump);
            continue;
        }
        let basis = LocalBasis::from_transform(tf);
        let mass = body.mass;
        if loco.handle_input(&input, &basis, &mut body.velocity, mass, &mut ground) {
            debug!("jump");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposing_keys_cancel() {
        let mut kb = ButtonInput::<KeyCode>::default();
        kb.press(KeyCode::KeyA);
        kb.press(KeyCode::KeyD);
        kb.press(KeyCode::KeyW);
        let input = read_move_input(&kb, &ControlsSettings::default());
        assert_eq!(input.horizontal, 0.0);
        assert_eq!(input.vertical, 1.0);
        assert!(!input.sprint);
    }

    #[test]
    fn either_shift_sprints_and_space_jumps() {
        let mut kb = ButtonInput::<KeyCode>::default();
        kb.press(KeyCode::ShiftRight);
        kb.press(KeyCode::Space);
        let input = read_move_input(&kb, &ControlsSettings::default());
        assert!(input.sprint);
        assert!(input.jump);
    }

    #[test]
    fn jump_released_while_disabled_fires_after_reenable() {
        let mut app = App::new();
        app.insert_resource(ButtonInput::<KeyCode>::default());
        app.insert_resource(Settings::default());
        app.add_systems(Update, drive_locomotion);

        let mut ground = GroundState::default();
        ground.set_grounded(true);
        let mut loco = Locomotion::default();
        loco.set_control_enabled(false);
        let player = app
            .world_mut()
            .spawn((
                Player::default(),
                Transform::default(),
                Body::new(1.0, crate::player::PLAYER_HALF_EXTENTS),
                loco,
                ground,
            ))
            .id();

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Space);
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(KeyCode::Space);
        app.update();
        assert_eq!(app.world().get::<Body>(player).unwrap().velocity, Vec3::ZERO);

        app.world_mut().get_mut::<Locomotion>(player).unwrap().set_control_enabled(true);
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Space);
        app.update();
        assert!(app.world().get::<Body>(player).unwrap().velocity.y > 0.0);
    }

    #[test]
    fn rebinding_is_respected() {
        let mut controls = ControlsSettings::default();
        controls.keybinds.insert("forward".into(), "Up".into());
        let mut kb = ButtonInput::<KeyCode>::default();
        kb.press(KeyCode::ArrowUp);
        assert_eq!(read_move_input(&kb, &controls).vertical, 1.0);
    }
}
