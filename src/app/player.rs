//! Player-related small systems.
//!
//! Re-applies hot-reloaded movement and fall tuning to the live player. Lives
//! and the countdown are only read at startup.
use bevy::prelude::*;
use lensfall::ground::FallTracker;
use lensfall::locomotion::Locomotion;
use lensfall::player::{Body, Player};
use lensfall::settings::Settings;

/// Push `Settings.movement` and `Settings.fall` into the player's components
/// whenever the settings resource changes.
///
/// # Arguments
/// - `settings`: The current settings resource.
/// - `players`: Query for the controllers to update.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_player_settings(
    settings: Res<Settings>,
    mut players: Query<(&mut Locomotion, &mut FallTracker, &mut Body), With<Player>>,
) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    for (mut loco, mut fall, mut body) in &mut players {
        loco.config = settings.movement.locomotion();
        *fall = settings.fall.tracker();
        body.mass = settings.movement.mass;
    }
    info!("applied movement settings");
}
