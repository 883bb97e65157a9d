//! Respawn, checkpoint and game-over wiring.
//!
//! Gameplay code never reaches for the `RespawnManager` by lookup. Instead the
//! systems here own it as a resource and hand it an `EffectQueue` as its
//! `RespawnHooks`; the queued effects are then applied to the HUD, the
//! player's controller, the window cursor and the scene state.

use crate::countdown::Countdown;
use crate::ground::GroundState;
use crate::lens::LensInventory;
use crate::lives::{RespawnError, RespawnHooks, RespawnManager, RespawnOutcome};
use crate::locomotion::Locomotion;
use crate::player::{Body, Player};
use crate::scene::GameScene;
use crate::trigger::{Occupancy, TriggerEntered, TriggerKind, TriggerVolume};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Fell,
    OutOfTime,
}

/// Queued by the fall tracker and the countdown; consumed by `apply_game_over`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverRequested {
    pub reason: GameOverReason,
}

/// Lives shown by the HUD. Written only through `RespawnHooks::show_lives`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivesDisplay {
    pub lives: u32,
    pub max: u32,
}

/// Effects requested by the respawn manager during one call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EffectQueue {
    pub lives: Option<u32>,
    pub control: Option<bool>,
    pub release_cursor: bool,
    pub scene: Option<String>,
}

impl RespawnHooks for EffectQueue {
    fn show_lives(&mut self, lives: u32) {
        self.lives = Some(lives);
    }
    fn set_control_enabled(&mut self, enabled: bool) {
        self.control = Some(enabled);
    }
    fn release_cursor(&mut self) {
        self.release_cursor = true;
    }
    fn load_scene(&mut self, name: &str) {
        self.scene = Some(name.to_string());
    }
}

/// Collaborators the queued effects are applied to.
#[derive(SystemParam)]
pub struct RespawnCtx<'w, 's> {
    pub manager: ResMut<'w, RespawnManager>,
    pub display: ResMut<'w, LivesDisplay>,
    pub next_scene: ResMut<'w, NextState<GameScene>>,
    pub windows: Query<'w, 's, &'static mut Window, With<PrimaryWindow>>,
}

impl RespawnCtx<'_, '_> {
    /// Apply `effects`, using `locomotion` for control gating when present.
    pub fn apply(&mut self, effects: EffectQueue, locomotion: Option<&mut Locomotion>) {
        if let Some(lives) = effects.lives {
            self.display.lives = lives;
        }
        if let (Some(enabled), Some(loco)) = (effects.control, locomotion) {
            loco.set_control_enabled(enabled);
        }
        if effects.release_cursor {
            for mut w in &mut self.windows {
                w.cursor.visible = true;
                w.cursor.grab_mode = CursorGrabMode::None;
            }
        }
        if let Some(name) = effects.scene {
            match GameScene::from_name(&name) {
                Some(scene) => self.next_scene.set(scene),
                None => warn!("unknown scene '{name}' requested"),
            }
        }
    }
}

/// Player components touched by a respawn.
type RespawnTarget<'a> = (&'a mut Transform, &'a mut Body, &'a mut Locomotion, &'a mut GroundState);

/// Move the player back to the last checkpoint, or warn if there is none.
fn respawn_player(ctx: &mut RespawnCtx<'_, '_>, (tf, body, loco, ground): RespawnTarget<'_>) {
    let mut effects = EffectQueue::default();
    match ctx.manager.respawn(&mut tf.translation, &mut effects) {
        Ok(RespawnOutcome::Respawned { lives }) => {
            body.velocity = Vec3::ZERO;
            ground.restart_fall();
            info!("respawned at checkpoint, {lives} lives left");
        }
        Ok(RespawnOutcome::OutOfLives) => info!("out of lives"),
        Ok(RespawnOutcome::Ignored) => {}
        Err(e @ RespawnError::NoCheckpoint) => warn!("{e}"),
    }
    ctx.apply(effects, Some(loco));
}

/// Queue `TriggerEntered` for every volume a player started overlapping.
#[allow(clippy::needless_pass_by_value)]
pub fn detect_triggers(
    mut players: Query<(Entity, &Transform, &Body, &mut Occupancy), With<Player>>,
    volumes: Query<(Entity, &Transform, &TriggerVolume), Without<Player>>,
    mut entered: EventWriter<TriggerEntered>,
) {
    for (actor, tf, body, mut occupancy) in &mut players {
        let bounds = body.aabb_at(tf.translation);
        let new = occupancy.update(
            &bounds,
            volumes
                .iter()
                .map(|(e, vtf, v)| (e, v.aabb_at(vtf.translation))),
        );
        for volume in new {
            if let Ok((_, vtf, v)) = volumes.get(volume) {
                entered.send(TriggerEntered {
                    actor,
                    volume,
                    kind: v.kind,
                    position: vtf.translation,
                });
            }
        }
    }
}

/// Handle trigger entries in the order they were queued.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_triggers(
    mut commands: Commands,
    mut events: EventReader<TriggerEntered>,
    mut ctx: RespawnCtx<'_, '_>,
    mut inventory: ResMut<LensInventory>,
    mut players: Query<(&mut Transform, &mut Body, &mut Locomotion, &mut GroundState), With<Player>>,
) {
    for ev in events.read() {
        match ev.kind {
            TriggerKind::Checkpoint => ctx.manager.on_checkpoint_entered(ev.position),
            TriggerKind::Lens(color) => {
                inventory.collect(color);
                if let Some(mut e) = commands.get_entity(ev.volume) {
                    e.despawn();
                }
                info!("collected {color:?} lens ({}/3)", inventory.collected_count());
            }
            TriggerKind::KillZone => {
                if let Ok((mut tf, mut body, mut loco, mut ground)) = players.get_mut(ev.actor) {
                    respawn_player(&mut ctx, (&mut *tf, &mut *body, &mut *loco, &mut *ground));
                }
            }
        }
    }
}

/// Count the level timer down and request game over at zero.
#[allow(clippy::needless_pass_by_value)]
pub fn tick_countdown(
    time: Res<Time>,
    countdown: Option<ResMut<Countdown>>,
    mut game_over: EventWriter<GameOverRequested>,
) {
    let Some(mut countdown) = countdown else { return };
    countdown.tick(time.delta_seconds());
    if countdown.is_expired() {
        game_over.send(GameOverRequested {
            reason: GameOverReason::OutOfTime,
        });
    }
}

/// Finish the post-respawn fade.
#[allow(clippy::needless_pass_by_value)]
pub fn tick_respawn_fade(
    time: Res<Time>,
    mut ctx: RespawnCtx<'_, '_>,
    mut players: Query<&mut Locomotion, With<Player>>,
) {
    let mut effects = EffectQueue::default();
    ctx.manager.tick(time.delta_seconds(), &mut effects);
    if effects == EffectQueue::default() {
        return;
    }
    for mut loco in &mut players {
        ctx.apply(effects.clone(), Some(&mut *loco));
    }
}

/// Run the terminal transition for any pending request.
#[allow(clippy::needless_pass_by_value)]
pub fn apply_game_over(
    mut events: EventReader<GameOverRequested>,
    mut ctx: RespawnCtx<'_, '_>,
    mut players: Query<&mut Locomotion, With<Player>>,
) {
    for ev in events.read() {
        let mut effects = EffectQueue::default();
        if !ctx.manager.game_over(&mut effects) {
            continue;
        }
        info!("game over: {:?}", ev.reason);
        let mut loco = players.iter_mut().next();
        ctx.apply(effects, loco.as_deref_mut());
    }
}
