//! Lives, checkpoints and the respawn/game-over state machine.
//!
//! `RespawnManager` owns the lives count and last checkpoint. Everything it
//! needs from the outside world (HUD, control gating, cursor, scene loading)
//! goes through `RespawnHooks`, which the caller builds from whatever it has
//! at hand.

use bevy::prelude::*;
use thiserror::Error;

/// Scene requested on the terminal transition.
pub const GAME_OVER_SCENE: &str = "GameOver";

pub const DEFAULT_MAX_LIVES: u32 = 3;
/// Height above the checkpoint at which the actor reappears.
pub const DEFAULT_RESPAWN_OFFSET: f32 = 3.0;
pub const DEFAULT_RESPAWN_FADE_SECS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RespawnPhase {
    #[default]
    Active,
    /// Just respawned; control stays disabled until the fade finishes.
    Respawning,
    GameOver,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RespawnError {
    #[error("respawn requested before any checkpoint was reached")]
    NoCheckpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnOutcome {
    /// Moved to the checkpoint with this many lives left.
    Respawned { lives: u32 },
    /// The last life was spent; the game-over transition ran.
    OutOfLives,
    /// Already in the terminal state; nothing happened.
    Ignored,
}

/// Side effects the respawn manager asks of its collaborators.
pub trait RespawnHooks {
    /// Lives HUD (text and bar).
    fn show_lives(&mut self, lives: u32);
    /// Gate the locomotion controller.
    fn set_control_enabled(&mut self, enabled: bool);
    /// Make the pointer visible and unlocked.
    fn release_cursor(&mut self);
    fn load_scene(&mut self, name: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnConfig {
    pub max_lives: u32,
    pub respawn_offset: f32,
    pub fade_secs: f32,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            max_lives: DEFAULT_MAX_LIVES,
            respawn_offset: DEFAULT_RESPAWN_OFFSET,
            fade_secs: DEFAULT_RESPAWN_FADE_SECS,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct RespawnManager {
    config: RespawnConfig,
    lives: u32,
    last_checkpoint: Option<Vec3>,
    phase: RespawnPhase,
    fade_left: f32,
}

impl Default for RespawnManager {
    fn default() -> Self {
        Self::new(RespawnConfig::default())
    }
}

impl RespawnManager {
    #[must_use]
    pub fn new(config: RespawnConfig) -> Self {
        Self {
            config,
            lives: config.max_lives,
            last_checkpoint: None,
            phase: RespawnPhase::Active,
            fade_left: 0.0,
        }
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn max_lives(&self) -> u32 {
        self.config.max_lives
    }

    #[must_use]
    pub fn last_checkpoint(&self) -> Option<Vec3> {
        self.last_checkpoint
    }

    #[must_use]
    pub fn phase(&self) -> RespawnPhase {
        self.phase
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == RespawnPhase::GameOver
    }

    /// Remember `position` as the respawn target. Latest entry wins; ignored
    /// once the game is over.
    pub fn on_checkpoint_entered(&mut self, position: Vec3) {
        if self.is_game_over() {
            return;
        }
        self.last_checkpoint = Some(position);
    }

    /// Move the actor back to the last checkpoint and spend a life.
    ///
    /// # Arguments
    /// * `position` - actor position, overwritten on success
    /// * `hooks` - HUD, control and scene collaborators
    ///
    /// # Errors
    /// `RespawnError::NoCheckpoint` if no checkpoint has been entered yet; in
    /// that case nothing is changed.
    pub fn respawn(
        &mut self,
        position: &mut Vec3,
        hooks: &mut impl RespawnHooks,
    ) -> Result<RespawnOutcome, RespawnError> {
        if self.is_game_over() {
            return Ok(RespawnOutcome::Ignored);
        }
        let checkpoint = self.last_checkpoint.ok_or(RespawnError::NoCheckpoint)?;

        *position = checkpoint + Vec3::Y * self.config.respawn_offset;
        self.lives = self.lives.saturating_sub(1);
        hooks.show_lives(self.lives);

        if self.lives == 0 {
            self.game_over(hooks);
            return Ok(RespawnOutcome::OutOfLives);
        }

        self.phase = RespawnPhase::Respawning;
        self.fade_left = self.config.fade_secs;
        hooks.set_control_enabled(false);
        Ok(RespawnOutcome::Respawned { lives: self.lives })
    }

    /// Advance the post-respawn fade; hands control back when it ends.
    pub fn tick(&mut self, dt: f32, hooks: &mut impl RespawnHooks) {
        if self.phase != RespawnPhase::Respawning {
            return;
        }
        self.fade_left -= dt;
        if self.fade_left <= 0.0 {
            self.fade_left = 0.0;
            self.phase = RespawnPhase::Active;
            hooks.set_control_enabled(true);
        }
    }

    /// Enter the terminal state. Returns `false` (and does nothing) if the game
    /// is already over.
    pub fn game_over(&mut self, hooks: &mut impl RespawnHooks) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.phase = RespawnPhase::GameOver;
        self.fade_left = 0.0;
        hooks.set_control_enabled(false);
        hooks.release_cursor();
        hooks.load_scene(GAME_OVER_SCENE);
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every hook call for assertions.
    #[derive(Default, Debug)]
    pub(crate) struct RecordingHooks {
        pub lives_shown: Vec<u32>,
        pub control: Vec<bool>,
        pub cursor_releases: usize,
        pub scenes: Vec<String>,
    }

    impl RespawnHooks for RecordingHooks {
        fn show_lives(&mut self, lives: u32) {
            self.lives_shown.push(lives);
        }
        fn set_control_enabled(&mut self, enabled: bool) {
            self.control.push(enabled);
        }
        fn release_cursor(&mut self) {
            self.cursor_releases += 1;
        }
        fn load_scene(&mut self, name: &str) {
            self.scenes.push(name.to_string());
        }
    }

    #[test]
    fn three_respawns_spend_three_lives() {
        let mut mgr = RespawnManager::default();
        let mut hooks = RecordingHooks::default();
        let mut pos = Vec3::new(10.0, -40.0, 0.0);
        mgr.on_checkpoint_entered(Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(mgr.respawn(&mut pos, &mut hooks), Ok(RespawnOutcome::Respawned { lives: 2 }));
        assert_eq!(pos, Vec3::new(1.0, 5.0, 3.0));
        assert_eq!(mgr.respawn(&mut pos, &mut hooks), Ok(RespawnOutcome::Respawned { lives: 1 }));
        assert!(hooks.scenes.is_empty());
        assert_eq!(mgr.respawn(&mut pos, &mut hooks), Ok(RespawnOutcome::OutOfLives));

        assert_eq!(hooks.lives_shown, vec![2, 1, 0]);
        assert_eq!(hooks.scenes, vec![GAME_OVER_SCENE.to_string()]);
        assert!(mgr.is_game_over());
    }

    #[test]
    fn lives_never_go_below_zero() {
        let mut mgr = RespawnManager::default();
        let mut hooks = RecordingHooks::default();
        let mut pos = Vec3::ZERO;
        mgr.on_checkpoint_entered(Vec3::ZERO);
        let mut last = mgr.lives();
        for _ in 0..10 {
            let _ = mgr.respawn(&mut pos, &mut hooks);
            assert!(mgr.lives() <= last);
            last = mgr.lives();
        }
        assert_eq!(mgr.lives(), 0);
        assert_eq!(hooks.scenes.len(), 1);
    }

    #[test]
    fn respawn_without_checkpoint_changes_nothing() {
        let mut mgr = RespawnManager::default();
        let mut hooks = RecordingHooks::default();
        let mut pos = Vec3::new(4.0, -20.0, 1.0);

        assert_eq!(mgr.respawn(&mut pos, &mut hooks), Err(RespawnError::NoCheckpoint));
        assert_eq!(pos, Vec3::new(4.0, -20.0, 1.0));
        assert_eq!(mgr.lives(), DEFAULT_MAX_LIVES);
        assert_eq!(mgr.phase(), RespawnPhase::Active);
        assert!(hooks.lives_shown.is_empty());
    }

    #[test]
    fn game_over_is_idempotent() {
        let mut mgr = RespawnManager::default();
        let mut hooks = RecordingHooks::default();
        assert!(mgr.game_over(&mut hooks));
        assert!(!mgr.game_over(&mut hooks));
        assert_eq!(hooks.scenes.len(), 1);
        assert_eq!(hooks.cursor_releases, 1);
    }

    #[test]
    fn latest_checkpoint_wins() {
        let mut mgr = RespawnManager::default();
        mgr.on_checkpoint_entered(Vec3::X);
        mgr.on_checkpoint_entered(Vec3::Z);
        assert_eq!(mgr.last_checkpoint(), Some(Vec3::Z));
    }

    #[test]
    fn checkpoints_ignored_after_game_over() {
        let mut mgr = RespawnManager::default();
        let mut hooks = RecordingHooks::default();
        mgr.on_checkpoint_entered(Vec3::X);
        mgr.game_over(&mut hooks);
        mgr.on_checkpoint_entered(Vec3::Z);
        assert_eq!(mgr.last_checkpoint(), Some(Vec3::X));

        let mut pos = Vec3::ZERO;
        assert_eq!(mgr.respawn(&mut pos, &mut hooks), Ok(RespawnOutcome::Ignored));
        assert_eq!(pos, Vec3::ZERO);
    }

    #[test]
    fn fade_returns_control() {
        let mut mgr = RespawnManager::default();
        let mut hooks = RecordingHooks::default();
        let mut pos = Vec3::ZERO;
        mgr.on_checkpoint_entered(Vec3::ZERO);
        mgr.respawn(&mut pos, &mut hooks).unwrap();
        assert_eq!(mgr.phase(), RespawnPhase::Respawning);
        assert_eq!(hooks.control, vec![false]);

        mgr.tick(0.3, &mut hooks);
        assert_eq!(mgr.phase(), RespawnPhase::Respawning);
        mgr.tick(0.3, &mut hooks);
        assert_eq!(mgr.phase(), RespawnPhase::Active);
        assert_eq!(hooks.control, vec![false, true]);

        // idle ticks do nothing
        mgr.tick(1.0, &mut hooks);
        assert_eq!(hooks.control.len(), 2);
    }
}
