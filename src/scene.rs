//! Top-level game scenes, driven through Bevy states.

use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameScene {
    #[default]
    Playing,
    GameOver,
}

impl GameScene {
    /// Map a scene name, as requested by gameplay code, to a state.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Playing" => Some(GameScene::Playing),
            "GameOver" => Some(GameScene::GameOver),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lives::GAME_OVER_SCENE;

    #[test]
    fn game_over_scene_name_resolves() {
        assert_eq!(GameScene::from_name(GAME_OVER_SCENE), Some(GameScene::GameOver));
        assert_eq!(GameScene::from_name("Playing"), Some(GameScene::Playing));
        assert_eq!(GameScene::from_name("Credits"), None);
    }
}
