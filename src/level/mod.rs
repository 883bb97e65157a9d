//! Level layout: platforms, trigger volumes and the player spawn.
//!
//! Levels are RON files under `data/levels/`. The first file that parses is
//! used; when none do, a small built-in course is returned so the game always
//! has something to stand on.

use crate::lens::LensColor;
use crate::ron_loader::load_ron_files;
use crate::trigger::TriggerKind;
use bevy::log::{info, warn};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const LEVELS_DIR: &str = "data/levels";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformDef {
    pub center: [f32; 3],
    pub size: [f32; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriggerDef {
    pub center: [f32; 3],
    pub size: [f32; 3],
    pub kind: TriggerKind,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelDef {
    pub name: String,
    pub spawn: [f32; 3],
    /// Initial facing, degrees around +Y.
    #[serde(default)]
    pub spawn_yaw: f32,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
}

impl LevelDef {
    #[must_use]
    pub fn spawn_point(&self) -> Vec3 {
        Vec3::from_array(self.spawn)
    }

    /// Trigger definitions of one kind, in file order.
    pub fn triggers_of(&self, kind: TriggerKind) -> impl Iterator<Item = &TriggerDef> {
        self.triggers.iter().filter(move |t| t.kind == kind)
    }

    /// Built-in course: start pad, three lens islands, a summit and a kill floor.
    #[must_use]
    pub fn builtin() -> Self {
        let pad = |x: f32, y: f32, z: f32, w: f32, d: f32| PlatformDef {
            center: [x, y, z],
            size: [w, 1.0, d],
        };
        let trigger = |x: f32, y: f32, z: f32, size: [f32; 3], kind| TriggerDef {
            center: [x, y, z],
            size,
            kind,
        };
        let small = [1.0, 1.0, 1.0];

        Self {
            name: "builtin".to_string(),
            spawn: [0.0, 2.0, 0.0],
            spawn_yaw: 0.0,
            platforms: vec![
                pad(0.0, -0.5, 0.0, 8.0, 8.0),
                pad(0.0, 0.0, -9.0, 5.0, 5.0),
                pad(7.0, 0.5, -14.0, 5.0, 5.0),
                pad(-7.0, 0.5, -14.0, 5.0, 5.0),
                pad(0.0, 1.0, -20.0, 6.0, 6.0),
            ],
            triggers: vec![
                trigger(0.0, 0.5, 0.0, [2.0, 1.0, 2.0], TriggerKind::Checkpoint),
                trigger(0.0, 2.0, -20.0, [2.0, 1.0, 2.0], TriggerKind::Checkpoint),
                trigger(0.0, 1.5, -9.0, small, TriggerKind::Lens(LensColor::Red)),
                trigger(7.0, 2.0, -14.0, small, TriggerKind::Lens(LensColor::Blue)),
                trigger(-7.0, 2.0, -14.0, small, TriggerKind::Lens(LensColor::Green)),
                trigger(0.0, -30.0, -10.0, [200.0, 2.0, 200.0], TriggerKind::KillZone),
            ],
        }
    }
}

/// Load the first level found in `path`, or the built-in course.
#[must_use]
pub fn load_level_from_dir(path: &str) -> LevelDef {
    let mut levels: Vec<LevelDef> = load_ron_files(path);
    if levels.is_empty() {
        warn!("no level files in {path}, using built-in level");
        return LevelDef::builtin();
    }
    let level = levels.swap_remove(0);
    info!(
        "loaded level '{}': {} platforms, {} triggers",
        level.name,
        level.platforms.len(),
        level.triggers.len()
    );
    level
}
