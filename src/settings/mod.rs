//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`).
use crate::ground::FallTracker;
use crate::lives::RespawnConfig;
use crate::locomotion::LocomotionConfig;
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_physics_hz")]
    pub physics_hz: f64, // Fixed physics step rate (ground probe, fall timer, triggers).
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
    fn default_physics_hz() -> f64 { 50.0 }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            vsync: Self::default_vsync(),
            physics_hz: Self::default_physics_hz(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_x: bool, // Invert mouse X axis
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Mouse sensitivity multiplier
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 1.0 }

    fn default_keybinds() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("forward".to_string(), "W".to_string());
        m.insert("back".to_string(), "S".to_string());
        m.insert("left".to_string(), "A".to_string());
        m.insert("right".to_string(), "D".to_string());
        m.insert("jump".to_string(), "Space".to_string());
        m.insert("sprint".to_string(), "LShift".to_string());
        m.insert("sprint_alt".to_string(), "RShift".to_string());
        m.insert("pause".to_string(), "Escape".to_string());
        m.insert("filter_normal".to_string(), "1".to_string());
        m.insert("filter_red".to_string(), "2".to_string());
        m.insert("filter_green".to_string(), "3".to_string());
        m.insert("filter_blue".to_string(), "4".to_string());
        m
    }

    /// Resolve the key bound to `action`, falling back to `default` when the
    /// binding is missing or unparseable.
    #[must_use]
    pub fn key(&self, action: &str, default: KeyCode) -> KeyCode {
        self.keybinds
            .get(action)
            .and_then(|s| Settings::keycode_from_str(s))
            .unwrap_or(default)
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_x: false,
            mouse_sensitivity: Self::default_sensitivity(),
            keybinds: Self::default_keybinds(),
        }
    }
}

/// Locomotion tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_move_speed")]
    pub move_speed: f32, // Walking speed in units per second.
    #[serde(default = "MovementSettings::default_sprint_speed")]
    pub sprint_speed: f32, // Speed while sprint is held and the player is grounded.
    #[serde(default = "MovementSettings::default_rotation_speed")]
    pub rotation_speed: f32, // Turn rate in degrees per 1000 units of mouse motion.
    #[serde(default = "MovementSettings::default_jump_force")]
    pub jump_force: f32, // Upward impulse applied on jump.
    #[serde(default = "MovementSettings::default_mass")]
    pub mass: f32, // Player body mass; jump velocity is jump_force / mass.
    #[serde(default = "MovementSettings::default_gravity")]
    pub gravity: f32, // Downward acceleration applied by the body step.
}

impl MovementSettings {
    fn default_move_speed() -> f32 { 5.0 }
    fn default_sprint_speed() -> f32 { 10.0 }
    fn default_rotation_speed() -> f32 { 100.0 }
    fn default_jump_force() -> f32 { 5.0 }
    fn default_mass() -> f32 { 1.0 }
    fn default_gravity() -> f32 { 9.81 }

    #[must_use]
    pub fn locomotion(&self) -> LocomotionConfig {
        LocomotionConfig {
            base_speed: self.move_speed,
            sprint_speed: self.sprint_speed,
            jump_impulse: self.jump_force,
        }
    }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            move_speed: Self::default_move_speed(),
            sprint_speed: Self::default_sprint_speed(),
            rotation_speed: Self::default_rotation_speed(),
            jump_force: Self::default_jump_force(),
            mass: Self::default_mass(),
            gravity: Self::default_gravity(),
        }
    }
}

/// Ground probe and fall detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallSettings {
    #[serde(default = "FallSettings::default_ray_length")]
    pub ground_ray_length: f32, // Length of the downward ground probe from the player origin.
    #[serde(default = "FallSettings::default_max_fall_time")]
    pub max_fall_time: f32, // Seconds airborne before the fall ends the game.
}

impl FallSettings {
    fn default_ray_length() -> f32 { crate::ground::DEFAULT_RAY_LENGTH }
    fn default_max_fall_time() -> f32 { crate::ground::DEFAULT_MAX_FALL_SECS }

    #[must_use]
    pub fn tracker(&self) -> FallTracker {
        FallTracker {
            ray_length: self.ground_ray_length,
            max_fall_secs: self.max_fall_time,
        }
    }
}

impl Default for FallSettings {
    fn default() -> Self {
        Self {
            ground_ray_length: Self::default_ray_length(),
            max_fall_time: Self::default_max_fall_time(),
        }
    }
}

/// Lives and respawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivesSettings {
    #[serde(default = "LivesSettings::default_max_lives")]
    pub max_lives: u32, // Lives at the start of a run.
    #[serde(default = "LivesSettings::default_respawn_height")]
    pub respawn_height: f32, // Height above the checkpoint at which the player reappears.
    #[serde(default = "LivesSettings::default_respawn_fade")]
    pub respawn_fade: f32, // Seconds of disabled control after a respawn.
}

impl LivesSettings {
    fn default_max_lives() -> u32 { crate::lives::DEFAULT_MAX_LIVES }
    fn default_respawn_height() -> f32 { crate::lives::DEFAULT_RESPAWN_OFFSET }
    fn default_respawn_fade() -> f32 { crate::lives::DEFAULT_RESPAWN_FADE_SECS }

    #[must_use]
    pub fn respawn(&self) -> RespawnConfig {
        RespawnConfig {
            max_lives: self.max_lives,
            respawn_offset: self.respawn_height,
            fade_secs: self.respawn_fade,
        }
    }
}

impl Default for LivesSettings {
    fn default() -> Self {
        Self {
            max_lives: Self::default_max_lives(),
            respawn_height: Self::default_respawn_height(),
            respawn_fade: Self::default_respawn_fade(),
        }
    }
}

/// Level countdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "TimerSettings::default_enabled")]
    pub enabled: bool, // Run a countdown that ends the game at zero (requires restart).
    #[serde(default = "TimerSettings::default_seconds")]
    pub seconds: f32, // Countdown length in seconds.
}

impl TimerSettings {
    fn default_enabled() -> bool { true }
    fn default_seconds() -> f32 { 300.0 }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            seconds: Self::default_seconds(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub movement: MovementSettings,
    #[serde(default)]
    pub fall: FallSettings,
    #[serde(default)]
    pub lives: LivesSettings,
    #[serde(default)]
    pub timer: TimerSettings,
}

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into a `KeyCode` that
    /// can be used with Bevy's input system.
    ///
    /// # Arguments
    /// * `name` - The string key identifier to convert (e.g., "W", "Space", "LShift").
    ///
    /// # Returns
    /// An `Option<KeyCode>` corresponding to the provided string, or `None` if the string
    /// does not match any known key.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.to_ascii_uppercase();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let letter = match c {
                'A' => Some(KeyCode::KeyA),
                'B' => Some(KeyCode::KeyB),
                'C' => Some(KeyCode::KeyC),
                'D' => Some(KeyCode::KeyD),
                'E' => Some(KeyCode::KeyE),
                'F' => Some(KeyCode::KeyF),
                'G' => Some(KeyCode::KeyG),
                'H' => Some(KeyCode::KeyH),
                'I' => Some(KeyCode::KeyI),
                'J' => Some(KeyCode::KeyJ),
                'K' => Some(KeyCode::KeyK),
                'L' => Some(KeyCode::KeyL),
                'M' => Some(KeyCode::KeyM),
                'N' => Some(KeyCode::KeyN),
                'O' => Some(KeyCode::KeyO),
                'P' => Some(KeyCode::KeyP),
                'Q' => Some(KeyCode::KeyQ),
                'R' => Some(KeyCode::KeyR),
                'S' => Some(KeyCode::KeyS),
                'T' => Some(KeyCode::KeyT),
                'U' => Some(KeyCode::KeyU),
                'V' => Some(KeyCode::KeyV),
                'W' => Some(KeyCode::KeyW),
                'X' => Some(KeyCode::KeyX),
                'Y' => Some(KeyCode::KeyY),
                'Z' => Some(KeyCode::KeyZ),
                '0' => Some(KeyCode::Digit0),
                '1' => Some(KeyCode::Digit1),
                '2' => Some(KeyCode::Digit2),
                '3' => Some(KeyCode::Digit3),
                '4' => Some(KeyCode::Digit4),
                '5' => Some(KeyCode::Digit5),
                '6' => Some(KeyCode::Digit6),
                '7' => Some(KeyCode::Digit7),
                '8' => Some(KeyCode::Digit8),
                '9' => Some(KeyCode::Digit9),
                _ => None,
            };
            if letter.is_some() {
                return letter;
            }
        }

        Some(match s.as_str() {
            // Arrows
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            // Whitespace / control
            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,

            // Modifiers
            "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            // Numpad
            "NUMPAD1" | "KP_1" => KeyCode::Numpad1,
            "NUMPAD2" | "KP_2" => KeyCode::Numpad2,
            "NUMPAD3" | "KP_3" => KeyCode::Numpad3,
            "NUMPAD4" | "KP_4" => KeyCode::Numpad4,

            _ => return None,
        })
    }
}

pub mod loader;
