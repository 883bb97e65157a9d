//! Applies the `graphics` section of `Settings` after a reload.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use lensfall::settings::{GraphicsSettings, Settings};

/// Push vsync and the physics step rate into the window and `Time<Fixed>`.
/// `last` holds the section applied previously so unrelated reloads do nothing.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_display_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut fixed: ResMut<Time<Fixed>>,
    mut last: Local<Option<GraphicsSettings>>,
) {
    let graphics = &settings.graphics;
    if last.as_ref() == Some(graphics) {
        return;
    }

    let mode = if graphics.vsync { PresentMode::Fifo } else { PresentMode::AutoNoVsync };
    for mut window in &mut windows {
        window.present_mode = mode;
    }
    if graphics.physics_hz > 0.0 {
        fixed.set_timestep_hz(graphics.physics_hz);
    } else {
        warn!("ignoring physics_hz {}, must be positive", graphics.physics_hz);
    }
    *last = Some(graphics.clone());
}
