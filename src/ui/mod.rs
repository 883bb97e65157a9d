//! HUD, filter selector and game-over screen.
//!
//! The HUD shows lives as text plus a bar (the lives slider), the remaining
//! countdown, the active filter and the music cue the selector is playing.
//! The filter selector maps number keys to `FilterSelector::select` and
//! tints the screen with the active filter.

use crate::countdown::Countdown;
use crate::lens::{FilterColor, FilterSelector, LensInventory};
use crate::player::LivesDisplay;
use crate::settings::Settings;
use bevy::prelude::*;

#[derive(Component)]
pub struct LivesText;

#[derive(Component)]
pub struct LivesBar;

#[derive(Component)]
pub struct CountdownText;

#[derive(Component)]
pub struct FilterLabel;

#[derive(Component)]
pub struct FilterTint;

/// Root of the in-game HUD; removed on game over.
#[derive(Component)]
pub struct HudRoot;

#[must_use]
pub fn lives_label(lives: u32) -> String {
    format!("Lives: {lives}")
}

/// Fraction of the lives bar to fill.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lives_fraction(display: &LivesDisplay) -> f32 {
    if display.max == 0 {
        return 0.0;
    }
    (display.lives as f32 / display.max as f32).clamp(0.0, 1.0)
}

/// Filter line of the HUD: active filter, lens count and the music cue.
#[must_use]
pub fn filter_label(inventory: &LensInventory, selector: &FilterSelector) -> String {
    let music = match selector.current_cue() {
        Some(cue) if selector.cue_paused() => format!("{} (paused)", cue.label()),
        Some(cue) => cue.label().to_string(),
        None => "-".to_string(),
    };
    format!(
        "Filter: {} ({}/3 lenses) | Music: {music}",
        inventory.active().label(),
        inventory.collected_count()
    )
}

fn tint_for(filter: FilterColor) -> Color {
    match filter {
        FilterColor::Normal => Color::NONE,
        FilterColor::Red => Color::srgba(1.0, 0.0, 0.0, 0.18),
        FilterColor::Blue => Color::srgba(0.0, 0.2, 1.0, 0.18),
        FilterColor::Green => Color::srgba(0.0, 1.0, 0.2, 0.18),
    }
}

fn text_style(size: f32) -> TextStyle {
    TextStyle {
        font_size: size,
        color: Color::WHITE,
        ..default()
    }
}

/// Spawn the HUD.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_hud(mut commands: Commands, display: Res<LivesDisplay>) {
    // full-screen filter tint, drawn under the HUD text
    commands.spawn((
        NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            background_color: BackgroundColor(Color::NONE),
            ..default()
        },
        FilterTint,
        HudRoot,
    ));

    commands
        .spawn((
            NodeBundle {
                style: Style {
                    position_type: PositionType::Absolute,
                    top: Val::Px(10.0),
                    left: Val::Px(10.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(6.0),
                    ..default()
                },
                ..default()
            },
            HudRoot,
        ))
        .with_children(|root| {
            root.spawn((TextBundle::from_section(lives_label(display.lives), text_style(24.0)), LivesText));
            root.spawn(NodeBundle {
                style: Style {
                    width: Val::Px(160.0),
                    height: Val::Px(10.0),
                    ..default()
                },
                background_color: BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.2)),
                ..default()
            })
            .with_children(|bar| {
                bar.spawn((
                    NodeBundle {
                        style: Style {
                            width: Val::Percent(100.0 * lives_fraction(&display)),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        background_color: BackgroundColor(Color::srgb(0.85, 0.2, 0.25)),
                        ..default()
                    },
                    LivesBar,
                ));
            });
            root.spawn((TextBundle::from_section("", text_style(20.0)), CountdownText));
            root.spawn((
                TextBundle::from_section(format!("Filter: {}", FilterColor::Normal.label()), text_style(18.0)),
                FilterLabel,
            ));
        });
}

/// Mirror `LivesDisplay` into the text and bar when it changes.
#[allow(clippy::needless_pass_by_value)]
pub fn update_lives_hud(
    display: Res<LivesDisplay>,
    mut texts: Query<&mut Text, With<LivesText>>,
    mut bars: Query<&mut Style, With<LivesBar>>,
) {
    if !display.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.sections[0].value = lives_label(display.lives);
    }
    for mut style in &mut bars {
        style.width = Val::Percent(100.0 * lives_fraction(&display));
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn update_countdown_text(countdown: Option<Res<Countdown>>, mut texts: Query<&mut Text, With<CountdownText>>) {
    let Some(countdown) = countdown else { return };
    for mut text in &mut texts {
        text.sections[0].value = format!("Time: {}", countdown.display());
    }
}

/// Number keys pick a filter; the selector decides whether the cue changes.
#[allow(clippy::needless_pass_by_value)]
pub fn select_filter(
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut selector: ResMut<FilterSelector>,
    mut inventory: ResMut<LensInventory>,
) {
    let controls = &settings.controls;
    let bindings = [
        (controls.key("filter_normal", KeyCode::Digit1), FilterColor::Normal),
        (controls.key("filter_red", KeyCode::Digit2), FilterColor::Red),
        (controls.key("filter_green", KeyCode::Digit3), FilterColor::Green),
        (controls.key("filter_blue", KeyCode::Digit4), FilterColor::Blue),
    ];

    for (key, color) in bindings {
        if !kb.just_pressed(key) {
            continue;
        }
        if let Some(track) = selector.select(color, &mut inventory) {
            info!("music cue: {}", track.label());
        }
    }
}

/// Lock the selector once every lens is in.
#[allow(clippy::needless_pass_by_value)]
pub fn check_lens_interaction(inventory: Res<LensInventory>, mut selector: ResMut<FilterSelector>) {
    if !inventory.is_changed() {
        return;
    }
    let was_paused = selector.cue_paused();
    if selector.check_interaction(&inventory) {
        return;
    }
    if selector.cue_paused() && !was_paused {
        info!("all lenses collected, music paused");
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn update_filter_overlay(
    inventory: Res<LensInventory>,
    selector: Res<FilterSelector>,
    mut tints: Query<&mut BackgroundColor, With<FilterTint>>,
    mut labels: Query<&mut Text, With<FilterLabel>>,
) {
    if !inventory.is_changed() && !selector.is_changed() {
        return;
    }
    let active = inventory.active();
    for mut bg in &mut tints {
        bg.0 = if inventory.has_color(active) { tint_for(active) } else { Color::NONE };
    }
    for mut text in &mut labels {
        text.sections[0].value = filter_label(&inventory, &selector);
    }
}

/// Replace the HUD with the game-over screen.
pub fn show_game_over(mut commands: Commands, hud: Query<Entity, With<HudRoot>>) {
    for e in &hud {
        commands.entity(e).despawn_recursive();
    }
    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            background_color: BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            ..default()
        })
        .with_children(|root| {
            root.spawn(TextBundle::from_section("GAME OVER", text_style(64.0)));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_matches_lives() {
        assert_eq!(lives_label(2), "Lives: 2");
    }

    #[test]
    fn bar_fraction_is_clamped() {
        assert_eq!(lives_fraction(&LivesDisplay { lives: 2, max: 4 }), 0.5);
        assert_eq!(lives_fraction(&LivesDisplay { lives: 0, max: 0 }), 0.0);
        assert_eq!(lives_fraction(&LivesDisplay { lives: 9, max: 3 }), 1.0);
    }

    #[test]
    fn filter_label_shows_cue_and_pause() {
        let mut inv = LensInventory::default();
        let mut sel = FilterSelector::default();
        assert_eq!(filter_label(&inv, &sel), "Filter: Normal (0/3 lenses) | Music: -");

        inv.collect(crate::lens::LensColor::Red);
        sel.select(FilterColor::Red, &mut inv);
        assert_eq!(filter_label(&inv, &sel), "Filter: Red (1/3 lenses) | Music: Red");

        inv.collect(crate::lens::LensColor::Blue);
        inv.collect(crate::lens::LensColor::Green);
        sel.check_interaction(&inv);
        assert_eq!(filter_label(&inv, &sel), "Filter: Red (3/3 lenses) | Music: Red (paused)");
    }

    #[test]
    fn normal_filter_has_no_tint() {
        assert_eq!(tint_for(FilterColor::Normal), Color::NONE);
        assert_ne!(tint_for(FilterColor::Red), Color::NONE);
    }
}
