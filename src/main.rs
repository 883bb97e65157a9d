use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use lensfall::level::{load_level_from_dir, LEVELS_DIR};
use lensfall::player::{
    apply_game_over, collect_colliders, cursor_grab, detect_triggers, drive_locomotion,
    follow_player, handle_triggers, integrate_bodies, probe_ground, tick_countdown,
    tick_respawn_fade, turn_player, GameOverRequested,
};
use lensfall::scene::GameScene;
use lensfall::settings::loader::{self as settings_loader, SETTINGS_DIR};
use lensfall::trigger::TriggerEntered;
use lensfall::ui::{
    check_lens_interaction, select_filter, show_game_over, spawn_hud, update_countdown_text,
    update_filter_overlay, update_lives_hud,
};

mod app;

fn main() {
    let settings = settings_loader::load_settings_from_dir(SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());
    let level = load_level_from_dir(LEVELS_DIR);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Lensfall".into(),
            position: WindowPosition::Centered(MonitorSelection::Primary),
            present_mode: PresentMode::AutoNoVsync,
            ..default()
        }),
        ..default()
    }));

    // ground probe, fall timer and triggers run on the fixed physics step
    app.insert_resource(Time::<Fixed>::from_hz(settings.graphics.physics_hz.max(1.0)));
    app.init_state::<GameScene>();
    app.add_event::<GameOverRequested>();
    app.add_event::<TriggerEntered>();

    app.insert_resource(level);
    app.insert_resource(settings);
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, (crate::app::setup_resources, crate::app::setup, spawn_hud).chain());

    app.add_systems(
        FixedUpdate,
        (
            collect_colliders,
            integrate_bodies,
            probe_ground,
            detect_triggers,
            handle_triggers,
        )
            .chain()
            .run_if(in_state(GameScene::Playing)),
    );

    app.add_systems(
        Update,
        (turn_player, drive_locomotion, follow_player)
            .chain()
            .run_if(in_state(GameScene::Playing)),
    );
    app.add_systems(
        Update,
        (tick_countdown, tick_respawn_fade, apply_game_over)
            .chain()
            .run_if(in_state(GameScene::Playing)),
    );
    app.add_systems(Update, cursor_grab.run_if(in_state(GameScene::Playing)));
    app.add_systems(
        Update,
        (select_filter, check_lens_interaction, update_filter_overlay)
            .chain()
            .run_if(in_state(GameScene::Playing)),
    );
    app.add_systems(Update, (update_lives_hud, update_countdown_text));

    app.add_systems(
        Update,
        (
            settings_loader::check_settings_changes,
            crate::app::sync_player_settings,
            crate::app::sync_display_settings,
        )
            .chain(),
    );

    app.add_systems(OnEnter(GameScene::GameOver), show_game_over);

    app.run();
}
