//! Setup systems for initializing the level and runtime resources.
//!
//! `setup` runs at `Startup`: it inserts the respawn/lens/timer resources built
//! from `Settings`, spawns the level described by `LevelDef`, the player, the
//! follow camera and a light.
use bevy::prelude::*;
use lensfall::collision::{Collider, StaticColliders};
use lensfall::countdown::Countdown;
use lensfall::lens::{FilterSelector, LensInventory};
use lensfall::level::LevelDef;
use lensfall::lives::RespawnManager;
use lensfall::player::{FollowCamera, LivesDisplay, PlayerBundle};
use lensfall::settings::Settings;
use lensfall::trigger::{TriggerKind, TriggerVolume};

/// Insert gameplay resources derived from settings.
///
/// # Arguments
/// - `commands`: Commands for inserting resources.
/// - `settings`: The loaded settings; lives and timer sections are read once here.
#[allow(clippy::needless_pass_by_value)]
pub fn setup_resources(mut commands: Commands, settings: Res<Settings>) {
    let manager = RespawnManager::new(settings.lives.respawn());
    commands.insert_resource(LivesDisplay {
        lives: manager.lives(),
        max: manager.max_lives(),
    });
    commands.insert_resource(manager);
    commands.insert_resource(LensInventory::default());
    commands.insert_resource(FilterSelector::default());
    commands.insert_resource(StaticColliders::default());

    if settings.timer.enabled {
        commands.insert_resource(Countdown::from_seconds(settings.timer.seconds));
    } else {
        info!("countdown disabled");
    }
}

fn trigger_color(kind: TriggerKind) -> Option<Color> {
    match kind {
        TriggerKind::Checkpoint => Some(Color::srgba(1.0, 0.85, 0.2, 0.35)),
        TriggerKind::Lens(c) => Some(c.color()),
        TriggerKind::KillZone => None,
    }
}

/// Spawn platforms, trigger volumes, the player, camera and light.
///
/// # Arguments
/// - `commands`: Commands for spawning entities.
/// - `meshes`: Mesh storage for the box meshes.
/// - `materials`: Material storage for platform/trigger/player materials.
/// - `level`: The level layout to build.
/// - `settings`: Player tuning.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    level: Res<LevelDef>,
    settings: Res<Settings>,
) {
    let platform_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.55, 0.6),
        perceptual_roughness: 0.9,
        ..default()
    });

    for p in &level.platforms {
        let size = Vec3::from_array(p.size);
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::from_size(size)),
                material: platform_mat.clone(),
                transform: Transform::from_translation(Vec3::from_array(p.center)),
                ..default()
            },
            Collider::cuboid(size),
        ));
    }

    for t in &level.triggers {
        let size = Vec3::from_array(t.size);
        let volume = TriggerVolume {
            kind: t.kind,
            half_extents: size * 0.5,
        };
        let transform = Transform::from_translation(Vec3::from_array(t.center));
        match trigger_color(t.kind) {
            Some(color) => {
                commands.spawn((
                    PbrBundle {
                        mesh: meshes.add(Cuboid::from_size(size * 0.6)),
                        material: materials.add(StandardMaterial {
                            base_color: color,
                            alpha_mode: AlphaMode::Blend,
                            unlit: true,
                            ..default()
                        }),
                        transform,
                        ..default()
                    },
                    volume,
                ));
            }
            None => {
                commands.spawn((SpatialBundle::from_transform(transform), volume));
            }
        }
    }

    let player_mesh = meshes.add(Capsule3d::new(0.4, 1.2));
    let player_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.6, 0.9),
        ..default()
    });
    commands.spawn(PlayerBundle::new(
        &settings,
        level.spawn_point(),
        level.spawn_yaw,
        player_mesh,
        player_mat,
    ));

    commands.spawn((Camera3dBundle::default(), FollowCamera::default()));

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
}
