//! Level construction and teardown.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Ground, LevelEntity, GROUND_GROUP};
use crate::bombs::BombConfig;
use crate::combat::{Destructible, Health};
use crate::enemies::{spawn_enemy, EnemyConfig};
use crate::player::{spawn_player, Player, PlayerConfig};

const GROUND_COLOR: Color = Color::srgb(0.25, 0.3, 0.2);
const PLATFORM_COLOR: Color = Color::srgb(0.3, 0.35, 0.25);
const CRATE_COLOR: Color = Color::srgb(0.55, 0.4, 0.2);

/// Build the level: ground, platforms, crates, enemies, player.
pub fn setup_level(
    mut commands: Commands,
    player_config: Res<PlayerConfig>,
    bomb_config: Res<BombConfig>,
    enemy_config: Res<EnemyConfig>,
) {
    info!("Building level");

    // One long ground strip under the whole run.
    spawn_ground_slab(
        &mut commands,
        Vec2::new(0.0, -1.5),
        Vec2::new(80.0, 1.0),
        GROUND_COLOR,
    );

    // A few raised platforms along the way.
    for (x, y, width) in [
        (6.0, 1.0, 3.0),
        (12.0, 2.5, 2.5),
        (20.0, 1.5, 4.0),
        (30.0, 2.0, 3.0),
    ] {
        spawn_ground_slab(
            &mut commands,
            Vec2::new(x, y),
            Vec2::new(width, 0.4),
            PLATFORM_COLOR,
        );
    }

    // Breakable crates scattered at ground level.
    for x in [4.0, 16.0, 25.0] {
        spawn_crate(&mut commands, Vec2::new(x, -0.5));
    }

    for (x, patrol_half_width) in [(10.0, 3.0), (22.0, 4.0), (34.0, 3.0)] {
        let position = Vec2::new(x, -0.25);
        spawn_enemy(
            &mut commands,
            position,
            (
                Vec2::new(x - patrol_half_width, position.y),
                Vec2::new(x + patrol_half_width, position.y),
            ),
            &enemy_config,
        );
    }

    spawn_player(
        &mut commands,
        Vec2::new(0.0, 0.0),
        &player_config,
        bomb_config.max_bombs,
    );
}

fn spawn_ground_slab(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) {
    commands.spawn((
        Ground,
        LevelEntity,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Fixed,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        CollisionGroups::new(GROUND_GROUP, Group::ALL),
    ));
}

fn spawn_crate(commands: &mut Commands, position: Vec2) {
    commands.spawn((
        Destructible,
        LevelEntity,
        Health::new(50.0),
        Sprite {
            color: CRATE_COLOR,
            custom_size: Some(Vec2::splat(0.8)),
            ..default()
        },
        Transform::from_translation(position.extend(0.0)),
        RigidBody::Dynamic,
        Collider::cuboid(0.4, 0.4),
        LockedAxes::ROTATION_LOCKED,
        Velocity::zero(),
        ExternalImpulse::default(),
    ));
}

/// Tear the level down when leaving the in-game state.
pub fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, With<LevelEntity>>,
    player_query: Query<Entity, With<Player>>,
) {
    for entity in level_query.iter().chain(player_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
}
