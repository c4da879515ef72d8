//! Enemy entity construction.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{AiState, AttackTimer, Enemy, EnemyConfig, PatrolRoute};
use crate::animation::{params, Animator};
use crate::combat::Health;
use crate::core::{Facing, MoveIntent};
use crate::world::{LevelEntity, ACTOR_GROUP};

/// Spawn a patrolling enemy walking between two waypoints.
pub fn spawn_enemy(
    commands: &mut Commands,
    position: Vec2,
    patrol: (Vec2, Vec2),
    config: &EnemyConfig,
) -> Entity {
    commands
        .spawn((
            Enemy,
            Sprite {
                color: Color::srgb(0.75, 0.2, 0.25),
                custom_size: Some(Vec2::new(0.7, 1.4)),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            LevelEntity,
            Health::new(config.max_health),
            config.to_stats(),
            AiState::default(),
            PatrolRoute::new(patrol.0, patrol.1),
            AttackTimer::new(config.attack_cooldown),
            MoveIntent::default(),
            Facing::default(),
            Animator::default()
                .with_bools(&[params::IS_WALKING, params::IS_RUNNING])
                .with_triggers(&[
                    params::ATTACK_TRIGGER,
                    params::HURT_TRIGGER,
                    params::DIE_TRIGGER,
                ]),
            (
                RigidBody::Dynamic,
                Collider::capsule_y(0.4, 0.3),
                CollisionGroups::new(ACTOR_GROUP, Group::ALL),
                LockedAxes::ROTATION_LOCKED,
                GravityScale(3.0),
                Velocity::zero(),
                ExternalImpulse::default(),
            ),
        ))
        .id()
}
