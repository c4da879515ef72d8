//! Enemy AI: state selection and the per-state behaviors.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
    AiState, AttackTimer, DeathTimer, Enemy, EnemyConfig, EnemyStats, PatrolRoute,
};
use crate::animation::{params, Animator};
use crate::combat::Dead;
use crate::core::{DamageEvent, DeathEvent, Facing, MoveIntent, TaskQueue};
use crate::player::Player;

/// Pick the behavior state from the distance to the player.
///
/// Both thresholds are inclusive, and attack wins over chase when the
/// ranges overlap.
pub fn ai_state_for(distance: f32, attack_range: f32, chase_range: f32) -> AiState {
    if distance <= attack_range {
        AiState::Attack
    } else if distance <= chase_range {
        AiState::Chase
    } else {
        AiState::Patrol
    }
}

/// Rederive every living enemy's state from the player's position.
///
/// With no player alive, everyone falls back to patrol.
pub fn select_ai_states(
    player: Query<&Transform, With<Player>>,
    mut enemies: Query<(&Transform, &EnemyStats, &mut AiState), (With<Enemy>, Without<Dead>)>,
) {
    let player_pos = player.get_single().ok().map(|t| t.translation.truncate());

    for (transform, stats, mut state) in enemies.iter_mut() {
        let next = match player_pos {
            Some(target) => {
                let distance = transform.translation.truncate().distance(target);
                ai_state_for(distance, stats.attack_range, stats.chase_range)
            }
            None => AiState::Patrol,
        };
        if *state != next {
            *state = next;
        }
    }
}

/// Walk between the two waypoints, swapping and turning around on
/// arrival.
pub fn patrol(
    mut enemies: Query<
        (
            &Transform,
            &EnemyStats,
            &AiState,
            &mut PatrolRoute,
            &mut Velocity,
            &mut MoveIntent,
            &mut Facing,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    config: Res<EnemyConfig>,
) {
    for (transform, stats, state, mut route, mut velocity, mut intent, mut facing) in
        enemies.iter_mut()
    {
        if *state != AiState::Patrol {
            continue;
        }

        let position = transform.translation.truncate();
        if position.distance(route.target()) <= config.waypoint_epsilon {
            route.swap();
        }

        let direction = (route.target().x - position.x).signum();
        velocity.linvel.x = direction * stats.patrol_speed;
        intent.horizontal = direction;
        intent.running = false;
        facing.update_from_input(direction);
    }
}

/// Run straight at the player.
pub fn chase(
    player: Query<&Transform, With<Player>>,
    mut enemies: Query<
        (
            &Transform,
            &EnemyStats,
            &AiState,
            &mut Velocity,
            &mut MoveIntent,
            &mut Facing,
        ),
        (With<Enemy>, Without<Dead>),
    >,
) {
    let Ok(player_transform) = player.get_single() else {
        return;
    };
    let target_x = player_transform.translation.x;

    for (transform, stats, state, mut velocity, mut intent, mut facing) in enemies.iter_mut() {
        if *state != AiState::Chase {
            continue;
        }

        let direction = (target_x - transform.translation.x).signum();
        velocity.linvel.x = direction * stats.chase_speed;
        intent.horizontal = direction;
        intent.running = true;
        facing.update_from_input(direction);
    }
}

/// Stand still and swing at the player whenever the cooldown allows.
pub fn attack(
    time: Res<Time>,
    player: Query<Entity, With<Player>>,
    mut enemies: Query<
        (
            Entity,
            &EnemyStats,
            &AiState,
            &mut AttackTimer,
            &mut Velocity,
            &mut MoveIntent,
            &mut Animator,
        ),
        (With<Enemy>, Without<Dead>),
    >,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok(player_entity) = player.get_single() else {
        return;
    };

    for (entity, stats, state, mut timer, mut velocity, mut intent, mut animator) in
        enemies.iter_mut()
    {
        // Cooldown keeps running while out of range, so an enemy that
        // closed in again does not get a free instant hit mid-combo.
        timer.0.tick(time.delta());

        if *state != AiState::Attack {
            continue;
        }

        velocity.linvel.x = 0.0;
        intent.horizontal = 0.0;
        intent.running = false;

        if timer.0.finished() {
            animator.trigger(params::ATTACK_TRIGGER);
            damage_events.send(DamageEvent {
                target: player_entity,
                source: entity,
                amount: stats.attack_damage,
            });
            timer.0.reset();
        }
    }
}

/// First tick after an enemy dies: stop it, play the death animation,
/// start the despawn countdown.
pub fn handle_enemy_deaths(
    mut commands: Commands,
    config: Res<EnemyConfig>,
    mut tasks: ResMut<TaskQueue>,
    mut death_events: EventReader<DeathEvent>,
    mut dead_enemies: Query<
        (&mut Velocity, &mut MoveIntent, &mut Animator),
        (With<Enemy>, With<Dead>),
    >,
) {
    for event in death_events.read() {
        let Ok((mut velocity, mut intent, mut animator)) = dead_enemies.get_mut(event.entity)
        else {
            continue;
        };

        velocity.linvel = Vec2::ZERO;
        *intent = MoveIntent::default();
        animator.trigger(params::DIE_TRIGGER);
        tasks.cancel_owned(event.entity);
        commands
            .entity(event.entity)
            .insert(DeathTimer::new(config.death_delay));
    }
}

/// Remove dead enemies once the death animation has had its time.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut dying: Query<(Entity, &mut DeathTimer), With<Enemy>>,
) {
    for (entity, mut timer) in dying.iter_mut() {
        if timer.0.tick(time.delta()).just_finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_thresholds_are_inclusive() {
        assert_eq!(ai_state_for(1.2, 1.2, 5.0), AiState::Attack);
        assert_eq!(ai_state_for(1.21, 1.2, 5.0), AiState::Chase);
        assert_eq!(ai_state_for(5.0, 1.2, 5.0), AiState::Chase);
        assert_eq!(ai_state_for(5.01, 1.2, 5.0), AiState::Patrol);
    }

    #[test]
    fn attack_beats_chase_when_ranges_overlap() {
        // Degenerate tuning where attack range exceeds chase range.
        assert_eq!(ai_state_for(2.0, 3.0, 2.5), AiState::Attack);
    }

    #[test]
    fn zero_distance_attacks() {
        assert_eq!(ai_state_for(0.0, 1.2, 5.0), AiState::Attack);
    }
}
