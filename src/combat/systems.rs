//! Damage application and death handling.

use std::collections::HashSet;

use bevy::prelude::*;

use super::components::{Dead, Destructible, Health};
use crate::animation::{params, Animator};
use crate::core::{DamageEvent, DeathEvent, GameState, TaskQueue};
use crate::enemies::Enemy;
use crate::player::Player;

/// Apply damage events to whatever carries a `Health` component.
///
/// One generic system for every damageable kind; senders never know or
/// care what they hit.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<(&mut Health, Option<&mut Animator>, Option<&Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
) {
    // Entities that died this frame, to avoid duplicate death events
    // when several damage events land in the same tick.
    let mut died_this_frame = HashSet::new();

    for event in damage_events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }

        let Ok((mut health, animator, dead)) = health_query.get_mut(event.target) else {
            continue;
        };
        if dead.is_some() {
            continue;
        }

        health.take_damage(event.amount);

        if let Some(mut animator) = animator {
            animator.trigger(params::HURT_TRIGGER);
        }

        if health.is_dead() {
            died_this_frame.insert(event.target);
            commands.entity(event.target).insert(Dead);
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}

/// Route deaths to their outcome.
///
/// The player ends the run; enemies are left to the enemy plugin so
/// their death animation can play out; destructibles and anything else
/// simply despawn. In every case pending deferred tasks are cancelled
/// so nothing fires on behalf of the deceased.
pub fn check_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    mut tasks: ResMut<TaskQueue>,
    mut player_query: Query<&mut Animator, With<Player>>,
    enemy_query: Query<(), With<Enemy>>,
    destructible_query: Query<(), With<Destructible>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        tasks.cancel_owned(event.entity);

        if let Ok(mut animator) = player_query.get_mut(event.entity) {
            animator.trigger(params::DIE_TRIGGER);
            info!("Player died - game over");
            next_state.set(GameState::GameOver);
        } else if enemy_query.get(event.entity).is_ok() {
            // Enemy plugin owns the death-animation-then-despawn path.
        } else if destructible_query.get(event.entity).is_ok() {
            commands.entity(event.entity).despawn_recursive();
        } else if let Some(mut entity) = commands.get_entity(event.entity) {
            entity.despawn_recursive();
        }
    }
}
