//! Bomb lifecycle systems: release, fuse, contact, explosion.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{in_blast_radius, throw_direction, Bomb, BombConfig, BombSupply};
use crate::animation::{params, Animator};
use crate::combat::Health;
use crate::core::{
    BombRelease, DamageEvent, Facing, SoundEvent, SoundKind, Task, TaskQueue, ThrowRearm,
};
use crate::enemies::Enemy;
use crate::world::{LevelEntity, BOMB_GROUP};

/// A bomb has been asked to explode, by fuse expiry or by contact.
/// Duplicate requests for the same bomb are harmless; the bomb's
/// one-way flag arbitrates.
#[derive(Event)]
pub struct Detonation {
    pub bomb: Entity,
}

const BOMB_FLASH_COLOR: Color = Color::srgb(1.0, 0.25, 0.2);
const BOMB_BODY_COLOR: Color = Color::srgb(0.16, 0.16, 0.18);

/// Spawn a bomb when the throw animation reaches its release frame.
///
/// The bomb enters the world as its own root entity - never a child of
/// the thrower - so the thrower's destruction cannot cascade into a
/// live bomb.
pub fn release_bombs(
    mut commands: Commands,
    mut releases: EventReader<BombRelease>,
    config: Res<BombConfig>,
    throwers: Query<(&Transform, &Facing)>,
) {
    for release in releases.read() {
        let Ok((transform, facing)) = throwers.get(release.thrower) else {
            continue;
        };

        let spawn_pos =
            transform.translation.truncate() + Vec2::new(config.spawn_offset * facing.0, 0.0);
        let direction = throw_direction(facing.0, config.throw_angle_deg);

        commands.spawn((
            Bomb::new(&config, release.thrower),
            LevelEntity,
            Sprite {
                color: BOMB_BODY_COLOR,
                custom_size: Some(Vec2::splat(0.4)),
                ..default()
            },
            Transform::from_translation(spawn_pos.extend(0.0)),
            Animator::default().with_triggers(&[params::EXPLODE_TRIGGER]),
            RigidBody::Dynamic,
            Collider::ball(0.2),
            CollisionGroups::new(BOMB_GROUP, Group::ALL),
            GravityScale(1.0),
            Damping {
                linear_damping: 0.5,
                angular_damping: 0.0,
            },
            Velocity::linear(direction * config.throw_force),
            ActiveEvents::COLLISION_EVENTS,
        ));
    }
}

/// Re-open the supply gate when the throw cooldown task comes due.
pub fn rearm_throws(
    mut rearms: EventReader<ThrowRearm>,
    mut supplies: Query<&mut BombSupply>,
) {
    for rearm in rearms.read() {
        if let Ok(mut supply) = supplies.get_mut(rearm.thrower) {
            supply.rearm();
        }
    }
}

/// Tick every live fuse: tick sounds while there is time left, the
/// flashing highlight over the last stretch, detonation at zero.
pub fn update_fuses(
    time: Res<Time>,
    config: Res<BombConfig>,
    mut sounds: EventWriter<SoundEvent>,
    mut detonations: EventWriter<Detonation>,
    mut bombs: Query<(Entity, &mut Bomb, &mut Sprite)>,
) {
    for (entity, mut bomb, mut sprite) in bombs.iter_mut() {
        if bomb.exploded {
            continue;
        }

        bomb.fuse_remaining -= time.delta_secs();

        bomb.tick_timer.tick(time.delta());
        if bomb.tick_timer.just_finished() && !bomb.in_flash_window(config.flash_window) {
            sounds.send(SoundEvent(SoundKind::BombTick));
        }

        if bomb.in_flash_window(config.flash_window) {
            bomb.flash_timer.tick(time.delta());
            if bomb.flash_timer.just_finished() {
                bomb.flash_on = !bomb.flash_on;
                sprite.color = if bomb.flash_on {
                    BOMB_FLASH_COLOR
                } else {
                    BOMB_BODY_COLOR
                };
            }
        }

        if bomb.fuse_remaining <= 0.0 {
            detonations.send(Detonation { bomb: entity });
        }
    }
}

/// React to bomb contacts: an enemy touch detonates immediately,
/// bypassing whatever fuse was left; anything else just bleeds speed.
pub fn bomb_contacts(
    config: Res<BombConfig>,
    mut collisions: EventReader<CollisionEvent>,
    mut bombs: Query<(&Bomb, &mut Velocity)>,
    enemies: Query<(), With<Enemy>>,
    mut detonations: EventWriter<Detonation>,
) {
    for collision in collisions.read() {
        let CollisionEvent::Started(a, b, _) = collision else {
            continue;
        };

        let (bomb_entity, other) = if bombs.contains(*a) {
            (*a, *b)
        } else if bombs.contains(*b) {
            (*b, *a)
        } else {
            continue;
        };

        let Ok((bomb, mut velocity)) = bombs.get_mut(bomb_entity) else {
            continue;
        };
        if bomb.exploded {
            continue;
        }

        if enemies.get(other).is_ok() {
            detonations.send(Detonation { bomb: bomb_entity });
        } else {
            velocity.linvel *= config.contact_damping;
        }
    }
}

/// Resolve detonations: exactly-once explosion, area damage, knockback,
/// deferred despawn.
#[allow(clippy::too_many_arguments)]
pub fn explode_bombs(
    mut detonations: EventReader<Detonation>,
    rapier_context: Query<&RapierContext>,
    config: Res<BombConfig>,
    mut bombs: Query<(&mut Bomb, &Transform, &mut Animator)>,
    damageables: Query<(), With<Health>>,
    transforms: Query<&Transform, Without<Bomb>>,
    mut impulses: Query<&mut ExternalImpulse>,
    mut damage_events: EventWriter<DamageEvent>,
    mut sounds: EventWriter<SoundEvent>,
    mut tasks: ResMut<TaskQueue>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for detonation in detonations.read() {
        let Ok((mut bomb, transform, mut animator)) = bombs.get_mut(detonation.bomb) else {
            continue;
        };
        // Fuse expiry and a contact can both request detonation in the
        // same tick; only the first claim proceeds.
        if !bomb.begin_explosion() {
            continue;
        }

        // Early detonation drops whatever the bomb still had scheduled.
        tasks.cancel_owned(detonation.bomb);

        let center = transform.translation.truncate();
        animator.trigger(params::EXPLODE_TRIGGER);
        sounds.send(SoundEvent(SoundKind::Explosion));

        // Collect overlaps first; damage order within the blast carries
        // no guarantee.
        let mut hits = Vec::new();
        context.intersections_with_shape(
            center,
            0.0,
            &Collider::ball(config.explosion_radius),
            QueryFilter::default().exclude_collider(detonation.bomb),
            |hit| {
                hits.push(hit);
                true
            },
        );

        for hit in hits {
            let Ok(target_transform) = transforms.get(hit) else {
                continue;
            };
            let offset = target_transform.translation.truncate() - center;
            if !in_blast_radius(offset, config.explosion_radius) {
                continue;
            }

            if damageables.get(hit).is_ok() {
                // Kills credit the thrower, not the bomb entity that is
                // about to despawn.
                damage_events.send(DamageEvent {
                    target: hit,
                    source: bomb.thrower,
                    amount: config.explosion_damage,
                });
            }

            if let Ok(mut impulse) = impulses.get_mut(hit) {
                let direction = offset.normalize_or_zero();
                impulse.impulse += direction * config.knockback_impulse;
            }
        }

        tasks.schedule(detonation.bomb, config.despawn_delay, Task::Despawn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::apply_damage;
    use crate::core::DeathEvent;

    #[derive(Resource, Default)]
    struct Deaths(Vec<(Entity, Option<Entity>)>);

    fn capture_deaths(mut deaths: ResMut<Deaths>, mut events: EventReader<DeathEvent>) {
        for event in events.read() {
            deaths.0.push((event.entity, event.killed_by));
        }
    }

    #[test]
    fn explosion_kills_are_credited_to_the_thrower() {
        let mut app = App::new();
        app.init_resource::<Deaths>()
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_systems(Update, (apply_damage, capture_deaths).chain());

        let config = BombConfig::default();
        let thrower = app.world_mut().spawn_empty().id();
        let target = app
            .world_mut()
            .spawn(Health::new(config.explosion_damage))
            .id();

        // The blast damages through the bomb's stored thrower id, so
        // the credit survives the bomb entity's own despawn.
        let bomb = Bomb::new(&config, thrower);
        app.world_mut().send_event(DamageEvent {
            target,
            source: bomb.thrower,
            amount: config.explosion_damage,
        });
        app.update();

        let deaths = app.world().resource::<Deaths>();
        assert_eq!(deaths.0, vec![(target, Some(thrower))]);
    }
}
