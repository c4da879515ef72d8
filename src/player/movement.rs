//! Player locomotion and the redundant ground-contact oracle.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{ActionLock, DashState, Player, PlayerConfig};
use crate::animation::{params, Animator};
use crate::bombs::BombSupply;
use crate::combat::Health;
use crate::core::{Facing, GroundContact, MoveIntent};
use crate::world::{Ground, ACTOR_GROUP, GROUND_GROUP};

/// Read the horizontal axis and run modifier into the movement intent.
pub fn read_movement_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut MoveIntent, With<Player>>,
) {
    let Ok(mut intent) = query.get_single_mut() else {
        return;
    };

    let mut horizontal = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        horizontal -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        horizontal += 1.0;
    }

    intent.horizontal = horizontal;
    intent.running =
        keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
}

/// Convert movement intent into a horizontal velocity command.
///
/// Vertical velocity belongs to gravity and jump impulses alone; this
/// system never touches it. While a dash burst is active the horizontal
/// axis belongs to the burst, so the write is skipped entirely. Facing
/// follows the input sign (not the velocity sign) and only while
/// actions are allowed, matching how the dispatcher pins facing during
/// a punch.
pub fn apply_locomotion(
    config: Res<PlayerConfig>,
    mut query: Query<(&MoveIntent, &ActionLock, &DashState, &mut Velocity, &mut Facing), With<Player>>,
) {
    let Ok((intent, lock, dash, mut velocity, mut facing)) = query.get_single_mut() else {
        return;
    };

    if !dash.active() {
        let speed = if intent.running {
            config.run_speed
        } else {
            config.move_speed
        };
        velocity.linvel.x = intent.horizontal * speed;
    }

    if lock.can_act() {
        facing.update_from_input(intent.horizontal);
    }
}

/// The velocity an actor has immediately after a jump.
///
/// Residual vertical velocity is discarded before the impulse applies,
/// so jumping out of a fall can never stack: the result is exactly
/// `jump_force` upward, every time.
pub fn jump_velocity(current: Vec2, jump_force: f32) -> Vec2 {
    Vec2::new(current.x, jump_force)
}

/// Recompute the three redundant ground signals for this tick.
///
/// No caching across ticks; the jump-eligibility check next tick reads
/// what this tick computed.
pub fn update_ground_contact(
    rapier_context: Query<&RapierContext>,
    config: Res<PlayerConfig>,
    ground_tags: Query<(), With<Ground>>,
    mut query: Query<(Entity, &Transform, &mut GroundContact), With<Player>>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for (entity, transform, mut contact) in query.iter_mut() {
        let position = transform.translation.truncate();
        let probe_center = position + Vec2::new(0.0, config.ground_check_offset);
        let probe = Collider::ball(config.ground_check_radius);

        // Signal 1: proximity overlap against the ground collision group.
        let mut layer_overlap = false;
        context.intersections_with_shape(
            probe_center,
            0.0,
            &probe,
            QueryFilter::default()
                .exclude_collider(entity)
                .groups(CollisionGroups::new(ACTOR_GROUP, GROUND_GROUP)),
            |_| {
                layer_overlap = true;
                false
            },
        );

        // Signal 2: any overlapping collider carrying the ground tag.
        let mut tag_overlap = false;
        context.intersections_with_shape(
            probe_center,
            0.0,
            &probe,
            QueryFilter::default().exclude_collider(entity),
            |hit| {
                if ground_tags.get(hit).is_ok() {
                    tag_overlap = true;
                    false
                } else {
                    true
                }
            },
        );

        // Signal 3: downward ray from the player center to tagged ground.
        let ray_length =
            config.ground_check_offset.abs() + config.ground_check_radius + 0.1;
        let ray_hit = context
            .cast_ray(
                position,
                Vec2::NEG_Y,
                ray_length,
                true,
                QueryFilter::default().exclude_collider(entity),
            )
            .is_some_and(|(hit, _)| ground_tags.get(hit).is_ok());

        *contact = GroundContact {
            layer_overlap,
            tag_overlap,
            ray_hit,
        };
    }
}

/// Spawn the player entity at `position`.
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    config: &PlayerConfig,
    max_bombs: u32,
) -> Entity {
    commands
        .spawn((
            Player,
            Sprite {
                color: Color::srgb(0.9, 0.75, 0.3),
                custom_size: Some(Vec2::new(0.7, 1.6)),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            // Gameplay state
            Health::new(config.max_health),
            ActionLock::default(),
            DashState::default(),
            MoveIntent::default(),
            GroundContact::default(),
            Facing::default(),
            BombSupply::new(max_bombs),
            Animator::default()
                .with_bools(&[
                    params::IS_WALKING,
                    params::IS_RUNNING,
                    params::IS_JUMPING,
                    params::IS_KICKING,
                    params::IS_LEFT_PUNCH,
                    params::IS_RIGHT_PUNCH,
                    params::IS_UPPERCUT,
                    params::IS_DASH,
                ])
                .with_triggers(&[
                    params::JUMP_TRIGGER,
                    params::KICK_TRIGGER,
                    params::LEFT_PUNCH_TRIGGER,
                    params::RIGHT_PUNCH_TRIGGER,
                    params::UPPERCUT_TRIGGER,
                    params::DASH_TRIGGER,
                    params::THROW_TRIGGER,
                    params::HURT_TRIGGER,
                    params::DIE_TRIGGER,
                ]),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::capsule_y(0.5, 0.3),
                CollisionGroups::new(ACTOR_GROUP, Group::ALL),
                LockedAxes::ROTATION_LOCKED,
                GravityScale(3.0),
                Velocity::zero(),
                ExternalImpulse::default(),
            ),
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_discards_residual_fall_speed() {
        // Falling at -5: the jump must come out at exactly jump_force,
        // not jump_force - 5.
        let after = jump_velocity(Vec2::new(3.0, -5.0), 15.0);
        assert_eq!(after, Vec2::new(3.0, 15.0));
    }

    #[test]
    fn jump_does_not_stack_upward_velocity() {
        let after = jump_velocity(Vec2::new(0.0, 8.0), 15.0);
        assert_eq!(after.y, 15.0);
    }

    #[test]
    fn dash_burst_survives_locomotion() {
        let mut app = App::new();
        app.insert_resource(PlayerConfig::default());
        app.add_systems(Update, apply_locomotion);

        let config = PlayerConfig::default();
        let mut lock = ActionLock::default();
        lock.lock(0.35);
        let mut dash = DashState::default();
        dash.start(0.35);

        // The dispatcher just set the burst velocity; no keys held.
        let player = app
            .world_mut()
            .spawn((
                Player,
                MoveIntent::default(),
                lock,
                dash,
                Facing::default(),
                Velocity::linear(Vec2::new(config.dash_speed, 0.0)),
            ))
            .id();

        app.update();
        let velocity = app.world().get::<Velocity>(player).unwrap();
        assert_eq!(
            velocity.linvel.x, config.dash_speed,
            "locomotion must not overwrite an active burst"
        );

        // Burst over: locomotion owns the axis again and idles to zero.
        app.world_mut()
            .get_mut::<DashState>(player)
            .unwrap()
            .tick(1.0);
        app.update();
        let velocity = app.world().get::<Velocity>(player).unwrap();
        assert_eq!(velocity.linvel.x, 0.0);
    }
}
