//! The action dispatcher - maps input events to discrete combat actions.
//!
//! Every action goes through the same pipeline: reject while the action
//! lock is engaged (a silent drop, not an error), pulse the animator,
//! engage the lock for the action's recovery time, and schedule the
//! deferred cleanup (flag clear, impact sound). The lock timer runs on
//! its own; whether the animator resolved the parameter names has no
//! bearing on it.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::Velocity;

use super::components::{ActionLock, DashState, Player, PlayerConfig};
use super::movement::jump_velocity;
use crate::animation::{params, Animator};
use crate::bombs::{BombConfig, BombSupply};
use crate::core::{Facing, GroundContact, SoundEvent, SoundKind, Task, TaskQueue};

/// The fixed, mutually exclusive set of discrete actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    LeftPunch,
    RightPunch,
    Kick,
    Uppercut,
    Dash,
    Throw,
}

impl Action {
    /// Recovery duration the action lock stays engaged.
    pub fn lock_duration(self) -> f32 {
        match self {
            Action::Jump => 0.3,
            Action::LeftPunch | Action::RightPunch => 0.3,
            Action::Kick => 0.4,
            Action::Uppercut => 0.5,
            Action::Dash => 0.35,
            Action::Throw => 0.3,
        }
    }

    /// Animator trigger pulsed on dispatch.
    pub fn trigger_name(self) -> &'static str {
        match self {
            Action::Jump => params::JUMP_TRIGGER,
            Action::LeftPunch => params::LEFT_PUNCH_TRIGGER,
            Action::RightPunch => params::RIGHT_PUNCH_TRIGGER,
            Action::Kick => params::KICK_TRIGGER,
            Action::Uppercut => params::UPPERCUT_TRIGGER,
            Action::Dash => params::DASH_TRIGGER,
            Action::Throw => params::THROW_TRIGGER,
        }
    }

    /// Transient "is performing X" bool and its clear delay. The delay
    /// is always at least the lock duration, so the flag only ever needs
    /// clearing - it cannot race a subsequent action.
    pub fn transient_flag(self) -> Option<(&'static str, f32)> {
        match self {
            Action::LeftPunch => Some((params::IS_LEFT_PUNCH, 0.5)),
            Action::RightPunch => Some((params::IS_RIGHT_PUNCH, 0.5)),
            Action::Kick => Some((params::IS_KICKING, 0.6)),
            Action::Uppercut => Some((params::IS_UPPERCUT, 0.7)),
            Action::Dash => Some((params::IS_DASH, 0.5)),
            Action::Jump | Action::Throw => None,
        }
    }

    /// Sound played at dispatch time.
    pub fn whoosh(self) -> Option<SoundKind> {
        match self {
            Action::Jump => Some(SoundKind::Jump),
            Action::LeftPunch | Action::RightPunch => Some(SoundKind::PunchWhoosh),
            Action::Kick => Some(SoundKind::KickWhoosh),
            Action::Uppercut => Some(SoundKind::Uppercut),
            Action::Dash | Action::Throw => None,
        }
    }

    /// Impact sound deferred to the animation's hit frame.
    pub fn delayed_impact(self) -> Option<(SoundKind, f32)> {
        match self {
            Action::LeftPunch | Action::RightPunch => Some((SoundKind::PunchHit, 0.15)),
            Action::Kick => Some((SoundKind::KickHit, 0.2)),
            _ => None,
        }
    }
}

/// Cardinal swipe directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Classify a press-drag-release gesture.
///
/// `delta` is the release-minus-press displacement with up as +y. The
/// dominant axis picks horizontal vs vertical; after normalizing, the
/// winning component must still exceed 0.5 to resolve a cardinal.
pub fn classify_swipe(
    delta: Vec2,
    elapsed: f32,
    min_distance: f32,
    max_time: f32,
) -> Option<SwipeDirection> {
    if elapsed > max_time || delta.length() < min_distance {
        return None;
    }

    let dir = delta.normalize();
    if dir.x.abs() > dir.y.abs() {
        if dir.x > 0.5 {
            Some(SwipeDirection::Right)
        } else if dir.x < -0.5 {
            Some(SwipeDirection::Left)
        } else {
            None
        }
    } else if dir.y < -0.5 {
        Some(SwipeDirection::Down)
    } else if dir.y > 0.5 {
        Some(SwipeDirection::Up)
    } else {
        None
    }
}

/// In-flight press being tracked for swipe recognition.
#[derive(Resource, Default)]
pub struct SwipeTracker {
    start: Option<(Vec2, f32)>,
}

impl SwipeTracker {
    pub fn press(&mut self, position: Vec2, time: f32) {
        if self.start.is_none() {
            self.start = Some((position, time));
        }
    }

    /// Finish the gesture, returning (delta, elapsed) in y-up convention.
    pub fn release(&mut self, position: Vec2, time: f32) -> Option<(Vec2, f32)> {
        let (start, start_time) = self.start.take()?;
        // Window coordinates grow downward; flip so up is positive.
        let delta = Vec2::new(position.x - start.x, start.y - position.y);
        Some((delta, time - start_time))
    }
}

/// Tick the action lock and dash timers. Runs before dispatch so an
/// action whose recovery ends this tick frees the very next input.
pub fn tick_action_locks(
    time: Res<Time>,
    mut query: Query<(&mut ActionLock, Option<&mut DashState>)>,
) {
    for (mut lock, dash) in query.iter_mut() {
        lock.tick(time.delta_secs());
        if let Some(mut dash) = dash {
            dash.tick(time.delta_secs());
        }
    }
}

/// Poll inputs and dispatch actions.
#[allow(clippy::too_many_arguments)]
pub fn action_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    bomb_config: Res<BombConfig>,
    mut tracker: ResMut<SwipeTracker>,
    mut tasks: ResMut<TaskQueue>,
    mut sounds: EventWriter<SoundEvent>,
    mut query: Query<
        (
            Entity,
            &mut ActionLock,
            &mut DashState,
            &mut Animator,
            &mut Velocity,
            &mut Facing,
            &GroundContact,
            &mut BombSupply,
        ),
        With<Player>,
    >,
) {
    let Ok((entity, mut lock, mut dash, mut animator, mut velocity, mut facing, contact, mut supply)) =
        query.get_single_mut()
    else {
        return;
    };

    let now = time.elapsed_secs();

    // Pointer gesture tracking (mouse as pointer, plus touch).
    if mouse.just_pressed(MouseButton::Left) {
        if let Some(position) = windows.get_single().ok().and_then(Window::cursor_position) {
            tracker.press(position, now);
        }
    }
    let mut swipe = None;
    if mouse.just_released(MouseButton::Left) {
        if let Some(position) = windows.get_single().ok().and_then(Window::cursor_position) {
            swipe = tracker
                .release(position, now)
                .and_then(|(delta, elapsed)| {
                    classify_swipe(delta, elapsed, config.min_swipe_distance, config.max_swipe_time)
                });
        }
    }
    for touch in touches.iter_just_pressed() {
        tracker.press(touch.position(), now);
    }
    for touch in touches.iter_just_released() {
        swipe = swipe.or_else(|| {
            tracker.release(touch.position(), now).and_then(|(delta, elapsed)| {
                classify_swipe(delta, elapsed, config.min_swipe_distance, config.max_swipe_time)
            })
        });
    }

    // Jump: ground-dependent, lock-gated like everything else.
    if keyboard.just_pressed(KeyCode::Space) && lock.can_act() && contact.is_grounded() {
        velocity.linvel = jump_velocity(velocity.linvel, config.jump_force);
        perform(Action::Jump, entity, &mut lock, &mut animator, &mut tasks, &mut sounds);
    }

    if !lock.can_act() {
        // Inputs during recovery are dropped, not queued.
        return;
    }

    // Keyboard uppercut.
    if keyboard.just_pressed(KeyCode::KeyW) {
        perform(Action::Uppercut, entity, &mut lock, &mut animator, &mut tasks, &mut sounds);
        return;
    }

    // Dash: the burst owns the horizontal axis for the lock duration,
    // so locomotion cannot flatten it back to walk speed this frame.
    if keyboard.just_pressed(KeyCode::KeyE) {
        velocity.linvel.x = facing.0 * config.dash_speed;
        dash.start(Action::Dash.lock_duration());
        perform(Action::Dash, entity, &mut lock, &mut animator, &mut tasks, &mut sounds);
        return;
    }

    // Bomb throw: the supply gate is checked on top of the action lock.
    if keyboard.just_pressed(KeyCode::KeyB) || mouse.just_pressed(MouseButton::Right) {
        if supply.try_take() {
            perform(Action::Throw, entity, &mut lock, &mut animator, &mut tasks, &mut sounds);
            tasks.schedule(entity, bomb_config.spawn_delay, Task::ReleaseBomb);
            tasks.schedule(
                entity,
                bomb_config.spawn_delay + bomb_config.throw_cooldown,
                Task::RearmThrow,
            );
        }
        return;
    }

    // Swipe-driven strikes.
    match swipe {
        Some(SwipeDirection::Right) => {
            facing.face_right();
            perform(Action::RightPunch, entity, &mut lock, &mut animator, &mut tasks, &mut sounds);
        }
        Some(SwipeDirection::Left) => {
            facing.face_left();
            perform(Action::LeftPunch, entity, &mut lock, &mut animator, &mut tasks, &mut sounds);
        }
        Some(SwipeDirection::Down) => {
            perform(Action::Kick, entity, &mut lock, &mut animator, &mut tasks, &mut sounds);
        }
        Some(SwipeDirection::Up) => {
            perform(Action::Uppercut, entity, &mut lock, &mut animator, &mut tasks, &mut sounds);
        }
        None => {}
    }
}

/// The shared dispatch pipeline every action runs through.
fn perform(
    action: Action,
    entity: Entity,
    lock: &mut ActionLock,
    animator: &mut Animator,
    tasks: &mut TaskQueue,
    sounds: &mut EventWriter<SoundEvent>,
) {
    animator.trigger(action.trigger_name());

    if let Some((flag, clear_after)) = action.transient_flag() {
        animator.set_bool(flag, true);
        tasks.schedule(entity, clear_after, Task::ClearAnimatorBool(flag));
    }

    if let Some(kind) = action.whoosh() {
        sounds.send(SoundEvent(kind));
    }
    if let Some((kind, delay)) = action.delayed_impact() {
        tasks.schedule(entity, delay, Task::PlaySound(kind));
    }

    lock.lock(action.lock_duration());
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN_DIST: f32 = 50.0;
    const MAX_TIME: f32 = 1.0;

    #[test]
    fn horizontal_swipe_resolves_right() {
        let swipe = classify_swipe(Vec2::new(120.0, -10.0), 0.3, MIN_DIST, MAX_TIME);
        assert_eq!(swipe, Some(SwipeDirection::Right));
    }

    #[test]
    fn downward_swipe_resolves_down() {
        let swipe = classify_swipe(Vec2::new(-10.0, -120.0), 0.3, MIN_DIST, MAX_TIME);
        assert_eq!(swipe, Some(SwipeDirection::Down));
    }

    #[test]
    fn short_displacement_is_not_a_swipe() {
        let swipe = classify_swipe(Vec2::new(30.0, 5.0), 0.3, MIN_DIST, MAX_TIME);
        assert_eq!(swipe, None);
    }

    #[test]
    fn slow_gesture_is_not_a_swipe() {
        let swipe = classify_swipe(Vec2::new(120.0, 0.0), 1.5, MIN_DIST, MAX_TIME);
        assert_eq!(swipe, None);
    }

    #[test]
    fn leftward_and_upward_swipes_resolve() {
        assert_eq!(
            classify_swipe(Vec2::new(-90.0, 12.0), 0.2, MIN_DIST, MAX_TIME),
            Some(SwipeDirection::Left)
        );
        assert_eq!(
            classify_swipe(Vec2::new(8.0, 100.0), 0.2, MIN_DIST, MAX_TIME),
            Some(SwipeDirection::Up)
        );
    }

    #[test]
    fn flag_clear_never_races_the_lock() {
        // The transient flag must outlive the lock for every action,
        // so the deferred clear is the only writer it can race with.
        for action in [
            Action::Jump,
            Action::LeftPunch,
            Action::RightPunch,
            Action::Kick,
            Action::Uppercut,
            Action::Dash,
            Action::Throw,
        ] {
            if let Some((_, clear_after)) = action.transient_flag() {
                assert!(
                    clear_after >= action.lock_duration(),
                    "{action:?} clears its flag before the lock opens"
                );
            }
        }
    }

    #[test]
    fn tracker_flips_window_y() {
        let mut tracker = SwipeTracker::default();
        tracker.press(Vec2::new(100.0, 400.0), 0.0);
        // Dragged up the window (y decreases): delta must come out +y.
        let (delta, elapsed) = tracker.release(Vec2::new(100.0, 250.0), 0.25).unwrap();
        assert_eq!(delta, Vec2::new(0.0, 150.0));
        assert_eq!(elapsed, 0.25);
        // Tracker is single-shot until the next press.
        assert!(tracker.release(Vec2::ZERO, 0.3).is_none());
    }
}
