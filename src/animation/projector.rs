//! Projects discrete actor state into animator parameters.

use bevy::prelude::*;

use super::animator::{params, Animator};
use crate::core::{GroundContact, MoveIntent};

/// Derive the mutually exclusive movement flags from movement intent.
///
/// Walking and running can never both be true; both are false when the
/// actor is idle. Airborne state maps to `isJumping` for actors that
/// track ground contact.
pub fn project_movement_flags(
    mut query: Query<(&MoveIntent, &mut Animator, Option<&GroundContact>)>,
) {
    for (intent, mut animator, contact) in query.iter_mut() {
        let moving = intent.is_moving();
        animator.set_bool(params::IS_WALKING, moving && !intent.running);
        animator.set_bool(params::IS_RUNNING, moving && intent.running);

        if let Some(contact) = contact {
            animator.set_bool(params::IS_JUMPING, !contact.is_grounded());
        }
    }
}

/// Drain trigger pulses into the playback layer.
///
/// The actual clip graph is owned by the host engine; all the gameplay
/// core guarantees is that each trigger fires exactly once.
pub fn flush_triggers(mut query: Query<&mut Animator>) {
    for mut animator in query.iter_mut() {
        for trigger in animator.take_triggers() {
            debug!("animation trigger: {trigger}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(horizontal: f32, running: bool) -> (bool, bool) {
        let mut animator = Animator::default()
            .with_bools(&[params::IS_WALKING, params::IS_RUNNING, params::IS_JUMPING]);
        let intent = MoveIntent {
            horizontal,
            running,
        };
        let moving = intent.is_moving();
        animator.set_bool(params::IS_WALKING, moving && !intent.running);
        animator.set_bool(params::IS_RUNNING, moving && intent.running);
        (
            animator.get_bool(params::IS_WALKING),
            animator.get_bool(params::IS_RUNNING),
        )
    }

    #[test]
    fn walking_and_running_are_mutually_exclusive() {
        assert_eq!(flags(1.0, false), (true, false));
        assert_eq!(flags(-1.0, true), (false, true));
        assert_eq!(flags(0.0, false), (false, false));
        assert_eq!(flags(0.0, true), (false, false), "run key alone is not movement");
    }
}
