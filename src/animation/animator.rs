//! Animator parameter facade.
//!
//! Gameplay code drives animation through named boolean parameters and
//! one-shot triggers, exactly the surface an external animation graph
//! exposes. The set of valid names is fixed per entity at spawn time;
//! writing an unknown name logs a warning once and is otherwise ignored,
//! so a missing graph parameter can never abort an action or wedge an
//! action lock.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

/// Animator parameter names, matching the animation graph.
pub mod params {
    pub const IS_WALKING: &str = "isWalking";
    pub const IS_RUNNING: &str = "isRunning";
    pub const IS_JUMPING: &str = "isJumping";
    pub const IS_KICKING: &str = "isKicking";
    pub const IS_LEFT_PUNCH: &str = "isLeftPunch";
    pub const IS_RIGHT_PUNCH: &str = "isRightPunch";
    pub const IS_UPPERCUT: &str = "isUpperCut";
    pub const IS_DASH: &str = "isDash";

    pub const JUMP_TRIGGER: &str = "Jump";
    pub const KICK_TRIGGER: &str = "Kick";
    pub const LEFT_PUNCH_TRIGGER: &str = "LeftPunch";
    pub const RIGHT_PUNCH_TRIGGER: &str = "RightPunch";
    pub const UPPERCUT_TRIGGER: &str = "UpperCut";
    pub const DASH_TRIGGER: &str = "Dash";
    pub const THROW_TRIGGER: &str = "ThrowBomb";
    pub const ATTACK_TRIGGER: &str = "Attack";
    pub const HURT_TRIGGER: &str = "Hurt";
    pub const DIE_TRIGGER: &str = "Die";
    pub const EXPLODE_TRIGGER: &str = "Explode";
}

/// Named parameter set driving an entity's animation.
#[derive(Component, Default)]
pub struct Animator {
    bools: HashMap<&'static str, bool>,
    registered_triggers: HashSet<&'static str>,
    pending_triggers: Vec<&'static str>,
    warned: HashSet<&'static str>,
}

impl Animator {
    /// Register the boolean parameters this entity's graph understands.
    pub fn with_bools(mut self, names: &[&'static str]) -> Self {
        for name in names {
            self.bools.insert(name, false);
        }
        self
    }

    /// Register the trigger parameters this entity's graph understands.
    pub fn with_triggers(mut self, names: &[&'static str]) -> Self {
        self.registered_triggers.extend(names);
        self
    }

    /// Set a boolean parameter. Unknown names warn once and no-op.
    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        match self.bools.get_mut(name) {
            Some(slot) => *slot = value,
            None => self.warn_unknown(name),
        }
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    /// Pulse a one-shot trigger. Unknown names warn once and no-op.
    pub fn trigger(&mut self, name: &'static str) {
        if self.registered_triggers.contains(name) {
            self.pending_triggers.push(name);
        } else {
            self.warn_unknown(name);
        }
    }

    /// Drain the trigger pulses accumulated since the last drain.
    /// Called by the playback layer once per tick.
    pub fn take_triggers(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.pending_triggers)
    }

    pub fn has_pending_trigger(&self, name: &str) -> bool {
        self.pending_triggers.iter().any(|t| *t == name)
    }

    fn warn_unknown(&mut self, name: &'static str) {
        if self.warned.insert(name) {
            warn!("Animator parameter '{name}' not found; ignoring");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::params::*;
    use super::*;

    #[test]
    fn unknown_parameter_is_swallowed() {
        let mut animator = Animator::default().with_bools(&[IS_WALKING]);
        animator.set_bool("isFlying", true);
        animator.trigger("Teleport");
        assert!(!animator.get_bool("isFlying"));
        assert!(animator.take_triggers().is_empty());
    }

    #[test]
    fn registered_parameters_round_trip() {
        let mut animator = Animator::default()
            .with_bools(&[IS_KICKING])
            .with_triggers(&[KICK_TRIGGER]);
        animator.set_bool(IS_KICKING, true);
        animator.trigger(KICK_TRIGGER);
        assert!(animator.get_bool(IS_KICKING));
        assert_eq!(animator.take_triggers(), vec![KICK_TRIGGER]);
        // Pulses are edges, not levels: drained means gone.
        assert!(animator.take_triggers().is_empty());
    }
}
