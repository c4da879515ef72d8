//! Player-related components and configuration.

use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Timed gate preventing overlapping discrete actions.
///
/// Locked for the recovery duration of whatever action last dispatched;
/// inputs arriving while locked are dropped silently, matching a
/// brawler's fixed move set. The timer clears itself - no other system
/// polls or resets it, so a failed animation signal can never leave the
/// lock engaged forever.
#[derive(Component, Debug, Default)]
pub struct ActionLock {
    locked: bool,
    remaining: f32,
}

impl ActionLock {
    pub fn can_act(&self) -> bool {
        !self.locked
    }

    pub fn lock(&mut self, duration: f32) {
        self.locked = true;
        self.remaining = duration;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.locked {
            self.remaining -= dt;
            if self.remaining <= 0.0 {
                self.locked = false;
                self.remaining = 0.0;
            }
        }
    }
}

/// Remaining dash burst time.
///
/// While positive the burst owns the horizontal axis: locomotion leaves
/// the velocity untouched so the burst speed survives until the timer
/// runs out, regardless of which direction keys are held.
#[derive(Component, Debug, Default)]
pub struct DashState {
    remaining: f32,
}

impl DashState {
    pub fn start(&mut self, duration: f32) {
        self.remaining = duration;
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    pub fn active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Player movement and input tunables, loadable from the game config file.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walk speed in units per second
    pub move_speed: f32,
    /// Run speed while the sprint key is held
    pub run_speed: f32,
    /// Vertical velocity applied on jump
    pub jump_force: f32,
    /// Horizontal burst speed applied on dash
    pub dash_speed: f32,
    /// Player starting health
    pub max_health: f32,
    /// Vertical offset of the ground probe below the player center
    pub ground_check_offset: f32,
    /// Radius of the ground probe
    pub ground_check_radius: f32,
    /// Minimum displacement in pixels for a gesture to count as a swipe
    pub min_swipe_distance: f32,
    /// Maximum press-to-release duration for a swipe, in seconds
    pub max_swipe_time: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            run_speed: 8.0,
            jump_force: 15.0,
            dash_speed: 12.0,
            max_health: 100.0,
            ground_check_offset: -0.8,
            ground_check_radius: 0.3,
            min_swipe_distance: 50.0,
            max_swipe_time: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_holds_for_the_full_duration() {
        let mut lock = ActionLock::default();
        assert!(lock.can_act());

        lock.lock(0.3);
        assert!(!lock.can_act());

        // Still locked everywhere inside [0, L)
        lock.tick(0.1);
        assert!(!lock.can_act());
        lock.tick(0.19);
        assert!(!lock.can_act());

        // Open exactly at t = L
        lock.tick(0.01);
        assert!(lock.can_act());
    }

    #[test]
    fn dash_state_expires_after_its_duration() {
        let mut dash = DashState::default();
        assert!(!dash.active());

        dash.start(0.35);
        dash.tick(0.2);
        assert!(dash.active());
        dash.tick(0.15);
        assert!(!dash.active());
        // Ticking past zero never goes negative.
        dash.tick(1.0);
        assert!(!dash.active());
    }

    #[test]
    fn relock_restarts_the_timer() {
        let mut lock = ActionLock::default();
        lock.lock(0.2);
        lock.tick(0.15);
        lock.lock(0.4);
        lock.tick(0.3);
        assert!(!lock.can_act());
        lock.tick(0.1);
        assert!(lock.can_act());
    }
}
