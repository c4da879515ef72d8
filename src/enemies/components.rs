//! Enemy-related components.

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// AI behavior state, rederived from distance thresholds every tick.
///
/// Nothing is latched between ticks except the attack cooldown; the
/// state is a pure function of where the player is right now.
#[derive(Component, Default, PartialEq, Clone, Copy, Debug)]
pub enum AiState {
    /// Walking between the two patrol waypoints.
    #[default]
    Patrol,
    /// Running at the player.
    Chase,
    /// In range; standing still and swinging on cooldown.
    Attack,
}

/// Enemy tunables, loadable from the game config file.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub chase_range: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f32,
    /// How close to a waypoint counts as arrived
    pub waypoint_epsilon: f32,
    /// Death animation play-out before despawn
    pub death_delay: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            patrol_speed: 2.0,
            chase_speed: 3.0,
            chase_range: 5.0,
            attack_range: 1.2,
            attack_damage: 10.0,
            attack_cooldown: 1.5,
            waypoint_epsilon: 0.2,
            death_delay: 1.0,
        }
    }
}

/// Per-entity copy of the stats an enemy was spawned with.
#[derive(Component, Clone)]
pub struct EnemyStats {
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub chase_range: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f32,
}

impl EnemyConfig {
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            patrol_speed: self.patrol_speed,
            chase_speed: self.chase_speed,
            chase_range: self.chase_range,
            attack_range: self.attack_range,
            attack_damage: self.attack_damage,
            attack_cooldown: self.attack_cooldown,
        }
    }
}

/// The two waypoints an enemy walks between while patrolling.
#[derive(Component, Debug)]
pub struct PatrolRoute {
    pub a: Vec2,
    pub b: Vec2,
    heading_to_b: bool,
}

impl PatrolRoute {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            a,
            b,
            heading_to_b: true,
        }
    }

    pub fn target(&self) -> Vec2 {
        if self.heading_to_b {
            self.b
        } else {
            self.a
        }
    }

    pub fn swap(&mut self) {
        self.heading_to_b = !self.heading_to_b;
    }
}

/// Timer for attack cooldown between enemy attacks.
///
/// Starts elapsed so the first swing lands as soon as the enemy closes
/// in.
#[derive(Component)]
pub struct AttackTimer(pub Timer);

impl AttackTimer {
    pub fn new(cooldown: f32) -> Self {
        let mut timer = Timer::from_seconds(cooldown, TimerMode::Once);
        timer.tick(Duration::from_secs_f32(cooldown));
        Self(timer)
    }
}

/// Timer for the death animation before despawn.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl DeathTimer {
    pub fn new(delay: f32) -> Self {
        Self(Timer::from_seconds(delay, TimerMode::Once))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patrol_route_alternates() {
        let mut route = PatrolRoute::new(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0));
        assert_eq!(route.target(), Vec2::new(3.0, 0.0));
        route.swap();
        assert_eq!(route.target(), Vec2::new(-3.0, 0.0));
        route.swap();
        assert_eq!(route.target(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn attack_timer_starts_ready() {
        let timer = AttackTimer::new(1.5);
        assert!(timer.0.finished());
    }
}
