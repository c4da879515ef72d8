//! Combat-related components.

use bevy::prelude::*;

/// Component for entities that can take damage.
///
/// Carrying `Health` *is* the damageable capability: explosions and
/// melee strikes target whatever the spatial query returns that has
/// one - enemies, destructible props, or the player's health holder -
/// without ever inspecting the concrete kind.
#[derive(Component, Debug)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Reduce health, clamped to [0, maximum]. Returns the amount
    /// actually absorbed.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current).max(0.0);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.maximum - self.current).max(0.0);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.maximum
    }
}

/// Marker for props that exist only to be blown up or beaten down.
/// On death they despawn; nothing mourns them.
#[derive(Component)]
pub struct Destructible;

/// Marker component for entities that have died (prevents duplicate
/// death events and further damage application).
#[derive(Component)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        let mut health = Health::new(30.0);
        assert_eq!(health.take_damage(50.0), 30.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn heal_clamps_at_maximum() {
        let mut health = Health::new(100.0);
        health.take_damage(10.0);
        assert_eq!(health.heal(25.0), 10.0);
        assert_eq!(health.current, 100.0);
    }
}
