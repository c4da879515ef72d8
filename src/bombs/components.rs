//! Bomb components and tunables.

use bevy::prelude::*;
use serde::Deserialize;

/// Bomb tunables, loadable from the game config file.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BombConfig {
    /// Maximum bombs the player can hold
    pub max_bombs: u32,
    /// Initial speed of a thrown bomb
    pub throw_force: f32,
    /// Throw elevation in degrees above horizontal
    pub throw_angle_deg: f32,
    /// Supply-side cooldown between throws, in seconds
    pub throw_cooldown: f32,
    /// Delay between the throw animation starting and the bomb leaving
    /// the hand (release frame sync)
    pub spawn_delay: f32,
    /// Horizontal spawn offset from the thrower, in facing direction
    pub spawn_offset: f32,
    /// Seconds from release to forced detonation
    pub fuse_time: f32,
    /// Cadence of the fuse tick sound
    pub tick_interval: f32,
    /// Final stretch of the fuse during which the bomb flashes
    pub flash_window: f32,
    /// Highlight toggle period while flashing
    pub flash_interval: f32,
    /// Area damage radius (inclusive at the boundary)
    pub explosion_radius: f32,
    /// Damage applied to every damageable in the radius
    pub explosion_damage: f32,
    /// Outward impulse magnitude applied to physics bodies in the radius
    pub knockback_impulse: f32,
    /// Delay after the explosion before the bomb entity despawns,
    /// letting the effect play out
    pub despawn_delay: f32,
    /// Velocity retained after a non-detonating contact
    pub contact_damping: f32,
}

impl Default for BombConfig {
    fn default() -> Self {
        Self {
            max_bombs: 3,
            throw_force: 10.0,
            throw_angle_deg: 45.0,
            throw_cooldown: 1.0,
            spawn_delay: 0.2,
            spawn_offset: 0.5,
            fuse_time: 3.0,
            tick_interval: 0.5,
            flash_window: 1.0,
            flash_interval: 0.2,
            explosion_radius: 3.0,
            explosion_damage: 50.0,
            knockback_impulse: 10.0,
            despawn_delay: 1.0,
            contact_damping: 0.7,
        }
    }
}

/// A live bomb: armed at release, ticking down its fuse.
///
/// The `exploded` flag is one-way. A collision-triggered detonation and
/// a fuse-expiry detonation landing in the same tick still explode the
/// bomb exactly once.
#[derive(Component)]
pub struct Bomb {
    pub fuse_remaining: f32,
    pub tick_timer: Timer,
    pub flash_timer: Timer,
    pub flash_on: bool,
    pub exploded: bool,
    /// Plain id of the thrower, credited as the source of explosion
    /// damage. The bomb is world-owned from birth, so the thrower dying
    /// never takes a live bomb with it.
    pub thrower: Entity,
}

impl Bomb {
    pub fn new(config: &BombConfig, thrower: Entity) -> Self {
        Self {
            fuse_remaining: config.fuse_time,
            tick_timer: Timer::from_seconds(config.tick_interval, TimerMode::Repeating),
            flash_timer: Timer::from_seconds(config.flash_interval, TimerMode::Repeating),
            flash_on: false,
            exploded: false,
            thrower,
        }
    }

    /// Claim the explosion. Returns true exactly once per bomb.
    pub fn begin_explosion(&mut self) -> bool {
        if self.exploded {
            return false;
        }
        self.exploded = true;
        true
    }

    pub fn in_flash_window(&self, window: f32) -> bool {
        self.fuse_remaining <= window
    }
}

/// Initial velocity direction for a throw: up-and-forward at the
/// configured elevation, forward picked by the facing sign.
pub fn throw_direction(facing: f32, angle_deg: f32) -> Vec2 {
    let angle = angle_deg.to_radians();
    Vec2::new(facing.signum() * angle.cos(), angle.sin()).normalize()
}

/// Blast membership test. The boundary is inclusive: a target standing
/// at exactly the radius is hit.
pub fn in_blast_radius(offset: Vec2, radius: f32) -> bool {
    offset.length_squared() <= radius * radius
}

/// The player's bomb supply and throw cooldown.
///
/// This gate is entirely supply-side: it knows how many bombs are left
/// and whether the cooldown has elapsed, and nothing else. Bombs
/// already in flight keep ticking on their own; the two timers never
/// interact.
#[derive(Component, Debug)]
pub struct BombSupply {
    pub current: u32,
    pub max: u32,
    can_throw: bool,
}

impl BombSupply {
    pub fn new(max: u32) -> Self {
        Self {
            current: max,
            max,
            can_throw: true,
        }
    }

    pub fn ready(&self) -> bool {
        self.current > 0 && self.can_throw
    }

    /// Consume one bomb and start the cooldown. Returns false if the
    /// gate was closed.
    pub fn try_take(&mut self) -> bool {
        if !self.ready() {
            return false;
        }
        self.current -= 1;
        self.can_throw = false;
        true
    }

    /// Cooldown elapsed; throwing is allowed again (supply permitting).
    pub fn rearm(&mut self) {
        self.can_throw = true;
    }

    pub fn restock(&mut self) {
        self.current = self.max;
    }

    pub fn add(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BombConfig {
        BombConfig::default()
    }

    #[test]
    fn explosion_fires_exactly_once() {
        let mut bomb = Bomb::new(&config(), Entity::from_raw(7));
        assert!(bomb.begin_explosion());
        // Fuse expiry and a collision landing in the same tick: the
        // second claim must lose.
        assert!(!bomb.begin_explosion());
    }

    #[test]
    fn blast_boundary_is_inclusive() {
        assert!(in_blast_radius(Vec2::new(3.0, 0.0), 3.0));
        assert!(in_blast_radius(Vec2::new(1.5, 1.5), 3.0));
        assert!(!in_blast_radius(Vec2::new(3.0001, 0.0), 3.0));
    }

    #[test]
    fn supply_gate_is_independent_of_live_bombs() {
        let mut supply = BombSupply::new(1);

        // Throw the last bomb: it is now ticking somewhere in the world,
        // but the gate only sees the empty supply and the cooldown.
        assert!(supply.try_take());
        assert!(!supply.ready());

        // Cooldown elapsing does not conjure bombs back.
        supply.rearm();
        assert!(!supply.ready());

        supply.add(2);
        assert_eq!(supply.current, 1, "supply clamps at max");
        assert!(supply.ready());
    }

    #[test]
    fn cooldown_blocks_even_with_supply_left() {
        let mut supply = BombSupply::new(3);
        assert!(supply.try_take());
        assert!(!supply.try_take(), "cooldown still running");
        supply.rearm();
        assert!(supply.try_take());
        assert_eq!(supply.current, 1);
    }

    #[test]
    fn throw_direction_follows_facing() {
        let right = throw_direction(1.0, 45.0);
        let left = throw_direction(-1.0, 45.0);
        assert!(right.x > 0.0 && right.y > 0.0);
        assert!(left.x < 0.0 && left.y > 0.0);
        assert!((right.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn flash_window_opens_at_the_last_second() {
        let mut bomb = Bomb::new(&config(), Entity::from_raw(7));
        assert!(!bomb.in_flash_window(1.0));
        bomb.fuse_remaining = 0.9;
        assert!(bomb.in_flash_window(1.0));
    }
}
