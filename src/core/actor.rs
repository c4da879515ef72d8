//! Components shared by every combatant (player and enemies).

use bevy::prelude::*;

/// Horizontal facing as a sign, never zero.
///
/// Flips follow the *input* sign rather than the velocity sign, so drag
/// or damping near zero speed cannot make the sprite flicker.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Facing(pub f32);

impl Default for Facing {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Facing {
    pub fn face_right(&mut self) {
        self.0 = 1.0;
    }

    pub fn face_left(&mut self) {
        self.0 = -1.0;
    }

    /// Update from a horizontal input value; ignored inside the dead zone.
    pub fn update_from_input(&mut self, horizontal: f32) {
        if horizontal > 0.1 {
            self.face_right();
        } else if horizontal < -0.1 {
            self.face_left();
        }
    }
}

/// The movement an actor wants this tick, before physics applies it.
///
/// The player's input system and the enemy AI both write this; the
/// animation projector reads it to derive walk/run flags.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MoveIntent {
    /// Horizontal axis value in [-1, 1]
    pub horizontal: f32,
    /// Run modifier (sprint key for the player, chase state for enemies)
    pub running: bool,
}

impl MoveIntent {
    pub fn is_moving(&self) -> bool {
        self.horizontal.abs() > 0.1
    }
}

/// Result of the redundant ground checks, recomputed every tick.
///
/// Three independent signals are combined by OR: any one being true is
/// enough to count as grounded. The redundancy compensates for
/// imprecise collider shapes; a false positive costs far less here than
/// a jump input eaten by a false negative.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundContact {
    /// Proximity overlap against the ground collision group
    pub layer_overlap: bool,
    /// Any overlapping collider carrying the ground tag
    pub tag_overlap: bool,
    /// Downward ray hitting a ground-tagged collider
    pub ray_hit: bool,
}

impl Default for GroundContact {
    fn default() -> Self {
        // Actors spawn standing on the ground.
        Self {
            layer_overlap: true,
            tag_overlap: false,
            ray_hit: false,
        }
    }
}

impl GroundContact {
    pub fn is_grounded(&self) -> bool {
        self.layer_overlap || self.tag_overlap || self.ray_hit
    }
}

/// Mirror the facing sign into the transform's horizontal scale.
pub fn apply_facing(mut query: Query<(&Facing, &mut Transform), Changed<Facing>>) {
    for (facing, mut transform) in query.iter_mut() {
        transform.scale.x = facing.0.signum() * transform.scale.x.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_is_or_of_all_three_signals() {
        for bits in 0..8u8 {
            let contact = GroundContact {
                layer_overlap: bits & 1 != 0,
                tag_overlap: bits & 2 != 0,
                ray_hit: bits & 4 != 0,
            };
            assert_eq!(contact.is_grounded(), bits != 0, "signal combination {bits:03b}");
        }
    }

    #[test]
    fn facing_ignores_dead_zone() {
        let mut facing = Facing::default();
        facing.update_from_input(-1.0);
        assert_eq!(facing.0, -1.0);
        facing.update_from_input(0.05);
        assert_eq!(facing.0, -1.0, "input inside the dead zone must not flip");
        facing.update_from_input(0.5);
        assert_eq!(facing.0, 1.0);
    }
}
