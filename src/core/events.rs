//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. For example, the bomb
//! system sends DamageEvents, and the health system receives them to
//! apply damage. This keeps systems independent and testable.

use bevy::prelude::*;

/// Sent when an entity takes damage.
///
/// The damage system listens for these events and applies the actual
/// health reduction. Any entity carrying a `Health` component is a
/// valid target; the sender never inspects the target's concrete kind.
#[derive(Event)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage (the attacker, or the thrower for
    /// bomb damage)
    pub source: Entity,
    /// Damage amount
    pub amount: f32,
}

/// Sent when an entity dies (health reaches 0).
///
/// Systems listen for this to trigger death animations, despawn
/// destructibles, or end the run when the player dies.
#[derive(Event)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// One-shot sound effects the game can request.
///
/// The audio plugin resolves each kind to a loaded clip and plays it on
/// the SFX channel. A kind with no clip loaded is skipped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundKind {
    PunchWhoosh,
    PunchHit,
    KickWhoosh,
    KickHit,
    Jump,
    Uppercut,
    BombTick,
    Explosion,
}

/// Request to play a one-shot sound effect.
#[derive(Event, Debug, Clone, Copy)]
pub struct SoundEvent(pub SoundKind);
