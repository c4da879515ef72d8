//! World markers and collision layers.

use bevy::prelude::*;
use bevy_rapier2d::prelude::Group;

/// Collision group for ground and platform colliders.
pub const GROUND_GROUP: Group = Group::GROUP_1;
/// Collision group for the player and enemies.
pub const ACTOR_GROUP: Group = Group::GROUP_2;
/// Collision group for thrown bombs.
pub const BOMB_GROUP: Group = Group::GROUP_3;

/// Tag on every collider that counts as standable ground.
///
/// The ground checks consult both this tag and the ground collision
/// group, so mistagged level geometry in either direction still reads
/// as ground.
#[derive(Component)]
pub struct Ground;

/// Marker for entities that belong to the current level and are torn
/// down on leaving it.
#[derive(Component)]
pub struct LevelEntity;
