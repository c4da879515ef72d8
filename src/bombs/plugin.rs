//! Bomb plugin - registers the throw/fuse/explosion systems.

use bevy::prelude::*;

use super::components::BombConfig;
use super::systems::{bomb_contacts, explode_bombs, release_bombs, rearm_throws, update_fuses};
use super::systems::Detonation;
use crate::core::SimSet;

/// Bomb plugin - the fuse/explosion lifecycle and the supply gate.
pub struct BombPlugin;

impl Plugin for BombPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BombConfig>()
            .add_event::<Detonation>()
            .add_systems(Update, rearm_throws.in_set(SimSet::Input))
            .add_systems(
                Update,
                (release_bombs, update_fuses, bomb_contacts, explode_bombs)
                    .chain()
                    .in_set(SimSet::Movement),
            );
    }
}
