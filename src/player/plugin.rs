//! Player plugin - registers input, action, and movement systems.

use bevy::prelude::*;

use super::actions::{action_input, tick_action_locks, SwipeTracker};
use super::components::PlayerConfig;
use super::movement::{apply_locomotion, read_movement_input, update_ground_contact};
use crate::core::SimSet;

/// Player plugin - locomotion, the action dispatcher, and grounding.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .init_resource::<SwipeTracker>()
            .add_systems(
                Update,
                (read_movement_input, tick_action_locks).in_set(SimSet::Input),
            )
            .add_systems(Update, action_input.in_set(SimSet::Actions))
            .add_systems(Update, apply_locomotion.in_set(SimSet::Movement))
            .add_systems(Update, update_ground_contact.in_set(SimSet::Grounding));
    }
}
