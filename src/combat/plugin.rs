//! Combat plugin - damage application and death routing.

use bevy::prelude::*;

use super::systems::{apply_damage, check_deaths};
use crate::core::SimSet;

/// Combat plugin - the generic damage/death pipeline.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (apply_damage, check_deaths).chain().in_set(SimSet::Combat),
        );
    }
}
