//! Animation plugin - registers the projector and trigger playback.

use bevy::prelude::*;

use super::projector::{flush_triggers, project_movement_flags};
use crate::core::SimSet;

/// Animation plugin - translates actor state into animator parameters.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (project_movement_flags, flush_triggers)
                .chain()
                .in_set(SimSet::Animation),
        );
    }
}
