//! World plugin - config loading, level setup and teardown.

use bevy::prelude::*;

use super::data::load_config;
use super::spawning::{cleanup_level, setup_level};
use crate::core::GameState;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_config)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnExit(GameState::InGame), cleanup_level);
    }
}
