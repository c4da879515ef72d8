//! Enemy plugin - AI state selection and behaviors.

use bevy::prelude::*;

use super::ai::{
    attack, chase, despawn_dead_enemies, handle_enemy_deaths, patrol, select_ai_states,
};
use super::components::EnemyConfig;
use crate::core::SimSet;

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyConfig>().add_systems(
            Update,
            (
                select_ai_states,
                patrol,
                chase,
                attack,
                handle_enemy_deaths,
                despawn_dead_enemies,
            )
                .chain()
                .in_set(SimSet::Movement),
        );
    }
}
