//! Dashing Runner - a 2D side-scrolling brawler in Bevy.
//!
//! Run, punch, kick, and bomb your way through patrolling enemies.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, the deferred task queue
//! - **Animation**: Animator parameters and the movement-flag projector
//! - **Player**: Input, locomotion, combat actions, bomb throwing
//! - **Bombs**: Fuse/explosion lifecycle and the supply gate
//! - **Combat**: Damage application and death handling
//! - **Enemies**: Patrol/chase/attack AI
//! - **World**: Collision layers, config loading, level lifecycle
//! - **Camera**: Smoothed follow of the player
//! - **UI**: Menus, HUD, overlays
//! - **Audio**: Music and sound effect playback

pub mod animation;
pub mod audio;
pub mod bombs;
pub mod camera;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct DashingRunnerPlugin;

impl Plugin for DashingRunnerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(animation::AnimationPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(bombs::BombPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(world::WorldPlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(ui::UiPlugin)
            .add_plugins(audio::GameAudioPlugin);
    }
}
