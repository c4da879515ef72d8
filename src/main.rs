//! Dashing Runner - Entry Point
//!
//! A 2D side-scrolling brawler with bombs.
//!
//! Controls:
//! - A/D or arrows: Move
//! - Shift: Run
//! - Space: Jump
//! - Mouse/touch swipes: Punch, kick, uppercut
//! - W: Uppercut
//! - E: Dash
//! - B or right-click: Throw bomb
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Dashing Runner".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Audio backend
        .add_plugins(AudioPlugin)
        // Our game plugin
        .add_plugins(dashing_runner::DashingRunnerPlugin)
        .run();
}
