//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! player movement only runs in the InGame state, while menu systems
//! only run in the MainMenu state.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// The game transitions between these states based on player actions:
/// - Start in `Loading` to read config data
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts a run
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading config and data files
    #[default]
    Loading,
    /// Main menu / title screen
    MainMenu,
    /// Active gameplay
    InGame,
    /// Player has died
    GameOver,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// `Paused` keeps the level alive (entities stay spawned) while the
/// simulation systems are gated off and the pause overlay is shown.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - movement, combat, bombs
    #[default]
    Running,
    /// Pause overlay on top of the frozen level
    Paused,
}
