//! World module - collision layers, config loading, level lifecycle.

mod components;
mod data;
mod error;
mod plugin;
mod spawning;

pub use components::{Ground, LevelEntity, ACTOR_GROUP, BOMB_GROUP, GROUND_GROUP};
pub use data::{load_game_config, GameConfig, CONFIG_PATH};
pub use error::DataLoadError;
pub use plugin::WorldPlugin;
