//! Game config structures and RON loading.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::error::DataLoadError;
use crate::bombs::BombConfig;
use crate::enemies::EnemyConfig;
use crate::player::PlayerConfig;

/// Path of the tunables file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/game.ron";

/// Top-level game config file structure. Every section and every field
/// is optional; anything missing falls back to its built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub bombs: BombConfig,
    pub enemies: EnemyConfig,
}

/// Load the game config from a RON file.
pub fn load_game_config(path: &str) -> Result<GameConfig, DataLoadError> {
    if !Path::new(path).exists() {
        return Err(DataLoadError::FileNotFound(path.to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.to_string(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })
}

/// Load tunables at startup, falling back to defaults when the file is
/// missing or malformed. A broken config file never blocks the game
/// from starting.
pub fn load_config(mut commands: Commands) {
    let config = match load_game_config(CONFIG_PATH) {
        Ok(config) => {
            info!("Loaded game config from {}", CONFIG_PATH);
            config
        }
        Err(err) => {
            warn!("Using default tunables: {}", err);
            GameConfig::default()
        }
    };

    commands.insert_resource(config.player);
    commands.insert_resource(config.bombs);
    commands.insert_resource(config.enemies);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: GameConfig = ron::from_str("()").unwrap();
        assert_eq!(config.player.move_speed, 5.0);
        assert_eq!(config.bombs.max_bombs, 3);
        assert_eq!(config.enemies.chase_range, 5.0);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: GameConfig =
            ron::from_str("(player: (run_speed: 9.5))").unwrap();
        assert_eq!(config.player.run_speed, 9.5);
        assert_eq!(config.player.move_speed, 5.0);
        assert_eq!(config.bombs.fuse_time, 3.0);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_game_config("assets/data/does_not_exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }
}
