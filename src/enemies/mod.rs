//! Enemies module - patrol/chase/attack AI and enemy lifecycle.

mod ai;
mod components;
mod plugin;
mod spawning;

pub use ai::ai_state_for;
pub use components::{AiState, AttackTimer, DeathTimer, Enemy, EnemyConfig, EnemyStats, PatrolRoute};
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
