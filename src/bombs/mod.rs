//! Bombs module - throwable bombs, fuse/explosion lifecycle, supply gate.

mod components;
mod plugin;
mod systems;

pub use components::{in_blast_radius, throw_direction, Bomb, BombConfig, BombSupply};
pub use plugin::BombPlugin;
pub use systems::Detonation;
