//! Combat module - the damageable capability and damage resolution.

mod components;
mod plugin;
mod systems;

pub use components::{Dead, Destructible, Health};
pub use plugin::CombatPlugin;
pub(crate) use systems::apply_damage;
