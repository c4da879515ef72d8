//! Player module - player entity, action dispatch, and locomotion.

mod actions;
mod components;
mod movement;
mod plugin;

pub use actions::{classify_swipe, Action, SwipeDirection, SwipeTracker};
pub use components::{ActionLock, DashState, Player, PlayerConfig};
pub use movement::{jump_velocity, spawn_player};
pub use plugin::PlayerPlugin;
