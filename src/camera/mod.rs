//! Camera module - smoothed follow of the player.

mod plugin;

pub use plugin::{CameraFollow, CameraPlugin};
