//! Animation module - animator parameter facade and state projection.

mod animator;
mod plugin;
mod projector;

pub use animator::{params, Animator};
pub use plugin::AnimationPlugin;
