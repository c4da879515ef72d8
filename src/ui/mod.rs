//! UI module - HUD, menus, and overlays.

mod hud;
mod plugin;

pub use plugin::UiPlugin;
