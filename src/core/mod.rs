//! Core module - game states, global events, shared actor components,
//! and the deferred task queue.

mod actor;
mod events;
mod plugin;
mod states;
mod tasks;

pub use actor::{Facing, GroundContact, MoveIntent};
pub use events::{DamageEvent, DeathEvent, SoundEvent, SoundKind};
pub use plugin::{CorePlugin, SimSet};
pub use states::{GameState, PlayState};
pub use tasks::{run_scheduled_tasks, BombRelease, Task, TaskQueue, ThrowRearm};
