//! Audio module - music and sound effect playback.

mod plugin;

pub use plugin::{AudioSettings, GameAudioPlugin, MusicChannel, SfxChannel, SoundLibrary};
