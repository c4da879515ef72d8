//! Sound playback: channels, the sound library, and the event bridge.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;
// Both preludes export an `AudioSource`; playback goes through kira's.
use bevy_kira_audio::AudioSource;

use crate::core::{GameState, SoundEvent, SoundKind};

/// Channel for looping background music.
#[derive(Resource)]
pub struct MusicChannel;

/// Channel for one-shot gameplay sounds.
#[derive(Resource)]
pub struct SfxChannel;

/// Volume settings for both channels.
#[derive(Resource, Debug, Clone)]
pub struct AudioSettings {
    pub music_volume: f64,
    pub sfx_volume: f64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            sfx_volume: 0.7,
        }
    }
}

/// Handles to every loaded sound effect, keyed by kind.
#[derive(Resource, Default)]
pub struct SoundLibrary {
    sounds: HashMap<SoundKind, Handle<AudioSource>>,
    music: Option<Handle<AudioSource>>,
}

impl SoundLibrary {
    pub fn get(&self, kind: SoundKind) -> Option<&Handle<AudioSource>> {
        self.sounds.get(&kind)
    }
}

/// Asset path for each sound kind.
fn sound_path(kind: SoundKind) -> &'static str {
    match kind {
        SoundKind::PunchWhoosh => "audio/punch_whoosh.ogg",
        SoundKind::PunchHit => "audio/punch_hit.ogg",
        SoundKind::KickWhoosh => "audio/kick_whoosh.ogg",
        SoundKind::KickHit => "audio/kick_hit.ogg",
        SoundKind::Jump => "audio/jump.ogg",
        SoundKind::Uppercut => "audio/uppercut.ogg",
        SoundKind::BombTick => "audio/bomb_tick.ogg",
        SoundKind::Explosion => "audio/explosion.ogg",
    }
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_audio_channel::<MusicChannel>()
            .add_audio_channel::<SfxChannel>()
            .init_resource::<AudioSettings>()
            .init_resource::<SoundLibrary>()
            .add_systems(Startup, (load_sounds, apply_volumes))
            .add_systems(OnEnter(GameState::InGame), start_music)
            .add_systems(OnExit(GameState::InGame), stop_music)
            .add_systems(Update, play_sounds.run_if(on_event::<SoundEvent>));
    }
}

/// Queue every sound asset for loading. Playback of a sound that is
/// still loading simply starts once the asset arrives.
fn load_sounds(asset_server: Res<AssetServer>, mut library: ResMut<SoundLibrary>) {
    for kind in [
        SoundKind::PunchWhoosh,
        SoundKind::PunchHit,
        SoundKind::KickWhoosh,
        SoundKind::KickHit,
        SoundKind::Jump,
        SoundKind::Uppercut,
        SoundKind::BombTick,
        SoundKind::Explosion,
    ] {
        library
            .sounds
            .insert(kind, asset_server.load(sound_path(kind)));
    }
    library.music = Some(asset_server.load("audio/music.ogg"));
}

fn apply_volumes(
    settings: Res<AudioSettings>,
    music: Res<AudioChannel<MusicChannel>>,
    sfx: Res<AudioChannel<SfxChannel>>,
) {
    music.set_volume(settings.music_volume);
    sfx.set_volume(settings.sfx_volume);
}

/// Loop the level track for as long as the run lasts.
fn start_music(library: Res<SoundLibrary>, music: Res<AudioChannel<MusicChannel>>) {
    if let Some(track) = &library.music {
        music.play(track.clone()).looped();
    }
}

fn stop_music(music: Res<AudioChannel<MusicChannel>>) {
    music.stop();
}

/// Play one-shots for every sound event raised this tick.
fn play_sounds(
    mut events: EventReader<SoundEvent>,
    library: Res<SoundLibrary>,
    sfx: Res<AudioChannel<SfxChannel>>,
) {
    for SoundEvent(kind) in events.read() {
        if let Some(handle) = library.get(*kind) {
            sfx.play(handle.clone());
        } else {
            debug!("No sound loaded for {:?}", kind);
        }
    }
}
