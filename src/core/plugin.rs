//! Core plugin that sets up game states, events, and the tick pipeline.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::actor::apply_facing;
use super::events::*;
use super::states::*;
use super::tasks::{run_scheduled_tasks, BombRelease, TaskQueue, ThrowRearm};

/// Fixed per-tick ordering of the simulation (spec'd by the gameplay
/// design, not incidental): deferred tasks fire first, then input is
/// read, actions dispatch, movement applies, damage resolves, animation
/// flags project, and finally grounding is recomputed. The grounding
/// computed this tick feeds *next* tick's jump eligibility - the
/// one-tick lag is intentional.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Tasks,
    Input,
    Actions,
    Movement,
    Combat,
    Animation,
    Grounding,
}

/// Core plugin - must be added first as other plugins depend on it.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()
            // Global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<SoundEvent>()
            .add_event::<BombRelease>()
            .add_event::<ThrowRearm>()
            // Deferred task queue
            .init_resource::<TaskQueue>()
            // Tick pipeline - everything gameplay runs inside these sets
            .configure_sets(
                Update,
                (
                    SimSet::Tasks,
                    SimSet::Input,
                    SimSet::Actions,
                    SimSet::Movement,
                    SimSet::Combat,
                    SimSet::Animation,
                    SimSet::Grounding,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame))
                    .run_if(in_state(PlayState::Running)),
            )
            .add_systems(Update, run_scheduled_tasks.in_set(SimSet::Tasks))
            .add_systems(Update, apply_facing.in_set(SimSet::Animation))
            // Loading -> MainMenu once config is in place
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)
            // Pause handling
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnEnter(PlayState::Paused), freeze_physics)
            .add_systems(OnExit(PlayState::Paused), unfreeze_physics);
    }
}

/// Transition from Loading to MainMenu. Config loading runs at startup,
/// so by the time this state is entered there is nothing left to wait on.
fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Running => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Running),
        }
    }
}

/// Stop the physics pipeline while paused so bodies hold still.
fn freeze_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut config in config.iter_mut() {
        config.physics_pipeline_active = false;
    }
}

fn unfreeze_physics(mut config: Query<&mut RapierConfiguration>) {
    for mut config in config.iter_mut() {
        config.physics_pipeline_active = true;
    }
}
