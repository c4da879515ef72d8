//! Camera setup and the follow behavior.

use bevy::prelude::*;

use crate::core::{GameState, PlayState};
use crate::player::Player;

/// Follow parameters for the main camera.
#[derive(Component, Debug)]
pub struct CameraFollow {
    /// Offset from the player's position
    pub offset: Vec3,
    /// Fraction of the remaining distance covered per 60Hz step
    pub smoothing: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            offset: Vec3::new(2.0, 1.0, 10.0),
            smoothing: 0.125,
        }
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera).add_systems(
            Update,
            follow_player
                .run_if(in_state(GameState::InGame))
                .run_if(in_state(PlayState::Running)),
        );
    }
}

/// One camera for the whole app; menus render through it too.
fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        CameraFollow::default(),
        Transform::from_xyz(0.0, 0.0, 10.0),
        OrthographicProjection {
            scale: 0.02,
            ..OrthographicProjection::default_2d()
        },
    ));
}

/// Exponential smoothing toward the player, framerate-compensated so
/// the chase feels identical at any tick rate.
fn follow_player(
    time: Res<Time>,
    player: Query<&Transform, (With<Player>, Without<CameraFollow>)>,
    mut cameras: Query<(&CameraFollow, &mut Transform), Without<Player>>,
) {
    let Ok(player_transform) = player.get_single() else {
        return;
    };

    for (follow, mut camera_transform) in cameras.iter_mut() {
        let target = player_transform.translation + follow.offset;
        let t = 1.0 - (1.0 - follow.smoothing).powf(time.delta_secs() * 60.0);
        camera_transform.translation = camera_transform.translation.lerp(target, t);
    }
}
