//! In-game HUD - health bar and bomb counter.

use bevy::prelude::*;

use crate::bombs::BombSupply;
use crate::combat::Health;
use crate::core::GameState;
use crate::player::Player;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the health bar fill node.
#[derive(Component)]
pub struct HealthBarFill;

/// Marker for the bomb counter text.
#[derive(Component)]
pub struct BombCounter;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_health_bar, update_bomb_counter).run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI in the top-left corner.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            // Health bar: label, dark background, colored fill.
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    margin: UiRect::bottom(Val::Px(6.0)),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Text::new("Health"),
                        TextFont {
                            font_size: 14.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.8, 0.8)),
                        Node {
                            width: Val::Px(60.0),
                            ..default()
                        },
                    ));

                    row.spawn((
                        Node {
                            width: Val::Px(180.0),
                            height: Val::Px(14.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                    ))
                    .with_children(|bg| {
                        bg.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                            HealthBarFill,
                        ));
                    });
                });

            parent.spawn((
                Text::new("Bombs: -/-"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.8, 0.6)),
                BombCounter,
            ));
        });
}

/// Scale the fill node to the player's health fraction.
fn update_health_bar(
    player_query: Query<&Health, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBarFill>>,
) {
    let Ok(health) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(health.percentage() * 100.0);
}

/// Rewrite the bomb counter whenever the supply changes.
fn update_bomb_counter(
    supply_query: Query<&BombSupply, (With<Player>, Changed<BombSupply>)>,
    mut text_query: Query<&mut Text, With<BombCounter>>,
) {
    let Ok(supply) = supply_query.get_single() else {
        return;
    };
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    **text = format!("Bombs: {}/{}", supply.current, supply.max);
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
