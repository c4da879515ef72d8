//! Headless exercise of the deferred task pipeline: scheduled flag
//! clears, delayed sounds, bomb release and rearm routing, despawns.

use std::time::Duration;

use bevy::prelude::*;

use dashing_runner::animation::{params, Animator};
use dashing_runner::bombs::BombSupply;
use dashing_runner::core::{
    run_scheduled_tasks, BombRelease, SoundEvent, SoundKind, Task, TaskQueue, ThrowRearm,
};

/// Everything the task runner emitted, collected for assertions.
#[derive(Resource, Default)]
struct Captured {
    sounds: Vec<SoundKind>,
    releases: Vec<Entity>,
    rearms: Vec<Entity>,
}

fn capture(
    mut captured: ResMut<Captured>,
    mut sounds: EventReader<SoundEvent>,
    mut releases: EventReader<BombRelease>,
    mut rearms: EventReader<ThrowRearm>,
) {
    for SoundEvent(kind) in sounds.read() {
        captured.sounds.push(*kind);
    }
    for release in releases.read() {
        captured.releases.push(release.thrower);
    }
    for rearm in rearms.read() {
        captured.rearms.push(rearm.thrower);
    }
}

fn test_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .init_resource::<TaskQueue>()
        .init_resource::<Captured>()
        .add_event::<SoundEvent>()
        .add_event::<BombRelease>()
        .add_event::<ThrowRearm>()
        .add_systems(Update, (run_scheduled_tasks, capture).chain());
    app
}

/// Step the app by `seconds` of simulated time.
fn advance(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn set_bool(app: &mut App, entity: Entity, name: &'static str, value: bool) {
    let mut animator = app.world_mut().get_mut::<Animator>(entity).unwrap();
    animator.set_bool(name, value);
}

fn get_bool(app: &mut App, entity: Entity, name: &str) -> bool {
    app.world()
        .get::<Animator>(entity)
        .unwrap()
        .get_bool(name)
}

#[test]
fn transient_flag_clears_when_its_task_comes_due() {
    let mut app = test_app();
    let player = app
        .world_mut()
        .spawn(Animator::default().with_bools(&[params::IS_KICKING]))
        .id();

    // A kick dispatch sets the flag, schedules the clear and the
    // delayed impact sound.
    set_bool(&mut app, player, params::IS_KICKING, true);
    {
        let mut tasks = app.world_mut().resource_mut::<TaskQueue>();
        tasks.schedule(player, 0.6, Task::ClearAnimatorBool(params::IS_KICKING));
        tasks.schedule(player, 0.2, Task::PlaySound(SoundKind::KickHit));
    }

    advance(&mut app, 0.3);
    assert!(
        get_bool(&mut app, player, params::IS_KICKING),
        "flag must hold until its clear fires"
    );
    assert_eq!(
        app.world().resource::<Captured>().sounds,
        vec![SoundKind::KickHit]
    );

    advance(&mut app, 0.4);
    assert!(!get_bool(&mut app, player, params::IS_KICKING));
}

#[test]
fn throw_releases_then_rearms_in_order() {
    let mut app = test_app();
    let player = app.world_mut().spawn(BombSupply::new(3)).id();

    {
        let mut supply = app.world_mut().get_mut::<BombSupply>(player).unwrap();
        assert!(supply.try_take());
    }
    {
        let mut tasks = app.world_mut().resource_mut::<TaskQueue>();
        tasks.schedule(player, 0.2, Task::ReleaseBomb);
        tasks.schedule(player, 1.2, Task::RearmThrow);
    }

    advance(&mut app, 0.25);
    {
        let captured = app.world().resource::<Captured>();
        assert_eq!(captured.releases, vec![player]);
        assert!(captured.rearms.is_empty(), "cooldown still running");
    }

    advance(&mut app, 1.0);
    assert_eq!(app.world().resource::<Captured>().rearms, vec![player]);
}

#[test]
fn despawn_task_removes_the_owner() {
    let mut app = test_app();
    let bomb = app.world_mut().spawn_empty().id();

    app.world_mut()
        .resource_mut::<TaskQueue>()
        .schedule(bomb, 0.5, Task::Despawn);

    advance(&mut app, 0.4);
    assert!(app.world().entities().contains(bomb));

    advance(&mut app, 0.2);
    assert!(!app.world().entities().contains(bomb));
}

#[test]
fn cancelling_an_owner_silences_its_pending_tasks() {
    let mut app = test_app();
    let dead = app.world_mut().spawn_empty().id();
    let alive = app.world_mut().spawn_empty().id();

    {
        let mut tasks = app.world_mut().resource_mut::<TaskQueue>();
        tasks.schedule(dead, 0.3, Task::PlaySound(SoundKind::PunchHit));
        tasks.schedule(alive, 0.3, Task::PlaySound(SoundKind::KickHit));
        tasks.cancel_owned(dead);
    }

    advance(&mut app, 0.5);
    assert_eq!(
        app.world().resource::<Captured>().sounds,
        vec![SoundKind::KickHit],
        "only the surviving owner's sound may fire"
    );
}
