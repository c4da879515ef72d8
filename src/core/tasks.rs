//! Deferred work scheduled against the frame clock.
//!
//! Unity-style coroutines ("clear this flag in 0.5s", "play the impact
//! sound in 0.15s", "despawn after the explosion plays out") become
//! entries in a single due-time priority queue, drained once per tick.
//! Every entry names its owning entity so that killing an actor or
//! detonating a bomb early can cancel everything it still had pending -
//! a stale callback must never re-assert state that was already cleared.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bevy::prelude::*;

use super::events::{SoundEvent, SoundKind};
use crate::animation::Animator;

/// The closed set of things that can be deferred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    /// Play a one-shot sound effect (impact frames, delayed stingers).
    PlaySound(SoundKind),
    /// Clear a transient animator bool set by an action dispatch.
    ClearAnimatorBool(&'static str),
    /// The throw animation reached its release frame; spawn the bomb.
    ReleaseBomb,
    /// The throw cooldown elapsed; the owner may throw again.
    RearmThrow,
    /// Remove the owner from the world (post-explosion cleanup).
    Despawn,
}

/// Routed to the bomb plugin when a `Task::ReleaseBomb` comes due.
#[derive(Event)]
pub struct BombRelease {
    pub thrower: Entity,
}

/// Routed to the bomb plugin when a `Task::RearmThrow` comes due.
#[derive(Event)]
pub struct ThrowRearm {
    pub thrower: Entity,
}

struct Scheduled {
    due: f64,
    seq: u64,
    owner: Entity,
    task: Task,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        // Earlier due time first; insertion order breaks ties.
        self.due
            .total_cmp(&other.due)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Priority queue of deferred tasks, keyed by due time on the frame clock.
#[derive(Resource, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    now: f64,
    next_seq: u64,
}

impl TaskQueue {
    /// Schedule `task` to run `delay` seconds from now, owned by `owner`.
    pub fn schedule(&mut self, owner: Entity, delay: f32, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled {
            due: self.now + f64::from(delay.max(0.0)),
            seq,
            owner,
            task,
        }));
    }

    /// Drop every pending task owned by `owner`.
    pub fn cancel_owned(&mut self, owner: Entity) {
        let kept: Vec<_> = std::mem::take(&mut self.heap)
            .into_iter()
            .filter(|Reverse(s)| s.owner != owner)
            .collect();
        self.heap = kept.into();
    }

    /// Advance the clock by `dt` and return every task that came due,
    /// in due-time order.
    pub fn advance(&mut self, dt: f32) -> Vec<(Entity, Task)> {
        self.now += f64::from(dt);
        let mut due = Vec::new();
        while let Some(Reverse(head)) = self.heap.peek() {
            if head.due > self.now {
                break;
            }
            let Reverse(s) = self.heap.pop().unwrap();
            due.push((s.owner, s.task));
        }
        due
    }

    /// Number of tasks still pending for `owner`.
    pub fn pending_for(&self, owner: Entity) -> usize {
        self.heap
            .iter()
            .filter(|Reverse(s)| s.owner == owner)
            .count()
    }
}

/// Drain due tasks once per tick and apply their effects.
///
/// Tasks whose owner no longer exists are skipped, never errors: the
/// owner despawning is exactly the cancellation case.
pub fn run_scheduled_tasks(
    time: Res<Time>,
    mut queue: ResMut<TaskQueue>,
    mut commands: Commands,
    mut animators: Query<&mut Animator>,
    mut sounds: EventWriter<SoundEvent>,
    mut releases: EventWriter<BombRelease>,
    mut rearms: EventWriter<ThrowRearm>,
) {
    for (owner, task) in queue.advance(time.delta_secs()) {
        match task {
            Task::PlaySound(kind) => {
                sounds.send(SoundEvent(kind));
            }
            Task::ClearAnimatorBool(name) => {
                if let Ok(mut animator) = animators.get_mut(owner) {
                    animator.set_bool(name, false);
                }
            }
            Task::ReleaseBomb => {
                releases.send(BombRelease { thrower: owner });
            }
            Task::RearmThrow => {
                rearms.send(ThrowRearm { thrower: owner });
            }
            Task::Despawn => {
                if let Some(mut entity) = commands.get_entity(owner) {
                    entity.despawn_recursive();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn tasks_come_due_in_time_order() {
        let mut queue = TaskQueue::default();
        queue.schedule(owner(1), 0.5, Task::RearmThrow);
        queue.schedule(owner(1), 0.2, Task::ReleaseBomb);

        assert!(queue.advance(0.1).is_empty());

        let due = queue.advance(0.15);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1, Task::ReleaseBomb);

        let due = queue.advance(1.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].1, Task::RearmThrow);
    }

    #[test]
    fn same_due_time_preserves_insertion_order() {
        let mut queue = TaskQueue::default();
        queue.schedule(owner(1), 0.3, Task::PlaySound(SoundKind::PunchWhoosh));
        queue.schedule(owner(1), 0.3, Task::PlaySound(SoundKind::PunchHit));

        let due = queue.advance(0.3);
        assert_eq!(due[0].1, Task::PlaySound(SoundKind::PunchWhoosh));
        assert_eq!(due[1].1, Task::PlaySound(SoundKind::PunchHit));
    }

    #[test]
    fn cancel_owned_drops_only_that_owner() {
        let mut queue = TaskQueue::default();
        queue.schedule(owner(1), 0.2, Task::Despawn);
        queue.schedule(owner(2), 0.2, Task::Despawn);
        queue.schedule(owner(1), 0.4, Task::RearmThrow);

        queue.cancel_owned(owner(1));
        assert_eq!(queue.pending_for(owner(1)), 0);
        assert_eq!(queue.pending_for(owner(2)), 1);

        let due = queue.advance(1.0);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].0, owner(2));
    }

    #[test]
    fn zero_delay_runs_on_next_advance() {
        let mut queue = TaskQueue::default();
        queue.schedule(owner(3), 0.0, Task::ClearAnimatorBool("isKicking"));
        let due = queue.advance(0.0);
        assert_eq!(due.len(), 1);
    }
}
