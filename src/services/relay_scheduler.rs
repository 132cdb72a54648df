// src/services/relay_scheduler.rs
//
// Single-fire timed spawns, drained once per update frame.
//
// Two things land here: the one-frame deferred autospawn (scheduled at
// creation time, due immediately on the next update) and the relay
// handoff delays. Entries are plain data against the registry's address
// space; whether the target still exists is decided at fire time.

use crate::models::TileAddress;

#[derive(Debug, Clone, PartialEq)]
pub struct PendingSpawn {
    pub target: TileAddress,
    pub fire_at: f32,
}

#[derive(Default)]
pub struct RelayScheduler {
    queue: Vec<PendingSpawn>,
}

impl RelayScheduler {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn schedule(&mut self, target: TileAddress, fire_at: f32) {
        self.queue.push(PendingSpawn { target, fire_at });
    }

    /// Remove and return every entry due at `time`, ordered by fire
    /// time. Entries fire exactly once; the rest stay queued.
    pub fn take_due(&mut self, time: f32) -> Vec<PendingSpawn> {
        let mut due: Vec<PendingSpawn> = Vec::new();
        let mut remaining: Vec<PendingSpawn> = Vec::new();

        for entry in self.queue.drain(..) {
            if entry.fire_at <= time {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }

        self.queue = remaining;
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at));
        due
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
