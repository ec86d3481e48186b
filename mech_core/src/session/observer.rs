//! Observers notified after each applied command

use super::build::MechBuild;
use super::command::BuildEvent;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives events after a command has been applied.
///
/// Observers run in priority order (lower values first) once the build has
/// reached its new state.
pub trait BuildObserver: Send {
    /// Returns the priority of this observer. Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this observer wants to see `event`
    fn should_notify(&self, _event: &BuildEvent) -> bool {
        true
    }

    fn on_event(&mut self, event: &BuildEvent, build: &MechBuild);
}

/// Bounded log of event lines shared with a reader
#[derive(Debug)]
pub struct EventLog {
    entries: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
    damage_only: bool,
}

/// Read side of an [`EventLog`]
#[derive(Debug, Clone)]
pub struct EventLogHandle {
    entries: Arc<Mutex<VecDeque<String>>>,
}

impl EventLog {
    pub fn new(capacity: usize) -> (Self, EventLogHandle) {
        let entries = Arc::new(Mutex::new(VecDeque::with_capacity(capacity)));
        let log = EventLog {
            entries: Arc::clone(&entries),
            capacity,
            damage_only: false,
        };
        (log, EventLogHandle { entries })
    }

    /// Only record damage, repair and reset events
    pub fn damage_only(mut self) -> Self {
        self.damage_only = true;
        self
    }
}

impl BuildObserver for EventLog {
    fn priority(&self) -> i32 {
        // Record after observers that might react to the same event
        10
    }

    fn should_notify(&self, event: &BuildEvent) -> bool {
        !self.damage_only || event.is_damage_event()
    }

    fn on_event(&mut self, event: &BuildEvent, _build: &MechBuild) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(event.to_string());
    }
}

impl EventLogHandle {
    /// Logged lines, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
