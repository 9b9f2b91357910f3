//=========================================================================
// Event Bus
//=========================================================================
//
// Per-kind frame queues of `GameEvent`s.
//
// Architecture:
//   Loop / handler → push() → HashMap<EventType, Vec<GameEvent>>
//                                  ↓
//   Multiple consumers ← read(EventType) (shared)
//                                  ↓
//   GameLoop ─────────→ clear_all() at tick start
//
// Pattern: push → read (N consumers) → clear → repeat
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{EventType, GameEvent};

//=== EventBus ============================================================

/// Batched event queues, one per [`EventType`].
///
/// Events pushed during a tick stay readable by any number of consumers
/// until the queue is cleared. Clearing keeps the allocations for reuse
/// on the next tick.
#[derive(Debug, Default)]
pub struct EventBus {
    queues: HashMap<EventType, Vec<GameEvent>>,
}

impl EventBus {
    /// Creates a new empty bus.
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    //--- Event Operations -------------------------------------------------

    /// Appends an event to the queue for its kind.
    pub fn push(&mut self, event: GameEvent) {
        self.queues
            .entry(event.event_type())
            .or_default()
            .push(event);
    }

    /// Returns all queued events of one kind, in push order.
    pub fn read(&self, kind: EventType) -> &[GameEvent] {
        self.queues
            .get(&kind)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if any event of this kind is queued.
    pub fn has_events(&self, kind: EventType) -> bool {
        !self.read(kind).is_empty()
    }

    /// Returns the number of queued events of this kind.
    pub fn count(&self, kind: EventType) -> usize {
        self.read(kind).len()
    }

    /// Total number of queued events across all kinds.
    pub fn len(&self) -> usize {
        self.queues.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.values().all(Vec::is_empty)
    }

    /// Iterates every queued event, grouped by kind in `EventType::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        EventType::ALL.into_iter().flat_map(move |kind| self.read(kind).iter())
    }

    //--- Clearing ---------------------------------------------------------

    /// Clears one kind's queue, preserving capacity.
    pub fn clear(&mut self, kind: EventType) {
        if let Some(queue) = self.queues.get_mut(&kind) {
            queue.clear();
        }
    }

    /// Clears every queue, preserving map entries and capacity.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear();
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
