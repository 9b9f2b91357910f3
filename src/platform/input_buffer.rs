//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame store for keyboard events between two `RedrawRequested`
// boundaries.
//
// Architecture:
//   InputProcessor → push() → [Vec<InputEvent>] → drain() → PlatformEvent::Inputs
//
// Consecutive duplicates (held-key repeats that slip past the processor)
// are collapsed. Order is otherwise preserved: a press and release of the
// same key within one frame must both reach the loop.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

/// Transient keyboard event store for one platform frame.
pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    const BASE_CAPACITY: usize = 64;

    pub(crate) fn new() -> Self {
        Self {
            events: Vec::with_capacity(Self::BASE_CAPACITY),
        }
    }

    /// Appends an event unless it repeats the previous one.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    /// Takes the frame's events, or `None` if nothing was buffered.
    ///
    /// The buffer keeps its capacity for the next frame.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        let mut batch = Vec::with_capacity(self.events.len());
        batch.append(&mut self.events);
        Some(batch)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
