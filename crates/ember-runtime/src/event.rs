//! Game events and the queue that carries them

use ember_core::{ColliderId, EntityId};

/// Events pushed by the simulation during a frame.
///
/// Collision events are pushed once per pair transition, by whichever
/// collider's update observes it first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// Two colliders began overlapping
    CollisionStarted {
        collider_a: ColliderId,
        collider_b: ColliderId,
    },
    /// Two previously overlapping colliders separated
    CollisionEnded {
        collider_a: ColliderId,
        collider_b: ColliderId,
    },
    /// A button fired its click this frame
    ButtonClicked { entity: EntityId },
}

/// A simple event queue that the simulation pushes to and the frame
/// driver drains after each frame
#[derive(Default)]
pub struct EventBus {
    events: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them in push order
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}
