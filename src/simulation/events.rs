//! Per-tick simulation events.
//!
//! Eliminations and passages are collected while the tick inspects the
//! population and applied afterwards, so the contestant list is never
//! mutated mid-iteration.

use super::network::GenomeId;

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationEvent {
    /// An agent hit an obstacle and is eliminated with a fitness penalty.
    Collided {
        /// Genome of the eliminated agent.
        id: GenomeId,
    },
    /// An agent touched the ground or flew off the top.
    LeftBounds {
        /// Genome of the eliminated agent.
        id: GenomeId,
    },
    /// The lead obstacle was passed; survivors are rewarded.
    ObstaclePassed {
        /// Score after the passage.
        score: u32,
    },
}

impl SimulationEvent {
    /// Genome removed by this event, if any.
    pub fn eliminated(&self) -> Option<GenomeId> {
        match *self {
            SimulationEvent::Collided { id } | SimulationEvent::LeftBounds { id } => Some(id),
            SimulationEvent::ObstaclePassed { .. } => None,
        }
    }
}

/// Queue for collecting events before they are applied.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SimulationEvent> {
        self.events.drain(..)
    }
}
