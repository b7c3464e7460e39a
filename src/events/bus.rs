//! Event Bus - central hub for cross-module communication
//!
//! Systems emit events to the bus; the logger drains and records them.
//! The bus is the audit trail of a session, not a control-flow channel -
//! gameplay systems communicate through components and resources.

use bevy::prelude::*;

use super::types::GameEvent;
use crate::helpers::sim_dt;

/// Timestamped event for the event bus
#[derive(Debug, Clone)]
pub struct BusEvent {
    /// Time in milliseconds since session start
    pub time_ms: u32,
    /// The event data
    pub event: GameEvent,
}

/// Central event bus for cross-module communication
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted this frame, waiting to be consumed
    pending: Vec<BusEvent>,

    /// Events that have been consumed (kept for inspection)
    processed: Vec<BusEvent>,

    /// Accumulated simulation time in milliseconds (for timestamping)
    elapsed_ms: u32,

    /// Whether the bus is enabled (for testing/simulation)
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Advance the bus clock (called each frame with the simulation dt)
    pub fn advance(&mut self, dt_secs: f32) {
        self.elapsed_ms += (dt_secs * 1000.0) as u32;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Get pending events for consumption (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Drain pending events, moving them to processed
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        self.processed.extend(events.clone());
        events
    }

    /// Get all processed events
    pub fn processed(&self) -> &[BusEvent] {
        &self.processed
    }

    /// Clear processed events (after they have been written out)
    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    /// Get the number of pending events
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if the bus has any pending events
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Get current elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

/// System to advance the event bus clock each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    let dt = sim_dt(&time);
    bus.advance(dt);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_drain() {
        let mut bus = EventBus::new();
        bus.advance(1.5);

        bus.emit(GameEvent::MatchStart);

        assert_eq!(bus.pending_count(), 1);
        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time_ms, 1500);
        assert_eq!(bus.pending_count(), 0);
        assert_eq!(bus.processed().len(), 1);
    }

    #[test]
    fn test_disabled_bus() {
        let mut bus = EventBus::disabled();
        bus.emit(GameEvent::MatchReset);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_clock_accumulates() {
        let mut bus = EventBus::new();
        for _ in 0..10 {
            bus.advance(0.1);
        }
        assert_eq!(bus.elapsed_ms(), 1000);
    }
}
