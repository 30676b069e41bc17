//! Gesture and scroll event types
//!
//! Event ids drive widget state machines; `DragEvent` carries the payload a
//! pan gesture delivers on each callback.

/// Event type identifier
pub type EventId = u32;

/// Common event types
pub mod event_types {
    use super::EventId;

    /// Finger touched down and the pan began
    pub const DRAG_BEGIN: EventId = 1;
    /// Finger moved while panning
    pub const DRAG: EventId = 2;
    /// Finger lifted, ending the pan
    pub const DRAG_END: EventId = 3;
    /// The system cancelled the pan (e.g. an incoming call)
    pub const DRAG_CANCEL: EventId = 4;
    /// A fling was requested (deceleration started or restarted)
    pub const FLING: EventId = 10;
}

/// Scroll-specific events emitted by the deceleration loop
pub mod scroll_events {
    use super::EventId;

    /// Velocity dropped below the settle threshold
    pub const SETTLED: EventId = 30;
    /// The offset ran into the top or bottom bound
    pub const HIT_EDGE: EventId = 31;
    /// Deceleration was stopped explicitly
    pub const STOP: EventId = 32;
}

/// Phase of a drag gesture callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    /// Whether this phase ends the gesture (and should start a fling)
    pub fn is_terminal(&self) -> bool {
        matches!(self, GesturePhase::Ended | GesturePhase::Cancelled)
    }

    /// State machine event id for this phase
    pub fn event_id(&self) -> EventId {
        match self {
            GesturePhase::Began => event_types::DRAG_BEGIN,
            GesturePhase::Changed => event_types::DRAG,
            GesturePhase::Ended => event_types::DRAG_END,
            GesturePhase::Cancelled => event_types::DRAG_CANCEL,
        }
    }
}

/// One drag callback, in the view's local coordinate space
///
/// `translation_delta` is the finger travel since the previous callback, not
/// since the gesture began. `velocity` is the instantaneous finger velocity in
/// points per second; positive means the finger moves down the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub phase: GesturePhase,
    pub translation_delta: f32,
    pub velocity: f32,
}

impl DragEvent {
    pub fn new(phase: GesturePhase, translation_delta: f32, velocity: f32) -> Self {
        Self {
            phase,
            translation_delta,
            velocity,
        }
    }

    pub fn changed(translation_delta: f32, velocity: f32) -> Self {
        Self::new(GesturePhase::Changed, translation_delta, velocity)
    }

    pub fn ended(velocity: f32) -> Self {
        Self::new(GesturePhase::Ended, 0.0, velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
    }

    #[test]
    fn test_phase_event_ids_are_distinct() {
        let ids = [
            GesturePhase::Began.event_id(),
            GesturePhase::Changed.event_id(),
            GesturePhase::Ended.event_id(),
            GesturePhase::Cancelled.event_id(),
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_drag_event_constructors() {
        let e = DragEvent::changed(-50.0, 120.0);
        assert_eq!(e.phase, GesturePhase::Changed);
        assert_eq!(e.translation_delta, -50.0);

        let e = DragEvent::ended(-500.0);
        assert_eq!(e.phase, GesturePhase::Ended);
        assert_eq!(e.translation_delta, 0.0);
        assert_eq!(e.velocity, -500.0);
    }
}
