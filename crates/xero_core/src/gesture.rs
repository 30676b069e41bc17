//! Pan gesture recognizer
//!
//! Converts raw vertical touch samples into [`DragEvent`]s. Translation is
//! accumulated between reads and reset by [`PanGesture::take_event`], so
//! consumers always see a per-callback delta. Velocity is tracked from the
//! sample stream, since touch platforms do not hand us momentum the way a
//! trackpad does.

use crate::events::{DragEvent, GesturePhase};

/// Smoothing factor for the velocity moving average
const VELOCITY_SMOOTHING: f32 = 0.3;

/// Samples further apart than this (seconds) don't update velocity
const MAX_SAMPLE_GAP: f32 = 0.5;

/// Assumed frame rate for the first sample of a gesture
const FIRST_SAMPLE_FPS: f32 = 60.0;

/// Tracks one vertical pan gesture
#[derive(Debug, Clone, Default)]
pub struct PanGesture {
    /// Phase of the pending (unread) callback
    phase: Option<GesturePhase>,
    /// Whether a finger is currently down
    tracking: bool,
    /// Last touch position (local y)
    last_y: f32,
    /// Translation accumulated since the last read
    translation: f32,
    /// Smoothed velocity in points per second
    velocity: f32,
    /// Timestamp of the last velocity sample in milliseconds
    last_sample_time: Option<f64>,
}

impl PanGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a finger is currently down
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Translation accumulated since the last read
    pub fn translation(&self) -> f32 {
        self.translation
    }

    /// Current smoothed velocity in points per second
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Finger touched down at `y`; `time_ms` is a monotonic timestamp
    pub fn touch_down(&mut self, y: f32, time_ms: f64) {
        self.tracking = true;
        self.last_y = y;
        self.translation = 0.0;
        self.velocity = 0.0;
        self.last_sample_time = None;
        self.phase = Some(GesturePhase::Began);
        tracing::trace!("pan began at y={:.1} t={:.1}ms", y, time_ms);
    }

    /// Finger moved to `y`
    pub fn touch_move(&mut self, y: f32, time_ms: f64) {
        if !self.tracking {
            return;
        }
        self.sample(y, time_ms);
        self.phase = Some(GesturePhase::Changed);
    }

    /// Finger lifted at `y`
    pub fn touch_up(&mut self, y: f32, time_ms: f64) {
        if !self.tracking {
            return;
        }
        if y != self.last_y {
            self.sample(y, time_ms);
        }
        self.phase = Some(GesturePhase::Ended);
    }

    /// The platform cancelled the touch
    pub fn touch_cancel(&mut self) {
        if !self.tracking {
            return;
        }
        self.phase = Some(GesturePhase::Cancelled);
    }

    /// Read the pending callback and reset translation to zero
    ///
    /// Returns `None` when nothing happened since the last read.
    pub fn take_event(&mut self) -> Option<DragEvent> {
        let phase = self.phase.take()?;
        let event = DragEvent::new(phase, self.translation, self.velocity);
        self.translation = 0.0;
        if phase.is_terminal() {
            self.tracking = false;
            self.last_sample_time = None;
        }
        Some(event)
    }

    fn sample(&mut self, y: f32, time_ms: f64) {
        let delta = y - self.last_y;
        self.translation += delta;
        self.last_y = y;

        if let Some(last_time) = self.last_sample_time {
            let dt_seconds = ((time_ms - last_time) / 1000.0) as f32;
            if dt_seconds > 0.0 && dt_seconds < MAX_SAMPLE_GAP {
                let instant = delta / dt_seconds;
                self.velocity =
                    self.velocity * (1.0 - VELOCITY_SMOOTHING) + instant * VELOCITY_SMOOTHING;
            }
        } else {
            // First sample - assume one frame elapsed
            self.velocity = delta * FIRST_SAMPLE_FPS;
        }
        self.last_sample_time = Some(time_ms);

        tracing::trace!(
            "pan sample y={:.1} delta={:.1} velocity={:.1}",
            y,
            delta,
            self.velocity
        );
    }
}
