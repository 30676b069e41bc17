//! Frame scheduler
//!
//! The per-frame clock widgets subscribe to while they animate. A
//! subscription is a cancellable handle: widgets acquire one when an
//! animation starts and must release it on every exit path.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use xero_core::{Error, Result};

new_key_type! {
    pub struct FrameSubscriptionId;
}

/// Default display refresh rate
pub const DEFAULT_FPS: u32 = 60;

/// A frame delivered by the scheduler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Monotonic frame counter, starting at 1
    pub index: u64,
    /// Seconds since the previous frame
    pub duration: f32,
}

/// Something driven by frame ticks
pub trait FrameClient {
    /// Advance by one frame of `dt` seconds; returns true while still animating
    fn on_frame(&mut self, dt: f32) -> bool;

    /// Whether the client currently needs frames
    fn wants_frames(&self) -> bool;
}

#[derive(Debug)]
struct Subscription {
    label: &'static str,
    frames_delivered: u64,
}

/// The frame scheduler that tracks active frame subscriptions
#[derive(Debug)]
pub struct FrameScheduler {
    subscriptions: SlotMap<FrameSubscriptionId, Subscription>,
    last_frame: Instant,
    target_fps: u32,
    frame_count: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            subscriptions: SlotMap::with_key(),
            last_frame: Instant::now(),
            target_fps: DEFAULT_FPS,
            frame_count: 0,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) -> Result<()> {
        if fps == 0 {
            return Err(Error::InvalidFrameRate(fps));
        }
        self.target_fps = fps;
        Ok(())
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Nominal frame duration in seconds
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.target_fps as f32
    }

    /// Start receiving frames
    pub fn subscribe(&mut self, label: &'static str) -> FrameSubscriptionId {
        let id = self.subscriptions.insert(Subscription {
            label,
            frames_delivered: 0,
        });
        tracing::debug!(
            "frame subscription {:?} ({}) added, active={}",
            id,
            label,
            self.subscriptions.len()
        );
        id
    }

    /// Stop receiving frames; returns false if the id was not active
    pub fn unsubscribe(&mut self, id: FrameSubscriptionId) -> bool {
        match self.subscriptions.remove(id) {
            Some(sub) => {
                tracing::debug!(
                    "frame subscription {:?} ({}) removed after {} frames, active={}",
                    id,
                    sub.label,
                    sub.frames_delivered,
                    self.subscriptions.len()
                );
                true
            }
            None => false,
        }
    }

    pub fn is_subscribed(&self, id: FrameSubscriptionId) -> bool {
        self.subscriptions.contains_key(id)
    }

    /// Number of frames delivered to a subscription so far
    pub fn frames_delivered(&self, id: FrameSubscriptionId) -> Option<u64> {
        self.subscriptions.get(id).map(|s| s.frames_delivered)
    }

    /// Get the number of active subscriptions
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if anyone is waiting for frames
    pub fn has_subscribers(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Total frames produced
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Produce a frame timed from the wall clock
    pub fn begin_frame(&mut self) -> Frame {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(dt)
    }

    /// Produce a frame of exactly the nominal duration
    pub fn begin_fixed_frame(&mut self) -> Frame {
        self.last_frame = Instant::now();
        self.advance(self.frame_duration())
    }

    fn advance(&mut self, duration: f32) -> Frame {
        self.frame_count += 1;
        for (_, sub) in self.subscriptions.iter_mut() {
            sub.frames_delivered += 1;
        }
        Frame {
            index: self.frame_count,
            duration,
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock a shared scheduler, recovering the guard if a holder panicked
pub fn lock_scheduler(scheduler: &Mutex<FrameScheduler>) -> MutexGuard<'_, FrameScheduler> {
    scheduler.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("frame scheduler lock poisoned, recovering");
        poisoned.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_unsubscribe() {
        let mut scheduler = FrameScheduler::new();
        assert!(!scheduler.has_subscribers());

        let a = scheduler.subscribe("a");
        let b = scheduler.subscribe("b");
        assert_eq!(scheduler.subscription_count(), 2);
        assert!(scheduler.is_subscribed(a));

        assert!(scheduler.unsubscribe(a));
        assert!(!scheduler.is_subscribed(a));
        assert!(scheduler.is_subscribed(b));

        // Removing twice is a no-op
        assert!(!scheduler.unsubscribe(a));
        assert_eq!(scheduler.subscription_count(), 1);
    }

    #[test]
    fn test_fixed_frames() {
        let mut scheduler = FrameScheduler::new();
        let id = scheduler.subscribe("scroll");

        let first = scheduler.begin_fixed_frame();
        let second = scheduler.begin_fixed_frame();
        assert_eq!(first.index, 1);
        assert_eq!(second.index, 2);
        assert!((first.duration - 1.0 / 60.0).abs() < f32::EPSILON);
        assert_eq!(scheduler.frames_delivered(id), Some(2));
    }

    #[test]
    fn test_wall_clock_frame_is_non_negative() {
        let mut scheduler = FrameScheduler::new();
        let frame = scheduler.begin_frame();
        assert!(frame.duration >= 0.0);
        assert_eq!(scheduler.frame_count(), 1);
    }

    #[test]
    fn test_target_fps() {
        let mut scheduler = FrameScheduler::new();
        scheduler.set_target_fps(120).unwrap();
        assert_eq!(scheduler.target_fps(), 120);
        assert!((scheduler.frame_duration() - 1.0 / 120.0).abs() < f32::EPSILON);

        assert_eq!(scheduler.set_target_fps(0), Err(Error::InvalidFrameRate(0)));
        assert_eq!(scheduler.target_fps(), 120);
    }

    #[test]
    fn test_lock_recovers_poisoned_scheduler() {
        use std::sync::Arc;

        let scheduler = Arc::new(Mutex::new(FrameScheduler::new()));
        let id = lock_scheduler(&scheduler).subscribe("scroll");

        let shared = Arc::clone(&scheduler);
        let result = std::thread::spawn(move || {
            let _guard = shared.lock().unwrap();
            panic!("holder panicked");
        })
        .join();
        assert!(result.is_err());
        assert!(scheduler.is_poisoned());

        let mut guard = lock_scheduler(&scheduler);
        assert!(guard.is_subscribed(id));
        assert!(guard.unsubscribe(id));
    }
}
