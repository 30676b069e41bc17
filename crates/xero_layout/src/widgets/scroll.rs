//! Scroll region widget with momentum deceleration
//!
//! Stacks children vertically and pans a viewport over them. A drag moves
//! the content directly; releasing the drag hands the last finger velocity
//! to a per-frame decay loop that glides until the velocity settles or the
//! offset reaches a bound. There is no overscroll: the offset is clamped to
//! the content bounds after every input.
//!
//! # Example
//!
//! ```rust
//! use xero_layout::prelude::*;
//!
//! let mut region = ScrollableRegion::new(Size::new(390.0, 800.0));
//! for _ in 0..20 {
//!     region.add_child(200.0);
//! }
//!
//! // Finger moves up 50 points: content follows, offset grows
//! region.handle_drag(GesturePhase::Changed, -50.0, -900.0);
//! assert_eq!(region.offset(), 50.0);
//!
//! // Lift the finger and let the host drive frames until it settles
//! region.handle_drag(GesturePhase::Ended, 0.0, -900.0);
//! while region.tick(1.0 / 60.0) {}
//! assert!(!region.is_decelerating());
//! ```
//!
//! # Features
//!
//! - **Momentum**: Geometric velocity decay after release
//! - **Hard bounds**: Safe-area aware clamping, never past the content edges
//! - **FSM-based state**: Idle, Dragging, Decelerating
//! - **Scoped frame subscription**: Released on settle, edge hit, stop and drop

use std::ops::Range;
use std::sync::{Arc, Mutex, Weak};

use xero_animation::{
    lock_scheduler, DecayConfig, FrameClient, FrameScheduler, FrameSubscriptionId,
};
use xero_core::events::{event_types, scroll_events, EventId};
use xero_core::fsm::{StateMachine, StateTransitions};
use xero_core::{DragEvent, GesturePhase, Insets, PanGesture, Result, Size};

use crate::stack::ContentStack;

/// Label used for the region's frame subscription
const FRAME_SUBSCRIPTION_LABEL: &str = "scroll_region";

// ============================================================================
// Scroll State
// ============================================================================

/// Interaction state of a scroll region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollState {
    /// Not moving
    #[default]
    Idle,
    /// Finger down, content follows the drag
    Dragging,
    /// Finger lifted, gliding on momentum
    Decelerating,
}

impl ScrollState {
    /// Whether the region needs frame ticks
    pub fn is_active(&self) -> bool {
        matches!(self, ScrollState::Decelerating)
    }
}

impl StateTransitions for ScrollState {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use event_types::*;
        use scroll_events::*;
        match (self, event) {
            (ScrollState::Idle, DRAG_BEGIN | DRAG) => Some(ScrollState::Dragging),
            (ScrollState::Dragging | ScrollState::Idle, FLING) => Some(ScrollState::Decelerating),
            (ScrollState::Decelerating, SETTLED | HIT_EDGE | STOP) => Some(ScrollState::Idle),
            _ => None,
        }
    }
}

// ============================================================================
// Scroll Configuration
// ============================================================================

/// Configuration for scroll behavior
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollConfig {
    /// Momentum decay applied each frame after release
    pub deceleration: DecayConfig,
}

impl ScrollConfig {
    pub fn new(deceleration: DecayConfig) -> Result<Self> {
        deceleration.validate()?;
        Ok(Self { deceleration })
    }

    /// Config with a short glide
    pub fn fast() -> Self {
        Self {
            deceleration: DecayConfig::fast(),
        }
    }

    /// Config with a long glide
    pub fn slow() -> Self {
        Self {
            deceleration: DecayConfig::slow(),
        }
    }
}

// ============================================================================
// Scrollable Region
// ============================================================================

/// A vertically scrolling viewport over stacked children
#[derive(Debug)]
pub struct ScrollableRegion {
    /// Visible viewport size
    viewport: Size,
    /// Safe-area insets that widen the clamp range
    safe_area: Insets,
    /// Stacked children
    content: ContentStack,
    /// Offset of the viewport's top edge over the content
    offset: f32,
    /// Last drag velocity, decayed while decelerating (points/second)
    velocity: f32,
    config: ScrollConfig,
    state: StateMachine<ScrollState>,
    /// Frame clock to subscribe to while decelerating
    scheduler: Weak<Mutex<FrameScheduler>>,
    /// Active frame subscription, present only while decelerating
    subscription: Option<FrameSubscriptionId>,
}

impl ScrollableRegion {
    /// Create a region with default config and no frame scheduler
    pub fn new(viewport: Size) -> Self {
        Self::with_config(viewport, ScrollConfig::default())
    }

    pub fn with_config(viewport: Size, config: ScrollConfig) -> Self {
        Self {
            viewport,
            safe_area: Insets::ZERO,
            content: ContentStack::new(),
            offset: 0.0,
            velocity: 0.0,
            config,
            state: StateMachine::new(ScrollState::Idle),
            scheduler: Weak::new(),
            subscription: None,
        }
    }

    /// Create a region that subscribes to `scheduler` while decelerating
    pub fn with_scheduler(
        viewport: Size,
        config: ScrollConfig,
        scheduler: &Arc<Mutex<FrameScheduler>>,
    ) -> Self {
        let mut region = Self::with_config(viewport, config);
        region.scheduler = Arc::downgrade(scheduler);
        region
    }

    /// Set the frame scheduler, releasing any subscription on the old one
    pub fn set_scheduler(&mut self, scheduler: &Arc<Mutex<FrameScheduler>>) {
        self.stop_deceleration();
        self.scheduler = Arc::downgrade(scheduler);
    }

    // =========================================================================
    // Content and layout
    // =========================================================================

    /// Append a child of the given height below the existing children
    pub fn add_child(&mut self, height: f32) {
        let index = self.content.push(height);
        tracing::trace!(
            "child {} added (height={:.1}), extent={:.1}",
            index,
            height,
            self.content.extent()
        );
    }

    /// Total height of the stacked children
    pub fn content_extent(&self) -> f32 {
        self.content.extent()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport size, re-clamping the offset to the new bounds
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.offset = self.clamp_offset(self.offset);
    }

    pub fn safe_area(&self) -> Insets {
        self.safe_area
    }

    /// Update the safe-area insets, re-clamping the offset to the new bounds
    pub fn set_safe_area(&mut self, safe_area: Insets) {
        self.safe_area = safe_area;
        self.offset = self.clamp_offset(self.offset);
    }

    /// Smallest allowed offset (content top pulled below the top inset)
    pub fn min_offset(&self) -> f32 {
        -self.safe_area.top
    }

    /// Largest allowed offset, never below [`min_offset`](Self::min_offset)
    pub fn max_offset(&self) -> f32 {
        let max = self.content.extent() - self.viewport.height + self.safe_area.bottom;
        max.max(self.min_offset())
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        offset.max(self.min_offset()).min(self.max_offset())
    }

    /// Children currently intersecting the viewport
    pub fn visible_children(&self) -> Range<usize> {
        self.content
            .visible_range(self.offset, self.viewport.height)
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn state(&self) -> ScrollState {
        self.state.current_state()
    }

    /// Transition history of the interaction state machine
    pub fn state_machine(&self) -> &StateMachine<ScrollState> {
        &self.state
    }

    pub fn is_decelerating(&self) -> bool {
        self.state.is_in(ScrollState::Decelerating)
    }

    /// Active frame subscription, if any
    pub fn subscription(&self) -> Option<FrameSubscriptionId> {
        self.subscription
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn deceleration_rate(&self) -> f32 {
        self.config.deceleration.rate
    }

    /// Change the per-frame velocity retention; must be in (0, 1)
    pub fn set_deceleration_rate(&mut self, rate: f32) -> Result<()> {
        let deceleration = DecayConfig {
            rate,
            ..self.config.deceleration
        };
        deceleration.validate()?;
        self.config.deceleration = deceleration;
        Ok(())
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Apply one drag callback
    ///
    /// `translation_delta` is the finger travel since the previous callback;
    /// the content follows the finger, so the offset moves the opposite way.
    /// Ending or cancelling the drag starts deceleration with
    /// `current_velocity`. Touching down while gliding stops the glide.
    pub fn handle_drag(
        &mut self,
        phase: GesturePhase,
        translation_delta: f32,
        current_velocity: f32,
    ) {
        if !phase.is_terminal() && self.is_decelerating() {
            self.stop_deceleration();
        }
        self.state.send(phase.event_id());

        let old_offset = self.offset;
        self.offset = self.clamp_offset(self.offset - translation_delta);
        self.velocity = current_velocity;

        tracing::trace!(
            "drag {:?} delta={:.1} offset: {:.1} -> {:.1}, bounds=({:.1}, {:.1}), velocity={:.1}",
            phase,
            translation_delta,
            old_offset,
            self.offset,
            self.min_offset(),
            self.max_offset(),
            self.velocity
        );

        if phase.is_terminal() {
            self.start_deceleration();
        }
    }

    pub fn handle_drag_event(&mut self, event: DragEvent) {
        self.handle_drag(event.phase, event.translation_delta, event.velocity);
    }

    /// Read the pending callback from a pan recognizer and apply it
    ///
    /// The recognizer's translation is reset by the read. Returns the
    /// applied event, or `None` if nothing was pending.
    pub fn handle_pan(&mut self, pan: &mut PanGesture) -> Option<DragEvent> {
        let event = pan.take_event()?;
        self.handle_drag_event(event);
        Some(event)
    }

    // =========================================================================
    // Deceleration
    // =========================================================================

    /// Begin gliding on the current velocity
    ///
    /// Restarting while already decelerating replaces the previous frame
    /// subscription rather than adding a second one.
    pub fn start_deceleration(&mut self) {
        self.stop_deceleration();
        self.state.send(event_types::FLING);

        if let Some(scheduler) = self.scheduler.upgrade() {
            let id = lock_scheduler(&scheduler).subscribe(FRAME_SUBSCRIPTION_LABEL);
            self.subscription = Some(id);
        }

        tracing::debug!(
            "deceleration started at offset={:.1} velocity={:.1}",
            self.offset,
            self.velocity
        );
    }

    /// Stop gliding and release the frame subscription. No-op when idle.
    pub fn stop_deceleration(&mut self) {
        self.finish_deceleration(scroll_events::STOP);
    }

    fn finish_deceleration(&mut self, event: EventId) {
        self.release_subscription();
        if self.state.send(event).is_some() {
            tracing::debug!(
                "deceleration finished (event {}) at offset={:.1} velocity={:.1}",
                event,
                self.offset,
                self.velocity
            );
        }
    }

    fn release_subscription(&mut self) {
        let Some(id) = self.subscription.take() else {
            return;
        };
        if let Some(scheduler) = self.scheduler.upgrade() {
            lock_scheduler(&scheduler).unsubscribe(id);
        }
    }

    /// Advance the glide by one frame of `frame_duration` seconds
    ///
    /// Returns true while still decelerating. Does nothing when not
    /// decelerating.
    pub fn tick(&mut self, frame_duration: f32) -> bool {
        if !self.is_decelerating() {
            return false;
        }

        let decay = self.config.deceleration;
        let mut offset = self.offset - self.velocity * frame_duration;
        let velocity = decay.step(self.velocity);

        let min = self.min_offset();
        let max = self.max_offset();
        let mut finished = None;

        if offset < min {
            offset = min;
            finished = Some(scroll_events::HIT_EDGE);
        } else if offset >= max {
            offset = max;
            finished = Some(scroll_events::HIT_EDGE);
        }

        if finished.is_none() && decay.is_settled(velocity) {
            finished = Some(scroll_events::SETTLED);
        }

        tracing::trace!(
            "tick dt={:.4} offset: {:.1} -> {:.1} velocity: {:.2} -> {:.2}",
            frame_duration,
            self.offset,
            offset,
            self.velocity,
            velocity
        );

        self.offset = offset;
        self.velocity = velocity;

        match finished {
            Some(event) => {
                self.finish_deceleration(event);
                false
            }
            None => true,
        }
    }
}

impl FrameClient for ScrollableRegion {
    fn on_frame(&mut self, dt: f32) -> bool {
        self.tick(dt)
    }

    fn wants_frames(&self) -> bool {
        self.is_decelerating()
    }
}

impl Drop for ScrollableRegion {
    fn drop(&mut self) {
        self.release_subscription();
    }
}
