//! Xero Animation System
//!
//! Frame scheduling and momentum decay.
//!
//! # Features
//!
//! - **Frame Scheduler**: Display-link style clock with cancellable subscriptions
//! - **Geometric Decay**: Per-frame velocity decay with a settle threshold

pub mod decay;
pub mod scheduler;

pub use decay::DecayConfig;
pub use scheduler::{lock_scheduler, Frame, FrameClient, FrameScheduler, FrameSubscriptionId};
