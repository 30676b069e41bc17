//! Xero Core Runtime
//!
//! This crate provides the foundational primitives shared by the Xero crates:
//!
//! - **Events**: Event type ids and drag gesture phases
//! - **Gestures**: A pan recognizer that turns raw touches into drag events
//! - **State Machines**: Flat state machines for widget interaction states
//! - **Geometry**: Viewport sizes and safe-area insets
//!
//! # Example
//!
//! ```rust
//! use xero_core::gesture::PanGesture;
//! use xero_core::events::GesturePhase;
//!
//! let mut pan = PanGesture::new();
//! pan.touch_down(300.0, 0.0);
//! pan.touch_move(280.0, 16.0);
//!
//! let event = pan.take_event().unwrap();
//! assert_eq!(event.phase, GesturePhase::Changed);
//! assert_eq!(event.translation_delta, -20.0);
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod geometry;
pub mod gesture;

pub use error::{Error, Result};
pub use events::{DragEvent, EventId, GesturePhase};
pub use fsm::{StateMachine, StateTransitions};
pub use geometry::{Insets, Size};
pub use gesture::PanGesture;
