//! Xero Layout
//!
//! Vertically stacked content and the momentum scroll region that pans over it.

pub mod stack;
pub mod widgets;

pub use stack::ContentStack;
pub use widgets::scroll::{ScrollConfig, ScrollState, ScrollableRegion};

pub mod prelude {
    pub use crate::stack::ContentStack;
    pub use crate::widgets::scroll::{ScrollConfig, ScrollState, ScrollableRegion};
    pub use xero_animation::{DecayConfig, FrameClient, FrameScheduler};
    pub use xero_core::{DragEvent, GesturePhase, Insets, PanGesture, Size};
}
