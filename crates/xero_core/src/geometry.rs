//! Viewport geometry supplied by the layout collaborator

/// Width and height in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Safe-area insets along the scroll axis
///
/// The top inset lowers the minimum offset; the bottom inset raises the
/// maximum offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        bottom: 0.0,
    };

    pub const fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }
}
