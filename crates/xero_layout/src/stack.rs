//! Vertically stacked children
//!
//! Only child heights matter to scrolling, so the stack stores those in
//! insertion order. Positions and the total extent are derived on every read.

use std::ops::Range;

/// Ordered child heights, first child at the top
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentStack {
    heights: Vec<f32>,
}

impl ContentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child and return its index
    ///
    /// Negative or non-finite heights count as zero.
    pub fn push(&mut self, height: f32) -> usize {
        let height = if height.is_finite() && height > 0.0 {
            height
        } else {
            0.0
        };
        self.heights.push(height);
        self.heights.len() - 1
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Total height of all children
    pub fn extent(&self) -> f32 {
        self.heights.iter().sum()
    }

    /// Top edge of child `index` in content coordinates
    pub fn child_top(&self, index: usize) -> Option<f32> {
        if index >= self.heights.len() {
            return None;
        }
        Some(self.heights[..index].iter().sum())
    }

    /// Index of the child covering content position `y`
    pub fn child_at(&self, y: f32) -> Option<usize> {
        if y < 0.0 {
            return None;
        }
        let mut top = 0.0f32;
        for (index, height) in self.heights.iter().enumerate() {
            let bottom = top + *height;
            if y < bottom {
                return Some(index);
            }
            top = bottom;
        }
        None
    }

    /// Children intersecting the window `[offset, offset + viewport_height)`
    pub fn visible_range(&self, offset: f32, viewport_height: f32) -> Range<usize> {
        let window_end = offset + viewport_height;
        let mut start = None;
        let mut end = 0;
        let mut top = 0.0f32;

        for (index, height) in self.heights.iter().enumerate() {
            let bottom = top + *height;
            if top >= window_end {
                break;
            }
            if bottom > offset && *height > 0.0 {
                start.get_or_insert(index);
                end = index + 1;
            }
            top = bottom;
        }

        match start {
            Some(start) => start..end,
            None => 0..0,
        }
    }
}
