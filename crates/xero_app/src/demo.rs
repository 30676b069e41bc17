//! Headless demo host
//!
//! Builds the demo stack of colored items, feeds it scripted drags or raw
//! touches, and plays the frame clock until the region goes idle.

use std::ops::Range;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use xero_animation::{lock_scheduler, FrameClient, FrameScheduler};
use xero_core::{DragEvent, GesturePhase, PanGesture};
use xero_layout::ScrollableRegion;

use crate::config::XeroConfig;

/// One stacked demo item
#[derive(Debug, Clone, PartialEq)]
pub struct DemoItem {
    pub title: String,
    /// Hue in [0, 1], spread evenly over the items
    pub hue: f32,
    pub height: f32,
}

/// `count` items titled "Item 1".."Item N" with hue `i / N`
pub fn demo_items(count: usize, height: f32) -> Vec<DemoItem> {
    (1..=count)
        .map(|i| DemoItem {
            title: format!("Item {}", i),
            hue: i as f32 / count as f32,
            height,
        })
        .collect()
}

/// Outcome of one fling
#[derive(Debug, Clone, PartialEq)]
pub struct FlingReport {
    pub start_offset: f32,
    pub end_offset: f32,
    pub release_velocity: f32,
    pub frames: u32,
    /// Whether the glide ended against the top or bottom bound
    pub hit_edge: bool,
    /// Whether the frame cap cut the glide short
    pub truncated: bool,
    pub visible: Range<usize>,
}

/// The demo scene: one scroll region over the demo items
pub struct Demo {
    scheduler: Arc<Mutex<FrameScheduler>>,
    region: ScrollableRegion,
    items: Vec<DemoItem>,
    max_frames: u32,
}

impl Demo {
    pub fn from_config(config: &XeroConfig) -> Result<Self> {
        config.validate()?;

        let scheduler = Arc::new(Mutex::new(FrameScheduler::new()));
        lock_scheduler(&scheduler).set_target_fps(config.clock.fps)?;

        let mut region = ScrollableRegion::with_scheduler(
            config.viewport(),
            config.scroll_config()?,
            &scheduler,
        );
        region.set_safe_area(config.safe_area());

        let items = demo_items(config.demo.items, config.demo.item_height);
        for item in &items {
            region.add_child(item.height);
        }

        tracing::info!(
            "demo scene: {} items, extent={:.0}, viewport={:.0}x{:.0}, bounds=[{:.0}, {:.0}]",
            items.len(),
            region.content_extent(),
            config.viewport.width,
            config.viewport.height,
            region.min_offset(),
            region.max_offset()
        );

        Ok(Self {
            scheduler,
            region,
            items,
            max_frames: config.clock.max_frames,
        })
    }

    pub fn region(&self) -> &ScrollableRegion {
        &self.region
    }

    /// Titles of the items currently in view
    pub fn visible_titles(&self) -> Vec<&str> {
        self.items[self.region.visible_children()]
            .iter()
            .map(|item| item.title.as_str())
            .collect()
    }

    fn frame_duration(&self) -> f32 {
        lock_scheduler(&self.scheduler).frame_duration()
    }

    /// Apply one finger movement; returns the new offset
    pub fn drag(&mut self, delta: f32) -> f32 {
        let velocity = delta / self.frame_duration();
        self.region.handle_drag_event(DragEvent::changed(delta, velocity));
        self.region.offset()
    }

    /// Drag to `start`, release with `velocity`, and glide until idle
    pub fn fling(&mut self, start: f32, velocity: f32) -> FlingReport {
        self.region.handle_drag_event(DragEvent::new(GesturePhase::Began, 0.0, 0.0));
        let delta = self.region.offset() - start;
        self.region.handle_drag_event(DragEvent::changed(delta, velocity));
        let start_offset = self.region.offset();

        self.region.handle_drag_event(DragEvent::ended(velocity));
        self.glide(start_offset, velocity)
    }

    /// Feed finger positions (one per frame) through a pan recognizer,
    /// lift the finger at the last one, and glide until idle
    pub fn touch(&mut self, positions: &[f32]) -> Option<FlingReport> {
        let (&first, rest) = positions.split_first()?;
        let frame_ms = self.frame_duration() as f64 * 1000.0;
        let mut pan = PanGesture::new();

        pan.touch_down(first, 0.0);
        self.region.handle_pan(&mut pan);
        let touch_offset = self.region.offset();

        let mut time = 0.0;
        let mut last = first;
        for &y in rest {
            time += frame_ms;
            pan.touch_move(y, time);
            self.region.handle_pan(&mut pan);
            last = y;
        }

        let start_offset = self.region.offset();
        pan.touch_up(last, time + frame_ms);
        let release = self.region.handle_pan(&mut pan)?;
        tracing::debug!(
            "touch released after {:.1} points at velocity {:.1}",
            start_offset - touch_offset,
            release.velocity
        );
        Some(self.glide(start_offset, release.velocity))
    }

    fn glide(&mut self, start_offset: f32, release_velocity: f32) -> FlingReport {
        let mut frames = 0;
        let mut truncated = false;
        while self.region.wants_frames() {
            if frames >= self.max_frames {
                tracing::warn!("frame cap of {} reached, stopping glide", self.max_frames);
                self.region.stop_deceleration();
                truncated = true;
                break;
            }
            let frame = lock_scheduler(&self.scheduler).begin_fixed_frame();
            self.region.on_frame(frame.duration);
            frames += 1;
            tracing::debug!(
                "frame {} offset={:.2} velocity={:.2}",
                frame.index,
                self.region.offset(),
                self.region.velocity()
            );
        }

        let end_offset = self.region.offset();
        let region = &self.region;
        let hit_edge = end_offset == region.min_offset() || end_offset == region.max_offset();

        FlingReport {
            start_offset,
            end_offset,
            release_velocity,
            frames,
            hit_edge,
            truncated,
            visible: region.visible_children(),
        }
    }
}
