//! Integration tests for drag input + frame scheduler + momentum scroll
//!
//! These tests verify that:
//! - The offset never leaves its bounds, whatever the input sequence
//! - The frame subscription is held exactly while decelerating
//! - A host loop driving the scheduler settles every fling
//! - Raw touches fed through the pan recognizer produce a fling

use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use xero_layout::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

fn demo_region(scheduler: &Arc<Mutex<FrameScheduler>>) -> ScrollableRegion {
    let mut region = ScrollableRegion::with_scheduler(
        Size::new(390.0, 800.0),
        ScrollConfig::default(),
        scheduler,
    );
    for _ in 0..20 {
        region.add_child(200.0);
    }
    region
}

/// Drive frames the way a display link would, until the client goes idle
fn run_frames(scheduler: &Arc<Mutex<FrameScheduler>>, client: &mut impl FrameClient) -> u32 {
    let mut frames = 0;
    while client.wants_frames() {
        let frame = {
            let mut scheduler = scheduler.lock().unwrap();
            assert!(scheduler.has_subscribers());
            scheduler.begin_fixed_frame()
        };
        client.on_frame(frame.duration);
        frames += 1;
        assert!(frames < 10_000, "fling never settled");
    }
    frames
}

#[test]
fn test_drag_scenario() {
    let mut region = ScrollableRegion::new(Size::new(390.0, 800.0));
    region.add_child(2000.0);

    region.handle_drag(GesturePhase::Changed, -50.0, 0.0);
    assert_eq!(region.offset(), 50.0);
    assert_eq!((region.min_offset(), region.max_offset()), (0.0, 1200.0));
}

#[test]
fn test_fling_scenario_clamps_at_bottom() {
    let scheduler = Arc::new(Mutex::new(FrameScheduler::new()));
    let mut region = ScrollableRegion::with_scheduler(
        Size::new(390.0, 800.0),
        ScrollConfig::default(),
        &scheduler,
    );
    region.add_child(2000.0);
    region.handle_drag(GesturePhase::Changed, -1150.0, 0.0);

    region.handle_drag(GesturePhase::Ended, 0.0, -500.0);
    assert_eq!(region.deceleration_rate(), 0.95);
    assert_eq!(scheduler.lock().unwrap().subscription_count(), 1);

    run_frames(&scheduler, &mut region);

    assert_eq!(region.offset(), 1200.0);
    assert!(!region.is_decelerating());
    assert_eq!(scheduler.lock().unwrap().subscription_count(), 0);
}

#[test]
fn test_empty_region_scenario() {
    let mut region = ScrollableRegion::new(Size::new(390.0, 800.0));
    assert_eq!(region.max_offset(), region.min_offset());
    assert_eq!(region.max_offset(), 0.0);

    for delta in [-300.0, 120.0, -1.0, 5000.0] {
        region.handle_drag(GesturePhase::Changed, delta, delta * 10.0);
        assert_eq!(region.offset(), 0.0);
    }
    region.handle_drag(GesturePhase::Ended, 0.0, -700.0);
    while region.tick(FRAME) {}
    assert_eq!(region.offset(), 0.0);
}

#[test]
fn test_host_loop_settles_mid_content() {
    let scheduler = Arc::new(Mutex::new(FrameScheduler::new()));
    let mut region = demo_region(&scheduler);

    region.handle_drag(GesturePhase::Began, 0.0, 0.0);
    region.handle_drag(GesturePhase::Changed, -1000.0, -1200.0);
    region.handle_drag(GesturePhase::Ended, 0.0, -1200.0);

    let frames = run_frames(&scheduler, &mut region);
    let decay = region.config().deceleration;
    assert_eq!(frames, decay.frames_to_settle(-1200.0));

    let expected = 1000.0 + decay.projected_distance(1200.0, FRAME);
    assert!((region.offset() - expected).abs() < 1.0);
    assert!(!scheduler.lock().unwrap().has_subscribers());
}

#[test]
fn test_touch_stream_fling() {
    let scheduler = Arc::new(Mutex::new(FrameScheduler::new()));
    let mut region = demo_region(&scheduler);
    let mut pan = PanGesture::new();

    // Finger sweeps upward 30 points per 16ms frame
    pan.touch_down(700.0, 0.0);
    region.handle_pan(&mut pan);
    let mut y = 700.0;
    for i in 1..=10 {
        y -= 30.0;
        pan.touch_move(y, i as f64 * 16.0);
        region.handle_pan(&mut pan);
    }
    assert_eq!(region.offset(), 300.0);
    assert_eq!(region.state(), ScrollState::Dragging);

    pan.touch_up(y, 176.0);
    let release = region.handle_pan(&mut pan).unwrap();
    assert_eq!(release.phase, GesturePhase::Ended);
    assert!(release.velocity < 0.0);
    assert!(region.is_decelerating());

    run_frames(&scheduler, &mut region);
    assert!(region.offset() > 300.0);
    assert!(region.offset() <= region.max_offset());
}

#[test]
fn test_two_regions_share_a_scheduler() {
    let scheduler = Arc::new(Mutex::new(FrameScheduler::new()));
    let mut a = demo_region(&scheduler);
    let mut b = demo_region(&scheduler);

    a.handle_drag(GesturePhase::Ended, 0.0, -400.0);
    b.handle_drag(GesturePhase::Ended, 0.0, -400.0);
    assert_eq!(scheduler.lock().unwrap().subscription_count(), 2);

    a.stop_deceleration();
    assert_eq!(scheduler.lock().unwrap().subscription_count(), 1);
    assert!(b.is_decelerating());

    drop(b);
    assert_eq!(scheduler.lock().unwrap().subscription_count(), 0);
}

#[derive(Debug, Clone)]
enum Input {
    Drag(GesturePhase, f32, f32),
    Tick,
    Child(f32),
    Viewport(f32),
    SafeArea(f32, f32),
}

fn phase() -> impl Strategy<Value = GesturePhase> {
    prop_oneof![
        Just(GesturePhase::Began),
        Just(GesturePhase::Changed),
        Just(GesturePhase::Ended),
        Just(GesturePhase::Cancelled),
    ]
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        (phase(), -3000.0f32..3000.0, -5000.0f32..5000.0)
            .prop_map(|(phase, d, v)| Input::Drag(phase, d, v)),
        Just(Input::Tick),
        (0.0f32..500.0).prop_map(Input::Child),
        (0.0f32..2000.0).prop_map(Input::Viewport),
        (0.0f32..100.0, 0.0f32..100.0).prop_map(|(top, bottom)| Input::SafeArea(top, bottom)),
    ]
}

proptest! {
    #[test]
    fn prop_offset_stays_in_bounds(
        viewport_height in 0.0f32..2000.0,
        top in 0.0f32..100.0,
        bottom in 0.0f32..100.0,
        children in prop::collection::vec(0.0f32..600.0, 0..30),
        inputs in prop::collection::vec(input(), 1..200),
    ) {
        let scheduler = Arc::new(Mutex::new(FrameScheduler::new()));
        let mut region = ScrollableRegion::with_scheduler(
            Size::new(390.0, viewport_height),
            ScrollConfig::default(),
            &scheduler,
        );
        region.set_safe_area(Insets::new(top, bottom));
        for height in children {
            region.add_child(height);
        }

        for input in inputs {
            match input {
                Input::Drag(phase, delta, velocity) => region.handle_drag(phase, delta, velocity),
                Input::Tick => {
                    region.tick(FRAME);
                }
                Input::Child(height) => region.add_child(height),
                Input::Viewport(height) => region.set_viewport(Size::new(390.0, height)),
                Input::SafeArea(top, bottom) => region.set_safe_area(Insets::new(top, bottom)),
            }

            let offset = region.offset();
            prop_assert!(offset.is_finite());
            prop_assert!(region.min_offset() <= offset && offset <= region.max_offset(),
                "offset {} outside [{}, {}]", offset, region.min_offset(), region.max_offset());

            let expected_subscriptions = usize::from(region.is_decelerating());
            prop_assert_eq!(scheduler.lock().unwrap().subscription_count(), expected_subscriptions);
        }
    }

    #[test]
    fn prop_velocity_strictly_decays(velocity in -8000.0f32..8000.0, rate in 0.5f32..0.99) {
        prop_assume!(velocity.abs() >= 0.1);

        let mut region = ScrollableRegion::new(Size::new(390.0, 800.0));
        region.add_child(1_000_000.0);
        region.set_deceleration_rate(rate).unwrap();
        region.handle_drag(GesturePhase::Changed, -500_000.0, 0.0);
        region.handle_drag(GesturePhase::Ended, 0.0, velocity);

        let bound = region.config().deceleration.frames_to_settle(velocity) + 1;
        let mut ticks = 0;
        let mut speed = region.velocity().abs();
        loop {
            let running = region.tick(FRAME);
            ticks += 1;
            prop_assert!(region.velocity().abs() < speed);
            speed = region.velocity().abs();
            if !running {
                break;
            }
            prop_assert!(ticks <= bound);
        }
        prop_assert!(speed < 0.1);
    }

    #[test]
    fn prop_restart_never_leaks(restarts in 1usize..20) {
        let scheduler = Arc::new(Mutex::new(FrameScheduler::new()));
        let mut region = demo_region(&scheduler);
        region.handle_drag(GesturePhase::Changed, -500.0, -900.0);
        for _ in 0..restarts {
            region.start_deceleration();
        }
        prop_assert_eq!(scheduler.lock().unwrap().subscription_count(), 1);
        region.stop_deceleration();
        region.stop_deceleration();
        prop_assert_eq!(scheduler.lock().unwrap().subscription_count(), 0);
    }
}
