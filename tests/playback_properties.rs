//! Property tests for the playback state machine driven through arbitrary
//! control sequences.

use std::time::Duration;

use proptest::prelude::*;
use stepwise::prelude::*;

#[derive(Debug, Clone)]
enum Control {
    Play,
    Pause,
    Toggle,
    Restart,
    StepForward,
    StepBackward,
    JumpTo(usize),
    JumpToStart,
    JumpToEnd,
    Speed(SpeedPreset),
    Advance(u64),
    Reset,
}

fn control() -> impl Strategy<Value = Control> {
    prop_oneof![
        Just(Control::Play),
        Just(Control::Pause),
        Just(Control::Toggle),
        Just(Control::Restart),
        Just(Control::StepForward),
        Just(Control::StepBackward),
        (0usize..40).prop_map(Control::JumpTo),
        Just(Control::JumpToStart),
        Just(Control::JumpToEnd),
        proptest::sample::select(SpeedPreset::ALL.to_vec()).prop_map(Control::Speed),
        (0u64..5000).prop_map(Control::Advance),
        Just(Control::Reset),
    ]
}

fn trace_of(len: usize) -> Trace<usize> {
    let mut recorder = TraceRecorder::new();
    for i in 0..len {
        recorder.emit(i);
    }
    recorder.finish()
}

fn apply(controller: &mut PlaybackController<usize>, control: &Control) {
    match control {
        Control::Play => controller.play(),
        Control::Pause => controller.pause(),
        Control::Toggle => controller.toggle(),
        Control::Restart => controller.restart(),
        Control::StepForward => controller.step_forward(),
        Control::StepBackward => controller.step_backward(),
        Control::JumpTo(i) => controller.jump_to(*i),
        Control::JumpToStart => controller.jump_to_start(),
        Control::JumpToEnd => controller.jump_to_end(),
        Control::Speed(preset) => controller.set_speed(*preset),
        Control::Advance(ms) => {
            controller.advance(Duration::from_millis(*ms));
        }
        Control::Reset => controller.reset(),
    }
}

/// Feed `dt`, then keep calling with no new time until nothing is due.
fn feed(controller: &mut PlaybackController<usize>, dt: Duration) {
    let mut dt = dt;
    while controller.advance(dt) {
        dt = Duration::ZERO;
    }
}

proptest! {
    /// Whatever the control sequence, the cursor stays in bounds and the
    /// state agrees with it.
    #[test]
    fn prop_controls_keep_invariants(
        len in 1usize..30,
        controls in proptest::collection::vec(control(), 0..80),
    ) {
        let mut controller = PlaybackController::new();
        let _ = controller.load(trace_of(len));

        for c in &controls {
            apply(&mut controller, c);
            let view = controller.view();
            match view.state {
                PlaybackState::Unloaded => {
                    prop_assert!(view.cursor.is_none());
                    prop_assert!(view.frame.is_none());
                    prop_assert_eq!(view.len, 0);
                }
                state => {
                    let cursor = view.cursor.unwrap();
                    prop_assert!(cursor < view.len);
                    prop_assert_eq!(view.frame.map(|f| *f.payload()), Some(cursor));
                    if state == PlaybackState::Finished {
                        prop_assert_eq!(cursor, view.len - 1);
                    }
                    if state == PlaybackState::Playing {
                        prop_assert!(cursor < view.len - 1);
                        prop_assert!(controller.until_next_tick().is_some());
                    }
                }
            }
            prop_assert!(controller.interval() >= stepwise::playback::MIN_INTERVAL);
            prop_assert!(controller.interval() <= stepwise::playback::MAX_INTERVAL);
        }
    }

    /// Autoplay never skips a frame: however much time one call carries,
    /// the cursor moves by at most one, and every frame is shown in order.
    #[test]
    fn prop_autoplay_visits_every_frame(
        len in 2usize..30,
        chunks in proptest::collection::vec(1u64..2000, 1..200),
    ) {
        let mut controller = PlaybackController::new();
        let _ = controller.load(trace_of(len));
        controller.set_speed(SpeedPreset::Fastest);
        controller.play();

        let mut shown = vec![0];
        for ms in chunks {
            let before = controller.cursor().unwrap();
            let moved = controller.advance(Duration::from_millis(ms));
            let after = controller.cursor().unwrap();
            prop_assert!(after - before <= 1);
            prop_assert_eq!(after, before + usize::from(moved));
            if moved {
                shown.push(after);
            }
        }
        prop_assert_eq!(shown, (0..=controller.cursor().unwrap()).collect::<Vec<_>>());
    }

    /// Wall time split into any chunks, with every backlog drained, lands on
    /// the same frame as one uninterrupted stretch drained the same way.
    #[test]
    fn prop_advance_is_chunking_independent(
        len in 2usize..40,
        chunks in proptest::collection::vec(0u64..1200, 1..50),
    ) {
        let total: u64 = chunks.iter().sum();

        let mut chunked = PlaybackController::new();
        let _ = chunked.load(trace_of(len));
        chunked.play();
        for ms in &chunks {
            feed(&mut chunked, Duration::from_millis(*ms));
        }

        let mut whole = PlaybackController::new();
        let _ = whole.load(trace_of(len));
        whole.play();
        feed(&mut whole, Duration::from_millis(total));

        prop_assert_eq!(chunked.cursor(), whole.cursor());
        prop_assert_eq!(chunked.state(), whole.state());
    }
}

#[test]
fn test_empty_trace_stays_unloaded() {
    let mut controller: PlaybackController<usize> = PlaybackController::new();
    assert_eq!(controller.load(trace_of(0)), LoadOutcome::Empty);
    controller.play();
    controller.step_forward();
    controller.jump_to_end();
    assert_eq!(controller.state(), PlaybackState::Unloaded);
    assert!(controller.cursor().is_none());
}

#[test]
fn test_reload_replaces_live_trace() {
    let mut controller = PlaybackController::new();
    let _ = controller.load(trace_of(10));
    controller.play();
    feed(&mut controller, Duration::from_millis(3000));
    assert_eq!(controller.cursor(), Some(4));

    assert_eq!(controller.load(trace_of(3)), LoadOutcome::Loaded { frames: 3 });
    assert_eq!(controller.state(), PlaybackState::Paused);
    assert_eq!(controller.cursor(), Some(0));
    assert!(controller.until_next_tick().is_none());
}

#[test]
fn test_speed_change_applies_from_next_tick() {
    let mut controller = PlaybackController::new();
    let _ = controller.load(trace_of(10));
    controller.play();
    controller.advance(Duration::from_millis(700));
    assert_eq!(controller.cursor(), Some(0));

    // The 700ms accrued at Normal speed do not count toward Fastest.
    controller.set_speed(SpeedPreset::Fastest);
    controller.advance(Duration::from_millis(200));
    assert_eq!(controller.cursor(), Some(0));
    controller.advance(Duration::from_millis(50));
    assert_eq!(controller.cursor(), Some(1));
}
