//! End-to-end behaviour of the carousel orchestrator driven by a synthetic
//! clock: navigation, pointer swipes, wheel input and teardown.

use std::time::{Duration, Instant};

use glissade_config::{CarouselConfig, ConfigError, FreemodeSetting, SlideSpec, WheelConfig};
use glissade_core::gesture::PointerInput;
use glissade_core::wheel::WheelInput;
use glissade_core::{
    Carousel, CarouselError, CarouselEvent, MotionState, NavigateOptions, StaticGeometry,
    TransitionKind,
};
use glissade_model::{Size, Vec2};

const FRAME: Duration = Duration::from_millis(16);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Five 300px slides in a 900px container.
fn carousel(config: CarouselConfig) -> Carousel<StaticGeometry> {
    init_logging();
    let geometry =
        StaticGeometry::uniform(Size::new(900.0, 400.0), Size::new(300.0, 400.0), 5);
    Carousel::new(config, vec![SlideSpec::Measured; 5], geometry)
        .expect("valid carousel")
}

/// Tick every frame for `span`, returning the last frame time.
fn run(carousel: &mut Carousel<StaticGeometry>, from: Instant, span: Duration) -> Instant {
    let mut now = from;
    let end = from + span;
    while now < end {
        carousel.tick(now);
        now += FRAME;
    }
    carousel.tick(end);
    end
}

fn transition_starts(events: &[CarouselEvent]) -> Vec<(f64, TransitionKind)> {
    events
        .iter()
        .filter_map(|e| match e {
            CarouselEvent::TransitionStart { target, kind } => Some((*target, *kind)),
            _ => None,
        })
        .collect()
}

fn mouse(x: f64, at: Instant) -> PointerInput {
    PointerInput::mouse(Vec2::new(x, 200.0), at)
}

#[test]
fn to_last_slide_clamps_to_max_and_activates_it() {
    let mut c = carousel(CarouselConfig::default());
    assert_eq!(c.track().max(), 600.0);

    let t0 = Instant::now();
    assert!(c.to_slide(4, NavigateOptions::default()).unwrap());
    assert_eq!(c.track().target(), 600.0);
    assert_eq!(c.motion_state(), MotionState::Navigating);

    run(&mut c, t0, Duration::from_millis(700));
    assert_eq!(c.track().current(), 600.0);
    assert_eq!(c.active_index(), 4);
    assert!(c.is_end());
    assert_eq!(c.motion_state(), MotionState::Idle);

    let events = c.drain_events();
    assert!(events.contains(&CarouselEvent::ActiveSlide {
        index: 4,
        previous: 0
    }));
    assert!(events.contains(&CarouselEvent::TransitionEnd));
}

#[test]
fn looped_track_wraps_current() {
    let mut c = carousel(CarouselConfig {
        looping: true,
        ..CarouselConfig::default()
    });
    assert_eq!(c.track().max(), 1500.0);

    c.to_coord(1700.0, NavigateOptions::instant()).unwrap();
    c.tick(Instant::now());
    assert_eq!(c.track().current(), 1700.0);
    assert_eq!(c.track().looped_current(), 200.0);
    assert_eq!(c.active_index(), 1);
}

#[test]
fn follow_wheel_moves_target_and_clamps() {
    let mut c = carousel(CarouselConfig::default());
    let t0 = Instant::now();
    c.tick(t0);

    c.wheel(&WheelInput::pixels(50.0, 0.0, t0));
    assert_eq!(c.track().target(), 50.0);

    c.wheel(&WheelInput::pixels(-100.0, 0.0, t0 + FRAME));
    assert_eq!(c.track().target(), 0.0);

    let events = c.drain_events();
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, CarouselEvent::WheelStart))
            .count(),
        1
    );
    assert!(events.contains(&CarouselEvent::Wheel { delta: 50.0 }));
}

#[test]
fn wheel_end_settles_on_a_magnet() {
    let mut c = carousel(CarouselConfig::default());
    let t0 = Instant::now();
    c.tick(t0);

    c.wheel(&WheelInput::pixels(10.0, 0.0, t0));
    run(&mut c, t0, Duration::from_millis(1200));

    let events = c.drain_events();
    assert!(events.contains(&CarouselEvent::WheelEnd));
    assert_eq!(transition_starts(&events), vec![(0.0, TransitionKind::Stick)]);
    assert_eq!(c.track().current(), 0.0);
}

#[test]
fn discrete_wheel_advances_once_per_transition() {
    let mut c = carousel(CarouselConfig {
        wheel: WheelConfig {
            follow: false,
            ..WheelConfig::default()
        },
        ..CarouselConfig::default()
    });
    let t0 = Instant::now();
    c.tick(t0);

    c.wheel(&WheelInput::pixels(120.0, 0.0, t0));
    c.wheel(&WheelInput::pixels(120.0, 0.0, t0 + FRAME));

    let events = c.drain_events();
    assert_eq!(transition_starts(&events), vec![(300.0, TransitionKind::Wheel)]);
    assert_eq!(c.motion_state(), MotionState::DiscreteAdvance);

    run(&mut c, t0, Duration::from_millis(700));
    assert_eq!(c.active_index(), 1);
}

#[test]
fn slow_release_fails_inertia() {
    let mut c = carousel(CarouselConfig {
        freemode: FreemodeSetting::Free,
        ..CarouselConfig::default()
    });
    let t0 = Instant::now();
    c.tick(t0);

    c.pointer_down(&mouse(500.0, t0));
    c.pointer_move(&mouse(494.0, t0));
    c.pointer_move(&mouse(454.0, t0 + FRAME));
    c.pointer_up(&mouse(454.0, t0 + Duration::from_millis(1000)));

    let events = c.drain_events();
    assert!(events.contains(&CarouselEvent::InertiaFail));
    assert!(!events.contains(&CarouselEvent::InertiaStart));
}

#[test]
fn fast_release_starts_inertia_in_free_mode() {
    let mut c = carousel(CarouselConfig {
        freemode: FreemodeSetting::Free,
        ..CarouselConfig::default()
    });
    let t0 = Instant::now();
    c.tick(t0);

    c.pointer_down(&mouse(500.0, t0));
    c.pointer_move(&mouse(494.0, t0 + FRAME));
    c.pointer_move(&mouse(488.0, t0 + FRAME * 2));
    c.pointer_move(&mouse(482.0, t0 + FRAME * 3));
    c.pointer_up(&mouse(482.0, t0 + FRAME * 3));
    assert_eq!(c.motion_state(), MotionState::Releasing);

    let before = c.track().target();
    run(&mut c, t0 + FRAME * 3, Duration::from_millis(2500));

    let events = c.drain_events();
    assert!(events.contains(&CarouselEvent::InertiaStart));
    assert!(events.contains(&CarouselEvent::InertiaEnd));
    assert!(c.track().target() > before);
    assert!(c.track().target() <= c.track().max());
    assert_eq!(c.motion_state(), MotionState::Idle);
}

#[test]
fn sticky_quick_short_swipe_sticks_instead_of_advancing() {
    let mut c = carousel(CarouselConfig {
        freemode: FreemodeSetting::Sticky,
        ..CarouselConfig::default()
    });
    let t0 = Instant::now();
    c.tick(t0);

    c.pointer_down(&mouse(450.0, t0));
    c.pointer_move(&mouse(440.0, t0 + FRAME));
    c.pointer_move(&mouse(430.0, t0 + FRAME * 2));
    c.pointer_move(&mouse(420.0, t0 + FRAME * 3));
    c.tick(t0 + FRAME * 3);
    assert!(c.track().current() > 0.0);

    c.pointer_up(&mouse(420.0, t0 + FRAME * 4));

    let events = c.drain_events();
    assert_eq!(transition_starts(&events), vec![(0.0, TransitionKind::Stick)]);
    assert_eq!(c.motion_state(), MotionState::Sticking);

    run(&mut c, t0 + FRAME * 4, Duration::from_millis(700));
    assert_eq!(c.track().current(), 0.0);
    assert_eq!(c.active_index(), 0);
}

#[test]
fn quick_long_swipe_advances_one_slide() {
    let mut c = carousel(CarouselConfig::default());
    let t0 = Instant::now();
    c.tick(t0);

    c.pointer_down(&mouse(450.0, t0));
    c.pointer_move(&mouse(430.0, t0 + FRAME));
    assert!(c.is_swiping());
    c.pointer_move(&mouse(410.0, t0 + FRAME * 2));
    c.pointer_move(&mouse(390.0, t0 + FRAME * 3));
    c.pointer_move(&mouse(370.0, t0 + FRAME * 4));
    c.pointer_up(&mouse(370.0, t0 + FRAME * 5));

    let events = c.drain_events();
    assert!(events.iter().any(|e| matches!(e, CarouselEvent::SwipeStart(_))));
    assert!(events.iter().any(|e| matches!(e, CarouselEvent::SwipeEnd(_))));
    assert_eq!(
        transition_starts(&events),
        vec![(300.0, TransitionKind::Navigate)]
    );

    run(&mut c, t0 + FRAME * 5, Duration::from_millis(700));
    assert_eq!(c.active_index(), 1);
}

#[test]
fn vertical_drag_on_horizontal_carousel_aborts() {
    let mut c = carousel(CarouselConfig::default());
    let t0 = Instant::now();
    c.tick(t0);

    c.pointer_down(&PointerInput::mouse(Vec2::new(450.0, 100.0), t0));
    c.pointer_move(&PointerInput::mouse(Vec2::new(452.0, 140.0), t0 + FRAME));
    c.pointer_move(&PointerInput::mouse(Vec2::new(300.0, 140.0), t0 + FRAME * 2));
    c.pointer_up(&PointerInput::mouse(Vec2::new(300.0, 140.0), t0 + FRAME * 3));

    let events = c.drain_events();
    assert!(events.contains(&CarouselEvent::SwipeAbort));
    assert!(!events.iter().any(|e| matches!(e, CarouselEvent::SwipeStart(_))));
    assert_eq!(c.track().target(), 0.0);
}

#[test]
fn will_abort_vetoes_swipes() {
    let mut c = carousel(CarouselConfig::default()).with_will_abort(|_| true);
    let t0 = Instant::now();
    c.tick(t0);

    c.pointer_down(&mouse(450.0, t0));
    c.pointer_move(&mouse(400.0, t0 + FRAME));
    assert!(!c.is_swiping());
    assert!(c.drain_events().contains(&CarouselEvent::SwipeAbort));
}

#[test]
fn rewind_wraps_non_loop_navigation() {
    let t0 = Instant::now();

    let mut plain = carousel(CarouselConfig::default());
    plain.to_slide(4, NavigateOptions::instant()).unwrap();
    plain.tick(t0);
    assert!(!plain.next(NavigateOptions::default()));
    plain.to_slide(0, NavigateOptions::instant()).unwrap();
    plain.tick(t0 + FRAME);
    assert!(!plain.prev(NavigateOptions::default()));

    let mut rewinding = carousel(CarouselConfig {
        rewind: true,
        ..CarouselConfig::default()
    });
    assert!(rewinding.prev(NavigateOptions::instant()));
    rewinding.tick(t0);
    assert_eq!(rewinding.active_index(), 4);
    assert_eq!(rewinding.track().current(), 600.0);

    assert!(rewinding.next(NavigateOptions::instant()));
    rewinding.tick(t0 + FRAME);
    assert_eq!(rewinding.active_index(), 0);
    assert_eq!(rewinding.track().current(), 0.0);
}

#[test]
fn slides_to_scroll_steps_several_slides() {
    let mut c = carousel(CarouselConfig {
        slides_to_scroll: 2,
        ..CarouselConfig::default()
    });
    let t0 = Instant::now();
    assert!(c.next(NavigateOptions::default()));
    assert_eq!(c.track().target(), 600.0);
    run(&mut c, t0, Duration::from_millis(700));
    assert_eq!(c.active_index(), 2);
}

#[test]
fn looping_next_from_last_slide_keeps_moving_forward() {
    let mut c = carousel(CarouselConfig {
        looping: true,
        ..CarouselConfig::default()
    });
    let t0 = Instant::now();
    // the shortest way to the last slide is one step back across the seam
    c.to_slide(4, NavigateOptions::instant()).unwrap();
    c.tick(t0);
    assert_eq!(c.track().current(), -300.0);
    assert_eq!(c.track().looped_current(), 1200.0);
    assert_eq!(c.active_index(), 4);

    assert!(c.next(NavigateOptions::default()));
    assert_eq!(c.track().target(), 0.0);
    assert!(c.track().target() > c.track().current());
    run(&mut c, t0 + FRAME, Duration::from_millis(700));
    assert_eq!(c.active_index(), 0);
    assert_eq!(c.track().looped_current(), 0.0);
}

#[test]
fn rapid_next_calls_chain_from_the_pending_slide() {
    let mut c = carousel(CarouselConfig::default());
    let t0 = Instant::now();
    c.tick(t0);
    assert!(c.next(NavigateOptions::default()));
    c.tick(t0 + FRAME);
    assert!(c.next(NavigateOptions::default()));
    assert_eq!(c.track().target(), 600.0);

    let events = c.drain_events();
    assert!(events.contains(&CarouselEvent::TransitionCancel));
    run(&mut c, t0 + FRAME, Duration::from_millis(700));
    assert_eq!(c.active_index(), 2);
}

#[test]
fn out_of_range_slide_is_an_error() {
    let mut c = carousel(CarouselConfig::default());
    assert!(matches!(
        c.to_slide(9, NavigateOptions::default()),
        Err(CarouselError::SlideOutOfRange { index: 9, len: 5 })
    ));
}

#[test]
fn virtual_slide_without_size_is_rejected() {
    init_logging();
    let geometry = StaticGeometry::new(Size::new(900.0, 400.0), Vec::new());
    let result = Carousel::new(
        CarouselConfig::default(),
        vec![
            SlideSpec::virtual_sized(300.0),
            SlideSpec::Virtual { size: None },
        ],
        geometry,
    );
    assert!(matches!(
        result,
        Err(CarouselError::Config(ConfigError::VirtualSlideWithoutSize {
            index: 1
        }))
    ));
}

#[test]
fn virtual_slides_use_their_declared_size() {
    init_logging();
    let geometry = StaticGeometry::new(Size::new(900.0, 400.0), Vec::new());
    let c = Carousel::new(
        CarouselConfig::default(),
        vec![SlideSpec::virtual_sized(600.0); 3],
        geometry,
    )
    .unwrap();
    assert_eq!(c.track().max(), 900.0);
    assert_eq!(c.slides()[2].static_coord, 1200.0);
}

#[test]
fn destroy_stops_everything() {
    let mut c = carousel(CarouselConfig::default());
    let t0 = Instant::now();
    c.next(NavigateOptions::default());
    c.destroy();

    assert!(c.is_destroyed());
    assert!(!c.is_transitioning());
    assert_eq!(c.drain_events().last(), Some(&CarouselEvent::Destroy));

    assert!(!c.next(NavigateOptions::default()));
    assert!(matches!(
        c.to_slide(1, NavigateOptions::default()),
        Err(CarouselError::Destroyed)
    ));
    assert!(c.tick(t0 + FRAME).is_empty());
    c.wheel(&WheelInput::pixels(50.0, 0.0, t0));
    c.pointer_down(&mouse(450.0, t0));
    c.destroy();
    assert!(c.drain_events().is_empty());
}

#[test]
fn resize_rebuilds_bounds() {
    let mut c = carousel(CarouselConfig::default());
    c.geometry_mut().slides = vec![Size::new(400.0, 400.0); 5];
    c.resize();
    assert_eq!(c.track().max(), 1100.0);
    assert!(c.drain_events().contains(&CarouselEvent::Resize));
}

#[test]
fn unrepresentable_inertia_duration_fails_the_release() {
    let mut c = carousel(CarouselConfig {
        freemode: FreemodeSetting::Free,
        ..CarouselConfig::default()
    })
    .with_inertia_duration(|_| 1e30);
    let t0 = Instant::now();
    c.tick(t0);

    c.pointer_down(&mouse(500.0, t0));
    c.pointer_move(&mouse(480.0, t0 + FRAME));
    c.pointer_move(&mouse(460.0, t0 + FRAME * 2));
    c.pointer_move(&mouse(440.0, t0 + FRAME * 3));
    c.pointer_up(&mouse(440.0, t0 + FRAME * 3));

    let events = c.drain_events();
    assert!(events.contains(&CarouselEvent::InertiaFail));
    assert!(!events.contains(&CarouselEvent::InertiaStart));
    assert_ne!(c.motion_state(), MotionState::Releasing);
}

#[test]
fn inward_flick_from_overscroll_keeps_its_inertia() {
    let mut c = carousel(CarouselConfig {
        freemode: FreemodeSetting::Free,
        ..CarouselConfig::default()
    });
    let t0 = Instant::now();
    c.tick(t0);

    c.pointer_down(&mouse(300.0, t0));
    c.pointer_move(&mouse(350.0, t0 + FRAME));
    c.pointer_move(&mouse(400.0, t0 + FRAME * 2));
    c.pointer_move(&mouse(460.0, t0 + FRAME * 3));
    assert!(c.track().target() < c.track().min());

    let mut now = t0 + FRAME * 3;
    let mut x = 460.0;
    for _ in 0..4 {
        now += FRAME;
        x -= 15.0;
        c.pointer_move(&mouse(x, now));
    }
    c.pointer_up(&mouse(x, now));
    let released_at = c.track().target();
    assert!(released_at < c.track().min());
    assert_eq!(c.motion_state(), MotionState::Releasing);

    c.tick(now + FRAME);
    assert!(c.track().target() >= released_at);
    assert_eq!(c.motion_state(), MotionState::Releasing);

    run(&mut c, now + FRAME, Duration::from_millis(2500));
    let events = c.drain_events();
    assert!(events.contains(&CarouselEvent::InertiaEnd));
    assert!(!events.contains(&CarouselEvent::InertiaCancel));
    assert!(c.track().target() > c.track().min());
    assert!(c.track().target() <= c.track().max());
}

#[test]
fn huge_slides_to_scroll_does_not_overflow() {
    let t0 = Instant::now();

    let mut plain = carousel(CarouselConfig {
        slides_to_scroll: usize::MAX,
        ..CarouselConfig::default()
    });
    assert!(plain.next(NavigateOptions::default()));
    assert_eq!(plain.track().target(), 600.0);

    // usize::MAX - 1 is 4 modulo five slides
    let mut looped = carousel(CarouselConfig {
        looping: true,
        slides_to_scroll: usize::MAX - 1,
        ..CarouselConfig::default()
    });
    assert!(looped.next(NavigateOptions::default()));
    run(&mut looped, t0, Duration::from_millis(700));
    assert_eq!(looped.active_index(), 4);
}
