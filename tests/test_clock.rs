use std::time::{Duration, Instant};

use space_blaster::clock::FrameClock;

#[test]
fn period_is_one_second_over_fps() {
    assert_eq!(FrameClock::new(100).period(), Duration::from_millis(10));
    assert_eq!(FrameClock::new(60).period(), Duration::from_secs(1) / 60);
}

#[test]
fn zero_fps_is_treated_as_one() {
    assert_eq!(FrameClock::new(0).period(), Duration::from_secs(1));
}

#[test]
fn first_tick_returns_immediately() {
    let mut clock = FrameClock::new(1);
    let started = Instant::now();
    assert_eq!(clock.tick(), Duration::ZERO);
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[test]
fn later_ticks_wait_out_the_period() {
    let mut clock = FrameClock::new(100);
    clock.tick();
    assert!(clock.tick() >= Duration::from_millis(10));
    assert!(clock.tick() >= Duration::from_millis(10));
}
