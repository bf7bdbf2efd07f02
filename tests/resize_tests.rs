// Host-side tests for the resize debouncer.
mod common;

use common::constants::RESIZE_DEBOUNCE_MS;
use common::resize::ResizeDebouncer;

#[test]
fn fires_once_after_quiet_window() {
    let mut d = ResizeDebouncer::default();
    assert!(!d.poll(0.0));
    d.notify(0.0);
    assert!(d.is_pending());
    assert!(!d.poll(RESIZE_DEBOUNCE_MS - 1.0));
    assert!(d.poll(RESIZE_DEBOUNCE_MS));
    assert!(!d.poll(RESIZE_DEBOUNCE_MS + 1.0));
    assert!(!d.is_pending());
}

#[test]
fn bursts_collapse_to_the_last_event() {
    let mut d = ResizeDebouncer::new(200.0);
    for t in [0.0, 50.0, 120.0, 190.0, 260.0] {
        d.notify(t);
        assert!(!d.poll(t + 10.0));
    }
    assert!(!d.poll(459.0));
    assert!(d.poll(460.0));
    assert!(!d.poll(10_000.0));
}
