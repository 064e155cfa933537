//! Fail-open behavior when no animation infrastructure is installed.
//!
//! Kept in its own test binary: these tests rely on the process-global
//! scheduler never having been set.

use countup_animation::{is_scheduler_initialized, try_get_scheduler};
use countup_core::geometry::Rect;
use countup_core::Event;
use countup_widgets::{counter, CounterPhase};

#[test]
fn test_mount_without_scheduler_displays_target_immediately() {
    assert!(!is_scheduler_initialized());
    assert!(try_get_scheduler().is_none());

    let mut c = counter(100)
        .bounds(Rect::new(0.0, 1400.0, 200.0, 80.0))
        .mount();

    // Worst case is an instantly-correct, unanimated display
    assert_eq!(c.phase(), CounterPhase::Settled);
    assert_eq!(c.text(), "100");

    // Events and polls are harmless no-ops
    c.handle_event(&Event::scroll(Rect::new(0.0, 1000.0, 1280.0, 720.0)));
    c.update();
    assert_eq!(c.text(), "100");
    assert_eq!(c.phase(), CounterPhase::Settled);
}

#[test]
fn test_fail_open_negative_target() {
    let c = counter(-7).bounds(Rect::ZERO).mount();
    assert_eq!(c.text(), "-7");
    assert_eq!(c.phase(), CounterPhase::Settled);
}
