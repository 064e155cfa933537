//! Spring-animated count-up counter
//!
//! `AnimatedCounter` renders a target integer by counting up from 0 with
//! spring easing, starting the first time its element scrolls into view.
//! Intermediate values are truncated toward zero and never pass the target,
//! so spring overshoot is invisible; when the spring settles the display
//! snaps to exactly the target.
//!
//! ```ignore
//! let mut age = counter(30)
//!     .bounds(Rect::new(0.0, 1400.0, 200.0, 80.0))
//!     .duration_ms(3000)
//!     .mount();
//!
//! // per frame:
//! age.handle_event(&Event::scroll(viewport));
//! scheduler.lock().unwrap().tick();
//! age.update();
//! render(age.text());
//! ```

use std::sync::{Arc, Mutex};

use countup_animation::{
    try_get_scheduler, ChangeSubscription, SchedulerHandle, SharedAnimatedValue, SpringConfig,
};
use countup_core::events::{event_types, Event, EventType};
use countup_core::fsm::{Fsm, StateTransitions};
use countup_core::geometry::Rect;

use crate::visibility::{InView, VisibilityObserver};
use crate::widget::Widget;

/// Lifecycle phase of a counter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CounterPhase {
    /// Not yet visible; displays 0
    #[default]
    Idle,
    /// Visible; spring running toward the target
    Counting,
    /// Display equals the target; terminal
    Settled,
}

impl StateTransitions for CounterPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (CounterPhase::Idle, event_types::ENTER_VIEW) => Some(CounterPhase::Counting),
            (CounterPhase::Counting, event_types::DRIVER_SETTLED) => Some(CounterPhase::Settled),
            _ => None,
        }
    }
}

/// Create a counter that counts up to `target` once visible
pub fn counter(target: i64) -> CounterBuilder {
    CounterBuilder {
        target,
        bounds: Rect::ZERO,
        duration_ms: 3000,
        spring: None,
    }
}

/// Builder for [`AnimatedCounter`]
pub struct CounterBuilder {
    target: i64,
    bounds: Rect,
    duration_ms: u32,
    spring: Option<SpringConfig>,
}

impl CounterBuilder {
    /// Set the element's bounding box for visibility detection
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Approximate animation duration. Ignored if an explicit spring
    /// config is set.
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Use an explicit spring config instead of the duration-derived one
    pub fn spring(mut self, config: SpringConfig) -> Self {
        self.spring = Some(config);
        self
    }

    /// Mount against the global animation scheduler.
    ///
    /// Fail-open: when no scheduler is installed the counter degrades to an
    /// instantly-settled display of the target. Decorative UI never errors.
    pub fn mount(self) -> AnimatedCounter {
        match try_get_scheduler() {
            Some(scheduler) => self.mount_with(&scheduler),
            None => {
                tracing::warn!(
                    "no animation scheduler installed; counter renders {} unanimated",
                    self.target
                );
                AnimatedCounter::settled(self.target, self.bounds)
            }
        }
    }

    /// Mount against an explicit scheduler handle
    pub fn mount_with(self, scheduler: &SchedulerHandle) -> AnimatedCounter {
        let config = self
            .spring
            .unwrap_or_else(|| SpringConfig::with_duration(self.duration_ms));
        let value = scheduler.lock().unwrap().create_value(0.0, config);

        let cell = Arc::new(Mutex::new(0i64));
        let subscription =
            ChangeSubscription::subscribe(&value, Self::display_writer(self.target, &cell));

        AnimatedCounter {
            target: self.target,
            observer: InView::new(self.bounds),
            fsm: Fsm::new(CounterPhase::Idle),
            value: Some(value),
            cell,
            _subscription: Some(subscription),
        }
    }

    /// Change callback: truncate toward zero and clamp in the direction of
    /// travel. Overshoot past the target is suppressed, and the ordered
    /// clamp keeps the displayed sequence monotonic through back-swings.
    fn display_writer(target: i64, cell: &Arc<Mutex<i64>>) -> impl FnMut(f32) + Send + 'static {
        let cell = Arc::clone(cell);
        move |latest| {
            let next = latest.trunc() as i64;
            let mut displayed = cell.lock().unwrap();
            if target >= 0 {
                if next <= target {
                    *displayed = (*displayed).max(next);
                }
            } else if next >= target {
                *displayed = (*displayed).min(next);
            }
        }
    }
}

/// A numeric counter that animates from 0 to its target on first visibility
pub struct AnimatedCounter {
    target: i64,
    observer: InView,
    fsm: Fsm<CounterPhase>,
    /// None when mounted fail-open without animation infrastructure
    value: Option<SharedAnimatedValue>,
    cell: Arc<Mutex<i64>>,
    _subscription: Option<ChangeSubscription>,
}

impl AnimatedCounter {
    /// A counter already settled at its target (the fail-open degradation)
    fn settled(target: i64, bounds: Rect) -> Self {
        Self {
            target,
            observer: InView::new(bounds),
            fsm: Fsm::new(CounterPhase::Settled),
            value: None,
            cell: Arc::new(Mutex::new(target)),
            _subscription: None,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// The integer currently displayed
    pub fn displayed(&self) -> i64 {
        *self.cell.lock().unwrap()
    }

    pub fn phase(&self) -> CounterPhase {
        self.fsm.current()
    }

    /// Whether the element has ever been visible
    pub fn has_entered(&self) -> bool {
        self.observer.has_entered()
    }

    /// The rendered text: the displayed integer, undecorated
    pub fn text(&self) -> String {
        self.displayed().to_string()
    }

    /// Shared handle to the displayed integer, for render passes that
    /// sample widget state per frame rather than pulling through the widget
    pub fn display(&self) -> Arc<Mutex<i64>> {
        Arc::clone(&self.cell)
    }

    /// Handle a viewport event. The first event that brings the element
    /// into view starts the count-up; later sightings are no-ops.
    pub fn handle_event(&mut self, event: &Event) {
        match event.event_type {
            event_types::SCROLL | event_types::RESIZE => {
                if let Some(viewport) = event.viewport() {
                    if self.observer.observe(viewport) {
                        self.begin();
                    }
                }
            }
            event_types::LAYOUT => {
                if let Some(bounds) = event.bounds() {
                    if self.observer.set_bounds(bounds) {
                        self.begin();
                    }
                }
            }
            _ => {}
        }
    }

    /// Poll the driver after a scheduler tick; snaps the display to the
    /// exact target once the driver reports settled.
    pub fn update(&mut self) {
        if !self.fsm.is_in(CounterPhase::Counting) {
            return;
        }
        let Some(value) = &self.value else {
            return;
        };

        if value.lock().unwrap().is_settled() {
            // Snap: floating-point convergence below the target must not
            // leave the terminal display off by one.
            *self.cell.lock().unwrap() = self.target;
            self.fsm.send(event_types::DRIVER_SETTLED);
            tracing::debug!("counter settled at {}", self.target);
        }
    }

    /// Hand the target to the driver, exactly once per instance
    fn begin(&mut self) {
        if !self.fsm.is_in(CounterPhase::Idle) {
            return;
        }
        self.fsm.send(event_types::ENTER_VIEW);

        if let Some(value) = &self.value {
            value.lock().unwrap().set_target(self.target as f32);
            tracing::debug!("counter animating 0 -> {}", self.target);
        }
    }
}

impl Widget for AnimatedCounter {
    fn handle_event(&mut self, event: &Event) {
        AnimatedCounter::handle_event(self, event);
    }

    fn update(&mut self) {
        AnimatedCounter::update(self);
    }

    fn text(&self) -> String {
        AnimatedCounter::text(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countup_animation::AnimationScheduler;

    const FRAME: f32 = 1.0 / 60.0;

    fn scheduler() -> SchedulerHandle {
        Arc::new(Mutex::new(AnimationScheduler::new()))
    }

    fn viewport_at(y: f32) -> Rect {
        Rect::new(0.0, y, 1280.0, 720.0)
    }

    #[test]
    fn test_idle_until_visible() {
        let scheduler = scheduler();
        let mut c = counter(30)
            .bounds(Rect::new(0.0, 1400.0, 200.0, 80.0))
            .mount_with(&scheduler);

        assert_eq!(c.phase(), CounterPhase::Idle);
        assert_eq!(c.text(), "0");

        // Ticks before visibility change nothing
        for _ in 0..30 {
            scheduler.lock().unwrap().advance(FRAME);
            c.update();
        }
        assert_eq!(c.phase(), CounterPhase::Idle);
        assert_eq!(c.text(), "0");
    }

    #[test]
    fn test_counts_up_to_target() {
        let scheduler = scheduler();
        let mut c = counter(30)
            .bounds(Rect::new(0.0, 1400.0, 200.0, 80.0))
            .duration_ms(1000)
            .mount_with(&scheduler);

        c.handle_event(&Event::scroll(viewport_at(1000.0)));
        assert_eq!(c.phase(), CounterPhase::Counting);

        for _ in 0..60 * 4 {
            scheduler.lock().unwrap().advance(FRAME);
            c.update();
        }

        assert_eq!(c.phase(), CounterPhase::Settled);
        assert_eq!(c.displayed(), 30);
        assert_eq!(c.text(), "30");
    }

    #[test]
    fn test_zero_target_settles_without_motion() {
        let scheduler = scheduler();
        let mut c = counter(0)
            .bounds(Rect::new(0.0, 100.0, 200.0, 80.0))
            .mount_with(&scheduler);

        c.handle_event(&Event::scroll(viewport_at(0.0)));
        scheduler.lock().unwrap().advance(FRAME);
        c.update();

        assert_eq!(c.phase(), CounterPhase::Settled);
        assert_eq!(c.text(), "0");
    }

    #[test]
    fn test_fail_open_without_scheduler() {
        // Constructed directly: the degraded path mount() takes when no
        // global scheduler is installed.
        let c = AnimatedCounter::settled(100, Rect::ZERO);
        assert_eq!(c.phase(), CounterPhase::Settled);
        assert_eq!(c.text(), "100");
    }

    #[test]
    fn test_layout_event_updates_bounds() {
        let scheduler = scheduler();
        let mut c = counter(5)
            .bounds(Rect::new(0.0, 5000.0, 200.0, 80.0))
            .mount_with(&scheduler);

        c.handle_event(&Event::scroll(viewport_at(0.0)));
        assert_eq!(c.phase(), CounterPhase::Idle);

        // Layout moves the element into the already-seen viewport
        c.handle_event(&Event::layout(Rect::new(0.0, 300.0, 200.0, 80.0)));
        assert_eq!(c.phase(), CounterPhase::Counting);
    }
}
