//! Countup Widget Library
//!
//! Visibility-triggered animated counters: a counter renders `0` until its
//! element first scrolls into the viewport, then counts up to its target
//! with spring easing, displaying whole numbers only and never passing the
//! target.
//!
//! ```rust
//! use countup_core::geometry::Rect;
//! use countup_core::Event;
//! use countup_widgets::counter;
//!
//! // No scheduler installed here, so the counter renders settled
//! let mut age = counter(30).bounds(Rect::new(0.0, 1400.0, 200.0, 80.0)).mount();
//! age.handle_event(&Event::scroll(Rect::new(0.0, 1000.0, 1280.0, 720.0)));
//! assert_eq!(age.text(), "30");
//! ```

pub mod counter;
pub mod visibility;
pub mod widget;

pub use counter::{counter, AnimatedCounter, CounterBuilder, CounterPhase};
pub use visibility::{InView, VisibilityObserver};
pub use widget::{Widget, WidgetId, WidgetTree};
