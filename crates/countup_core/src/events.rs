//! Viewport and lifecycle event model
//!
//! Widgets receive discrete events on the UI thread: viewport geometry
//! changes (scroll, layout, resize) and the internal transitions derived
//! from them. Event types are plain `u32` constants so typed state machines
//! can match on them without generics at the dispatch boundary.

use crate::geometry::Rect;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Viewport scrolled; carries the new visible rect
    pub const SCROLL: EventType = 1;
    /// Element bounds changed; carries the new bounding rect
    pub const LAYOUT: EventType = 2;
    /// Viewport resized; carries the new visible rect
    pub const RESIZE: EventType = 3;

    /// Element intersected the viewport for the first time
    pub const ENTER_VIEW: EventType = 10;
    /// Easing driver converged on its target
    pub const DRIVER_SETTLED: EventType = 11;

    // Element lifecycle events
    pub const MOUNT: EventType = 20;
    pub const UNMOUNT: EventType = 21;
}

/// An event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    /// The visible viewport rect (scroll/resize)
    Viewport(Rect),
    /// An element's bounding rect (layout)
    Bounds(Rect),
    /// A scalar payload (driver values)
    Value(f32),
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self { event_type, data }
    }

    /// Viewport scrolled to a new visible rect
    pub fn scroll(viewport: Rect) -> Self {
        Self::new(event_types::SCROLL, EventData::Viewport(viewport))
    }

    /// Viewport resized
    pub fn resize(viewport: Rect) -> Self {
        Self::new(event_types::RESIZE, EventData::Viewport(viewport))
    }

    /// Element bounds changed
    pub fn layout(bounds: Rect) -> Self {
        Self::new(event_types::LAYOUT, EventData::Bounds(bounds))
    }

    /// The viewport rect carried by this event, if any
    pub fn viewport(&self) -> Option<Rect> {
        match self.data {
            EventData::Viewport(rect) => Some(rect),
            _ => None,
        }
    }

    /// The element bounds carried by this event, if any
    pub fn bounds(&self) -> Option<Rect> {
        match self.data {
            EventData::Bounds(rect) => Some(rect),
            _ => None,
        }
    }
}
