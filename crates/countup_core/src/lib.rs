//! Countup Core Primitives
//!
//! This crate provides the foundational primitives for the countup widget
//! system:
//!
//! - **Geometry**: points, sizes, and rects with viewport intersection tests
//! - **Events**: unified viewport/lifecycle event model
//! - **State Machines**: typed-enum state machines for widget phases
//!
//! # Example
//!
//! ```rust
//! use countup_core::geometry::Rect;
//!
//! let element = Rect::new(0.0, 1400.0, 200.0, 80.0);
//! let viewport = Rect::new(0.0, 1350.0, 1280.0, 720.0);
//! assert!(element.intersects(&viewport));
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{Event, EventData, EventType};
pub use fsm::{Fsm, StateTransitions};
pub use geometry::{Point, Rect, Size};
