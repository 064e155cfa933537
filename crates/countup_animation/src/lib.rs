//! Countup Animation System
//!
//! Spring physics and tick scheduling for count-up widgets.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Duration Configs**: critically damped springs derived from a target duration
//! - **Animated Values**: spring-driven values with per-tick change callbacks
//! - **Scoped Subscriptions**: change callbacks released when their guard drops
//! - **Interruptible**: springs inherit velocity when retargeted

pub mod driver;
pub mod error;
pub mod scheduler;
pub mod spring;

pub use driver::EasingDriver;
pub use error::AnimationError;
pub use scheduler::{
    get_scheduler, global_scheduler, is_scheduler_initialized, set_global_scheduler,
    try_get_scheduler, AnimatedValue, AnimationScheduler, ChangeSubscription, SchedulerHandle,
    SharedAnimatedValue, TickCallback, TickCallbackId, ValueId,
};
pub use spring::{Spring, SpringConfig};
