//! Animation error types

use thiserror::Error;

/// Errors from animation infrastructure lifecycle
#[derive(Debug, Error)]
pub enum AnimationError {
    /// The global scheduler was installed twice
    #[error("animation scheduler already initialized")]
    SchedulerAlreadyInitialized,

    /// An operation required the global scheduler before it was installed
    #[error("animation scheduler not initialized")]
    SchedulerNotInitialized,
}
