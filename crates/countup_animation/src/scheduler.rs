//! Animation scheduler
//!
//! Manages all active animated values and updates them each frame. Values
//! are shared (`Arc<Mutex<_>>`) so widgets can hold a handle while the
//! scheduler ticks; change callbacks fire on the ticking thread whenever a
//! value moves.
//!
//! A process-global scheduler handle can be installed once at startup with
//! [`set_global_scheduler`]; widgets acquire it through [`get_scheduler`]
//! or probe with [`try_get_scheduler`].

use crate::error::AnimationError;
use crate::spring::{Spring, SpringConfig};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::time::{Duration, Instant};

new_key_type! {
    pub struct ValueId;
}

/// Identifier for a registered change callback
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickCallbackId(u64);

/// Callback invoked with the latest value whenever an animated value moves
pub type TickCallback = Box<dyn FnMut(f32) + Send>;

/// A spring-driven value with change subscribers
///
/// `tick` steps the underlying spring and notifies every subscriber when
/// the value actually moved, so subscribers see a change stream rather than
/// a frame stream.
pub struct AnimatedValue {
    spring: Spring,
    subscribers: SmallVec<[(TickCallbackId, TickCallback); 2]>,
    next_callback_id: u64,
}

impl AnimatedValue {
    pub fn new(initial: f32, config: SpringConfig) -> Self {
        Self {
            spring: Spring::new(config, initial),
            subscribers: SmallVec::new(),
            next_callback_id: 0,
        }
    }

    /// Current value
    pub fn get(&self) -> f32 {
        self.spring.value()
    }

    /// Current animation target
    pub fn target(&self) -> f32 {
        self.spring.target()
    }

    /// Animate toward a new target
    pub fn set_target(&mut self, target: f32) {
        self.spring.set_target(target);
    }

    /// Whether the underlying spring has converged
    pub fn is_settled(&self) -> bool {
        self.spring.is_settled()
    }

    /// Register a change callback; fires on every tick where the value moved
    pub fn on_change<F: FnMut(f32) + Send + 'static>(&mut self, callback: F) -> TickCallbackId {
        let id = TickCallbackId(self.next_callback_id);
        self.next_callback_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a change callback; returns whether it was registered
    pub fn remove_callback(&mut self, id: TickCallbackId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(cb_id, _)| *cb_id != id);
        self.subscribers.len() != before
    }

    /// Number of registered change callbacks
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Advance by `dt` seconds and notify subscribers if the value moved
    pub fn tick(&mut self, dt: f32) {
        let before = self.spring.value();
        self.spring.step(dt);
        let after = self.spring.value();

        if after != before {
            for (_, callback) in self.subscribers.iter_mut() {
                callback(after);
            }
        }
    }
}

/// Shared animated value handle sampled by widgets and ticked by the scheduler
pub type SharedAnimatedValue = Arc<Mutex<AnimatedValue>>;

/// Scoped change subscription
///
/// Holds a weak handle to the subscribed value; dropping the guard removes
/// the callback, so a destroyed widget can never be written to by a late
/// tick.
pub struct ChangeSubscription {
    value: Weak<Mutex<AnimatedValue>>,
    id: TickCallbackId,
}

impl ChangeSubscription {
    /// Subscribe `callback` to `value` and return the owning guard
    pub fn subscribe<F: FnMut(f32) + Send + 'static>(
        value: &SharedAnimatedValue,
        callback: F,
    ) -> Self {
        let id = value.lock().unwrap().on_change(callback);
        Self {
            value: Arc::downgrade(value),
            id,
        }
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        if let Some(value) = self.value.upgrade() {
            value.lock().unwrap().remove_callback(self.id);
        }
    }
}

/// The animation scheduler that ticks all active animated values
pub struct AnimationScheduler {
    values: SlotMap<ValueId, SharedAnimatedValue>,
    last_frame: Instant,
    target_fps: u32,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            values: SlotMap::with_key(),
            last_frame: Instant::now(),
            target_fps: 120,
        }
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    /// Interval between frames at the configured rate
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps as f64)
    }

    /// Create a spring-driven value and register it for ticking
    pub fn create_value(&mut self, initial: f32, config: SpringConfig) -> SharedAnimatedValue {
        let value = Arc::new(Mutex::new(AnimatedValue::new(initial, config)));
        let id = self.values.insert(value.clone());
        tracing::trace!("created animated value {:?} at {}", id, initial);
        value
    }

    /// Register an existing animated value
    pub fn add_value(&mut self, value: SharedAnimatedValue) -> ValueId {
        self.values.insert(value)
    }

    pub fn get_value(&self, id: ValueId) -> Option<SharedAnimatedValue> {
        self.values.get(id).cloned()
    }

    pub fn remove_value(&mut self, id: ValueId) -> Option<SharedAnimatedValue> {
        self.values.remove(id)
    }

    /// Tick all animations using wall-clock time since the last frame
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(dt);
    }

    /// Advance all animations by an explicit `dt` (deterministic; used by
    /// tests and headless runners)
    pub fn advance(&mut self, dt: f32) {
        for (_, value) in self.values.iter_mut() {
            value.lock().unwrap().tick(dt);
        }

        // Settled values nobody else holds a handle to are done for good
        self.values
            .retain(|_, value| Arc::strong_count(value) > 1 || !value.lock().unwrap().is_settled());
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.values
            .iter()
            .any(|(_, value)| !value.lock().unwrap().is_settled())
    }

    /// Number of registered values
    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Global scheduler handle
// =========================================================================

/// Shared scheduler handle
pub type SchedulerHandle = Arc<Mutex<AnimationScheduler>>;

static SCHEDULER: OnceLock<SchedulerHandle> = OnceLock::new();

/// Install the process-global scheduler (call once at app startup)
pub fn set_global_scheduler(handle: SchedulerHandle) -> Result<(), AnimationError> {
    SCHEDULER
        .set(handle)
        .map_err(|_| AnimationError::SchedulerAlreadyInitialized)
}

/// Get the global scheduler handle
///
/// # Panics
///
/// Panics if [`set_global_scheduler`] has not been called.
pub fn get_scheduler() -> SchedulerHandle {
    SCHEDULER
        .get()
        .cloned()
        .expect("animation scheduler not initialized. Call set_global_scheduler() at app startup.")
}

/// Try to get the global scheduler handle (None if not installed)
pub fn try_get_scheduler() -> Option<SchedulerHandle> {
    SCHEDULER.get().cloned()
}

/// Get the global scheduler handle, or an error if not installed
pub fn global_scheduler() -> Result<SchedulerHandle, AnimationError> {
    try_get_scheduler().ok_or(AnimationError::SchedulerNotInitialized)
}

/// Check whether the global scheduler has been installed
pub fn is_scheduler_initialized() -> bool {
    SCHEDULER.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_animated_value_notifies_on_change() {
        let mut value = AnimatedValue::new(0.0, SpringConfig::stiff());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        value.on_change(move |v| seen_clone.lock().unwrap().push(v));

        // At rest: ticks produce no notifications
        value.tick(FRAME);
        value.tick(FRAME);
        assert!(seen.lock().unwrap().is_empty());

        value.set_target(50.0);
        for _ in 0..120 {
            value.tick(FRAME);
        }

        let seen = seen.lock().unwrap();
        assert!(!seen.is_empty());
        assert_eq!(*seen.last().unwrap(), 50.0);
    }

    #[test]
    fn test_remove_callback_stops_notifications() {
        let mut value = AnimatedValue::new(0.0, SpringConfig::stiff());
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        let id = value.on_change(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        value.set_target(10.0);
        value.tick(FRAME);
        let after_one = count.load(Ordering::SeqCst);
        assert!(after_one > 0);

        assert!(value.remove_callback(id));
        assert!(!value.remove_callback(id));

        value.tick(FRAME);
        assert_eq!(count.load(Ordering::SeqCst), after_one);
    }

    #[test]
    fn test_change_subscription_released_on_drop() {
        let value: SharedAnimatedValue =
            Arc::new(Mutex::new(AnimatedValue::new(0.0, SpringConfig::stiff())));

        {
            let _sub = ChangeSubscription::subscribe(&value, |_| {});
            assert_eq!(value.lock().unwrap().subscriber_count(), 1);
        }

        assert_eq!(value.lock().unwrap().subscriber_count(), 0);
    }

    #[test]
    fn test_scheduler_advances_values() {
        let mut scheduler = AnimationScheduler::new();
        let value = scheduler.create_value(0.0, SpringConfig::stiff());

        assert!(!scheduler.has_active_animations());

        value.lock().unwrap().set_target(100.0);
        assert!(scheduler.has_active_animations());

        for _ in 0..180 {
            scheduler.advance(FRAME);
        }

        assert!(!scheduler.has_active_animations());
        assert_eq!(value.lock().unwrap().get(), 100.0);
    }

    #[test]
    fn test_scheduler_prunes_orphaned_settled_values() {
        let mut scheduler = AnimationScheduler::new();
        let value = scheduler.create_value(0.0, SpringConfig::stiff());
        value.lock().unwrap().set_target(25.0);
        drop(value);

        assert_eq!(scheduler.value_count(), 1);

        // Still animating: kept even though unreferenced
        scheduler.advance(FRAME);
        assert_eq!(scheduler.value_count(), 1);

        for _ in 0..180 {
            scheduler.advance(FRAME);
        }
        assert_eq!(scheduler.value_count(), 0);
    }

    #[test]
    fn test_frame_interval() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.set_target_fps(60);
        assert_eq!(scheduler.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));
    }
}
