//! Easing driver seam
//!
//! Widgets animate against this trait rather than a concrete engine, so a
//! scripted driver can stand in for spring physics under test and the
//! engine can change without touching widget code.

use crate::scheduler::AnimatedValue;
use crate::spring::Spring;

/// A source of eased intermediate values converging on a target
pub trait EasingDriver {
    /// Begin (or redirect) easing toward `target`
    fn set_target(&mut self, target: f32);

    /// The current eased value
    fn value(&self) -> f32;

    /// Advance by `dt` seconds
    fn tick(&mut self, dt: f32);

    /// Whether the driver has converged on its target
    fn is_settled(&self) -> bool;
}

impl EasingDriver for Spring {
    fn set_target(&mut self, target: f32) {
        Spring::set_target(self, target);
    }

    fn value(&self) -> f32 {
        Spring::value(self)
    }

    fn tick(&mut self, dt: f32) {
        self.step(dt);
    }

    fn is_settled(&self) -> bool {
        Spring::is_settled(self)
    }
}

impl EasingDriver for AnimatedValue {
    fn set_target(&mut self, target: f32) {
        AnimatedValue::set_target(self, target);
    }

    fn value(&self) -> f32 {
        self.get()
    }

    fn tick(&mut self, dt: f32) {
        AnimatedValue::tick(self, dt);
    }

    fn is_settled(&self) -> bool {
        AnimatedValue::is_settled(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringConfig;

    fn drive_to_rest(driver: &mut dyn EasingDriver, frames: u32) {
        for _ in 0..frames {
            driver.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_as_driver() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        EasingDriver::set_target(&mut spring, 42.0);

        drive_to_rest(&mut spring, 240);

        assert!(EasingDriver::is_settled(&spring));
        assert_eq!(EasingDriver::value(&spring), 42.0);
    }

    #[test]
    fn test_animated_value_as_driver() {
        let mut value = AnimatedValue::new(0.0, SpringConfig::stiff());
        EasingDriver::set_target(&mut value, 42.0);

        drive_to_rest(&mut value, 240);

        assert!(EasingDriver::is_settled(&value));
        assert_eq!(EasingDriver::value(&value), 42.0);
    }
}
