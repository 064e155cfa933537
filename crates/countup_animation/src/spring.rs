//! Damped spring physics
//!
//! Springs integrate `a = (-k·(x - target) - c·v) / m` with RK4, which stays
//! stable at the stiffness values the presets use. A spring keeps its
//! velocity when retargeted mid-flight, so interrupted animations continue
//! with momentum instead of jumping.

/// Largest time step fed to the integrator in one call. Frame gaps beyond
/// this (first frame, debugger pauses) are clamped rather than integrated.
const MAX_STEP: f32 = 0.064;

/// Spring tuning parameters
#[derive(Clone, Copy, Debug)]
pub struct SpringConfig {
    /// Spring constant k
    pub stiffness: f32,
    /// Damping coefficient c
    pub damping: f32,
    /// Mass m
    pub mass: f32,
    /// Distance from target below which the spring may settle
    pub rest_delta: f32,
    /// Speed below which the spring may settle
    pub rest_speed: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.001,
        }
    }

    /// Soft motion with a slow approach
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0)
    }

    /// Underdamped, visible overshoot and oscillation
    pub fn wobbly() -> Self {
        Self::new(180.0, 12.0)
    }

    /// Quick approach with minimal overshoot
    pub fn stiff() -> Self {
        Self::new(210.0, 20.0)
    }

    /// Fast and tight, for small UI movements
    pub fn snappy() -> Self {
        Self::new(300.0, 24.0)
    }

    /// Critically damped spring that settles in roughly `duration_ms`.
    ///
    /// A critically damped envelope decays below the rest thresholds near
    /// `omega * t = 8`, so the natural frequency is derived from that. The
    /// approach is monotonic: no overshoot, no oscillation.
    pub fn with_duration(duration_ms: u32) -> Self {
        let secs = (duration_ms.max(1) as f32) / 1000.0;
        let omega = 8.0 / secs;
        Self {
            stiffness: omega * omega,
            damping: 2.0 * omega,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.001,
        }
    }

    /// Builder: override the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass.max(f32::EPSILON);
        self
    }

    /// Builder: override the rest thresholds
    pub fn with_rest(mut self, rest_delta: f32, rest_speed: f32) -> Self {
        self.rest_delta = rest_delta;
        self.rest_speed = rest_speed;
        self
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(170.0, 26.0)
    }
}

/// A damped spring animating a scalar value toward a target
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    /// Retarget the spring. Velocity is preserved, so a spring interrupted
    /// mid-flight carries its momentum toward the new target.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Reset to a value, at rest
    pub fn set_value(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
    }

    /// The spring has converged: within `rest_delta` of the target and
    /// moving slower than `rest_speed`.
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
    }

    /// Advance the spring by `dt` seconds.
    ///
    /// Once the spring crosses the rest thresholds it snaps exactly to the
    /// target and stops, so repeated stepping after convergence is free.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let dt = dt.min(MAX_STEP);

        let (dx1, dv1) = self.derive(self.value, self.velocity);
        let (dx2, dv2) = self.derive(
            self.value + dx1 * dt * 0.5,
            self.velocity + dv1 * dt * 0.5,
        );
        let (dx3, dv3) = self.derive(
            self.value + dx2 * dt * 0.5,
            self.velocity + dv2 * dt * 0.5,
        );
        let (dx4, dv4) = self.derive(self.value + dx3 * dt, self.velocity + dv3 * dt);

        self.value += (dx1 + 2.0 * (dx2 + dx3) + dx4) * dt / 6.0;
        self.velocity += (dv1 + 2.0 * (dv2 + dv3) + dv4) * dt / 6.0;

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    /// Derivative of the (position, velocity) state
    fn derive(&self, x: f32, v: f32) -> (f32, f32) {
        let a = (-self.config.stiffness * (x - self.target) - self.config.damping * v)
            / self.config.mass;
        (v, a)
    }
}
