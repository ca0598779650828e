//! Input normalisation — turn raw wheel and touch deltas into the clamped
//! scroll scalar that drives everything else.
//!
//! Both sources funnel into the same rule:
//!
//! ```text
//! scalar' = clamp(scalar + delta × sensitivity, 0, N)
//! ```
//!
//! Wheel deltas are negated; touch deltas follow the drag direction and are
//! additionally time-gated so sub-frame jitter never reaches the scalar.

/// Default multiplier applied to (negated) wheel `delta_y`.
pub const WHEEL_SENSITIVITY: f64 = 0.004;
/// Default multiplier applied to touch drag distance.
pub const TOUCH_SENSITIVITY: f64 = 0.002;
/// Touch movement inside this window (since the last accepted sample) is ignored.
pub const TOUCH_MIN_INTERVAL_MS: u64 = 50;

/// Tunable sensitivities for the two input sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    pub wheel_sensitivity: f64,
    pub touch_sensitivity: f64,
    pub touch_min_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: WHEEL_SENSITIVITY,
            touch_sensitivity: TOUCH_SENSITIVITY,
            touch_min_interval_ms: TOUCH_MIN_INTERVAL_MS,
        }
    }
}

/// Last accepted touch sample.
#[derive(Debug, Clone, Copy)]
struct TouchAnchor {
    y: f64,
    at_ms: u64,
}

/// Accumulates input deltas into a scalar clamped to `[0, N]`.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    scalar: f64,
    max: f64,
    config: InputConfig,
    touch: Option<TouchAnchor>,
}

impl InputNormalizer {
    pub fn new(item_count: usize, config: InputConfig) -> Self {
        Self {
            scalar: 0.0,
            max: item_count as f64,
            config,
            touch: None,
        }
    }

    /// Current scroll scalar, always within `[0, N]`.
    pub fn scalar(&self) -> f64 {
        self.scalar
    }

    /// Apply a wheel event.  Positive `delta_y` moves the scalar down.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        self.accumulate(-delta_y * self.config.wheel_sensitivity)
    }

    /// Begin a touch gesture at vertical position `y`.
    pub fn touch_start(&mut self, y: f64, at_ms: u64) {
        if y.is_finite() {
            self.touch = Some(TouchAnchor { y, at_ms });
        }
    }

    /// Feed a touch move.  Returns the new scalar when the sample was
    /// accepted, `None` when it fell inside the dead-time window or no
    /// gesture was active (the sample then starts one).
    pub fn touch_move(&mut self, y: f64, at_ms: u64) -> Option<f64> {
        if !y.is_finite() {
            return None;
        }
        let Some(anchor) = self.touch else {
            self.touch = Some(TouchAnchor { y, at_ms });
            return None;
        };

        let elapsed = at_ms.saturating_sub(anchor.at_ms);
        if elapsed <= self.config.touch_min_interval_ms {
            return None;
        }

        // Dragging upwards (y shrinking) advances the scalar.
        let dy = anchor.y - y;
        self.touch = Some(TouchAnchor { y, at_ms });
        Some(self.accumulate(dy * self.config.touch_sensitivity))
    }

    pub fn touch_end(&mut self) {
        self.touch = None;
    }

    /// Overwrite the scalar directly (keyboard jumps, reset).  Clamped.
    pub fn set(&mut self, value: f64) -> f64 {
        if value.is_finite() {
            self.scalar = value.clamp(0.0, self.max);
        }
        self.scalar
    }

    fn accumulate(&mut self, delta: f64) -> f64 {
        if delta.is_finite() {
            self.scalar = (self.scalar + delta).clamp(0.0, self.max);
        }
        self.scalar
    }
}
