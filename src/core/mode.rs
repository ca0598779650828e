//! Mode controller — derives grid/stacked mode and the active index from the
//! scroll scalar.
//!
//! Mode changes are edge-triggered: [`ModeController::update`] only reports
//! a change when the scalar actually moved across a threshold, and feeding
//! the same scalar twice is a no-op.

/// Entering the stack requires `scalar >= STACK_ENTER_THRESHOLD`.
pub const STACK_ENTER_THRESHOLD: f64 = 0.1;
/// Leaving the stack requires `scalar <= STACK_EXIT_THRESHOLD`.
///
/// Numerically equal to the enter threshold, so there is no hysteresis band.
pub const STACK_EXIT_THRESHOLD: f64 = 0.1;

/// Grid (tiled) or stacked (collapsed) presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Grid,
    Stacked,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Grid => "grid",
            Mode::Stacked => "stacked",
        }
    }
}

/// `floor(clamp(scalar − 1, 0, N − 1))`.  The first unit of scroll is spent
/// entering the stack before item switching begins.
pub fn active_index(scalar: f64, item_count: usize) -> usize {
    let last = item_count.saturating_sub(1) as f64;
    (scalar - 1.0).clamp(0.0, last).floor() as usize
}

/// What changed after feeding a new scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeUpdate {
    pub mode: Mode,
    /// `Some` only while stacked.
    pub active_index: Option<usize>,
    pub mode_changed: bool,
    pub index_changed: bool,
}

/// State machine over [`Mode`] and the active index.
#[derive(Debug, Clone)]
pub struct ModeController {
    mode: Mode,
    active_index: Option<usize>,
    last_scalar: Option<f64>,
    item_count: usize,
}

impl ModeController {
    pub fn new(item_count: usize) -> Self {
        Self {
            mode: Mode::Grid,
            active_index: None,
            last_scalar: None,
            item_count,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// Feed the latest scalar.
    pub fn update(&mut self, scalar: f64) -> ModeUpdate {
        if self.last_scalar == Some(scalar) {
            return self.snapshot(false, false);
        }
        self.last_scalar = Some(scalar);

        let next_mode = match self.mode {
            Mode::Grid if scalar >= STACK_ENTER_THRESHOLD => Mode::Stacked,
            Mode::Stacked if scalar <= STACK_EXIT_THRESHOLD => Mode::Grid,
            current => current,
        };
        let mode_changed = next_mode != self.mode;
        self.mode = next_mode;

        let next_index = match self.mode {
            Mode::Stacked => Some(active_index(scalar, self.item_count)),
            Mode::Grid => None,
        };
        let index_changed = next_index != self.active_index;
        self.active_index = next_index;

        if mode_changed {
            tracing::debug!(mode = self.mode.label(), scalar, "mode changed");
        }
        self.snapshot(mode_changed, index_changed)
    }

    fn snapshot(&self, mode_changed: bool, index_changed: bool) -> ModeUpdate {
        ModeUpdate {
            mode: self.mode,
            active_index: self.active_index,
            mode_changed,
            index_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_grid_without_index() {
        let mut c = ModeController::new(8);
        let u = c.update(0.0);
        assert_eq!(u.mode, Mode::Grid);
        assert_eq!(u.active_index, None);
        assert!(!u.mode_changed);
    }

    #[test]
    fn enters_stack_at_threshold() {
        let mut c = ModeController::new(8);
        assert!(!c.update(0.09).mode_changed);
        let u = c.update(0.15);
        assert!(u.mode_changed);
        assert_eq!(u.mode, Mode::Stacked);
        assert_eq!(u.active_index, Some(0));
        assert!(u.index_changed);
    }

    #[test]
    fn exits_stack_at_threshold() {
        let mut c = ModeController::new(8);
        c.update(3.0);
        let u = c.update(0.1);
        assert!(u.mode_changed);
        assert_eq!(u.mode, Mode::Grid);
        assert_eq!(u.active_index, None);
    }

    #[test]
    fn repeated_scalar_does_not_thrash() {
        let mut c = ModeController::new(8);
        let first = c.update(0.1);
        assert!(first.mode_changed);
        assert_eq!(first.mode, Mode::Stacked);
        for _ in 0..10 {
            let u = c.update(0.1);
            assert!(!u.mode_changed);
            assert_eq!(u.mode, Mode::Stacked);
        }
    }

    #[test]
    fn mode_follows_most_recent_crossing() {
        let mut c = ModeController::new(8);
        let mut changes = 0;
        for s in [0.05, 0.2, 0.5, 2.0, 0.5, 0.08, 0.09, 0.3, 0.11] {
            if c.update(s).mode_changed {
                changes += 1;
            }
        }
        // Up at 0.2, down at 0.08, up at 0.3.
        assert_eq!(changes, 3);
        assert_eq!(c.mode(), Mode::Stacked);
    }

    #[test]
    fn index_changes_without_mode_change() {
        let mut c = ModeController::new(8);
        c.update(0.5);
        let u = c.update(3.0);
        assert!(!u.mode_changed);
        assert!(u.index_changed);
        assert_eq!(u.active_index, Some(2));
        let u = c.update(3.5);
        assert!(!u.index_changed);
    }

    #[test]
    fn active_index_formula() {
        assert_eq!(active_index(0.15, 8), 0);
        assert_eq!(active_index(1.99, 8), 0);
        assert_eq!(active_index(2.0, 8), 1);
        assert_eq!(active_index(3.0, 8), 2);
        assert_eq!(active_index(8.0, 8), 7);
        assert_eq!(active_index(100.0, 8), 7);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Larger scalars never select an earlier item.
            #[test]
            fn active_index_is_monotonic(a in 0.0f64..=8.0, b in 0.0f64..=8.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(active_index(lo, 8) <= active_index(hi, 8));
                prop_assert!(active_index(hi, 8) <= 7);
            }

            /// While stacked, the reported index is exactly the formula.
            #[test]
            fn stacked_index_matches_formula(s in 0.1f64..=8.0) {
                let mut c = ModeController::new(8);
                let u = c.update(s);
                prop_assert_eq!(u.mode, Mode::Stacked);
                prop_assert_eq!(u.active_index, Some(active_index(s, 8)));
            }
        }
    }
}
