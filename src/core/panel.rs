//! Companion panel sync and the scroll-progress indicator.
//!
//! The panel only exists while stacked: it is mounted on entry, unmounted
//! on exit, and its vertical offset tracks `−active × panel_height`.

use super::anim::{Animator, Easing, Prop, Target, TweenSpec};

pub const PANEL_SYNC_DURATION: f64 = 0.5;
pub const INDICATOR_DURATION: f64 = 0.1;

/// Panel offset that shows page `active`.
pub fn panel_offset(active: usize, panel_height: f64) -> f64 {
    -(active as f64) * panel_height
}

/// Indicator fill, in percent, for `scalar` out of `item_count`.
pub fn progress_percent(scalar: f64, item_count: usize) -> f64 {
    if item_count == 0 {
        return 0.0;
    }
    (scalar / item_count as f64 * 100.0).clamp(0.0, 100.0)
}

/// Mount state and last synced position of the services panel.
#[derive(Debug, Clone, Default)]
pub struct PanelSync {
    mounted: bool,
    synced: Option<(usize, f64)>,
}

impl PanelSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mount the panel.  A freshly mounted panel starts at offset zero.
    pub fn show(&mut self, animator: &mut impl Animator) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.synced = None;
        animator.set(Target::Panel, &[(Prop::PanelOffset, 0.0)]);
    }

    /// Unmount the panel and drop whatever it was animating.
    pub fn hide(&mut self, animator: &mut impl Animator) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.synced = None;
        animator.cancel(Target::Panel);
    }

    /// Ease the panel to page `active`.  A no-op while unmounted or when
    /// nothing changed since the last sync.  Returns whether a tween was
    /// issued.
    pub fn sync(&mut self, active: usize, panel_height: f64, animator: &mut impl Animator) -> bool {
        if !self.mounted || self.synced == Some((active, panel_height)) {
            return false;
        }
        self.synced = Some((active, panel_height));
        animator.animate(
            TweenSpec::new(
                Target::Panel,
                vec![(Prop::PanelOffset, panel_offset(active, panel_height))],
            )
            .duration(PANEL_SYNC_DURATION)
            .easing(Easing::Power2Out),
        );
        true
    }
}

/// Animate the progress indicator to reflect `scalar`.
pub fn update_indicator(scalar: f64, item_count: usize, animator: &mut impl Animator) {
    animator.animate(
        TweenSpec::new(
            Target::Indicator,
            vec![(Prop::Progress, progress_percent(scalar, item_count))],
        )
        .duration(INDICATOR_DURATION),
    );
}
