//! The showcase state machine.
//!
//! [`Showcase::handle`] is the transition function: it folds one
//! [`ShowcaseEvent`] into the state and returns the [`Effect`]s that follow
//! from what actually changed.  [`Showcase::apply`] is the separate effects
//! step that turns those into animator commands.  Engine completions come
//! back through [`Showcase::on_completed`].
//!
//! ```text
//! input ─▶ scalar ─▶ mode / index ─┬─▶ transition scheduler (mode edge)
//!                                  ├─▶ stack presenter (index edge, gated)
//!                                  └─▶ panel sync
//! viewport ─▶ layout ─────────────────▶ scheduler + presenter geometry
//! ```

use super::anim::{Animator, CompletionTag, Prop, Target};
use super::input::{InputConfig, InputNormalizer};
use super::layout::{Layout, Viewport};
use super::mode::{Mode, ModeController};
use super::panel::{self, PanelSync};
use super::presenter::StackPresenter;
use super::scheduler::{Direction, TransitionScheduler};

/// Number of items the showcase is designed around.
pub const ITEM_COUNT: usize = 8;

/// Everything that can happen to the showcase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowcaseEvent {
    Wheel { delta_y: f64 },
    TouchStart { y: f64, at_ms: u64 },
    TouchMove { y: f64, at_ms: u64 },
    TouchEnd,
    Resize { width: f64, height: f64 },
    /// Move the scalar to an absolute position (clamped).
    Seek(f64),
    /// Jump straight to item `index` (keyboard).
    JumpTo(usize),
    /// Return to the top of the showcase.
    Reset,
}

/// Side effects requested by a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartTransition(Direction),
    /// Place items instantly for the current mode.
    SnapToLayout,
    /// Kill pending fades and make every item fully visible.
    RestoreGridVisibility,
    PresentStack,
    ShowPanel,
    HidePanel,
    SyncPanel,
    UpdateIndicator,
}

/// Scroll-driven grid/stack showcase.
#[derive(Debug, Clone)]
pub struct Showcase {
    item_count: usize,
    input: InputNormalizer,
    mode: ModeController,
    layout: Option<Layout>,
    scheduler: TransitionScheduler,
    presenter: StackPresenter,
    panel: PanelSync,
}

impl Showcase {
    pub fn new(input: InputConfig) -> Self {
        Self::with_item_count(ITEM_COUNT, input)
    }

    pub fn with_item_count(item_count: usize, input: InputConfig) -> Self {
        Self {
            item_count,
            input: InputNormalizer::new(item_count, input),
            mode: ModeController::new(item_count),
            layout: None,
            scheduler: TransitionScheduler::new(),
            presenter: StackPresenter,
            panel: PanelSync::new(),
        }
    }

    // ── read-only view ──────────────────────────────────────────

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn scalar(&self) -> f64 {
        self.input.scalar()
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.mode.active_index()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn transition_in_flight(&self) -> bool {
        self.scheduler.is_in_flight()
    }

    pub fn scheduler(&self) -> &TransitionScheduler {
        &self.scheduler
    }

    pub fn panel_mounted(&self) -> bool {
        self.panel.is_mounted()
    }

    /// Page height of the services panel: the content region below the
    /// header.
    pub fn panel_height(&self) -> Option<f64> {
        self.layout
            .as_ref()
            .map(|l| l.viewport.content_height().max(0.0))
    }

    // ── transition function ─────────────────────────────────────

    /// Fold `event` into the state and return the effects it causes.
    pub fn handle(&mut self, event: ShowcaseEvent) -> Vec<Effect> {
        let before = self.input.scalar();
        match event {
            ShowcaseEvent::Wheel { delta_y } => {
                self.input.wheel(delta_y);
            }
            ShowcaseEvent::TouchStart { y, at_ms } => {
                self.input.touch_start(y, at_ms);
            }
            ShowcaseEvent::TouchMove { y, at_ms } => {
                self.input.touch_move(y, at_ms);
            }
            ShowcaseEvent::TouchEnd => self.input.touch_end(),
            ShowcaseEvent::JumpTo(index) => {
                let index = index.min(self.item_count.saturating_sub(1));
                self.input.set(index as f64 + 1.0);
            }
            ShowcaseEvent::Seek(scalar) => {
                self.input.set(scalar);
            }
            ShowcaseEvent::Reset => {
                self.input.set(0.0);
            }
            ShowcaseEvent::Resize { width, height } => return self.resize(width, height),
        }

        let after = self.input.scalar();
        if after == before {
            return Vec::new();
        }
        self.scalar_changed(after)
    }

    fn scalar_changed(&mut self, scalar: f64) -> Vec<Effect> {
        let mut effects = vec![Effect::UpdateIndicator];
        let update = self.mode.update(scalar);

        if update.mode_changed {
            match update.mode {
                Mode::Stacked => effects.extend([
                    Effect::StartTransition(Direction::ToStack),
                    Effect::ShowPanel,
                    Effect::SyncPanel,
                ]),
                Mode::Grid => effects.extend([
                    Effect::StartTransition(Direction::ToGrid),
                    Effect::RestoreGridVisibility,
                    Effect::HidePanel,
                ]),
            }
        } else if update.index_changed && update.mode == Mode::Stacked {
            effects.extend([Effect::PresentStack, Effect::SyncPanel]);
        }
        effects
    }

    fn resize(&mut self, width: f64, height: f64) -> Vec<Effect> {
        let Some(viewport) = Viewport::new(width, height) else {
            tracing::debug!(width, height, "ignoring degenerate viewport");
            return Vec::new();
        };
        let layout = Layout::compute(viewport, self.item_count);
        if self.layout.as_ref() == Some(&layout) {
            return Vec::new();
        }
        tracing::debug!(width, height, profile = ?layout.profile, "layout recomputed");
        self.layout = Some(layout);

        // A running transition restarts toward the new geometry.
        if let Some(direction) = self.scheduler.direction() {
            let mut effects = vec![Effect::StartTransition(direction)];
            if self.mode() == Mode::Stacked {
                effects.push(Effect::SyncPanel);
            }
            return effects;
        }

        match self.mode() {
            Mode::Grid => vec![Effect::SnapToLayout],
            Mode::Stacked => vec![Effect::SnapToLayout, Effect::PresentStack, Effect::SyncPanel],
        }
    }

    // ── effects step ────────────────────────────────────────────

    /// Issue the animator commands for `effects`, in order.
    pub fn apply(&mut self, effects: &[Effect], animator: &mut impl Animator) {
        for &effect in effects {
            self.apply_one(effect, animator);
        }
    }

    /// [`handle`](Self::handle) followed by [`apply`](Self::apply).
    pub fn dispatch(&mut self, event: ShowcaseEvent, animator: &mut impl Animator) -> Vec<Effect> {
        let effects = self.handle(event);
        self.apply(&effects, animator);
        effects
    }

    fn apply_one(&mut self, effect: Effect, animator: &mut impl Animator) {
        match effect {
            Effect::StartTransition(direction) => {
                if let Some(layout) = &self.layout {
                    self.scheduler.start(direction, layout, animator);
                }
            }
            Effect::SnapToLayout => self.snap_to_layout(animator),
            Effect::RestoreGridVisibility => {
                for index in 0..self.item_count {
                    let target = Target::Item(index);
                    animator.cancel_props(target, &[Prop::Opacity, Prop::StackingOrder]);
                    animator.set(target, &[(Prop::Opacity, 1.0), (Prop::StackingOrder, 1.0)]);
                }
            }
            Effect::PresentStack => {
                if let (Some(layout), Some(active)) = (&self.layout, self.mode.active_index()) {
                    self.presenter.present(
                        active,
                        layout,
                        self.scheduler.is_in_flight(),
                        animator,
                    );
                }
            }
            Effect::ShowPanel => self.panel.show(animator),
            Effect::HidePanel => self.panel.hide(animator),
            Effect::SyncPanel => {
                if let (Some(height), Some(active)) = (self.panel_height(), self.mode.active_index())
                {
                    self.panel.sync(active, height, animator);
                }
            }
            Effect::UpdateIndicator => {
                panel::update_indicator(self.input.scalar(), self.item_count, animator);
            }
        }
    }

    fn snap_to_layout(&self, animator: &mut impl Animator) {
        let Some(layout) = &self.layout else {
            return;
        };
        let stacked = self.mode() == Mode::Stacked;
        for index in 0..self.item_count {
            let geometry = if stacked {
                layout.stacked(index)
            } else {
                layout.grid(index)
            };
            let Some(g) = geometry else {
                continue;
            };
            let target = Target::Item(index);
            animator.cancel(target);
            let mut props = vec![
                (Prop::X, g.left()),
                (Prop::Y, g.top()),
                (Prop::Width, g.size),
                (Prop::Height, g.size),
                (Prop::Rotation, 0.0),
            ];
            if !stacked {
                props.extend([(Prop::Opacity, 1.0), (Prop::StackingOrder, 1.0)]);
            }
            animator.set(target, &props);
        }
    }

    /// Feed engine completions back in.  When a transition group finishes
    /// while stacked, the stack is presented for the current index.
    pub fn on_completed(&mut self, tags: &[CompletionTag], animator: &mut impl Animator) {
        for &tag in tags {
            if self.scheduler.complete(tag) && self.mode() == Mode::Stacked {
                self.apply_one(Effect::PresentStack, animator);
            }
        }
    }
}
