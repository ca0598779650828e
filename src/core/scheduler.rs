//! Transition scheduler — staggered grid ↔ stack moves and the in-flight
//! guard.
//!
//! Every transition is a *group* of per-item tweens tagged with the group's
//! generation.  The guard stays up until every member has reported; since
//! a tween's completion lands at `delay + duration`, the last report is
//! always the member with the largest total, whichever way the stagger
//! runs.  Starting a new group kills the previous one's tweens first, so a
//! superseded group can never clear the guard.

use super::anim::{Animator, CompletionTag, Easing, Prop, Target, TweenSpec};
use super::layout::{ItemGeometry, Layout};

/// Delay between consecutive items in a transition, seconds.
pub const STAGGER_STEP: f64 = 0.06;
/// Duration shared by every item in a transition, seconds.
pub const TRANSITION_DURATION: f64 = 1.5;
pub const TRANSITION_EASING: Easing = Easing::Power3InOut;

/// Which way a transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Grid → Stacked: item 0 leaves first.
    ToStack,
    /// Stacked → Grid: the last item leaves first.
    ToGrid,
}

impl Direction {
    /// Start delay of item `index` out of `count`.
    pub fn delay_for(self, index: usize, count: usize) -> f64 {
        let slot = match self {
            Direction::ToStack => index,
            Direction::ToGrid => count.saturating_sub(1).saturating_sub(index),
        };
        slot as f64 * STAGGER_STEP
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::ToStack => "to-stack",
            Direction::ToGrid => "to-grid",
        }
    }
}

/// One item's part in a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaggeredMove {
    pub index: usize,
    pub delay: f64,
    pub duration: f64,
    pub target: ItemGeometry,
}

impl StaggeredMove {
    pub fn end_time(&self) -> f64 {
        self.delay + self.duration
    }

    fn props(&self) -> Vec<(Prop, f64)> {
        vec![
            (Prop::X, self.target.left()),
            (Prop::Y, self.target.top()),
            (Prop::Width, self.target.size),
            (Prop::Height, self.target.size),
            (Prop::Rotation, 0.0),
        ]
    }
}

/// Per-item moves for a transition in `direction` over `layout`.
pub fn plan(direction: Direction, layout: &Layout) -> Vec<StaggeredMove> {
    let count = layout.item_count();
    (0..count)
        .filter_map(|index| {
            let target = match direction {
                Direction::ToStack => layout.stacked(index)?,
                Direction::ToGrid => layout.grid(index)?,
            };
            Some(StaggeredMove {
                index,
                delay: direction.delay_for(index, count),
                duration: TRANSITION_DURATION,
                target,
            })
        })
        .collect()
}

/// Bookkeeping for the group currently holding the guard.
#[derive(Debug, Clone, Copy)]
struct InFlight {
    generation: u64,
    direction: Direction,
    remaining: usize,
    last_item: usize,
}

/// Owns the transition-in-flight guard.  Independent instances share
/// nothing, so each test can build its own.
#[derive(Debug, Clone, Default)]
pub struct TransitionScheduler {
    generation: u64,
    in_flight: Option<InFlight>,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` from [`start`](Self::start) until the group's final completion.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.in_flight.map(|f| f.direction)
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Item whose completion will clear the guard.
    #[cfg(test)]
    pub fn last_item(&self) -> Option<usize> {
        self.in_flight.map(|f| f.last_item)
    }

    /// Kill any running transition and start a new one.
    ///
    /// Every item's tweens are cancelled unconditionally before the new
    /// group is scheduled.  The guard is raised synchronously.
    pub fn start(
        &mut self,
        direction: Direction,
        layout: &Layout,
        animator: &mut impl Animator,
    ) -> Vec<StaggeredMove> {
        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(
                generation = previous.generation,
                remaining = previous.remaining,
                "superseding transition"
            );
        }
        for index in 0..layout.item_count() {
            animator.cancel(Target::Item(index));
        }

        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let moves = plan(direction, layout);

        for mv in &moves {
            animator.animate(
                TweenSpec::new(Target::Item(mv.index), mv.props())
                    .duration(mv.duration)
                    .delay(mv.delay)
                    .easing(TRANSITION_EASING)
                    .on_complete(CompletionTag {
                        generation,
                        item: mv.index,
                    }),
            );
        }

        let last = moves
            .iter()
            .max_by(|a, b| a.end_time().total_cmp(&b.end_time()));
        self.in_flight = last.map(|last| InFlight {
            generation,
            direction,
            remaining: moves.len(),
            last_item: last.index,
        });

        tracing::debug!(
            generation,
            direction = direction.label(),
            items = moves.len(),
            "transition started"
        );
        moves
    }

    /// Record one member's completion.  Returns `true` when this was the
    /// group's final completion and the guard dropped.
    pub fn complete(&mut self, tag: CompletionTag) -> bool {
        let Some(flight) = self.in_flight.as_mut() else {
            return false;
        };
        if tag.generation != flight.generation {
            tracing::warn!(
                stale = tag.generation,
                current = flight.generation,
                "ignoring completion from superseded transition"
            );
            return false;
        }

        flight.remaining = flight.remaining.saturating_sub(1);
        if flight.remaining > 0 {
            return false;
        }

        tracing::debug!(
            generation = flight.generation,
            last_item = flight.last_item,
            finished_by = tag.item,
            "transition finished"
        );
        self.in_flight = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::anim::{Command, RecordingAnimator, Timeline};
    use crate::core::layout::Viewport;

    fn layout(width: f64) -> Layout {
        Layout::compute(Viewport::new(width, 900.0).unwrap(), 8)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn to_stack_staggers_forward() {
        let moves = plan(Direction::ToStack, &layout(1400.0));
        assert!(close(moves[0].delay, 0.0));
        assert!(close(moves[7].delay, 0.42));
        for w in moves.windows(2) {
            assert!(w[0].delay < w[1].delay);
        }
    }

    #[test]
    fn to_grid_staggers_backward() {
        let moves = plan(Direction::ToGrid, &layout(1400.0));
        assert!(close(moves[7].delay, 0.0));
        assert!(close(moves[0].delay, 0.42));
    }

    #[test]
    fn targets_follow_direction() {
        let l = layout(1400.0);
        let stack = plan(Direction::ToStack, &l);
        let grid = plan(Direction::ToGrid, &l);
        for i in 0..8 {
            assert_eq!(stack[i].target, l.stacked(i).unwrap());
            assert_eq!(grid[i].target, l.grid(i).unwrap());
            assert!(close(stack[i].duration, 1.5));
        }
    }

    #[test]
    fn start_cancels_every_item_before_scheduling() {
        let mut anim = RecordingAnimator::default();
        let mut s = TransitionScheduler::new();
        s.start(Direction::ToStack, &layout(1400.0), &mut anim);

        let (cancels, rest) = anim.commands.split_at(8);
        for (i, c) in cancels.iter().enumerate() {
            assert_eq!(c, &Command::Cancel(Target::Item(i)));
        }
        assert_eq!(rest.len(), 8);
        for tween in anim.tweens() {
            assert_eq!(tween.easing, Easing::Power3InOut);
            assert_eq!(tween.on_complete.map(|t| t.generation), Some(1));
            assert!(tween.props.contains(&(Prop::Rotation, 0.0)));
        }
    }

    #[test]
    fn guard_rises_synchronously() {
        let mut anim = RecordingAnimator::default();
        let mut s = TransitionScheduler::new();
        assert!(!s.is_in_flight());
        s.start(Direction::ToGrid, &layout(1400.0), &mut anim);
        assert!(s.is_in_flight());
        assert_eq!(s.direction(), Some(Direction::ToGrid));
    }

    #[test]
    fn last_item_depends_on_direction() {
        let mut anim = RecordingAnimator::default();
        let mut s = TransitionScheduler::new();
        s.start(Direction::ToStack, &layout(1400.0), &mut anim);
        assert_eq!(s.last_item(), Some(7));
        s.start(Direction::ToGrid, &layout(1400.0), &mut anim);
        assert_eq!(s.last_item(), Some(0));
    }

    /// Drive a real timeline and note which completion dropped the guard.
    fn run_to_completion(direction: Direction) -> (usize, Vec<usize>) {
        let mut tl = Timeline::new();
        let mut s = TransitionScheduler::new();
        s.start(direction, &layout(1400.0), &mut tl);

        let mut order = Vec::new();
        let mut cleared_by = None;
        for _ in 0..200 {
            for tag in tl.advance(1.0 / 60.0) {
                order.push(tag.item);
                if s.complete(tag) {
                    cleared_by = Some(tag.item);
                }
            }
            if cleared_by.is_some() {
                assert!(!s.is_in_flight());
                break;
            }
            assert!(s.is_in_flight());
        }
        (cleared_by.expect("transition never finished"), order)
    }

    #[test]
    fn to_stack_clears_on_last_index() {
        let (cleared_by, order) = run_to_completion(Direction::ToStack);
        assert_eq!(cleared_by, 7);
        assert_eq!(order.len(), 8);
    }

    #[test]
    fn to_grid_clears_on_first_index() {
        let (cleared_by, order) = run_to_completion(Direction::ToGrid);
        assert_eq!(cleared_by, 0);
        assert_eq!(order.len(), 8);
    }

    #[test]
    fn superseded_transition_never_reports() {
        let mut tl = Timeline::new();
        let mut s = TransitionScheduler::new();
        let l = layout(1400.0);

        s.start(Direction::ToStack, &l, &mut tl);
        let first = s.generation();
        // Part-way through: items 0..=3 have started, none has finished.
        assert!(tl.advance(0.2).is_empty());
        s.start(Direction::ToGrid, &l, &mut tl);

        let mut stale = 0;
        let mut fresh = 0;
        let mut cleared = 0;
        for _ in 0..300 {
            for tag in tl.advance(1.0 / 60.0) {
                if tag.generation == first {
                    stale += 1;
                } else {
                    fresh += 1;
                }
                if s.complete(tag) {
                    cleared += 1;
                }
            }
        }
        assert_eq!(stale, 0);
        assert_eq!(fresh, 8);
        assert_eq!(cleared, 1);
        assert!(!s.is_in_flight());

        // Items finished on their grid slots.
        for i in 0..8 {
            let f = tl.item_frame(i).unwrap();
            let g = l.grid(i).unwrap();
            assert!((f.x - g.left()).abs() < 1e-6);
            assert!((f.width - g.size).abs() < 1e-6);
        }
    }

    #[test]
    fn stale_tag_is_ignored() {
        let mut anim = RecordingAnimator::default();
        let mut s = TransitionScheduler::new();
        let l = layout(1400.0);
        s.start(Direction::ToStack, &l, &mut anim);
        s.start(Direction::ToGrid, &l, &mut anim);
        for item in 0..8 {
            assert!(!s.complete(CompletionTag { generation: 1, item }));
        }
        assert!(s.is_in_flight());
    }
}
