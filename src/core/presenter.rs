//! Stack presenter — per-item visibility, offset, scale and stacking order
//! while stacked.
//!
//! Only runs when the transition guard is down.  Both the presenter and the
//! transition scheduler write the same item properties, so while a
//! transition is in flight the presenter issues nothing at all.

use super::anim::{Animator, Easing, Prop, Target, TweenSpec};
use super::layout::Layout;

/// Scale lost per position behind the active item.
pub const SCALE_STEP: f64 = 0.05;
/// Vertical offset per position behind the active item, layout units.
pub const OFFSET_STEP: f64 = 15.0;
/// Stacking order of the active item.
pub const TOP_STACKING_ORDER: i32 = 100;
/// Intra-stack switches are quick compared to a full transition.
pub const PRESENT_DURATION: f64 = 0.2;

/// Derived presentation of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackSlot {
    pub index: usize,
    /// `active − index` for items at or behind the active one.
    pub stack_position: Option<usize>,
    pub visible: bool,
    pub scale: f64,
    pub offset_y: f64,
    pub stacking_order: i32,
}

/// Presentation for every item given the active index.
pub fn stack_slots(active: usize, item_count: usize) -> Vec<StackSlot> {
    (0..item_count)
        .map(|index| match active.checked_sub(index) {
            Some(position) => StackSlot {
                index,
                stack_position: Some(position),
                visible: true,
                scale: 1.0 - position as f64 * SCALE_STEP,
                offset_y: position as f64 * OFFSET_STEP,
                stacking_order: TOP_STACKING_ORDER - position as i32,
            },
            None => StackSlot {
                index,
                stack_position: None,
                visible: false,
                scale: 1.0,
                offset_y: 0.0,
                stacking_order: 0,
            },
        })
        .collect()
}

/// Writes stack presentation to the animator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackPresenter;

impl StackPresenter {
    /// Present `active` over `layout`.  Returns the number of items written,
    /// which is zero whenever `transition_in_flight` is set.
    pub fn present(
        &self,
        active: usize,
        layout: &Layout,
        transition_in_flight: bool,
        animator: &mut impl Animator,
    ) -> usize {
        if transition_in_flight {
            tracing::trace!(active, "stack presentation deferred: transition in flight");
            return 0;
        }

        let mut written = 0;
        for slot in stack_slots(active, layout.item_count()) {
            let Some(base) = layout.stacked(slot.index) else {
                continue;
            };
            let target = Target::Item(slot.index);

            // Stacking order snaps; everything else eases.
            animator.set(target, &[(Prop::StackingOrder, f64::from(slot.stacking_order))]);

            let props = if slot.visible {
                let size = base.size * slot.scale;
                vec![
                    (Prop::X, base.center_x - size / 2.0),
                    (Prop::Y, base.center_y - size / 2.0 + slot.offset_y),
                    (Prop::Width, size),
                    (Prop::Height, size),
                    (Prop::Opacity, 1.0),
                ]
            } else {
                vec![(Prop::Opacity, 0.0)]
            };
            animator.animate(
                TweenSpec::new(target, props)
                    .duration(PRESENT_DURATION)
                    .easing(Easing::Power1Out),
            );
            written += 1;
        }

        tracing::trace!(active, written, "stack presented");
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::anim::{Command, RecordingAnimator, Timeline};
    use crate::core::layout::Viewport;

    fn layout() -> Layout {
        Layout::compute(Viewport::new(1400.0, 900.0).unwrap(), 8)
    }

    #[test]
    fn slots_for_active_two() {
        let slots = stack_slots(2, 8);
        let positions: Vec<Option<usize>> = slots.iter().map(|s| s.stack_position).collect();
        assert_eq!(
            positions,
            vec![Some(2), Some(1), Some(0), None, None, None, None, None]
        );

        assert!((slots[2].scale - 1.0).abs() < 1e-9);
        assert!((slots[0].scale - 0.90).abs() < 1e-9);
        assert!((slots[0].offset_y - 30.0).abs() < 1e-9);
        assert_eq!(slots[2].stacking_order, 100);
        assert_eq!(slots[1].stacking_order, 99);
        assert_eq!(slots[0].stacking_order, 98);

        for s in &slots[3..] {
            assert!(!s.visible);
            assert_eq!(s.stacking_order, 0);
        }
    }

    #[test]
    fn active_item_is_always_on_top() {
        for active in 0..8 {
            let slots = stack_slots(active, 8);
            let top = slots.iter().max_by_key(|s| s.stacking_order).unwrap();
            assert_eq!(top.index, active);
        }
    }

    #[test]
    fn no_writes_while_transition_in_flight() {
        let mut anim = RecordingAnimator::default();
        let written = StackPresenter.present(3, &layout(), true, &mut anim);
        assert_eq!(written, 0);
        assert!(anim.commands.is_empty());
    }

    #[test]
    fn hidden_items_only_fade() {
        let mut anim = RecordingAnimator::default();
        assert_eq!(StackPresenter.present(1, &layout(), false, &mut anim), 8);
        let hidden: Vec<_> = anim
            .tweens()
            .into_iter()
            .filter(|t| t.target == Target::Item(5))
            .cloned()
            .collect();
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].props, vec![(Prop::Opacity, 0.0)]);
        assert!(anim
            .commands
            .contains(&Command::Set(Target::Item(5), vec![(Prop::StackingOrder, 0.0)])));
    }

    #[test]
    fn visible_items_settle_on_scaled_offset_geometry() {
        let l = layout();
        let mut tl = Timeline::new();
        StackPresenter.present(2, &l, false, &mut tl);
        tl.advance(1.0);

        let base = l.stacked(0).unwrap();
        let f = tl.item_frame(0).unwrap();
        let size = base.size * 0.9;
        assert!((f.width - size).abs() < 1e-6);
        assert!((f.x - (base.center_x - size / 2.0)).abs() < 1e-6);
        assert!((f.y - (base.center_y - size / 2.0 + 30.0)).abs() < 1e-6);
        assert_eq!(f.opacity, 1.0);
        assert_eq!(f.stacking_order, 98);

        let hidden = tl.get(Target::Item(4), Prop::Opacity);
        assert_eq!(hidden, Some(0.0));
    }
}
