//! Animation boundary — the scheduling capability the core depends on, and
//! the in-process [`Timeline`] that implements it.
//!
//! The core only ever talks to [`Animator`]: "animate this property map on
//! this target" and "cancel whatever targets it".  Completion is reported
//! as data ([`CompletionTag`] values returned from [`Timeline::advance`])
//! rather than through callbacks, and a cancelled tween never reports.

use std::collections::HashMap;

// ───────────────────────────────────────── vocabulary ────────

/// Something that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    Item(usize),
    Panel,
    Indicator,
}

/// An animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prop {
    X,
    Y,
    Width,
    Height,
    Rotation,
    Opacity,
    StackingOrder,
    PanelOffset,
    Progress,
}

/// Property writes for one target, in order.
pub type PropMap = Vec<(Prop, f64)>;

/// Easing curves, named after the tween-library curves they reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    /// Reference curve for timing tests.
    #[cfg(test)]
    Linear,
    /// Light quadratic ease-out.
    Power1Out,
    /// Standard cubic ease-out.
    Power2Out,
    /// Pronounced quartic ease-in-out.
    Power3InOut,
}

impl Easing {
    /// Map linear progress `t ∈ [0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            #[cfg(test)]
            Easing::Linear => t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power3InOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }
}

/// Identifies which group and member a completion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionTag {
    pub generation: u64,
    pub item: usize,
}

/// One "animate" request: target, properties, timing and an optional
/// completion tag.  Times are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSpec {
    pub target: Target,
    pub props: PropMap,
    pub duration: f64,
    pub delay: f64,
    pub easing: Easing,
    pub on_complete: Option<CompletionTag>,
}

impl TweenSpec {
    pub fn new(target: Target, props: PropMap) -> Self {
        Self {
            target,
            props,
            duration: 0.5,
            delay: 0.0,
            easing: Easing::Power1Out,
            on_complete: None,
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_complete(mut self, tag: CompletionTag) -> Self {
        self.on_complete = Some(tag);
        self
    }
}

/// The scheduling capability the core is written against.
pub trait Animator {
    /// Schedule a tween.  Properties it names override any running tween
    /// on the same target.
    fn animate(&mut self, tween: TweenSpec);

    /// Write properties immediately, overriding running tweens.
    fn set(&mut self, target: Target, props: &[(Prop, f64)]);

    /// Kill every tween on `target`.  Killed tweens never complete.
    fn cancel(&mut self, target: Target);

    /// Kill only the listed properties on `target`.  A tween left with no
    /// properties is killed outright.
    fn cancel_props(&mut self, target: Target, props: &[Prop]);
}

// ───────────────────────────────────────── timeline ──────────

#[derive(Debug, Clone)]
struct Channel {
    prop: Prop,
    from: f64,
    to: f64,
}

#[derive(Debug, Clone)]
struct ActiveTween {
    target: Target,
    channels: Vec<Channel>,
    start_at: f64,
    duration: f64,
    easing: Easing,
    on_complete: Option<CompletionTag>,
    started: bool,
}

impl ActiveTween {
    fn end_at(&self) -> f64 {
        self.start_at + self.duration
    }
}

/// Cooperative tween engine advanced by the frame loop.
///
/// Values live in a flat `(target, prop) → value` map.  A tween captures
/// its start values when its delay elapses, interpolates through its
/// easing, and writes the exact end values when it finishes.  A tween whose
/// properties were all overridden by a newer write keeps its schedule and
/// still reports completion.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    now: f64,
    values: HashMap<(Target, Prop), f64>,
    tweens: Vec<ActiveTween>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: Target, prop: Prop) -> Option<f64> {
        self.values.get(&(target, prop)).copied()
    }

    pub fn value_or(&self, target: Target, prop: Prop, default: f64) -> f64 {
        self.get(target, prop).unwrap_or(default)
    }

    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    /// Number of live tweens on `target`.
    #[cfg(test)]
    pub fn tweens_on(&self, target: Target) -> usize {
        self.tweens.iter().filter(|t| t.target == target).count()
    }

    /// Advance by `dt` seconds and return the tags of every tagged tween
    /// that finished, ordered by finish time.
    pub fn advance(&mut self, dt: f64) -> Vec<CompletionTag> {
        if dt.is_finite() && dt > 0.0 {
            self.now += dt;
        }
        let now = self.now;

        for tween in &mut self.tweens {
            if now < tween.start_at {
                continue;
            }
            if !tween.started {
                tween.started = true;
                for ch in &mut tween.channels {
                    ch.from = self
                        .values
                        .get(&(tween.target, ch.prop))
                        .copied()
                        .unwrap_or(ch.to);
                }
            }
            let progress = if tween.duration <= 0.0 {
                1.0
            } else {
                (now - tween.start_at) / tween.duration
            };
            let eased = tween.easing.apply(progress);
            for ch in &tween.channels {
                let value = if progress >= 1.0 {
                    ch.to
                } else {
                    ch.from + (ch.to - ch.from) * eased
                };
                self.values.insert((tween.target, ch.prop), value);
            }
        }

        let mut finished: Vec<(f64, CompletionTag)> = Vec::new();
        self.tweens.retain(|tween| {
            let done = tween.started && now >= tween.end_at();
            if done {
                if let Some(tag) = tween.on_complete {
                    finished.push((tween.end_at(), tag));
                }
            }
            !done
        });
        finished.sort_by(|a, b| a.0.total_cmp(&b.0));
        finished.into_iter().map(|(_, tag)| tag).collect()
    }

    /// Drop `props` from every live tween on `target` without killing them.
    fn override_props(&mut self, target: Target, props: &[Prop]) {
        for tween in self.tweens.iter_mut().filter(|t| t.target == target) {
            tween.channels.retain(|ch| !props.contains(&ch.prop));
        }
    }
}

impl Animator for Timeline {
    fn animate(&mut self, tween: TweenSpec) {
        let props: Vec<Prop> = tween.props.iter().map(|(p, _)| *p).collect();
        self.override_props(tween.target, &props);
        self.tweens.push(ActiveTween {
            target: tween.target,
            channels: tween
                .props
                .iter()
                .map(|&(prop, to)| Channel { prop, from: to, to })
                .collect(),
            start_at: self.now + tween.delay.max(0.0),
            duration: tween.duration.max(0.0),
            easing: tween.easing,
            on_complete: tween.on_complete,
            started: false,
        });
    }

    fn set(&mut self, target: Target, props: &[(Prop, f64)]) {
        let names: Vec<Prop> = props.iter().map(|(p, _)| *p).collect();
        self.override_props(target, &names);
        for &(prop, value) in props {
            self.values.insert((target, prop), value);
        }
    }

    fn cancel(&mut self, target: Target) {
        self.tweens.retain(|t| t.target != target);
    }

    fn cancel_props(&mut self, target: Target, props: &[Prop]) {
        for tween in self.tweens.iter_mut().filter(|t| t.target == target) {
            tween.channels.retain(|ch| !props.contains(&ch.prop));
        }
        self.tweens
            .retain(|t| t.target != target || !t.channels.is_empty());
    }
}

// ───────────────────────────────────────── render boundary ───

/// Final property set for one item, read back from the timeline each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemFrame {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub opacity: f64,
    pub stacking_order: i32,
}

impl Timeline {
    /// Current render properties of item `index`; `None` until it has been
    /// placed.
    pub fn item_frame(&self, index: usize) -> Option<ItemFrame> {
        let target = Target::Item(index);
        Some(ItemFrame {
            index,
            x: self.get(target, Prop::X)?,
            y: self.get(target, Prop::Y)?,
            width: self.get(target, Prop::Width)?,
            height: self.get(target, Prop::Height)?,
            rotation: self.value_or(target, Prop::Rotation, 0.0),
            opacity: self.value_or(target, Prop::Opacity, 1.0),
            stacking_order: self.value_or(target, Prop::StackingOrder, 0.0).round() as i32,
        })
    }

    /// Frames for items `0..count`, in paint order (lowest stacking order
    /// first, ties by index).
    pub fn frames_in_paint_order(&self, count: usize) -> Vec<ItemFrame> {
        let mut frames: Vec<ItemFrame> = (0..count).filter_map(|i| self.item_frame(i)).collect();
        frames.sort_by_key(|f| (f.stacking_order, f.index));
        frames
    }
}

// ───────────────────────────────────────── test support ──────

/// Animator spy that records every command instead of running it.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    pub commands: Vec<Command>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Animate(TweenSpec),
    Set(Target, PropMap),
    Cancel(Target),
    CancelProps(Target, Vec<Prop>),
}

#[cfg(test)]
impl RecordingAnimator {
    pub fn tweens(&self) -> Vec<&TweenSpec> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Animate(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Commands that write a value (animate or set) to any item.
    pub fn item_writes(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Command::Animate(TweenSpec { target: Target::Item(_), .. })
                        | Command::Set(Target::Item(_), _)
                )
            })
            .count()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
impl Animator for RecordingAnimator {
    fn animate(&mut self, tween: TweenSpec) {
        self.commands.push(Command::Animate(tween));
    }

    fn set(&mut self, target: Target, props: &[(Prop, f64)]) {
        self.commands.push(Command::Set(target, props.to_vec()));
    }

    fn cancel(&mut self, target: Target) {
        self.commands.push(Command::Cancel(target));
    }

    fn cancel_props(&mut self, target: Target, props: &[Prop]) {
        self.commands.push(Command::CancelProps(target, props.to_vec()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn easing_endpoints() {
        for e in [
            Easing::Linear,
            Easing::Power1Out,
            Easing::Power2Out,
            Easing::Power3InOut,
        ] {
            assert!(e.apply(0.0).abs() < EPS, "{e:?}");
            assert!((e.apply(1.0) - 1.0).abs() < EPS, "{e:?}");
        }
        assert!((Easing::Power3InOut.apply(0.5) - 0.5).abs() < EPS);
        // Ease-out curves run ahead of linear.
        assert!(Easing::Power2Out.apply(0.25) > 0.25);
    }

    #[test]
    fn tween_waits_for_delay_then_interpolates() {
        let mut tl = Timeline::new();
        tl.set(Target::Panel, &[(Prop::PanelOffset, 0.0)]);
        tl.animate(
            TweenSpec::new(Target::Panel, vec![(Prop::PanelOffset, 100.0)])
                .duration(1.0)
                .delay(0.5)
                .easing(Easing::Linear),
        );

        tl.advance(0.25);
        assert_eq!(tl.get(Target::Panel, Prop::PanelOffset), Some(0.0));
        tl.advance(0.75);
        let mid = tl.get(Target::Panel, Prop::PanelOffset).unwrap();
        assert!((mid - 50.0).abs() < EPS, "mid {mid}");
        tl.advance(1.0);
        assert_eq!(tl.get(Target::Panel, Prop::PanelOffset), Some(100.0));
        assert!(!tl.is_animating());
    }

    #[test]
    fn start_value_is_captured_when_delay_elapses() {
        let mut tl = Timeline::new();
        tl.set(Target::Indicator, &[(Prop::Progress, 0.0)]);
        tl.animate(
            TweenSpec::new(Target::Indicator, vec![(Prop::Progress, 10.0)])
                .duration(1.0)
                .delay(1.0)
                .easing(Easing::Linear),
        );
        tl.advance(0.5);
        tl.set(Target::Indicator, &[(Prop::Progress, 4.0)]);
        // The instant write overrode the pending tween's only property.
        tl.advance(1.0);
        assert_eq!(tl.get(Target::Indicator, Prop::Progress), Some(4.0));
    }

    #[test]
    fn completions_are_reported_in_finish_order() {
        let mut tl = Timeline::new();
        for (item, delay) in [(0usize, 0.3), (1, 0.0), (2, 0.1)] {
            tl.animate(
                TweenSpec::new(Target::Item(item), vec![(Prop::X, 1.0)])
                    .duration(0.2)
                    .delay(delay)
                    .on_complete(CompletionTag { generation: 1, item }),
            );
        }
        let done: Vec<usize> = tl.advance(5.0).into_iter().map(|t| t.item).collect();
        assert_eq!(done, vec![1, 2, 0]);
    }

    #[test]
    fn cancelled_tween_never_completes() {
        let mut tl = Timeline::new();
        let tag = CompletionTag { generation: 3, item: 4 };
        tl.animate(
            TweenSpec::new(Target::Item(4), vec![(Prop::Y, 10.0)])
                .duration(1.0)
                .on_complete(tag),
        );
        tl.advance(0.5);
        tl.cancel(Target::Item(4));
        assert!(tl.advance(10.0).is_empty());
    }

    #[test]
    fn cancel_props_keeps_other_channels() {
        let mut tl = Timeline::new();
        tl.animate(
            TweenSpec::new(Target::Item(0), vec![(Prop::X, 10.0), (Prop::Opacity, 0.0)])
                .duration(1.0),
        );
        tl.cancel_props(Target::Item(0), &[Prop::Opacity]);
        assert_eq!(tl.tweens_on(Target::Item(0)), 1);
        tl.advance(2.0);
        assert_eq!(tl.get(Target::Item(0), Prop::X), Some(10.0));
        assert_eq!(tl.get(Target::Item(0), Prop::Opacity), None);

        tl.animate(TweenSpec::new(Target::Item(1), vec![(Prop::Opacity, 0.0)]));
        tl.cancel_props(Target::Item(1), &[Prop::Opacity]);
        assert_eq!(tl.tweens_on(Target::Item(1)), 0);
    }

    #[test]
    fn overridden_tween_still_completes() {
        let mut tl = Timeline::new();
        let tag = CompletionTag { generation: 1, item: 0 };
        tl.animate(
            TweenSpec::new(Target::Item(0), vec![(Prop::Opacity, 0.0)])
                .duration(1.0)
                .on_complete(tag),
        );
        tl.set(Target::Item(0), &[(Prop::Opacity, 1.0)]);
        assert_eq!(tl.advance(2.0), vec![tag]);
        assert_eq!(tl.get(Target::Item(0), Prop::Opacity), Some(1.0));
    }

    #[test]
    fn frames_sort_by_stacking_order() {
        let mut tl = Timeline::new();
        for (i, z) in [(0usize, 98.0), (1, 99.0), (2, 100.0), (3, 0.0)] {
            tl.set(
                Target::Item(i),
                &[
                    (Prop::X, 0.0),
                    (Prop::Y, 0.0),
                    (Prop::Width, 10.0),
                    (Prop::Height, 10.0),
                    (Prop::StackingOrder, z),
                ],
            );
        }
        let order: Vec<usize> = tl.frames_in_paint_order(8).iter().map(|f| f.index).collect();
        assert_eq!(order, vec![3, 0, 1, 2]);
        assert!(tl.item_frame(5).is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn easing() -> impl Strategy<Value = Easing> {
            prop_oneof![
                Just(Easing::Linear),
                Just(Easing::Power1Out),
                Just(Easing::Power2Out),
                Just(Easing::Power3InOut),
            ]
        }

        proptest! {
            #[test]
            fn easing_is_monotonic(e in easing(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(e.apply(lo) <= e.apply(hi) + EPS);
            }

            #[test]
            fn easing_stays_in_unit_range(e in easing(), t in -1.0f64..=2.0) {
                let v = e.apply(t);
                prop_assert!((-EPS..=1.0 + EPS).contains(&v));
            }
        }
    }
}
