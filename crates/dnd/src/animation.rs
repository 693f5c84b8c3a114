//! Tweens and ordered settle sequences.
//!
//! Animations are plain data advanced by the host's frame tick. A
//! [`Sequence`] runs its steps strictly one after another; each step starts
//! from whatever the target looks like when the previous step ends, so the
//! ordering of a drop or cancel settle is explicit and testable without a
//! renderer.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::geometry::Rect;

/// Easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseOutExpo,
    EaseInExpo,
    EaseOutBack,
}

impl Easing {
    /// Maps linear progress `t` in `0..=1` onto the curve.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_dnd::animation::Easing;
    ///
    /// assert_eq!(Easing::EaseOutExpo.apply(0.0), 0.0);
    /// assert_eq!(Easing::EaseOutExpo.apply(1.0), 1.0);
    /// assert!(Easing::EaseOutBack.apply(0.7) > 1.0);
    /// ```
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::EaseInExpo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
            Self::EaseOutBack => {
                const C1: f64 = 1.70158;
                const C3: f64 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u.powi(3) + C1 * u.powi(2)
            }
        }
    }
}

/// Animatable presentation of a scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visual {
    /// Absolute position and size; `None` keeps the node in layout flow.
    pub rect: Option<Rect>,
    pub opacity: f64,
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    pub z_index: Option<i32>,
    pub pointer_events: bool,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            rect: None,
            opacity: 1.0,
            scale: 1.0,
            rotation: 0.0,
            z_index: None,
            pointer_events: true,
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl Visual {
    /// Interpolates towards `to`. Discrete properties take `to`'s value.
    #[must_use]
    pub fn lerp(&self, to: &Visual, t: f64) -> Visual {
        let rect = match (self.rect, to.rect) {
            (Some(a), Some(b)) => Some(Rect::new(
                lerp(a.x, b.x, t),
                lerp(a.y, b.y, t),
                lerp(a.width, b.width, t),
                lerp(a.height, b.height, t),
            )),
            (_, rect) => rect,
        };
        Visual {
            rect,
            opacity: lerp(self.opacity, to.opacity, t),
            scale: lerp(self.scale, to.scale, t),
            rotation: lerp(self.rotation, to.rotation, t),
            z_index: to.z_index,
            pointer_events: to.pointer_events,
        }
    }

    /// Same visual with a different scale.
    #[must_use]
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }
}

/// A single interpolation between two visuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Visual,
    pub to: Visual,
    pub duration: Duration,
    pub easing: Easing,
}

impl Tween {
    /// Samples the tween `elapsed` after its start.
    ///
    /// Returns the visual and whether the tween has completed.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> (Visual, bool) {
        if elapsed >= self.duration {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.from.lerp(&self.to, self.easing.apply(t)), false)
    }
}

/// What happens to a node after its step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterStep {
    Keep,
    Remove,
}

/// One step of a [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<K> {
    pub target: K,
    pub to: Visual,
    pub duration: Duration,
    pub easing: Easing,
    pub then: AfterStep,
}

impl<K> Step<K> {
    #[must_use]
    pub fn new(target: K, to: Visual, duration_ms: u64, easing: Easing) -> Self {
        Self {
            target,
            to,
            duration: Duration::from_millis(duration_ms),
            easing,
            then: AfterStep::Keep,
        }
    }

    /// Marks the target for removal once this step completes.
    #[must_use]
    pub fn then_remove(mut self) -> Self {
        self.then = AfterStep::Remove;
        self
    }
}

/// Output of [`Sequence::advance`], in the order it must be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame<K> {
    /// Show `visual` on `target`.
    Update { target: K, visual: Visual },
    /// A step on `target` completed.
    Finished { target: K, then: AfterStep },
}

#[derive(Debug, Clone)]
struct Running<K> {
    step: Step<K>,
    tween: Tween,
    started: Instant,
}

/// Steps run strictly in order.
#[derive(Debug, Clone)]
pub struct Sequence<K> {
    pending: VecDeque<Step<K>>,
    running: Option<Running<K>>,
    next_start: Option<Instant>,
}

impl<K: Copy + PartialEq> Sequence<K> {
    /// Creates a sequence whose first step starts at `start`.
    #[must_use]
    pub fn new(steps: impl IntoIterator<Item = Step<K>>, start: Instant) -> Self {
        Self {
            pending: steps.into_iter().collect(),
            running: None,
            next_start: Some(start),
        }
    }

    /// Returns `true` once every step has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.running.is_none() && self.pending.is_empty()
    }

    /// Steps not yet completed, including the running one.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len() + usize::from(self.running.is_some())
    }

    /// Advances to `now`.
    ///
    /// `current` reports a target's present visual, or `None` if it no
    /// longer exists, in which case its steps complete without updates.
    /// Several steps may complete in one call; each following step starts
    /// exactly when the previous one ended.
    pub fn advance(
        &mut self,
        now: Instant,
        mut current: impl FnMut(K) -> Option<Visual>,
    ) -> Vec<Frame<K>> {
        let mut frames = Vec::new();
        let mut shown: Vec<(K, Visual)> = Vec::new();

        loop {
            if self.running.is_none() {
                let Some(step) = self.pending.pop_front() else {
                    break;
                };
                let started = self.next_start.unwrap_or(now);
                let from = shown
                    .iter()
                    .rev()
                    .find(|(k, _)| *k == step.target)
                    .map(|(_, v)| *v)
                    .or_else(|| current(step.target));
                let Some(from) = from else {
                    frames.push(Frame::Finished {
                        target: step.target,
                        then: step.then,
                    });
                    self.next_start = Some(started);
                    continue;
                };
                let tween = Tween {
                    from,
                    to: step.to,
                    duration: step.duration,
                    easing: step.easing,
                };
                self.running = Some(Running {
                    step,
                    tween,
                    started,
                });
            }

            let Some(running) = self.running.as_ref() else {
                break;
            };
            let elapsed = now.saturating_duration_since(running.started);
            let (visual, done) = running.tween.sample(elapsed);
            let target = running.step.target;
            frames.push(Frame::Update { target, visual });
            shown.push((target, visual));

            if !done {
                break;
            }
            frames.push(Frame::Finished {
                target,
                then: running.step.then,
            });
            self.next_start = Some(running.started + running.step.duration);
            self.running = None;
        }

        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Part {
        A,
        B,
    }

    fn faded(opacity: f64) -> Visual {
        Visual {
            opacity,
            ..Visual::default()
        }
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseOutExpo,
            Easing::EaseInExpo,
            Easing::EaseOutBack,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-3, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?}");
        }
    }

    #[test]
    fn tween_halfway_linear() {
        let tween = Tween {
            from: faded(0.0),
            to: faded(1.0),
            duration: Duration::from_millis(100),
            easing: Easing::Linear,
        };
        let (visual, done) = tween.sample(Duration::from_millis(50));
        assert!(!done);
        assert!((visual.opacity - 0.5).abs() < 1e-9);
        assert_eq!(tween.sample(Duration::from_millis(100)), (faded(1.0), true));
    }

    #[test]
    fn lerp_without_source_rect_jumps() {
        let target = Rect::new(10.0, 10.0, 5.0, 5.0);
        let to = Visual {
            rect: Some(target),
            ..Visual::default()
        };
        assert_eq!(Visual::default().lerp(&to, 0.1).rect, Some(target));
    }

    #[test]
    fn steps_run_in_order() {
        let start = Instant::now();
        let mut sequence = Sequence::new(
            [
                Step::new(Part::A, faded(0.5), 100, Easing::Linear),
                Step::new(Part::B, faded(0.0), 100, Easing::Linear).then_remove(),
            ],
            start,
        );
        assert_eq!(sequence.remaining(), 2);

        let frames = sequence.advance(start + Duration::from_millis(50), |_| Some(faded(1.0)));
        assert_eq!(frames.len(), 1);
        assert!(matches!(frames[0], Frame::Update { target: Part::A, .. }));

        let frames = sequence.advance(start + Duration::from_millis(150), |_| Some(faded(1.0)));
        assert_eq!(
            frames[..2],
            [
                Frame::Update {
                    target: Part::A,
                    visual: faded(0.5)
                },
                Frame::Finished {
                    target: Part::A,
                    then: AfterStep::Keep
                },
            ]
        );
        // B started at 100ms, so it is halfway at 150ms.
        match frames[2] {
            Frame::Update {
                target: Part::B,
                visual,
            } => assert!((visual.opacity - 0.5).abs() < 1e-9),
            other => panic!("unexpected frame {other:?}"),
        }
        assert!(!sequence.is_finished());

        let frames = sequence.advance(start + Duration::from_millis(400), |_| Some(faded(1.0)));
        assert_eq!(
            frames.last(),
            Some(&Frame::Finished {
                target: Part::B,
                then: AfterStep::Remove
            })
        );
        assert!(sequence.is_finished());
    }

    #[test]
    fn later_step_starts_from_earlier_result() {
        let start = Instant::now();
        let mut sequence = Sequence::new(
            [
                Step::new(Part::A, faded(0.4), 10, Easing::Linear),
                Step::new(Part::A, faded(0.0), 100, Easing::Linear),
            ],
            start,
        );
        let frames = sequence.advance(start + Duration::from_millis(60), |_| Some(faded(1.0)));
        match frames.last() {
            Some(Frame::Update { visual, .. }) => assert!((visual.opacity - 0.2).abs() < 1e-9),
            other => panic!("unexpected frame {other:?}"),
        }
    }

    #[test]
    fn missing_target_completes_silently() {
        let start = Instant::now();
        let mut sequence = Sequence::new(
            [Step::new(Part::A, faded(0.0), 100, Easing::Linear).then_remove()],
            start,
        );
        let frames = sequence.advance(start, |_| None);
        assert_eq!(
            frames,
            vec![Frame::Finished {
                target: Part::A,
                then: AfterStep::Remove
            }]
        );
        assert!(sequence.is_finished());
    }

    #[test]
    fn empty_sequence_is_finished() {
        let mut sequence: Sequence<Part> = Sequence::new([], Instant::now());
        assert!(sequence.is_finished());
        assert!(sequence.advance(Instant::now(), |_| None).is_empty());
    }
}
