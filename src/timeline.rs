//! Time-ordered property interpolations with relative start offsets,
//! advanced by a shared clock.
//!
//! A [`Timeline`] is a resumable state machine: each `advance(dt)` call
//! moves the clock and yields the property writes due this tick, the
//! overall progress, and a completion flag. Callers apply the writes;
//! the timeline itself never touches engine state. Within one tick,
//! writes come out in segment declaration order, so a later-declared
//! segment wins an overlap on the same property.

use kurbo::Vec2;

use crate::{
    ease::Ease,
    error::{RippleError, RippleResult},
};

/// Property a segment drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    SlideOpacity(usize),
    DisplaceScale,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Scalar(f64),
    Pair(Vec2),
}

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Value {
    fn lerp(a: Value, b: Value, t: f64) -> Value {
        match (a, b) {
            (Value::Scalar(x), Value::Scalar(y)) => Value::Scalar(<f64 as Lerp>::lerp(&x, &y, t)),
            (Value::Pair(x), Value::Pair(y)) => Value::Pair(<Vec2 as Lerp>::lerp(&x, &y, t)),
            // Mismatched kinds cannot come out of a validated timeline.
            (_, b) => {
                debug_assert!(false, "lerp across value kinds");
                b
            }
        }
    }
}

/// Where a segment's interpolation starts.
#[derive(Clone, Copy, Debug)]
pub enum StartValue {
    /// Known at build time.
    Fixed(Value),
    /// Read from the live property when the segment's window opens.
    Current,
}

#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub target: TweenTarget,
    /// Window `[start, end)` in seconds from timeline start.
    pub start: f64,
    pub end: f64,
    pub from: StartValue,
    pub to: Value,
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyWrite {
    pub target: TweenTarget,
    pub value: Value,
}

#[derive(Clone, Debug)]
pub struct TimelineTick {
    pub writes: Vec<PropertyWrite>,
    /// Whole-timeline progress in `[0, 1]`.
    pub progress: f64,
    pub completed: bool,
}

#[derive(Clone, Copy, Debug)]
struct SegmentState {
    segment: Segment,
    captured: Option<Value>,
    finished: bool,
}

#[derive(Clone, Debug)]
pub struct Timeline {
    segments: Vec<SegmentState>,
    elapsed: f64,
    duration: f64,
}

impl Timeline {
    pub fn new(segments: Vec<Segment>) -> RippleResult<Self> {
        if segments.is_empty() {
            return Err(RippleError::animation("timeline needs at least one segment"));
        }
        let mut duration = 0.0f64;
        for seg in &segments {
            if !seg.start.is_finite() || !seg.end.is_finite() || seg.start < 0.0 {
                return Err(RippleError::animation("segment window must be finite and >= 0"));
            }
            if seg.end < seg.start {
                return Err(RippleError::animation("segment window end must be >= start"));
            }
            duration = duration.max(seg.end);
        }
        Ok(Self {
            segments: segments
                .into_iter()
                .map(|segment| SegmentState {
                    segment,
                    captured: None,
                    finished: false,
                })
                .collect(),
            elapsed: 0.0,
            duration,
        })
    }

    pub fn progress(&self) -> f64 {
        if self.duration == 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_active(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Advance the shared clock by `dt` and collect due writes.
    ///
    /// `resolve` reads the live value of a property; it is consulted
    /// when a `StartValue::Current` segment activates and no earlier
    /// segment wrote that property this same tick.
    pub fn advance(
        &mut self,
        dt: f64,
        resolve: &mut dyn FnMut(TweenTarget) -> Value,
    ) -> TimelineTick {
        self.elapsed += dt.max(0.0);
        let mut writes: Vec<PropertyWrite> = Vec::new();

        for state in &mut self.segments {
            let seg = state.segment;
            if state.finished || self.elapsed < seg.start {
                continue;
            }

            let from = *state.captured.get_or_insert_with(|| match seg.from {
                StartValue::Fixed(v) => v,
                StartValue::Current => writes
                    .iter()
                    .rev()
                    .find(|w| w.target == seg.target)
                    .map(|w| w.value)
                    .unwrap_or_else(|| resolve(seg.target)),
            });

            let span = seg.end - seg.start;
            let t = if span <= 0.0 {
                1.0
            } else {
                ((self.elapsed - seg.start) / span).clamp(0.0, 1.0)
            };
            writes.push(PropertyWrite {
                target: seg.target,
                value: Value::lerp(from, seg.to, seg.ease.apply(t)),
            });

            // The clamp above guarantees the exact end value was just
            // written, so the segment can retire.
            if self.elapsed >= seg.end {
                state.finished = true;
            }
        }

        TimelineTick {
            writes,
            progress: self.progress(),
            completed: self.elapsed >= self.duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(target: TweenTarget, start: f64, end: f64, to: f64) -> Segment {
        Segment {
            target,
            start,
            end,
            from: StartValue::Current,
            to: Value::Scalar(to),
            ease: Ease::Linear,
        }
    }

    fn resolve_zero(_: TweenTarget) -> Value {
        Value::Scalar(0.0)
    }

    #[test]
    fn empty_timeline_is_rejected() {
        assert!(Timeline::new(Vec::new()).is_err());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let seg = scalar(TweenTarget::SlideOpacity(0), 1.0, 0.5, 1.0);
        assert!(Timeline::new(vec![seg]).is_err());
    }

    #[test]
    fn segment_waits_for_its_window() {
        let seg = scalar(TweenTarget::SlideOpacity(0), 0.5, 1.0, 1.0);
        let mut tl = Timeline::new(vec![seg]).unwrap();
        let tick = tl.advance(0.25, &mut resolve_zero);
        assert!(tick.writes.is_empty());
        assert!(!tick.completed);
    }

    #[test]
    fn linear_segment_interpolates_from_captured_value() {
        let seg = scalar(TweenTarget::SlideOpacity(0), 0.0, 1.0, 10.0);
        let mut tl = Timeline::new(vec![seg]).unwrap();
        let mut resolve = |_: TweenTarget| Value::Scalar(5.0);
        let tick = tl.advance(0.5, &mut resolve);
        assert_eq!(tick.writes[0].value, Value::Scalar(7.5));
    }

    #[test]
    fn fixed_start_ignores_live_value() {
        let seg = Segment {
            from: StartValue::Fixed(Value::Scalar(2.0)),
            ..scalar(TweenTarget::SlideOpacity(0), 0.0, 1.0, 4.0)
        };
        let mut tl = Timeline::new(vec![seg]).unwrap();
        let mut resolve = |_: TweenTarget| Value::Scalar(99.0);
        let tick = tl.advance(0.5, &mut resolve);
        assert_eq!(tick.writes[0].value, Value::Scalar(3.0));
    }

    #[test]
    fn capture_prefers_same_tick_writes() {
        // Two segments on the same property where the second activates
        // in the same tick the first retires: the second must start
        // from the first's end value, not the stale live value.
        let a = scalar(TweenTarget::SlideOpacity(0), 0.0, 0.1, 0.01);
        let b = scalar(TweenTarget::SlideOpacity(0), 0.1, 1.1, 1.0);
        let mut tl = Timeline::new(vec![a, b]).unwrap();
        let tick = tl.advance(0.1, &mut resolve_zero);
        assert_eq!(tick.writes.len(), 2);
        assert_eq!(tick.writes[0].value, Value::Scalar(0.01));
        assert_eq!(tick.writes[1].value, Value::Scalar(0.01));
    }

    #[test]
    fn later_segment_wins_overlap_in_write_order() {
        let a = scalar(TweenTarget::DisplaceScale, 0.0, 1.0, 0.0);
        let b = scalar(TweenTarget::DisplaceScale, 0.5, 1.5, 0.0);
        let mut tl = Timeline::new(vec![
            Segment {
                to: Value::Pair(Vec2::new(200.0, 70.0)),
                from: StartValue::Fixed(Value::Pair(Vec2::ZERO)),
                ..a
            },
            Segment {
                to: Value::Pair(Vec2::new(20.0, 20.0)),
                from: StartValue::Fixed(Value::Pair(Vec2::new(200.0, 70.0))),
                ..b
            },
        ])
        .unwrap();
        let tick = tl.advance(0.75, &mut resolve_zero);
        let scale_writes: Vec<_> = tick
            .writes
            .iter()
            .filter(|w| w.target == TweenTarget::DisplaceScale)
            .collect();
        assert_eq!(scale_writes.len(), 2);
        // Declaration order preserved; the settle segment is last.
        match scale_writes[1].value {
            Value::Pair(v) => assert!(v.x < 200.0),
            Value::Scalar(_) => unreachable!(),
        }
    }

    #[test]
    fn retired_segment_writes_exact_end_value_once() {
        let seg = scalar(TweenTarget::SlideOpacity(0), 0.0, 0.5, 1.0);
        let mut tl = Timeline::new(vec![seg]).unwrap();
        let tick = tl.advance(0.7, &mut resolve_zero);
        assert_eq!(tick.writes[0].value, Value::Scalar(1.0));
        let tick2 = tl.advance(0.1, &mut resolve_zero);
        assert!(tick2.writes.is_empty());
    }

    #[test]
    fn completion_and_progress_track_the_longest_window() {
        let a = scalar(TweenTarget::SlideOpacity(0), 0.0, 0.5, 1.0);
        let b = scalar(TweenTarget::SlideOpacity(1), 0.6, 1.4, 1.0);
        let mut tl = Timeline::new(vec![a, b]).unwrap();
        let tick = tl.advance(0.7, &mut resolve_zero);
        assert!((tick.progress - 0.5).abs() < 1e-9);
        assert!(!tick.completed);
        let tick = tl.advance(0.7, &mut resolve_zero);
        assert_eq!(tick.progress, 1.0);
        assert!(tick.completed);
        assert!(!tl.is_active());
    }

    #[test]
    fn oversized_first_tick_completes_everything_exactly() {
        let a = scalar(TweenTarget::SlideOpacity(0), 0.0, 0.5, 0.25);
        let b = scalar(TweenTarget::SlideOpacity(1), 0.5, 1.2, 1.0);
        let mut tl = Timeline::new(vec![a, b]).unwrap();
        let tick = tl.advance(10.0, &mut resolve_zero);
        assert!(tick.completed);
        assert_eq!(tick.writes[0].value, Value::Scalar(0.25));
        assert_eq!(tick.writes[1].value, Value::Scalar(1.0));
    }
}
