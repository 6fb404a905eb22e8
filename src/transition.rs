//! Builder for the liquid-wipe transition timeline.
//!
//! One transition is a single composite timeline, offsets in seconds
//! from timeline start:
//!
//! 1. `[0.0, 0.1)`  incoming opacity → 0.01, linear. Near-zero nudge
//!    that forces the renderer to composite the incoming slide once
//!    before the real fade, avoiding a first-run stutter.
//! 2. `[0.0, 0.8)`  displacement scale, current → peak.
//! 3. `[0.5, 1.2)`  outgoing opacity → 0.
//! 4. `[0.5, 1.2)`  incoming opacity (nudge carried over) → 1.
//! 5. `[0.6, 1.4)`  displacement scale, peak → settle. Starts from the
//!    configured peak even though segment 2 is still open at 0.6; being
//!    declared last, it wins the overlap.

use crate::{
    config::SlideshowConfig,
    ease::Ease,
    error::RippleResult,
    timeline::{Segment, StartValue, Timeline, TweenTarget, Value},
};

/// Opacity nudge for the incoming slide before the real fade begins.
pub const WARMUP_OPACITY: f64 = 0.01;

/// Wacky mode: rotation gained per update tick is `progress * this`.
pub const WACKY_ROTATION_DELTA: f64 = 0.02;
/// Wacky mode: uniform map scale is `progress * this`, overriding the
/// scale segments for that frame.
pub const WACKY_SCALE_FACTOR: f64 = 3.0;
/// Wacky mode: map scale snaps back here when the transition commits.
pub const WACKY_SCALE_RESET: f64 = 1.0;

/// Total timeline length in seconds.
pub const TRANSITION_DURATION: f64 = 1.4;

/// Build the transition timeline from slide `from` to slide `to`.
///
/// `to == from` is allowed and runs the full sequence; the fades cancel
/// out visually but the choreography and the completion commit still
/// happen.
pub fn build(from: usize, to: usize, config: &SlideshowConfig) -> RippleResult<Timeline> {
    let fade = Ease::OutCubic;
    Timeline::new(vec![
        Segment {
            target: TweenTarget::SlideOpacity(to),
            start: 0.0,
            end: 0.1,
            from: StartValue::Current,
            to: Value::Scalar(WARMUP_OPACITY),
            ease: Ease::Linear,
        },
        Segment {
            target: TweenTarget::DisplaceScale,
            start: 0.0,
            end: 0.8,
            from: StartValue::Current,
            to: Value::Pair(config.displace_scale),
            ease: fade,
        },
        Segment {
            target: TweenTarget::SlideOpacity(from),
            start: 0.5,
            end: 1.2,
            from: StartValue::Current,
            to: Value::Scalar(0.0),
            ease: fade,
        },
        Segment {
            target: TweenTarget::SlideOpacity(to),
            start: 0.5,
            end: 1.2,
            from: StartValue::Current,
            to: Value::Scalar(1.0),
            ease: fade,
        },
        Segment {
            target: TweenTarget::DisplaceScale,
            start: 0.6,
            end: TRANSITION_DURATION,
            from: StartValue::Fixed(Value::Pair(config.displace_scale)),
            to: Value::Pair(config.displace_scale_to),
            ease: fade,
        },
    ])
}
