use crate::error::{RippleError, RippleResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    Transitioning,
}

/// Index-based navigation state machine.
///
/// Lives for the whole session; no terminal state. While a transition
/// runs every request is rejected synchronously and nothing is queued;
/// callers re-issue after observing the change event.
#[derive(Clone, Copy, Debug)]
pub struct NavState {
    current: usize,
    target: Option<usize>,
    phase: NavPhase,
}

impl NavState {
    pub fn new() -> Self {
        Self {
            current: 0,
            target: None,
            phase: NavPhase::Idle,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    pub fn is_busy(&self) -> bool {
        self.phase == NavPhase::Transitioning
    }

    /// Next index with wraparound to 0 past the end. `None` while busy.
    pub fn request_next(&self, len: usize) -> Option<usize> {
        if self.is_busy() {
            return None;
        }
        Some(if self.current + 1 < len {
            self.current + 1
        } else {
            0
        })
    }

    /// Previous index with wraparound to the last slide. `None` while busy.
    pub fn request_prev(&self, len: usize) -> Option<usize> {
        if self.is_busy() {
            return None;
        }
        Some(if self.current > 0 {
            self.current - 1
        } else {
            len.saturating_sub(1)
        })
    }

    /// Explicit target. `Ok(None)` while busy; out-of-range is rejected
    /// with an error rather than propagated.
    pub fn request_to(&self, index: usize, len: usize) -> RippleResult<Option<usize>> {
        if index >= len {
            return Err(RippleError::navigation(format!(
                "slide index {index} out of range 0..{len}"
            )));
        }
        if self.is_busy() {
            return Ok(None);
        }
        Ok(Some(index))
    }

    /// Flip to `Transitioning`. This is the reentrancy guard: it is
    /// taken before any timeline is built.
    pub fn begin(&mut self, target: usize) {
        debug_assert_eq!(self.phase, NavPhase::Idle);
        self.target = Some(target);
        self.phase = NavPhase::Transitioning;
    }

    /// Commit the in-flight target and return to `Idle`.
    pub fn complete(&mut self) -> usize {
        if let Some(target) = self.target.take() {
            self.current = target;
        }
        self.phase = NavPhase::Idle;
        self.current
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}
