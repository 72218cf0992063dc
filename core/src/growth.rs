//! Bounded-rate transfer of food value from a consumable to a player.
//!
//! A [`GrowthAnimation`] walks its `remaining` value toward zero in steps of at
//! most `step_size`. The owner calls [`GrowthAnimation::step`] once per tick and
//! applies the returned delta; the animation itself never touches the player.
//! Starting with `remaining = R` and `step_size = S` finishes after exactly
//! `ceil(|R| / S)` steps whose deltas sum to `R`.

use thiserror::Error;

/// Lifecycle of a growth animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrowthState {
    /// Still transferring value.
    Running,
    /// Transferred its full value.
    Completed,
    /// Stopped early; already transferred value is kept by the player.
    Cancelled,
}

/// Raised when a finished animation is driven again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("growth animation is {state:?} and cannot advance")]
pub struct InvalidTransitionError {
    /// State the animation was in.
    pub state: GrowthState,
}

/// Outcome of a single growth step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthStep {
    /// Food value to apply to the player this tick.
    pub delta: i32,
    /// Whether the step transferred the last of the value.
    pub finished: bool,
}

/// Cancellable, resumable food value transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthAnimation {
    remaining: i32,
    step_size: i32,
    state: GrowthState,
}

impl GrowthAnimation {
    /// Starts transferring `total` at no more than `step_size` per step.
    ///
    /// A zero total starts out completed. Non-positive step sizes are raised
    /// to one.
    #[must_use]
    pub fn start(total: i32, step_size: i32) -> Self {
        let state = if total == 0 {
            GrowthState::Completed
        } else {
            GrowthState::Running
        };
        Self {
            remaining: total,
            step_size: step_size.max(1),
            state,
        }
    }

    /// Food value still to be transferred.
    #[must_use]
    pub const fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Largest magnitude transferred per step.
    #[must_use]
    pub const fn step_size(&self) -> i32 {
        self.step_size
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GrowthState {
        self.state
    }

    /// Reports whether further steps will transfer value.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == GrowthState::Running
    }

    /// Number of steps left until the animation completes.
    #[must_use]
    pub fn steps_left(&self) -> u32 {
        if !self.is_running() {
            return 0;
        }
        self.remaining
            .unsigned_abs()
            .div_ceil(self.step_size.unsigned_abs())
    }

    /// Transfers one bounded slice of the remaining value.
    pub fn step(&mut self) -> Result<GrowthStep, InvalidTransitionError> {
        if !self.is_running() {
            return Err(InvalidTransitionError { state: self.state });
        }

        let delta = if self.remaining > 0 {
            self.remaining.min(self.step_size)
        } else {
            self.remaining.max(-self.step_size)
        };
        self.remaining -= delta;

        let finished = self.remaining == 0;
        if finished {
            self.state = GrowthState::Completed;
        }
        Ok(GrowthStep { delta, finished })
    }

    /// Stops the animation; no further steps are accepted.
    pub fn cancel(&mut self) -> Result<(), InvalidTransitionError> {
        if !self.is_running() {
            return Err(InvalidTransitionError { state: self.state });
        }
        self.state = GrowthState::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(animation: &mut GrowthAnimation) -> (u32, i32) {
        let mut steps = 0;
        let mut applied = 0;
        while animation.is_running() {
            let step = animation.step().expect("running animation steps");
            assert!(step.delta.abs() <= animation.step_size());
            applied += step.delta;
            steps += 1;
        }
        (steps, applied)
    }

    #[test]
    fn completes_in_ceil_steps_without_residual() {
        for (total, step_size) in [(30, 5), (31, 5), (4, 5), (-80, 5), (-7, 3), (1, 1), (-1, 10)] {
            let mut animation = GrowthAnimation::start(total, step_size);
            let expected = total.unsigned_abs().div_ceil(step_size as u32);
            assert_eq!(animation.steps_left(), expected);

            let (steps, applied) = drain(&mut animation);
            assert_eq!(steps, expected, "total {total} step {step_size}");
            assert_eq!(applied, total, "total {total} step {step_size}");
            assert_eq!(animation.remaining(), 0);
            assert_eq!(animation.state(), GrowthState::Completed);
        }
    }

    #[test]
    fn final_step_reports_completion() {
        let mut animation = GrowthAnimation::start(7, 5);
        assert_eq!(
            animation.step(),
            Ok(GrowthStep {
                delta: 5,
                finished: false
            })
        );
        assert_eq!(
            animation.step(),
            Ok(GrowthStep {
                delta: 2,
                finished: true
            })
        );
    }

    #[test]
    fn negative_values_shrink_toward_zero() {
        let mut animation = GrowthAnimation::start(-12, 5);
        let deltas: Vec<i32> = std::iter::from_fn(|| animation.step().ok().map(|s| s.delta)).collect();
        assert_eq!(deltas, vec![-5, -5, -2]);
    }

    #[test]
    fn zero_total_starts_completed() {
        let mut animation = GrowthAnimation::start(0, 5);
        assert_eq!(animation.state(), GrowthState::Completed);
        assert_eq!(animation.steps_left(), 0);
        assert!(animation.step().is_err());
    }

    #[test]
    fn cancelled_animation_refuses_steps() {
        let mut animation = GrowthAnimation::start(30, 5);
        let _ = animation.step().expect("first step");
        let _ = animation.step().expect("second step");
        animation.cancel().expect("cancel running animation");

        assert_eq!(animation.remaining(), 20);
        assert_eq!(
            animation.step(),
            Err(InvalidTransitionError {
                state: GrowthState::Cancelled
            })
        );
        assert!(animation.cancel().is_err());
        assert_eq!(animation.steps_left(), 0);
    }

    #[test]
    fn completed_animation_cannot_be_cancelled() {
        let mut animation = GrowthAnimation::start(3, 5);
        let _ = animation.step().expect("single step");
        assert_eq!(
            animation.cancel(),
            Err(InvalidTransitionError {
                state: GrowthState::Completed
            })
        );
    }

    #[test]
    fn step_size_is_at_least_one() {
        let animation = GrowthAnimation::start(3, 0);
        assert_eq!(animation.step_size(), 1);
        assert_eq!(animation.steps_left(), 3);
    }

    #[test]
    fn extreme_negative_total_does_not_overflow() {
        let mut animation = GrowthAnimation::start(i32::MIN, i32::MAX);
        let (steps, applied) = drain(&mut animation);
        assert_eq!(steps, 2);
        assert_eq!(applied, i32::MIN);
    }
}
