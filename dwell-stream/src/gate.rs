// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The per-subscription state machine behind both operators.
//!
//! A [`Gate`] knows nothing about clocks or schedulers. It is fed observations ("the
//! predicate does not hold" or "it holds, and this much of the threshold is left") and
//! answers with a [`GateStep`]: what to emit now, whether to cancel the pending emission,
//! and whether to arm a new one. The stream driving it owns the timer.
//!
//! Both operators are the same machine. They differ only in the value emitted once the
//! threshold has elapsed, which [`GateMode::expiry_value`] names:
//!
//! | mode | while waiting | on expiry |
//! |---|---|---|
//! | [`GateMode::WhenTrueFor`] | `false` | `true` |
//! | [`GateMode::LimitTrueDuration`] | `true` | `false` |
//!
//! A predicate that does not hold always yields `false`.

use core::time::Duration;
use dwell_core::Instant;

/// Which operator a [`Gate`] implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateMode {
    /// `true` only once the predicate has held for at least the threshold.
    WhenTrueFor,
    /// `true` while the predicate holds, but for at most the threshold.
    LimitTrueDuration,
}

impl GateMode {
    /// The value emitted once the threshold has elapsed.
    pub const fn expiry_value(self) -> bool {
        matches!(self, GateMode::WhenTrueFor)
    }

    /// The value emitted while the predicate holds and the threshold has not elapsed yet.
    pub const fn waiting_value(self) -> bool {
        !self.expiry_value()
    }
}

/// One evaluation of the predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// The predicate does not hold, or the entity has no state.
    NotHeld,
    /// The predicate holds; `remaining` is what is left of the threshold.
    Held { remaining: Duration },
}

impl Observation {
    /// Builds a `Held` observation from the threshold and the relevant timestamps.
    pub fn held<I: Instant>(threshold: Duration, now: I, last_changed: I) -> Self {
        Observation::Held {
            remaining: remaining_wait(threshold, now, last_changed),
        }
    }
}

/// What the driver must do after feeding the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStep {
    /// Cancel the pending emission before doing anything else.
    pub cancel_pending: bool,
    /// Emit this value now.
    pub emit: Option<bool>,
    /// Arm an emission of the mode's expiry value after this delay.
    pub arm_after: Option<Duration>,
}

/// Time left before a state current since `last_changed` has been current for `threshold`.
///
/// A `last_changed` after `now` lengthens the wait by the difference. Zero means the
/// threshold has already been met.
pub fn remaining_wait<I: Instant>(threshold: Duration, now: I, last_changed: I) -> Duration {
    if last_changed > now {
        threshold.saturating_add(last_changed.saturating_duration_since(now))
    } else {
        threshold.saturating_sub(now.saturating_duration_since(last_changed))
    }
}

/// Distinct-until-changed state machine shared by `when_true_for` and
/// `limit_true_duration`.
///
/// ```rust
/// use dwell_stream::gate::{Gate, GateMode, Observation};
/// use std::time::Duration;
///
/// let mut gate = Gate::new(GateMode::WhenTrueFor);
///
/// let step = gate.observe(Observation::Held { remaining: Duration::from_secs(2) });
/// assert_eq!(step.emit, Some(false));
/// assert_eq!(step.arm_after, Some(Duration::from_secs(2)));
///
/// assert_eq!(gate.expire(), Some(true));
/// ```
#[derive(Debug, Clone)]
pub struct Gate {
    mode: GateMode,
    held: bool,
    armed: bool,
    last_emitted: Option<bool>,
}

impl Gate {
    pub fn new(mode: GateMode) -> Self {
        Self {
            mode,
            held: false,
            armed: false,
            last_emitted: None,
        }
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    /// Whether the predicate held at the last observation.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Whether an expiry emission is outstanding.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn last_emitted(&self) -> Option<bool> {
        self.last_emitted
    }

    /// Feeds one predicate evaluation.
    ///
    /// An observation that keeps the predicate held changes nothing: the outstanding
    /// emission, if any, keeps its original deadline.
    pub fn observe(&mut self, observation: Observation) -> GateStep {
        let mut step = GateStep::default();

        match observation {
            Observation::NotHeld => {
                self.held = false;
                step.cancel_pending = self.disarm();
                step.emit = self.distinct(false);
            }
            Observation::Held { .. } if self.held => {}
            Observation::Held { remaining } => {
                self.held = true;
                if remaining.is_zero() {
                    step.emit = self.distinct(self.mode.expiry_value());
                } else {
                    step.emit = self.distinct(self.mode.waiting_value());
                    step.arm_after = Some(remaining);
                    self.armed = true;
                }
            }
        }

        step
    }

    /// The armed emission reached its deadline. Returns the value to emit, if any.
    pub fn expire(&mut self) -> Option<bool> {
        if !self.disarm() {
            return None;
        }
        self.distinct(self.mode.expiry_value())
    }

    /// Drops the armed emission. Returns whether one was armed.
    pub fn disarm(&mut self) -> bool {
        core::mem::replace(&mut self.armed, false)
    }

    fn distinct(&mut self, value: bool) -> Option<bool> {
        if self.last_emitted == Some(value) {
            return None;
        }
        self.last_emitted = Some(value);
        Some(value)
    }
}
