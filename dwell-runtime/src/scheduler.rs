// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::time::Duration;
use dwell_core::{CancellationToken, Instant, Result};

/// A delayed action handed to [`Scheduler::schedule_after`].
pub type ScheduledAction = Box<dyn FnOnce() + Send + 'static>;

/// Clock plus delayed-action scheduling.
///
/// The operators read `now()` to measure how long a state has already held and use
/// `schedule_after` for the remaining wait. Production binds this to wall-clock timers;
/// tests bind it to a [`VirtualScheduler`](crate::VirtualScheduler) so delays do not depend
/// on real elapsed time.
///
/// Callers never schedule a zero delay: "no time left" is resolved synchronously.
pub trait Scheduler: Clone + Send + Sync + Debug + 'static {
    /// The timeline this scheduler measures time on.
    type Instant: Instant;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Runs `action` once `delay` has elapsed, unless the returned handle is cancelled first.
    ///
    /// # Errors
    ///
    /// Returns `DwellError::SchedulerError` if the underlying runtime cannot accept the
    /// action (e.g. no runtime is running on the calling thread).
    fn schedule_after(&self, delay: Duration, action: ScheduledAction) -> Result<ScheduledHandle>;
}

/// Cancellation handle for one scheduled action.
///
/// `cancel()` is idempotent and safe to call after the action fired, in which case it does
/// nothing. Clones refer to the same scheduled action.
#[derive(Debug, Clone, Default)]
pub struct ScheduledHandle {
    token: CancellationToken,
}

impl ScheduledHandle {
    /// Creates a handle for a newly scheduled action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prevents the action from running if it has not run yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The token schedulers watch to skip cancelled actions.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}
