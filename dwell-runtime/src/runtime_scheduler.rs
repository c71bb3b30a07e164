// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::runtime::Runtime;
use crate::scheduler::{ScheduledAction, ScheduledHandle, Scheduler};
use crate::timer::Timer;
use core::fmt;
use core::marker::PhantomData;
use core::pin::pin;
use core::time::Duration;
use dwell_core::Result;
use futures::future::{select, Either};

/// Wall-clock [`Scheduler`] backed by an async runtime's timers.
///
/// Each scheduled action runs on a detached task that races the runtime's sleep against
/// the handle's cancellation. A cancellation observed before the sleep completes always
/// wins, and the action re-checks the token right before running.
///
/// The delay is measured from the task's first poll. Outside a running runtime,
/// [`Scheduler::schedule_after`] fails with `DwellError::SchedulerError`.
///
/// # Example
///
/// ```rust,no_run
/// # #[cfg(feature = "runtime-tokio")]
/// # #[tokio::main]
/// # async fn main() -> dwell_core::Result<()> {
/// use dwell_runtime::{Scheduler, TokioScheduler};
/// use std::time::Duration;
///
/// let scheduler = TokioScheduler::new();
/// let handle = scheduler.schedule_after(
///     Duration::from_secs(5),
///     Box::new(|| println!("five seconds later")),
/// )?;
///
/// handle.cancel();
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "runtime-tokio"))]
/// # fn main() {}
/// ```
pub struct RuntimeScheduler<R: Runtime> {
    timer: R::Timer,
    _runtime: PhantomData<fn() -> R>,
}

impl<R: Runtime> RuntimeScheduler<R> {
    /// Creates a scheduler using the runtime's default timer.
    pub fn new() -> Self {
        Self {
            timer: R::Timer::default(),
            _runtime: PhantomData,
        }
    }
}

impl<R: Runtime> Default for RuntimeScheduler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Runtime> Clone for RuntimeScheduler<R> {
    fn clone(&self) -> Self {
        Self {
            timer: self.timer.clone(),
            _runtime: PhantomData,
        }
    }
}

impl<R: Runtime> fmt::Debug for RuntimeScheduler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeScheduler")
            .field("timer", &self.timer)
            .finish()
    }
}

impl<R: Runtime> Scheduler for RuntimeScheduler<R> {
    type Instant = <R::Timer as Timer>::Instant;

    fn now(&self) -> Self::Instant {
        self.timer.now()
    }

    fn schedule_after(&self, delay: Duration, action: ScheduledAction) -> Result<ScheduledHandle> {
        let handle = ScheduledHandle::new();
        let token = handle.token().clone();
        let timer = self.timer.clone();

        // The sleep is created on the runtime: timers may need its reactor.
        R::spawn(Box::pin(async move {
            let cancelled = pin!(token.cancelled());
            let sleep = pin!(timer.sleep_future(delay));

            match select(cancelled, sleep).await {
                Either::Left(_) => {
                    trace!("scheduled action cancelled before its deadline");
                }
                Either::Right(_) => {
                    // cancel() may have raced the timer wakeup
                    if !token.is_cancelled() {
                        action();
                    }
                }
            }
        }))?;

        debug!("scheduled action in {:?}", delay);
        Ok(handle)
    }
}
