// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::runtime::Runtime;
use crate::runtime_scheduler::RuntimeScheduler;
use crate::timer::Timer;
use chrono::{DateTime, Utc};
use dwell_core::{DwellError, Result};
use futures::future::BoxFuture;
use std::time::Duration;

/// Tokio runtime with tokio's own clock.
///
/// `now()` is `tokio::time::Instant::now()`, so `tokio::time::pause()` and
/// `tokio::time::advance()` drive both the clock and the timers in tests.
pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    type Timer = TokioTimer;

    fn spawn(task: BoxFuture<'static, ()>) -> Result<()> {
        spawn_on_current(task)
    }
}

/// Scheduler on tokio timers and tokio's pausable clock.
pub type TokioScheduler = RuntimeScheduler<TokioRuntime>;

#[derive(Clone, Debug, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;

    type Instant = tokio::time::Instant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }

    fn now(&self) -> Self::Instant {
        tokio::time::Instant::now()
    }
}

/// Tokio runtime whose clock is UTC wall time.
///
/// Use this when snapshot timestamps come from an external system as
/// `DateTime<Utc>`. Delays still run on tokio timers; the clock itself does not
/// follow `tokio::time::pause()`.
pub struct ChronoRuntime;

impl Runtime for ChronoRuntime {
    type Timer = ChronoTimer;

    fn spawn(task: BoxFuture<'static, ()>) -> Result<()> {
        spawn_on_current(task)
    }
}

/// Scheduler on tokio timers with a `chrono::Utc` clock.
pub type ChronoScheduler = RuntimeScheduler<ChronoRuntime>;

#[derive(Clone, Debug, Default)]
pub struct ChronoTimer;

impl Timer for ChronoTimer {
    type Sleep = tokio::time::Sleep;

    type Instant = DateTime<Utc>;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }

    fn now(&self) -> Self::Instant {
        Utc::now()
    }
}

fn spawn_on_current(task: BoxFuture<'static, ()>) -> Result<()> {
    let handle = tokio::runtime::Handle::try_current()
        .map_err(|e| DwellError::scheduler_error(format!("no tokio runtime: {e}")))?;
    drop(handle.spawn(task));
    Ok(())
}
