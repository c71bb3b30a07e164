// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::runtime::Runtime;
use crate::runtime_scheduler::RuntimeScheduler;
use crate::timer::Timer;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use dwell_core::Result;
use futures::future::BoxFuture;
use std::time::{Duration, Instant};

/// smol's global executor with `async-io` timers.
pub struct SmolRuntime;

impl Runtime for SmolRuntime {
    type Timer = SmolTimer;

    fn spawn(task: BoxFuture<'static, ()>) -> Result<()> {
        smol::spawn(task).detach();
        Ok(())
    }
}

/// Scheduler on smol's executor and `std::time::Instant`.
pub type SmolScheduler = RuntimeScheduler<SmolRuntime>;

#[derive(Clone, Debug, Default)]
pub struct SmolTimer;

impl Timer for SmolTimer {
    type Sleep = DeadlineSleep;

    type Instant = Instant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        DeadlineSleep::after(self.now(), duration)
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }
}

/// Completes at a fixed deadline on the `async-io` reactor.
///
/// The deadline is taken from the same clock the scheduler reports as `now()`. A delay
/// too large to represent never fires.
pub struct DeadlineSleep {
    timer: async_io::Timer,
}

impl DeadlineSleep {
    fn after(now: Instant, duration: Duration) -> Self {
        let timer = match now.checked_add(duration) {
            Some(deadline) => async_io::Timer::at(deadline),
            None => async_io::Timer::never(),
        };
        Self { timer }
    }
}

impl Future for DeadlineSleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.timer).poll(cx).map(drop)
    }
}
