// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Schedulers for the dwell operators.
//!
//! A [`Scheduler`](scheduler::Scheduler) supplies "now" and runs cancellable delayed
//! actions. Two families implement it:
//!
//! - [`VirtualScheduler`](virtual_scheduler::VirtualScheduler) - a manually advanced
//!   timeline. Nothing happens until the caller advances it, so tests are deterministic.
//! - [`RuntimeScheduler`](runtime_scheduler::RuntimeScheduler) - wall-clock timers on an
//!   async runtime, selected through a [`Runtime`](runtime::Runtime):
//!   - `runtime-tokio` (default): `TokioScheduler` and `ChronoScheduler`
//!   - `runtime-smol`: `SmolScheduler`

#[macro_use]
mod logging;

pub mod impls;
pub mod runtime;
pub mod runtime_scheduler;
pub mod scheduler;
pub mod timer;
pub mod virtual_scheduler;

pub use runtime_scheduler::RuntimeScheduler;
pub use scheduler::{ScheduledAction, ScheduledHandle, Scheduler};
pub use virtual_scheduler::{VirtualInstant, VirtualScheduler};

#[cfg(feature = "runtime-tokio")]
pub use impls::tokio::{ChronoRuntime, ChronoScheduler, TokioRuntime, TokioScheduler};

#[cfg(feature = "runtime-smol")]
pub use impls::smol::{SmolRuntime, SmolScheduler};
