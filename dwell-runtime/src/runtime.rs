// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::timer::Timer;
use dwell_core::Result;
use futures::future::BoxFuture;

/// An async runtime that can host scheduled actions.
pub trait Runtime: Send + Sync + 'static {
    type Timer: Timer + Default;

    /// Spawns a detached task.
    ///
    /// # Errors
    ///
    /// Returns `DwellError::SchedulerError` if the runtime is not available.
    fn spawn(task: BoxFuture<'static, ()>) -> Result<()>;
}
