// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Manually advanced scheduler for deterministic tests.
//!
//! Time stands still until the caller advances it. Advancing runs every due action in
//! deadline order, on the calling thread, with `now()` equal to the action's deadline.
//!
//! # Example
//!
//! ```rust
//! use dwell_runtime::{Scheduler, VirtualScheduler};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn main() -> dwell_core::Result<()> {
//! let scheduler = VirtualScheduler::new();
//! let fired = Arc::new(AtomicBool::new(false));
//!
//! let flag = fired.clone();
//! scheduler.schedule_after(
//!     Duration::from_secs(2),
//!     Box::new(move || flag.store(true, Ordering::SeqCst)),
//! )?;
//!
//! scheduler.advance_by(Duration::from_secs(1));
//! assert!(!fired.load(Ordering::SeqCst));
//!
//! scheduler.advance_by(Duration::from_secs(1));
//! assert!(fired.load(Ordering::SeqCst));
//! # Ok(())
//! # }
//! ```

use crate::scheduler::{ScheduledAction, ScheduledHandle, Scheduler};
use core::fmt;
use core::ops::{Add, Sub};
use core::time::Duration;
use dwell_core::{CancellationToken, Instant, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A point on a [`VirtualScheduler`]'s timeline, measured from the virtual epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualInstant(Duration);

impl VirtualInstant {
    /// The start of every virtual timeline.
    pub const EPOCH: VirtualInstant = VirtualInstant(Duration::ZERO);

    /// The instant `elapsed` after the epoch.
    pub const fn from_elapsed(elapsed: Duration) -> Self {
        Self(elapsed)
    }

    /// Time since the epoch.
    pub const fn elapsed(&self) -> Duration {
        self.0
    }

    /// `self - duration`, or `None` if that would precede the epoch.
    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        self.0.checked_sub(duration).map(Self)
    }
}

impl Add<Duration> for VirtualInstant {
    type Output = VirtualInstant;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_add(rhs))
    }
}

/// Saturates at [`VirtualInstant::EPOCH`].
impl Sub<Duration> for VirtualInstant {
    type Output = VirtualInstant;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_sub(rhs))
    }
}

impl Instant for VirtualInstant {
    fn saturating_duration_since(&self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }

    fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add(duration).map(Self)
    }
}

struct Entry {
    token: CancellationToken,
    action: ScheduledAction,
}

struct Timeline {
    now: VirtualInstant,
    next_sequence: u64,
    // Equal deadlines keep scheduling order through the sequence number
    queue: BTreeMap<(VirtualInstant, u64), Entry>,
    fired: usize,
}

/// Deterministic [`Scheduler`] driven by explicit `advance_*` calls.
///
/// Clones share the same timeline. Actions never run on their own: only
/// [`advance_by`](Self::advance_by), [`advance_to`](Self::advance_to) and
/// [`run_until_idle`](Self::run_until_idle) run them, and they do so without holding the
/// scheduler's lock, so an action may schedule further actions.
#[derive(Clone)]
pub struct VirtualScheduler {
    timeline: Arc<Mutex<Timeline>>,
}

impl VirtualScheduler {
    /// Creates a scheduler whose clock reads [`VirtualInstant::EPOCH`].
    pub fn new() -> Self {
        Self::starting_at(VirtualInstant::EPOCH)
    }

    /// Creates a scheduler whose clock starts at `start`.
    pub fn starting_at(start: VirtualInstant) -> Self {
        Self {
            timeline: Arc::new(Mutex::new(Timeline {
                now: start,
                next_sequence: 0,
                queue: BTreeMap::new(),
                fired: 0,
            })),
        }
    }

    /// Moves the clock forward by `delta`, running every action due on the way.
    pub fn advance_by(&self, delta: Duration) {
        let target = self.now() + delta;
        self.advance_to(target);
    }

    /// Moves the clock to `target`, running every action due at or before it.
    ///
    /// The clock never moves backwards; a `target` in the past only runs actions that are
    /// already due.
    pub fn advance_to(&self, target: VirtualInstant) {
        while let Some(action) = self.take_due(target) {
            action();
        }

        let mut timeline = self.timeline.lock();
        if target > timeline.now {
            timeline.now = target;
        }
    }

    /// Runs actions until none are pending, advancing the clock to each deadline.
    pub fn run_until_idle(&self) {
        loop {
            let last_live_deadline = {
                let mut timeline = self.timeline.lock();
                timeline.queue.retain(|_, entry| !entry.token.is_cancelled());
                timeline.queue.keys().next_back().map(|(deadline, _)| *deadline)
            };

            match last_live_deadline {
                Some(deadline) => self.advance_to(deadline),
                None => return,
            }
        }
    }

    /// Number of scheduled actions that are neither cancelled nor run yet.
    pub fn pending_count(&self) -> usize {
        self.timeline
            .lock()
            .queue
            .values()
            .filter(|entry| !entry.token.is_cancelled())
            .count()
    }

    /// Number of actions that have run so far.
    pub fn fired_count(&self) -> usize {
        self.timeline.lock().fired
    }

    fn take_due(&self, target: VirtualInstant) -> Option<ScheduledAction> {
        let mut timeline = self.timeline.lock();

        loop {
            let due = matches!(
                timeline.queue.first_key_value(),
                Some(((deadline, _), _)) if *deadline <= target
            );
            if !due {
                return None;
            }

            let ((deadline, _), entry) = timeline.queue.pop_first()?;
            if deadline > timeline.now {
                timeline.now = deadline;
            }

            if entry.token.is_cancelled() {
                trace!("skipping cancelled action due at {:?}", deadline);
                continue;
            }

            timeline.fired += 1;
            trace!("running action due at {:?}", deadline);
            return Some(entry.action);
        }
    }
}

impl Default for VirtualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timeline = self.timeline.lock();
        f.debug_struct("VirtualScheduler")
            .field("now", &timeline.now)
            .field("queued", &timeline.queue.len())
            .field("fired", &timeline.fired)
            .finish()
    }
}

impl Scheduler for VirtualScheduler {
    type Instant = VirtualInstant;

    fn now(&self) -> Self::Instant {
        self.timeline.lock().now
    }

    fn schedule_after(&self, delay: Duration, action: ScheduledAction) -> Result<ScheduledHandle> {
        let handle = ScheduledHandle::new();
        let mut timeline = self.timeline.lock();

        let deadline = timeline.now + delay;
        let sequence = timeline.next_sequence;
        timeline.next_sequence += 1;
        timeline.queue.insert(
            (deadline, sequence),
            Entry {
                token: handle.token().clone(),
                action,
            },
        );

        debug!("virtual action scheduled for {:?}", deadline);
        Ok(handle)
    }
}
