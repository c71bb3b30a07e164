// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chrono::{DateTime, Utc};
use core::fmt::Debug;
use core::time::Duration;

/// A point on a scheduler's timeline.
///
/// Snapshots carry their `last_changed` as the same `Instant` type the scheduler uses for
/// `now()`, so the operators can measure how long a state has already been current.
///
/// Implemented for [`std::time::Instant`], [`tokio::time::Instant`] (feature
/// `runtime-tokio`) and [`chrono::DateTime<Utc>`]. Virtual clocks implement it for their
/// own tick type.
///
/// # Examples
///
/// ```
/// use dwell_core::Instant;
/// use std::time::Duration;
///
/// let earlier = std::time::Instant::now();
/// let later = earlier + Duration::from_secs(3);
///
/// assert_eq!(later.saturating_duration_since(earlier), Duration::from_secs(3));
/// assert_eq!(earlier.saturating_duration_since(later), Duration::ZERO);
/// ```
pub trait Instant: Copy + Ord + Debug + Send + Sync + 'static {
    /// Time elapsed from `earlier` to `self`, or zero if `earlier` is not before `self`.
    fn saturating_duration_since(&self, earlier: Self) -> Duration;

    /// `self + duration`, or `None` if that is not representable.
    fn checked_add(&self, duration: Duration) -> Option<Self>;
}

impl Instant for std::time::Instant {
    fn saturating_duration_since(&self, earlier: Self) -> Duration {
        std::time::Instant::saturating_duration_since(self, earlier)
    }

    fn checked_add(&self, duration: Duration) -> Option<Self> {
        std::time::Instant::checked_add(self, duration)
    }
}

#[cfg(feature = "runtime-tokio")]
impl Instant for tokio::time::Instant {
    fn saturating_duration_since(&self, earlier: Self) -> Duration {
        tokio::time::Instant::saturating_duration_since(self, earlier)
    }

    fn checked_add(&self, duration: Duration) -> Option<Self> {
        tokio::time::Instant::checked_add(self, duration)
    }
}

impl Instant for DateTime<Utc> {
    fn saturating_duration_since(&self, earlier: Self) -> Duration {
        // Negative deltas do not convert
        (*self - earlier).to_std().unwrap_or(Duration::ZERO)
    }

    fn checked_add(&self, duration: Duration) -> Option<Self> {
        let delta = chrono::Duration::from_std(duration).ok()?;
        self.checked_add_signed(delta)
    }
}
