// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::gate::GateMode;
use crate::predicate::Predicate;
use core::fmt;
use core::time::Duration;
use dwell_core::{BinaryState, Instant, StateSnapshot};
use std::sync::Arc;

type LastChangedFn<V, I> = dyn Fn(&StateSnapshot<V, I>) -> I + Send + Sync;

/// Full configuration of a temporal gate.
///
/// Defaults to reading the timestamp from [`StateSnapshot::last_changed`]. Override it with
/// [`with_last_changed`](Self::with_last_changed) when the relevant instant lives elsewhere, for
/// instance in an attribute of the value.
///
/// ```rust
/// use dwell_core::OnOff;
/// use dwell_runtime::VirtualInstant;
/// use dwell_stream::{GateMode, GateOptions, Predicate};
/// use std::time::Duration;
///
/// let options = GateOptions::<OnOff, VirtualInstant>::new(
///     GateMode::WhenTrueFor,
///     Duration::from_secs(30),
///     Predicate::is_off(),
/// )
/// .with_last_changed(|snapshot| snapshot.last_changed());
///
/// assert_eq!(options.threshold(), Duration::from_secs(30));
/// ```
pub struct GateOptions<V, I> {
    mode: GateMode,
    threshold: Duration,
    predicate: Predicate<V>,
    last_changed: Arc<LastChangedFn<V, I>>,
}

impl<V: 'static, I: Instant> GateOptions<V, I> {
    pub fn new(mode: GateMode, threshold: Duration, predicate: Predicate<V>) -> Self {
        Self {
            mode,
            threshold,
            predicate,
            last_changed: Arc::new(StateSnapshot::last_changed),
        }
    }

    /// Replaces the predicate.
    pub fn with_predicate(mut self, predicate: Predicate<V>) -> Self {
        self.predicate = predicate;
        self
    }

    /// Replaces how the "held since" instant is read from the entity's current snapshot.
    pub fn with_last_changed<F>(mut self, last_changed: F) -> Self
    where
        F: Fn(&StateSnapshot<V, I>) -> I + Send + Sync + 'static,
    {
        self.last_changed = Arc::new(last_changed);
        self
    }

    pub(crate) fn for_mode(mut self, mode: GateMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> GateMode {
        self.mode
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn predicate(&self) -> &Predicate<V> {
        &self.predicate
    }

    pub(crate) fn held_since(&self, snapshot: &StateSnapshot<V, I>) -> I {
        (self.last_changed)(snapshot)
    }
}

impl<V: BinaryState + 'static, I: Instant> GateOptions<V, I> {
    /// `when_true_for` on the "on" state.
    pub fn when_true_for(threshold: Duration) -> Self {
        Self::new(GateMode::WhenTrueFor, threshold, Predicate::is_on())
    }

    /// `limit_true_duration` on the "on" state.
    pub fn limit_true_duration(threshold: Duration) -> Self {
        Self::new(GateMode::LimitTrueDuration, threshold, Predicate::is_on())
    }
}

impl<V, I> Clone for GateOptions<V, I> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            threshold: self.threshold,
            predicate: self.predicate.clone(),
            last_changed: self.last_changed.clone(),
        }
    }
}

impl<V, I> fmt::Debug for GateOptions<V, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateOptions")
            .field("mode", &self.mode)
            .field("threshold", &self.threshold)
            .field("predicate", &self.predicate)
            .finish_non_exhaustive()
    }
}
