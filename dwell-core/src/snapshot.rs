// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::instant::Instant;

/// An entity's state at a point in time: a value plus the instant it became current.
///
/// `last_changed` marks when the value took effect, not when the snapshot was observed.
/// A snapshot never changes after construction; a new state is a new snapshot.
///
/// # Example
///
/// ```rust
/// use dwell_core::{OnOff, StateSnapshot};
/// use std::time::Instant;
///
/// let since = Instant::now();
/// let snapshot = StateSnapshot::new(OnOff::On, since);
///
/// assert_eq!(*snapshot.value(), OnOff::On);
/// assert_eq!(snapshot.last_changed(), since);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot<V, I> {
    value: V,
    last_changed: I,
}

impl<V, I: Instant> StateSnapshot<V, I> {
    /// Creates a snapshot whose value became current at `last_changed`.
    pub fn new(value: V, last_changed: I) -> Self {
        Self {
            value,
            last_changed,
        }
    }

    /// The state value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The instant at which [`value`](Self::value) became current.
    pub fn last_changed(&self) -> I {
        self.last_changed
    }

    /// Consumes the snapshot and returns the state value.
    pub fn into_value(self) -> V {
        self.value
    }
}

/// One change event on the monitored entity.
///
/// Either side may be absent: `previous` is `None` when the entity first appears and
/// `current` is `None` when it is removed. An absent current state never satisfies a
/// predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<V, I> {
    previous: Option<StateSnapshot<V, I>>,
    current: Option<StateSnapshot<V, I>>,
}

impl<V, I: Instant> Transition<V, I> {
    /// Creates a transition from `previous` to `current`.
    pub fn new(previous: Option<StateSnapshot<V, I>>, current: Option<StateSnapshot<V, I>>) -> Self {
        Self { previous, current }
    }

    /// Shorthand for a transition between two known states.
    pub fn between(previous: StateSnapshot<V, I>, current: StateSnapshot<V, I>) -> Self {
        Self::new(Some(previous), Some(current))
    }

    /// The state before the change, if the entity had one.
    pub fn previous(&self) -> Option<&StateSnapshot<V, I>> {
        self.previous.as_ref()
    }

    /// The state after the change, if the entity still exists.
    pub fn current(&self) -> Option<&StateSnapshot<V, I>> {
        self.current.as_ref()
    }

    /// The value after the change, if any.
    pub fn current_value(&self) -> Option<&V> {
        self.current.as_ref().map(StateSnapshot::value)
    }
}
