// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::snapshot::StateSnapshot;

/// Accessor for the monitored entity's *currently known* state.
///
/// Operators call this fresh at every evaluation point instead of caching the snapshot
/// they saw last, so updates to the entity that happen between transitions are honoured.
/// Returns `None` when the entity has no state (unknown or removed).
///
/// Closures returning `Option<StateSnapshot<V, I>>` implement this trait directly.
///
/// # Example
///
/// ```rust
/// use dwell_core::{EntityState, OnOff, StateSnapshot};
/// use std::time::Instant;
///
/// let since = Instant::now();
/// let entity = move || Some(StateSnapshot::new(OnOff::On, since));
///
/// assert_eq!(entity.current().map(|s| *s.value()), Some(OnOff::On));
/// ```
pub trait EntityState<V, I>: Send + Sync {
    /// Returns the entity's current snapshot, if it has one.
    fn current(&self) -> Option<StateSnapshot<V, I>>;
}

impl<V, I, F> EntityState<V, I> for F
where
    F: Fn() -> Option<StateSnapshot<V, I>> + Send + Sync,
{
    fn current(&self) -> Option<StateSnapshot<V, I>> {
        self()
    }
}
