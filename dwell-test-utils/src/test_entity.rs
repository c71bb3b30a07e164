// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use dwell_core::{EntityState, Instant, StateSnapshot, Transition};
use parking_lot::Mutex;
use std::sync::Arc;

/// Entity accessor whose state the test changes by hand.
///
/// Each change returns the matching [`Transition`], ready to be sent through a
/// [`test_channel`](crate::test_channel). Clones share the same state.
#[derive(Debug)]
pub struct TestEntity<V, I> {
    state: Arc<Mutex<Option<StateSnapshot<V, I>>>>,
}

impl<V: Clone, I: Instant> TestEntity<V, I> {
    pub fn new(initial: Option<StateSnapshot<V, I>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn with_state(value: V, last_changed: I) -> Self {
        Self::new(Some(StateSnapshot::new(value, last_changed)))
    }

    /// An entity with no state.
    pub fn absent() -> Self {
        Self::new(None)
    }

    /// Sets the state and returns the transition from the previous one.
    pub fn change(&self, value: V, last_changed: I) -> Transition<V, I> {
        self.change_to(Some(StateSnapshot::new(value, last_changed)))
    }

    /// Replaces the state, possibly with none, and returns the transition.
    pub fn change_to(&self, next: Option<StateSnapshot<V, I>>) -> Transition<V, I> {
        let previous = std::mem::replace(&mut *self.state.lock(), next.clone());
        Transition::new(previous, next)
    }

    /// Replaces the state without producing a transition, as if the change went unobserved.
    pub fn overwrite(&self, value: V, last_changed: I) {
        *self.state.lock() = Some(StateSnapshot::new(value, last_changed));
    }
}

impl<V, I> Clone for TestEntity<V, I> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<V, I> EntityState<V, I> for TestEntity<V, I>
where
    V: Clone + Send + Sync,
    I: Instant,
{
    fn current(&self) -> Option<StateSnapshot<V, I>> {
        self.state.lock().clone()
    }
}
