// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A single monitored entity: its current snapshot plus the stream of its transitions.
//!
//! [`TrackedEntity`] is both collaborators an operator needs: it implements
//! [`EntityState`] and publishes every change as a [`Transition`] through a hot
//! [`Subject`]. Whatever observes the real entity calls [`set_state`](TrackedEntity::set_state);
//! every derived stream sees the change.
//!
//! ```rust
//! use dwell_core::{OnOff, StreamItem};
//! use dwell_runtime::{Scheduler, VirtualInstant, VirtualScheduler};
//! use dwell_stream::TrackedEntity;
//! use futures::{FutureExt, StreamExt};
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::new();
//! let door = TrackedEntity::with_state(OnOff::Off, VirtualInstant::EPOCH);
//!
//! let mut open_for_a_minute = door.when_true_for(Duration::from_secs(60), scheduler.clone()).unwrap();
//! assert_eq!(open_for_a_minute.next().now_or_never(), Some(Some(StreamItem::Value(false))));
//!
//! door.set_state(OnOff::On, scheduler.now()).unwrap();
//! scheduler.advance_by(Duration::from_secs(60));
//!
//! assert_eq!(open_for_a_minute.next().now_or_never(), Some(Some(StreamItem::Value(true))));
//! ```

use crate::limit_true_duration::LimitTrueDurationExt;
use crate::predicate::Predicate;
use crate::temporal_predicate_stream::TemporalPredicateStream;
use crate::when_true_for::WhenTrueForExt;
use core::fmt;
use core::time::Duration;
use dwell_core::subject::SubjectStream;
use dwell_core::{BinaryState, EntityState, Instant, StateSnapshot, Subject, SubjectError, Transition};
use dwell_runtime::Scheduler;
use parking_lot::RwLock;
use std::sync::Arc;

/// Derived stream bound to a [`TrackedEntity`].
pub type EntityStream<V, I, Sch> =
    TemporalPredicateStream<SubjectStream<Transition<V, I>>, V, TrackedEntity<V, I>, Sch>;

/// Shared handle to one monitored entity. Clones refer to the same entity.
pub struct TrackedEntity<V, I>
where
    V: Clone + Send + Sync + 'static,
    I: Instant,
{
    current: Arc<RwLock<Option<StateSnapshot<V, I>>>>,
    transitions: Subject<Transition<V, I>>,
}

impl<V, I> TrackedEntity<V, I>
where
    V: Clone + Send + Sync + 'static,
    I: Instant,
{
    /// An entity with no state yet.
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            transitions: Subject::new(),
        }
    }

    /// An entity whose `value` has been current since `last_changed`.
    pub fn with_state(value: V, last_changed: I) -> Self {
        let entity = Self::new();
        *entity.current.write() = Some(StateSnapshot::new(value, last_changed));
        entity
    }

    /// Replaces the current state and publishes the transition.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] once the entity has been closed; the state is left
    /// unchanged.
    pub fn set_state(&self, value: V, last_changed: I) -> Result<(), SubjectError> {
        self.replace(Some(StateSnapshot::new(value, last_changed)))
    }

    /// Clears the state and publishes a transition with no current side.
    pub fn remove(&self) -> Result<(), SubjectError> {
        self.replace(None)
    }

    /// Subscribes to the entity's future transitions.
    pub fn transitions(&self) -> Result<SubjectStream<Transition<V, I>>, SubjectError> {
        self.transitions.subscribe()
    }

    /// Completes every transition stream. Further changes are rejected.
    pub fn close(&self) {
        self.transitions.close();
    }

    pub fn is_closed(&self) -> bool {
        self.transitions.is_closed()
    }

    fn replace(&self, next: Option<StateSnapshot<V, I>>) -> Result<(), SubjectError> {
        // Publishing under the write lock keeps transitions in state order
        let mut current = self.current.write();
        if self.transitions.is_closed() {
            return Err(SubjectError::Closed);
        }

        let previous = core::mem::replace(&mut *current, next.clone());
        self.transitions.next(Transition::new(previous, next))
    }

    /// `true` once `predicate` has held for at least `threshold`.
    pub fn when_true_for_by<Sch>(
        &self,
        threshold: Duration,
        predicate: Predicate<V>,
        scheduler: Sch,
    ) -> Result<EntityStream<V, I, Sch>, SubjectError>
    where
        Sch: Scheduler<Instant = I>,
    {
        Ok(self
            .transitions()?
            .when_true_for_by(threshold, predicate, self.clone(), scheduler))
    }

    /// `true` while `predicate` holds, for at most `threshold`.
    pub fn limit_true_duration_by<Sch>(
        &self,
        threshold: Duration,
        predicate: Predicate<V>,
        scheduler: Sch,
    ) -> Result<EntityStream<V, I, Sch>, SubjectError>
    where
        Sch: Scheduler<Instant = I>,
    {
        Ok(self
            .transitions()?
            .limit_true_duration_by(threshold, predicate, self.clone(), scheduler))
    }
}

impl<V, I> TrackedEntity<V, I>
where
    V: BinaryState + Clone + Send + Sync + 'static,
    I: Instant,
{
    /// `true` once the entity has been "on" for at least `threshold`.
    pub fn when_true_for<Sch>(
        &self,
        threshold: Duration,
        scheduler: Sch,
    ) -> Result<EntityStream<V, I, Sch>, SubjectError>
    where
        Sch: Scheduler<Instant = I>,
    {
        self.when_true_for_by(threshold, Predicate::is_on(), scheduler)
    }

    /// `true` while the entity is "on", for at most `threshold`.
    pub fn limit_true_duration<Sch>(
        &self,
        threshold: Duration,
        scheduler: Sch,
    ) -> Result<EntityStream<V, I, Sch>, SubjectError>
    where
        Sch: Scheduler<Instant = I>,
    {
        self.limit_true_duration_by(threshold, Predicate::is_on(), scheduler)
    }
}

impl<V, I> EntityState<V, I> for TrackedEntity<V, I>
where
    V: Clone + Send + Sync + 'static,
    I: Instant,
{
    fn current(&self) -> Option<StateSnapshot<V, I>> {
        self.current.read().clone()
    }
}

impl<V, I> Clone for TrackedEntity<V, I>
where
    V: Clone + Send + Sync + 'static,
    I: Instant,
{
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            transitions: self.transitions.clone(),
        }
    }
}

impl<V, I> Default for TrackedEntity<V, I>
where
    V: Clone + Send + Sync + 'static,
    I: Instant,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, I> fmt::Debug for TrackedEntity<V, I>
where
    V: Clone + Send + Sync + fmt::Debug + 'static,
    I: Instant,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedEntity")
            .field("current", &*self.current.read())
            .field("subscribers", &self.transitions.subscriber_count())
            .finish()
    }
}
