// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `when_true_for` operator.
//!
//! The derived stream is `true` only once the predicate has held for at least the
//! threshold, measured from the state's `last_changed` rather than from subscription:
//!
//! - at subscription, a state that already held long enough emits `true` immediately,
//! - a state that has held for part of the threshold emits `false`, then `true` once the
//!   rest has elapsed,
//! - a transition that breaks the predicate cancels the wait and emits `false`.
//!
//! # Example
//!
//! ```rust
//! use dwell_core::{OnOff, StateSnapshot, StreamItem, Transition};
//! use dwell_runtime::{VirtualInstant, VirtualScheduler};
//! use dwell_stream::WhenTrueForExt;
//! use futures::{stream, FutureExt, StreamExt};
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::starting_at(VirtualInstant::from_elapsed(Duration::from_secs(2)));
//! let entity = || Some(StateSnapshot::new(OnOff::On, VirtualInstant::EPOCH));
//! let transitions = stream::pending::<StreamItem<Transition<OnOff, VirtualInstant>>>();
//!
//! let mut on_for_5s = transitions.when_true_for(Duration::from_secs(5), entity, scheduler.clone());
//!
//! // On for 2s so far
//! assert_eq!(on_for_5s.next().now_or_never(), Some(Some(StreamItem::Value(false))));
//!
//! scheduler.advance_by(Duration::from_secs(3));
//! assert_eq!(on_for_5s.next().now_or_never(), Some(Some(StreamItem::Value(true))));
//! ```

use crate::gate::GateMode;
use crate::options::GateOptions;
use crate::predicate::Predicate;
use crate::temporal_predicate_stream::TemporalPredicateStream;
use core::time::Duration;
use dwell_core::{BinaryState, EntityState, Instant, StreamItem, Transition};
use dwell_runtime::Scheduler;
use futures::Stream;

/// Extension trait providing the `when_true_for` operator on transition streams.
pub trait WhenTrueForExt<V, I>: Stream<Item = StreamItem<Transition<V, I>>> + Sized
where
    V: 'static,
    I: Instant,
{
    /// `true` once the entity has been "on" for at least `threshold`.
    ///
    /// # Arguments
    ///
    /// * `threshold` - How long the state must hold before the output becomes `true`
    /// * `entity` - Accessor for the entity's current snapshot
    /// * `scheduler` - Clock and timer for the remaining wait
    fn when_true_for<E, Sch>(
        self,
        threshold: Duration,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        V: BinaryState,
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>;

    /// `true` once `predicate` has held for at least `threshold`.
    fn when_true_for_by<E, Sch>(
        self,
        threshold: Duration,
        predicate: Predicate<V>,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>;

    /// `when_true_for` with full options. The mode in `options` is ignored.
    fn when_true_for_with<E, Sch>(
        self,
        options: GateOptions<V, I>,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>;
}

impl<S, V, I> WhenTrueForExt<V, I> for S
where
    S: Stream<Item = StreamItem<Transition<V, I>>>,
    V: 'static,
    I: Instant,
{
    fn when_true_for<E, Sch>(
        self,
        threshold: Duration,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        V: BinaryState,
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>,
    {
        self.when_true_for_with(GateOptions::when_true_for(threshold), entity, scheduler)
    }

    fn when_true_for_by<E, Sch>(
        self,
        threshold: Duration,
        predicate: Predicate<V>,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>,
    {
        let options = GateOptions::new(GateMode::WhenTrueFor, threshold, predicate);
        self.when_true_for_with(options, entity, scheduler)
    }

    fn when_true_for_with<E, Sch>(
        self,
        options: GateOptions<V, I>,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>,
    {
        TemporalPredicateStream::new(
            self,
            options.for_mode(GateMode::WhenTrueFor),
            entity,
            scheduler,
        )
    }
}
