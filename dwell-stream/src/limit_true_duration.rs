// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `limit_true_duration` operator.
//!
//! The derived stream follows the predicate, but stays `true` for at most the threshold,
//! measured from the state's `last_changed`. Unchanged-true transitions never extend it.
//!
//! ```rust
//! use dwell_core::{OnOff, StateSnapshot, StreamItem, Transition};
//! use dwell_runtime::{VirtualInstant, VirtualScheduler};
//! use dwell_stream::LimitTrueDurationExt;
//! use futures::{stream, FutureExt, StreamExt};
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::new();
//! let entity = || Some(StateSnapshot::new(OnOff::On, VirtualInstant::EPOCH));
//! let transitions = stream::pending::<StreamItem<Transition<OnOff, VirtualInstant>>>();
//!
//! let mut at_most_10s = transitions.limit_true_duration(Duration::from_secs(10), entity, scheduler.clone());
//!
//! assert_eq!(at_most_10s.next().now_or_never(), Some(Some(StreamItem::Value(true))));
//!
//! scheduler.advance_by(Duration::from_secs(10));
//! assert_eq!(at_most_10s.next().now_or_never(), Some(Some(StreamItem::Value(false))));
//! ```

use crate::gate::GateMode;
use crate::options::GateOptions;
use crate::predicate::Predicate;
use crate::temporal_predicate_stream::TemporalPredicateStream;
use core::time::Duration;
use dwell_core::{BinaryState, EntityState, Instant, StreamItem, Transition};
use dwell_runtime::Scheduler;
use futures::Stream;

/// Extension trait providing the `limit_true_duration` operator on transition streams.
pub trait LimitTrueDurationExt<V, I>: Stream<Item = StreamItem<Transition<V, I>>> + Sized
where
    V: 'static,
    I: Instant,
{
    /// `true` while the entity is "on", for at most `threshold`.
    fn limit_true_duration<E, Sch>(
        self,
        threshold: Duration,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        V: BinaryState,
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>;

    /// `true` while `predicate` holds, for at most `threshold`.
    fn limit_true_duration_by<E, Sch>(
        self,
        threshold: Duration,
        predicate: Predicate<V>,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>;

    /// `limit_true_duration` with full options. The mode in `options` is ignored.
    fn limit_true_duration_with<E, Sch>(
        self,
        options: GateOptions<V, I>,
        entity: E,
        scheduler: Sch,
    ) -> TemporalPredicateStream<Self, V, E, Sch>
    where
        E: EntityState<V, I>,
        Sch: Scheduler<Instant = I>;
}

impl<S, V, I> LimitTrueDurationExt<V, I> for S
where
    S: Stream<Item = StreamItem<Transition<V, I>>>,
    V: 'static,
    I: Instant,
{
    fn limit_true_duration<E, Sch>(
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
        self.limit_true_duration_with(GateOptions::limit_true_duration(threshold), entity, scheduler)
    }

    fn limit_true_duration_by<E, Sch>(
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
        let options = GateOptions::new(GateMode::LimitTrueDuration, threshold, predicate);
        self.limit_true_duration_with(options, entity, scheduler)
    }

    fn limit_true_duration_with<E, Sch>(
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
            options.for_mode(GateMode::LimitTrueDuration),
            entity,
            scheduler,
        )
    }
}
