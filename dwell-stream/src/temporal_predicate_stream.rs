// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::gate::Observation;
use crate::options::GateOptions;
use crate::subscription::Subscription;
use core::pin::Pin;
use core::task::{Context, Poll};
use dwell_core::{EntityState, Result, StateSnapshot, StreamItem, Transition};
use dwell_runtime::Scheduler;
use futures::Stream;
use pin_project::pin_project;

/// Boolean stream derived from an entity's transitions by a temporal gate.
///
/// Returned by the `when_true_for*` and `limit_true_duration*` operators. The stream is
/// lazy: the first poll is the subscription, where the entity's current state is
/// evaluated and the first value is emitted. After that:
///
/// - every source transition is evaluated against its current value,
/// - the scheduler delivers the delayed emission, if one is armed, unless a transition
///   that changed before the deadline cancels it first,
/// - consecutive duplicates are suppressed.
///
/// A predicate error or a source error is emitted and ends the stream. When the source
/// completes, an armed emission still fires before the stream ends. Dropping the stream
/// cancels the armed emission.
#[pin_project]
pub struct TemporalPredicateStream<S, V, E, Sch>
where
    Sch: Scheduler,
{
    #[pin]
    source: S,
    options: GateOptions<V, Sch::Instant>,
    entity: E,
    scheduler: Sch,
    subscribed: bool,
    source_done: bool,
    subscription: Subscription<Sch::Instant>,
}

impl<S, V, E, Sch> TemporalPredicateStream<S, V, E, Sch>
where
    V: 'static,
    E: EntityState<V, Sch::Instant>,
    Sch: Scheduler,
{
    pub fn new(source: S, options: GateOptions<V, Sch::Instant>, entity: E, scheduler: Sch) -> Self {
        let subscription = Subscription::new(options.mode());
        Self {
            source,
            options,
            entity,
            scheduler,
            subscribed: false,
            source_done: false,
            subscription,
        }
    }

    pub fn options(&self) -> &GateOptions<V, Sch::Instant> {
        &self.options
    }
}

impl<S, V, E, Sch> Stream for TemporalPredicateStream<S, V, E, Sch>
where
    S: Stream<Item = StreamItem<Transition<V, Sch::Instant>>>,
    V: 'static,
    E: EntityState<V, Sch::Instant>,
    Sch: Scheduler,
{
    type Item = StreamItem<bool>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Poll::Ready(item) = this.subscription.poll_queued() {
                return Poll::Ready(item);
            }

            if !*this.subscribed {
                *this.subscribed = true;
                match observe_entity(&*this.options, &*this.entity, &*this.scheduler) {
                    Ok(observation) => this.subscription.apply(observation, &*this.scheduler),
                    Err(error) => this.subscription.fail(error),
                }
                continue;
            }

            if *this.source_done {
                return this.subscription.poll_emission(cx);
            }

            match this.source.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(transition))) => {
                    this.subscription
                        .settle_before(transition.current().map(StateSnapshot::last_changed));
                    let observed = observe_transition(
                        &*this.options,
                        &*this.entity,
                        &*this.scheduler,
                        &transition,
                    );
                    match observed {
                        Ok(observation) => this.subscription.apply(observation, &*this.scheduler),
                        Err(error) => this.subscription.fail(error),
                    }
                }
                Poll::Ready(Some(StreamItem::Error(error))) => {
                    this.subscription.fail(error);
                }
                Poll::Ready(None) => {
                    *this.source_done = true;
                    this.subscription.finish_source();
                }
                Poll::Pending => {
                    return this.subscription.poll_emission(cx);
                }
            }
        }
    }
}

/// Evaluates the entity's current snapshot, as at subscription.
fn observe_entity<V, E, Sch>(
    options: &GateOptions<V, Sch::Instant>,
    entity: &E,
    scheduler: &Sch,
) -> Result<Observation>
where
    V: 'static,
    E: EntityState<V, Sch::Instant>,
    Sch: Scheduler,
{
    let Some(snapshot) = entity.current() else {
        return Ok(Observation::NotHeld);
    };
    if !options.predicate().evaluate(snapshot.value())? {
        return Ok(Observation::NotHeld);
    }

    let since = options.held_since(&snapshot);
    Ok(Observation::held(options.threshold(), scheduler.now(), since))
}

/// Evaluates the transition's new value.
///
/// The "held since" instant comes from the entity's fresh snapshot, falling back to the
/// transition's own snapshot if the entity reports none.
fn observe_transition<V, E, Sch>(
    options: &GateOptions<V, Sch::Instant>,
    entity: &E,
    scheduler: &Sch,
    transition: &Transition<V, Sch::Instant>,
) -> Result<Observation>
where
    V: 'static,
    E: EntityState<V, Sch::Instant>,
    Sch: Scheduler,
{
    let Some(current) = transition.current() else {
        return Ok(Observation::NotHeld);
    };
    if !options.predicate().evaluate(current.value())? {
        return Ok(Observation::NotHeld);
    }

    let fresh = entity.current();
    let since = options.held_since(fresh.as_ref().unwrap_or(current));
    Ok(Observation::held(options.threshold(), scheduler.now(), since))
}
