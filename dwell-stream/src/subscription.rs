// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::gate::{Gate, GateMode, Observation};
use core::task::{Context, Poll, Waker};
use core::time::Duration;
use dwell_core::{DwellError, Instant, Result, StreamItem};
use dwell_runtime::{ScheduledHandle, Scheduler};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::{Arc, Weak};

/// The single outstanding scheduled emission of a subscription.
#[derive(Debug)]
pub(crate) struct PendingEmission<I> {
    value: bool,
    deadline: Option<I>,
    handle: ScheduledHandle,
    generation: u64,
    fired: bool,
}

struct GateState<I> {
    gate: Gate,
    pending: Option<PendingEmission<I>>,
    next_generation: u64,
    queue: VecDeque<StreamItem<bool>>,
    waker: Option<Waker>,
    source_done: bool,
    terminated: bool,
}

impl<I: Instant> GateState<I> {
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.cancel();
            trace!(
                "cancelled pending {} emission #{} due at {:?}",
                pending.value,
                pending.generation,
                pending.deadline
            );
        }
    }

    /// Delivers the expiry value of a pending emission whose deadline has been reached.
    fn resolve_fired(&mut self) {
        if !self.pending.as_ref().is_some_and(|pending| pending.fired) {
            return;
        }
        self.pending = None;
        if let Some(value) = self.gate.expire() {
            self.queue.push_back(StreamItem::Value(value));
        }
        if self.source_done {
            self.terminated = true;
        }
    }

    fn pop(&mut self) -> Poll<Option<StreamItem<bool>>> {
        if let Some(item) = self.queue.pop_front() {
            return Poll::Ready(Some(item));
        }
        if self.terminated {
            return Poll::Ready(None);
        }
        Poll::Pending
    }

    fn teardown(&mut self, error: Option<DwellError>) {
        self.cancel_pending();
        self.gate.disarm();
        if let Some(error) = error {
            warn!("gate subscription torn down: {}", error);
            self.queue.push_back(StreamItem::Error(error));
        }
        self.terminated = true;
    }
}

/// Per-subscription state shared between a derived stream and its scheduler callbacks.
///
/// Callbacks hold only a [`Weak`] reference and identify their emission by generation, so
/// a callback for a cancelled or superseded emission does nothing. Dropping the
/// subscription cancels the pending emission.
pub(crate) struct Subscription<I: Instant> {
    state: Arc<Mutex<GateState<I>>>,
}

impl<I: Instant> Subscription<I> {
    pub(crate) fn new(mode: GateMode) -> Self {
        Self {
            state: Arc::new(Mutex::new(GateState {
                gate: Gate::new(mode),
                pending: None,
                next_generation: 0,
                queue: VecDeque::new(),
                waker: None,
                source_done: false,
                terminated: false,
            })),
        }
    }

    /// Feeds an observation to the gate, queueing emissions and (re)arming the timer.
    ///
    /// A scheduler that refuses the delayed emission tears the subscription down.
    pub(crate) fn apply<S>(&self, observation: Observation, scheduler: &S)
    where
        S: Scheduler<Instant = I>,
    {
        let mut state = self.state.lock();
        if state.terminated {
            return;
        }

        let step = state.gate.observe(observation);
        if step.cancel_pending {
            state.cancel_pending();
        }
        if let Some(value) = step.emit {
            state.queue.push_back(StreamItem::Value(value));
        }
        if let Some(delay) = step.arm_after {
            if let Err(error) = self.arm(&mut state, delay, scheduler) {
                state.teardown(Some(error));
            }
        }
    }

    fn arm<S>(&self, state: &mut GateState<I>, delay: Duration, scheduler: &S) -> Result<()>
    where
        S: Scheduler<Instant = I>,
    {
        state.cancel_pending();

        let generation = state.next_generation;
        state.next_generation += 1;

        let shared = Arc::downgrade(&self.state);
        let handle =
            scheduler.schedule_after(delay, Box::new(move || expire(&shared, generation)))?;

        let value = state.gate.mode().expiry_value();
        let deadline = scheduler.now().checked_add(delay);
        debug!("armed {} emission #{} due at {:?}", value, generation, deadline);

        state.pending = Some(PendingEmission {
            value,
            deadline,
            handle,
            generation,
            fired: false,
        });
        Ok(())
    }

    /// Emits `error` and ends the subscription.
    pub(crate) fn fail(&self, error: DwellError) {
        self.state.lock().teardown(Some(error));
    }

    /// The source completed. The subscription ends once no emission is pending.
    pub(crate) fn finish_source(&self) {
        let mut state = self.state.lock();
        state.source_done = true;
        if state.pending.is_none() {
            state.terminated = true;
        }
    }

    /// Resolves a reached deadline ahead of a transition that changed at `changed_at`.
    ///
    /// A transition that changed strictly before the deadline leaves the emission pending,
    /// for the transition to cancel. A transition without a timestamp (the entity was
    /// removed) is ordered after the deadline.
    pub(crate) fn settle_before(&self, changed_at: Option<I>) {
        let mut state = self.state.lock();
        let Some(pending) = state.pending.as_ref().filter(|pending| pending.fired) else {
            return;
        };
        let precedes = match (changed_at, pending.deadline) {
            (Some(changed_at), Some(deadline)) => changed_at < deadline,
            _ => false,
        };
        if precedes {
            trace!("transition precedes emission #{}", pending.generation);
        } else {
            state.resolve_fired();
        }
    }

    /// Pops the next queued item, or reports termination. A reached deadline stays
    /// unresolved.
    pub(crate) fn poll_queued(&self) -> Poll<Option<StreamItem<bool>>> {
        let mut state = self.state.lock();
        state.pop()
    }

    /// Resolves a reached deadline, then pops the next item. Registers the waker before
    /// returning `Pending`.
    pub(crate) fn poll_emission(&self, cx: &mut Context<'_>) -> Poll<Option<StreamItem<bool>>> {
        let mut state = self.state.lock();
        state.resolve_fired();
        let polled = state.pop();
        if polled.is_pending() {
            state.waker = Some(cx.waker().clone());
        }
        polled
    }
}

impl<I: Instant> Drop for Subscription<I> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if !state.terminated {
            trace!("gate subscription dropped");
        }
        state.teardown(None);
    }
}

fn expire<I: Instant>(shared: &Weak<Mutex<GateState<I>>>, generation: u64) {
    let Some(shared) = shared.upgrade() else {
        return;
    };

    let waker = {
        let mut state = shared.lock();
        match state.pending.as_mut() {
            Some(pending) if pending.generation == generation && !pending.fired => {
                pending.fired = true;
            }
            _ => {
                trace!("ignoring stale emission #{}", generation);
                return;
            }
        }
        trace!("emission #{} reached its deadline", generation);
        state.waker.take()
    };

    if let Some(waker) = waker {
        waker.wake();
    }
}
