// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cancellation shared by scheduled emissions and subscriptions.
//!
//! Every scheduled action carries one, and a push subscription stops when its token
//! fires. The token does not depend on an executor, so the same handle works for tokio
//! and smol timers and for actions parked on a virtual timeline.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use std::sync::Arc;

/// One-shot cancellation flag with async notification.
///
/// Clones observe the same flag. Cancelling wakes every [`Cancelled`] future.
///
/// ```
/// use dwell_core::CancellationToken;
///
/// let subscription = CancellationToken::new();
/// let scheduled_emission = subscription.clone();
///
/// subscription.cancel();
/// subscription.cancel();
/// assert!(scheduled_emission.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    fired: AtomicBool,
    on_cancel: Event,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. Only the first call wakes waiters.
    pub fn cancel(&self) {
        if self.shared.fired.swap(true, Ordering::AcqRel) {
            return;
        }
        trace!("cancellation token fired");
        self.shared.on_cancel.notify(usize::MAX);
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.fired.load(Ordering::Acquire)
    }

    /// Resolves once the token is cancelled, immediately if it already is.
    pub fn cancelled(&self) -> Cancelled {
        Cancelled {
            token: self.clone(),
            listener: None,
        }
    }
}

/// Future returned by [`CancellationToken::cancelled`].
#[derive(Debug)]
pub struct Cancelled {
    token: CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        loop {
            if self.token.is_cancelled() {
                return Poll::Ready(());
            }

            match self.listener.as_mut() {
                // Registered before the re-check above, so a concurrent cancel is not lost
                None => {
                    let listener = self.token.shared.on_cancel.listen();
                    self.listener = Some(listener);
                }
                Some(listener) => {
                    if Pin::new(listener).poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    self.listener = None;
                }
            }
        }
    }
}
