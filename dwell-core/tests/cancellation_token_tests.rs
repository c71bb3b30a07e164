// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use dwell_core::CancellationToken;
use futures::future::{select, Either};
use futures::FutureExt;
use std::pin::pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_fresh_token_is_live() {
    let token = CancellationToken::default();

    assert!(!token.is_cancelled());
    assert_eq!(token.cancelled().now_or_never(), None);
}

#[test]
fn test_repeated_cancel_keeps_token_cancelled() {
    let subscription = CancellationToken::new();
    let pending_emission = subscription.clone();

    subscription.cancel();
    pending_emission.cancel();

    assert!(subscription.is_cancelled());
    assert_eq!(pending_emission.cancelled().now_or_never(), Some(()));
}

#[test]
fn test_cancelled_future_outlives_the_token_it_came_from() {
    let token = CancellationToken::new();
    let observer = token.clone();
    let waiting = observer.cancelled();
    drop(observer);

    token.cancel();

    assert_eq!(waiting.now_or_never(), Some(()));
}

#[tokio::test]
async fn test_cancel_wakes_every_waiting_task() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let woken = Arc::new(AtomicUsize::new(0));
    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let waiting = token.cancelled();
            let woken = woken.clone();
            tokio::spawn(async move {
                waiting.await;
                woken.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();
    tokio::task::yield_now().await;

    // Act
    token.cancel();

    // Assert
    for waiter in waiters {
        waiter.await?;
    }
    assert_eq!(woken.load(Ordering::SeqCst), 3);
    Ok(())
}

#[tokio::test]
async fn test_cancellation_wins_race_against_timer() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move { canceller.cancel() });

    let cancelled = pin!(token.cancelled());
    let deadline = pin!(tokio::time::sleep(Duration::from_secs(60)));

    assert!(matches!(select(cancelled, deadline).await, Either::Left(_)));
}

#[test]
fn test_cancel_from_other_threads() -> anyhow::Result<()> {
    let token = CancellationToken::new();

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let token = token.clone();
            thread::spawn(move || token.cancel())
        })
        .collect();

    for handle in threads {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("cancelling thread panicked"))?;
    }
    assert!(token.is_cancelled());
    Ok(())
}
