// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot broadcast of stream items.
//!
//! A [`Subject`] is where transitions enter the system: the code watching an entity
//! pushes into it, and every operator built on the entity holds one subscription.
//! Subscribers only see items published after they subscribed, and there is no
//! backpressure.
//!
//! ```
//! use dwell_core::{StreamItem, Subject};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let changes = Subject::<&str>::new();
//! let mut watcher = changes.subscribe().unwrap();
//!
//! changes.next("on").unwrap();
//! changes.close();
//!
//! assert_eq!(watcher.next().await, Some(StreamItem::Value("on")));
//! assert_eq!(watcher.next().await, None);
//! # }
//! ```

use crate::{DwellError, StreamItem, SubjectError};
use async_channel::Sender;
use core::pin::Pin;
use futures::stream::Stream;
use parking_lot::Mutex;
use std::sync::Arc;

/// Stream handed out by [`Subject::subscribe`].
pub type SubjectStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + Sync + 'static>>;

/// Subscriber list; `None` once closed.
struct Broadcast<T> {
    subscribers: Option<Vec<Sender<StreamItem<T>>>>,
}

impl<T: Clone> Broadcast<T> {
    fn open_subscribers(&mut self) -> Result<&mut Vec<Sender<StreamItem<T>>>, SubjectError> {
        self.subscribers.as_mut().ok_or(SubjectError::Closed)
    }

    fn publish(&mut self, item: StreamItem<T>) -> Result<(), SubjectError> {
        // A failed send means the receiving stream was dropped
        self.open_subscribers()?
            .retain(|subscriber| subscriber.try_send(item.clone()).is_ok());
        Ok(())
    }
}

/// Hot, unbounded, multi-subscriber subject. Clones publish to the same subscribers.
pub struct Subject<T: Clone + Send + 'static> {
    broadcast: Arc<Mutex<Broadcast<T>>>,
}

impl<T: Clone + Send + 'static> Subject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            broadcast: Arc::new(Mutex::new(Broadcast {
                subscribers: Some(Vec::new()),
            })),
        }
    }

    /// A stream of every item published from now on.
    ///
    /// # Errors
    ///
    /// [`SubjectError::Closed`] once the subject is closed.
    pub fn subscribe(&self) -> Result<SubjectStream<T>, SubjectError> {
        let (tx, rx) = async_channel::unbounded();
        self.broadcast.lock().open_subscribers()?.push(tx);
        Ok(Box::pin(rx))
    }

    /// Publishes `item` to every live subscriber.
    ///
    /// # Errors
    ///
    /// [`SubjectError::Closed`] once the subject is closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<(), SubjectError> {
        self.broadcast.lock().publish(item)
    }

    /// Publishes a value.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(StreamItem::Value(value))
    }

    /// Publishes `error`, then closes the subject.
    pub fn error(&self, error: DwellError) -> Result<(), SubjectError> {
        let mut broadcast = self.broadcast.lock();
        let published = broadcast.publish(StreamItem::Error(error));
        broadcast.subscribers = None;
        published
    }

    /// Ends every subscriber stream once it has drained. Further publishing fails.
    pub fn close(&self) {
        if let Some(subscribers) = self.broadcast.lock().subscribers.take() {
            trace!("subject closed with {} subscribers", subscribers.len());
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.broadcast.lock().subscribers.is_none()
    }

    /// Subscribers still live at the last publish. Dropped ones are pruned lazily.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.broadcast
            .lock()
            .subscribers
            .as_ref()
            .map_or(0, Vec::len)
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            broadcast: self.broadcast.clone(),
        }
    }
}
