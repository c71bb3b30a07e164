// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;

/// Records every value handed to its observer.
///
/// Clones share the same record.
#[derive(Debug)]
pub struct Spy<T> {
    seen: Arc<Mutex<Vec<T>>>,
}

impl<T> Spy<T> {
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, value: T) {
        self.seen.lock().push(value);
    }

    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.lock().is_empty()
    }
}

impl<T: Clone> Spy<T> {
    pub fn values(&self) -> Vec<T> {
        self.seen.lock().clone()
    }

    pub fn last(&self) -> Option<T> {
        self.seen.lock().last().cloned()
    }
}

impl<T> Clone for Spy<T> {
    fn clone(&self) -> Self {
        Self {
            seen: self.seen.clone(),
        }
    }
}

impl<T> Default for Spy<T> {
    fn default() -> Self {
        Self::new()
    }
}
