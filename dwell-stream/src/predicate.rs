// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use dwell_core::{BinaryState, Result};
use std::sync::Arc;

type PredicateFn<V> = dyn Fn(&V) -> Result<bool> + Send + Sync;

/// A test applied to each state value.
///
/// Infallible predicates come from [`Predicate::new`]; [`Predicate::fallible`] accepts one
/// that can reject a value, in which case the subscription evaluating it is torn down and
/// the error is emitted. Clones share the same callable.
///
/// ```rust
/// use dwell_core::{DwellError, OnOff};
/// use dwell_stream::Predicate;
///
/// let is_off = Predicate::<OnOff>::is_off();
/// assert!(is_off.evaluate(&OnOff::Off).unwrap());
///
/// let above = Predicate::fallible(|raw: &String| {
///     raw.parse::<f64>()
///         .map(|celsius| celsius > 21.5)
///         .map_err(|e| DwellError::predicate_error(e.to_string()))
/// });
/// assert!(above.evaluate(&"22.0".to_string()).unwrap());
/// assert!(above.evaluate(&"unavailable".to_string()).is_err());
/// ```
pub struct Predicate<V> {
    test: Arc<PredicateFn<V>>,
}

impl<V: 'static> Predicate<V> {
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(move |value: &V| Ok(test(value))),
        }
    }

    pub fn fallible<F>(test: F) -> Self
    where
        F: Fn(&V) -> Result<bool> + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    pub fn evaluate(&self, value: &V) -> Result<bool> {
        (self.test)(value)
    }
}

impl<V: BinaryState + 'static> Predicate<V> {
    /// Holds while the value is the "on" state.
    pub fn is_on() -> Self {
        Self::new(|value: &V| value.is_on())
    }

    /// Holds while the value is the "off" state.
    pub fn is_off() -> Self {
        Self::new(|value: &V| value.is_off())
    }
}

impl<V> Clone for Predicate<V> {
    fn clone(&self) -> Self {
        Self {
            test: self.test.clone(),
        }
    }
}

impl<V> fmt::Debug for Predicate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}
