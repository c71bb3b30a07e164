// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::DwellError;

/// One element of a dwell stream: a value, or the error that ends the stream.
///
/// Transition sources yield `StreamItem<Transition<V, I>>`; the operators yield
/// `StreamItem<bool>`. Nothing follows an `Error` from an operator.
#[derive(Debug, Clone)]
pub enum StreamItem<T> {
    Value(T),
    Error(DwellError),
}

impl<T> StreamItem<T> {
    pub const fn is_value(&self) -> bool {
        matches!(self, StreamItem::Value(_))
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, StreamItem::Error(_))
    }

    /// The value, if this is not an error.
    pub const fn value(&self) -> Option<&T> {
        match self {
            StreamItem::Value(value) => Some(value),
            StreamItem::Error(_) => None,
        }
    }

    /// The error, if this is one.
    pub const fn error(&self) -> Option<&DwellError> {
        match self {
            StreamItem::Value(_) => None,
            StreamItem::Error(error) => Some(error),
        }
    }

    /// Applies `f` to a value and passes an error through.
    pub fn map_value<U>(self, f: impl FnOnce(T) -> U) -> StreamItem<U> {
        match self {
            StreamItem::Value(value) => StreamItem::Value(f(value)),
            StreamItem::Error(error) => StreamItem::Error(error),
        }
    }

    pub fn into_result(self) -> Result<T, DwellError> {
        match self {
            StreamItem::Value(value) => Ok(value),
            StreamItem::Error(error) => Err(error),
        }
    }
}

// Two errors never compare equal; tests match on error variants instead.
impl<T: PartialEq> PartialEq for StreamItem<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl<T> From<Result<T, DwellError>> for StreamItem<T> {
    fn from(result: Result<T, DwellError>) -> Self {
        result.map_or_else(StreamItem::Error, StreamItem::Value)
    }
}
