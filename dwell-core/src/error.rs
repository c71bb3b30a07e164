// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the dwell operators.
//!
//! A single root [`DwellError`] covers every failure a derived stream can report. Errors
//! travel in-band as [`StreamItem::Error`](crate::StreamItem::Error) and terminate the
//! subscription that produced them.
//!
//! # Examples
//!
//! ```
//! use dwell_core::{DwellError, Result};
//!
//! fn check_sensor(raw: &str) -> Result<bool> {
//!     match raw {
//!         "on" => Ok(true),
//!         "off" => Ok(false),
//!         other => Err(DwellError::predicate_error(format!("unknown state '{other}'"))),
//!     }
//! }
//!
//! assert!(check_sensor("on").unwrap());
//! assert!(check_sensor("flickering").is_err());
//! ```

/// Root error type for all dwell operations.
#[derive(Debug, thiserror::Error)]
pub enum DwellError {
    /// The source stream or an operator failed.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// A fallible predicate rejected a value.
    ///
    /// The subscription that evaluated the predicate is torn down after this error.
    #[error("Predicate error: {context}")]
    PredicateError {
        /// What the predicate could not decide
        context: String,
    },

    /// The scheduler could not accept a delayed action.
    #[error("Scheduler error: {context}")]
    SchedulerError {
        /// Context about the failed scheduling
        context: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DwellError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a predicate error with the given context
    pub fn predicate_error(context: impl Into<String>) -> Self {
        Self::PredicateError {
            context: context.into(),
        }
    }

    /// Create a scheduler error with the given context
    pub fn scheduler_error(context: impl Into<String>) -> Self {
        Self::SchedulerError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this error came from user-supplied code (predicate or callback)
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::PredicateError { .. } | Self::UserError(_))
    }
}

/// Specialized Result type for dwell operations.
pub type Result<T> = std::result::Result<T, DwellError>;

/// Extension trait for converting foreign errors into `DwellError`.
pub trait IntoDwellError {
    /// Convert this error into a `DwellError` with additional context
    fn into_dwell_error(self, context: &str) -> DwellError;

    /// Convert this error into a `DwellError` without additional context
    fn into_dwell(self) -> DwellError
    where
        Self: Sized,
    {
        self.into_dwell_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoDwellError for E {
    fn into_dwell_error(self, context: &str) -> DwellError {
        if context.is_empty() {
            DwellError::user_error(self)
        } else {
            DwellError::stream_error(format!("{context}: {self}"))
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(DwellError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(DwellError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DwellError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap_user_error(e.into(), context.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap_user_error(e.into(), f()))
    }
}

fn wrap_user_error(error: DwellError, context: String) -> DwellError {
    match error {
        DwellError::UserError(inner) => DwellError::StreamProcessingError {
            context: format!("{context}: {inner}"),
        },
        other => other,
    }
}

impl Clone for DwellError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            Self::PredicateError { context } => Self::PredicateError {
                context: context.clone(),
            },
            Self::SchedulerError { context } => Self::SchedulerError {
                context: context.clone(),
            },
            // The boxed source cannot be cloned, keep its message
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
        }
    }
}
