// This software is licensed under a dual license model:
//
// GNU Affero General Public License v3 (AGPLv3): You may use, modify, and
// distribute this software under the terms of the AGPLv3.
//
// Elastic License v2 (ELv2): You may also use, modify, and distribute this
// software under the Elastic License v2, which has specific restrictions.
//
// We welcome any commercial collaboration or support. For inquiries
// regarding the licenses, please contact us at:
// vectorchord-inquiry@tensorchord.ai
//
// Copyright (c) 2025 TensorChord Inc.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure categories a host reports to its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CardinalityMismatch,
    TypeMismatch,
    /// Logged by the accumulator and never returned.
    StateLayoutMismatch,
    InvalidBuffer,
    InvalidOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("cardinality mismatch: {message}")]
    CardinalityMismatch { message: String },
    #[error("type mismatch: {message}")]
    TypeMismatch { message: String },
    #[error("could not identify a comparison function for type {element_type}")]
    UndefinedComparator { element_type: String },
    #[error("invalid buffer: {message}")]
    InvalidBuffer { message: String },
    #[error("failed to parse options: {message}")]
    InvalidOptions { message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CardinalityMismatch { .. } => ErrorKind::CardinalityMismatch,
            Error::TypeMismatch { .. } | Error::UndefinedComparator { .. } => {
                ErrorKind::TypeMismatch
            }
            Error::InvalidBuffer { .. } => ErrorKind::InvalidBuffer,
            Error::InvalidOptions { .. } => ErrorKind::InvalidOptions,
        }
    }

    /// Forwards this error to `sink` as `(kind, message)`.
    pub fn report_to(&self, sink: &dyn ErrorSink) {
        sink.report(self.kind(), &self.to_string());
    }

    pub(crate) fn cardinality(message: impl Into<String>) -> Self {
        Error::CardinalityMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn buffer(message: impl Into<String>) -> Self {
        Error::InvalidBuffer {
            message: message.into(),
        }
    }
}

/// The channel through which a host aborts its surrounding call.
pub trait ErrorSink {
    fn report(&self, kind: ErrorKind, message: &str);
}

impl<F: Fn(ErrorKind, &str)> ErrorSink for F {
    fn report(&self, kind: ErrorKind, message: &str) {
        self(kind, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn report_to_sink() {
        let seen = RefCell::new(Vec::new());
        let sink = |kind: ErrorKind, message: &str| {
            seen.borrow_mut().push((kind, message.to_string()));
        };
        Error::UndefinedComparator {
            element_type: "point".to_string(),
        }
        .report_to(&sink);
        Error::cardinality("both arrays must be of the same size").report_to(&sink);
        let seen = seen.into_inner();
        assert_eq!(seen[0].0, ErrorKind::TypeMismatch);
        assert!(seen[0].1.contains("point"));
        assert_eq!(
            seen[1],
            (
                ErrorKind::CardinalityMismatch,
                "cardinality mismatch: both arrays must be of the same size".to_string()
            )
        );
    }
}
