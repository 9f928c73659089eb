//! Error types for host-facing operations.

use thiserror::Error;

/// Failure of a single host query.
///
/// Any query failing aborts the snapshot that needed it; no partial
/// snapshot is ever produced. The error surfaces unchanged from
/// [`create_context`](crate::context::ContextBuilder::create_context);
/// the caller decides whether to skip the event or wait for the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host rejected the query or could not answer it.
    #[error("host query {query:?} failed: {message}")]
    Query {
        query: &'static str,
        message: String,
    },

    /// The host answered with a value of an unexpected shape.
    #[error("host query {query:?} returned an unexpected value: {message}")]
    Decode {
        query: &'static str,
        message: String,
    },
}

impl HostError {
    pub fn query(query: &'static str, message: impl Into<String>) -> Self {
        Self::Query {
            query,
            message: message.into(),
        }
    }

    pub fn decode(query: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            query,
            message: message.into(),
        }
    }
}
