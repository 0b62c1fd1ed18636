// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for building and querying.
//!
//! Every variant is recoverable: a failed rebuild leaves the last committed
//! snapshot serving, and a failed query is just an error value for the caller.

use thiserror::Error;

use crate::verify::InvariantError;

/// Main error type for lexis operations
#[derive(Error, Debug)]
pub enum Error {
    /// A document had nothing to index.
    #[error("invalid document: {reason}")]
    InvalidDocument { reason: String },

    /// `begin_build` was called while another build session is outstanding.
    #[error("a build is already in progress")]
    BuildInProgress,

    /// The document source could not produce any documents at all.
    #[error("document source unavailable: {0}")]
    SourceUnavailable(String),

    /// The query string could not be parsed. `position` is a byte offset.
    #[error("query syntax error at byte {position}: {message}")]
    QuerySyntax { message: String, position: usize },

    /// No snapshot has been committed (or loaded) yet.
    #[error("index not ready: nothing has been committed yet")]
    IndexNotReady,

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A snapshot failed its consistency checks.
    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] InvariantError),

    /// A persisted snapshot file could not be decoded.
    #[error("snapshot format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for lexis operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_document(reason: impl Into<String>) -> Self {
        Error::InvalidDocument {
            reason: reason.into(),
        }
    }

    pub(crate) fn syntax(message: impl Into<String>, position: usize) -> Self {
        Error::QuerySyntax {
            message: message.into(),
            position,
        }
    }

    /// Nothing here takes the process down; callers keep serving the last
    /// good snapshot.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Whether the caller sent something bad (as opposed to the engine or its
    /// environment failing). Useful for mapping to 4xx vs 5xx at a boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidDocument { .. } | Error::QuerySyntax { .. }
        )
    }

    /// Transient conditions worth retrying later.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Error::BuildInProgress | Error::SourceUnavailable(_) | Error::IndexNotReady
        )
    }
}
