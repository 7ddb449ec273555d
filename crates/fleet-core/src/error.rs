//! Core error type.
//!
//! Sub-crates define their own error enums and either convert `CoreError`
//! via `From` impls or wrap it as one variant. Prefer whichever keeps error
//! sites clean.

use thiserror::Error;

/// Errors produced by `fleet-core` parsing and validation helpers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown capability: {0:?}")]
    UnknownCapability(String),
}

/// Shorthand result type for `fleet-core`.
pub type CoreResult<T> = Result<T, CoreError>;
