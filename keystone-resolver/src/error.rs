//! Error types for resolution operations

use thiserror::Error;

use crate::store::StoreError;

/// Resolution error types.
///
/// A user with zero active roles is NOT an error - it degrades to empty
/// permission and navigation sets. Errors here are lookup failures and
/// references to things that do not exist.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The directory store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A module filter referenced an unknown or inactive module.
    #[error("module not found: {0}")]
    ModuleNotFound(String),
}
