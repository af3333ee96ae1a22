//! Host query error types

use thiserror::Error;

/// Why the host could not describe its environment.
///
/// Both kinds are recovered by the bootstrap sequencer, which degrades the
/// store's system info to absent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostQueryError {
    /// The host does not support the query, or had nothing to report
    #[error("system info unavailable: {0}")]
    Unavailable(String),

    /// The host answered with something that is not a system info record
    #[error("malformed system info: {0}")]
    Malformed(String),
}

/// Result type for host queries
pub type Result<T> = std::result::Result<T, HostQueryError>;
