//! Unified error types and result handling.
//!
//! Fetch and normalization failures never surface through this type; they are
//! logged and degraded to empty or defaulted data. What remains are the
//! failures an operator has to act on: bad configuration, an unreachable store
//! during setup, or a missing session.

use thiserror::Error;

/// Every failure the console can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The data store rejected a connection or statement
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A textual value did not name any known variant
    #[error("Invalid {kind}: {value:?}")]
    InvalidValue {
        /// Which kind of value was being parsed (e.g. `"payment status"`)
        kind: &'static str,
        /// The rejected input
        value: String,
    },

    /// A screen other than login was requested without a session
    #[error("No session present; set CONSOLE_SESSION_TOKEN to sign in")]
    Unauthenticated,
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
