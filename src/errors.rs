//! Unified error type for `StrideFund`.
//!
//! Every failure carries an explicit kind so callers (the HTTP layer in particular)
//! branch on the variant rather than on message text.

use thiserror::Error;

/// All errors produced by the core services, configuration, and API layers.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input, rejected before any write
    #[error("Invalid input: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A lookup by id or slug found nothing
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up (e.g. `"cause"`)
        entity: &'static str,
        /// The id or slug that missed
        id: String,
    },

    /// The caller is authenticated but does not own the record
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Which ownership rule was violated
        message: String,
    },

    /// No caller identity was supplied
    #[error("Authentication required")]
    Unauthenticated,

    /// A uniqueness rule would be broken (e.g. duplicate username)
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflicting value
        message: String,
    },

    /// The activity record was committed but the cause aggregate was not updated.
    ///
    /// The runner identified by `runner_id` exists in the store; retrying the
    /// recording would create a second runner.
    #[error("Runner {runner_id} recorded but cause total not updated: {source}")]
    PartialSettlement {
        /// Id of the runner that was persisted
        runner_id: String,
        /// The failure that stopped the cause update
        #[source]
        source: Box<Error>,
    },

    /// Configuration file or environment problems
    #[error("Configuration error: {message}")]
    Config {
        /// Details about the configuration failure
        message: String,
    },

    /// Errors bubbling up from the ORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failures (binding the listener, reading files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variables
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`] for the given entity and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Shorthand for a [`Error::Forbidden`] with the given message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
