//! Application error types.

use thiserror::Error;
use uuid::Uuid;

/// Application-level errors for Exero.
#[derive(Error, Debug)]
pub enum AppError {
    // Neo4j errors
    #[error("Neo4j connection error: {0}")]
    Connection(#[from] neo4rs::Error),

    #[error("Neo4j deserialization error: {0}")]
    Deserialization(#[from] neo4rs::DeError),

    #[error("failed to decode '{column}': {message}")]
    Decode { column: String, message: String },

    // Domain errors
    #[error("Exercise not found: {0}")]
    ExerciseNotFound(Uuid),

    #[error("Exercise session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Exercise record not found: {0}")]
    RecordNotFound(Uuid),

    /// A create matched no parent node, so nothing was written.
    ///
    /// Distinct from the not-found variants: this means "could not create",
    /// not "nothing exists to read".
    #[error("cannot create {entity}: parent node(s) not found: {parents}")]
    ParentNotFound {
        entity: &'static str,
        parents: String,
    },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
