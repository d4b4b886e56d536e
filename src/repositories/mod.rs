//! Data access layer for graph operations.
//!
//! Repositories provide a clean abstraction over graph queries,
//! using the `FromContext` derive macro for dependency injection.
//! Every method acquires one scoped session, runs one parameterized
//! Cypher statement, and releases the session on every exit path.

mod decode;
mod exercise;
mod record;
mod schema;
mod session;

pub use exercise::ExerciseRepository;
pub use record::ExerciseRecordRepository;
pub use schema::{GraphStats, SchemaRepository};
pub use session::ExerciseSessionRepository;
