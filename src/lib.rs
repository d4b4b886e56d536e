//! Exero - Workout Tracking Graph
//!
//! Neo4j-backed persistence for a workout tracking domain: exercises,
//! exercise sessions and the timestamped records logged under them.

pub mod config;
pub mod context;
pub mod di;
pub mod error;
pub mod graph;
pub mod models;
pub mod repositories;

// Re-export FromRef at crate root for di-macros generated code
pub use di::FromRef;
