//! Backend implementations of the query-session provider.
//!
//! A backend implements the core traits from [`crate::graph::traits`]:
//!
//! - [`CypherExecutor`](crate::graph::CypherExecutor) for its sessions
//! - [`SessionProvider`](crate::graph::SessionProvider) for the client
//!
//! Neo4j over Bolt is the one backend here; the repositories only ever see
//! the traits, so another store could be slotted in behind them.

pub mod neo4j;

pub use neo4j::Neo4jClient;
