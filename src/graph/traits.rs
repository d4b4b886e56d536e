//! Core traits for the query-session provider abstraction.
//!
//! This module defines the traits a graph backend must implement:
//!
//! - [`CypherExecutor`] - Execute parameterized Cypher queries
//! - [`SessionProvider`] - Hand out scoped query sessions

use async_trait::async_trait;

use crate::error::AppError;
use crate::graph::row::{Params, RowStream};
use crate::graph::GraphSession;

/// Executes Cypher queries against a graph database.
///
/// This is the core capability every backend provides. It exposes methods
/// for queries that return rows and for mutations that don't.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Executes a Cypher query and returns a stream of result rows.
    ///
    /// Use this for queries that return data (MATCH, RETURN).
    ///
    /// # Arguments
    ///
    /// * `cypher` - The Cypher query string
    /// * `params` - Parameters to bind to the query
    ///
    /// # Returns
    ///
    /// A stream of rows that can be iterated asynchronously.
    async fn execute_cypher(&self, cypher: &str, params: Params)
        -> Result<RowStream<'_>, AppError>;

    /// Executes a Cypher query without returning results.
    ///
    /// Use this for mutations (CREATE, MERGE, DELETE, SET).
    ///
    /// # Arguments
    ///
    /// * `cypher` - The Cypher query string
    /// * `params` - Parameters to bind to the query
    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError>;
}

/// Hands out scoped query-execution sessions.
///
/// Each repository call acquires one session, runs its query through it,
/// and releases it when the session goes out of scope, on every exit
/// path including failure. The provider itself is shared and stateless
/// across calls; concurrency is delegated entirely to the backend.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Acquires a new scoped query session.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let session = provider.acquire().await?;
    /// let rows = session.query("MATCH (e:Exercise) RETURN e.id AS id")
    ///     .fetch_all()
    ///     .await?;
    /// // dropped here - released regardless of how the scope exits
    /// ```
    async fn acquire(&self) -> Result<GraphSession, AppError>;
}
