//! Graph abstraction layer for backend-agnostic database access.
//!
//! This module provides a trait-based abstraction over the graph store,
//! so repository code depends only on a query-execution capability rather
//! than on a specific driver or wire protocol.
//!
//! # Architecture
//!
//! - [`CypherExecutor`] - Execute parameterized Cypher queries
//! - [`SessionProvider`] - Acquire scoped query sessions
//! - [`GraphSession`] - One scoped query-execution context per repository call
//! - [`Graph`] - Shared, cloneable handle over the provider
//!
//! # Usage
//!
//! ```ignore
//! use exero::graph::{backends::Neo4jClient, Graph};
//!
//! let graph = Graph::new(Neo4jClient::connect(uri, user, password).await?);
//!
//! // Acquire a session, run exactly one parameterized query, release on drop.
//! let session = graph.session().await?;
//! let rows = session
//!     .query("MATCH (er:ExerciseRecord { id: $id }) RETURN er.id AS id")
//!     .param("id", id.to_string())
//!     .fetch_all()
//!     .await?;
//! ```

mod macros;
mod query;
mod row;
mod traits;

pub mod backends;

// Re-export core types
pub use query::{Query, QueryExt};
pub use row::{Params, Row, RowStream};
pub use traits::{CypherExecutor, SessionProvider};

// Re-export macro (defined at crate root via #[macro_export])
#[doc(inline)]
pub use crate::cypher;

// --- Graph handle and scoped session ---

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;

/// A scoped query-execution context.
///
/// One session is acquired per repository call and dropped before the call
/// returns, on every exit path. The backend decides what acquisition and
/// release actually mean; for pooled drivers release is a no-op beyond
/// returning the handle.
pub struct GraphSession {
    executor: Box<dyn CypherExecutor>,
}

impl GraphSession {
    /// Wraps a backend executor into a session.
    pub fn new(executor: Box<dyn CypherExecutor>) -> Self {
        Self { executor }
    }

    /// Creates a query builder bound to this session.
    pub fn query(&self, cypher: &str) -> Query<'_, Self> {
        Query::new(self, cypher)
    }
}

#[async_trait]
impl CypherExecutor for GraphSession {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        self.executor.execute_cypher(cypher, params).await
    }

    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        self.executor.run_cypher(cypher, params).await
    }
}

/// Shared handle over the session provider.
///
/// `Graph` is cheaply cloneable and is the single dependency repositories
/// declare. Each repository method acquires its own [`GraphSession`]
/// through it; no state is shared between calls.
#[derive(Clone)]
pub struct Graph {
    provider: Arc<dyn SessionProvider>,
}

impl Graph {
    /// Creates a new graph handle around the given provider.
    pub fn new(provider: impl SessionProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Acquires a scoped query session from the provider.
    pub async fn session(&self) -> Result<GraphSession, AppError> {
        self.provider.acquire().await
    }
}
