//! Neo4j backend over the `neo4rs` Bolt driver.
//!
//! The driver keeps its own connection pool; a [`GraphSession`] acquired
//! here is a scoped handle over that pool, released when dropped.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use neo4rs::{
    query, BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
};
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::graph::row::{Params, Row, RowStream};
use crate::graph::traits::{CypherExecutor, SessionProvider};
use crate::graph::GraphSession;

/// Session provider backed by a Neo4j server.
#[derive(Clone)]
pub struct Neo4jClient {
    graph: Arc<neo4rs::Graph>,
}

impl Neo4jClient {
    /// Connects to a Neo4j server over Bolt.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, AppError> {
        let graph = neo4rs::Graph::new(uri, user, password).await?;
        Ok(Self {
            graph: Arc::new(graph),
        })
    }
}

#[async_trait]
impl SessionProvider for Neo4jClient {
    async fn acquire(&self) -> Result<GraphSession, AppError> {
        Ok(GraphSession::new(Box::new(Neo4jSession {
            graph: self.graph.clone(),
        })))
    }
}

/// One scoped query-execution context over the shared driver pool.
struct Neo4jSession {
    graph: Arc<neo4rs::Graph>,
}

#[async_trait]
impl CypherExecutor for Neo4jSession {
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<RowStream<'_>, AppError> {
        let mut result = self.graph.execute(build_query(cypher, params)).await?;

        let stream = async_stream::try_stream! {
            while let Some(row) = result.next().await? {
                yield decode_row(&row)?;
            }
        };
        Ok(Box::pin(stream))
    }

    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), AppError> {
        self.graph.run(build_query(cypher, params)).await?;
        Ok(())
    }
}

fn build_query(cypher: &str, params: Params) -> neo4rs::Query {
    let mut q = query(cypher);
    for (name, value) in params {
        q = q.param(&name, bolt_value(value));
    }
    q
}

/// Convert a parameter value from its backend-agnostic JSON form to Bolt.
fn bolt_value(value: JsonValue) -> BoltType {
    match value {
        JsonValue::Null => BoltType::Null(BoltNull),
        JsonValue::Bool(b) => BoltType::Boolean(BoltBoolean::new(b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or(f64::NAN))),
        },
        JsonValue::String(s) => BoltType::String(BoltString::from(s.as_str())),
        JsonValue::Array(items) => {
            let mut list = BoltList::default();
            for item in items {
                list.push(bolt_value(item));
            }
            BoltType::List(list)
        }
        JsonValue::Object(map) => {
            let mut out = BoltMap::default();
            for (key, value) in map {
                out.put(BoltString::from(key.as_str()), bolt_value(value));
            }
            BoltType::Map(out)
        }
    }
}

/// Decode a driver row into the backend-agnostic JSON row.
fn decode_row(row: &neo4rs::Row) -> Result<Row, AppError> {
    let columns: HashMap<String, JsonValue> = row.to()?;
    Ok(Row::new(columns))
}
