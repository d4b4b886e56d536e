//! Schema repository for constraint setup and node statistics.

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::Graph;

/// Uniqueness constraints for every node label the repositories write.
const CONSTRAINTS: &[&str] = &[
    "CREATE CONSTRAINT exercise_id IF NOT EXISTS FOR (e:Exercise) REQUIRE e.id IS UNIQUE",
    "CREATE CONSTRAINT exercise_session_id IF NOT EXISTS \
     FOR (es:ExerciseSession) REQUIRE es.id IS UNIQUE",
    "CREATE CONSTRAINT exercise_record_id IF NOT EXISTS \
     FOR (er:ExerciseRecord) REQUIRE er.id IS UNIQUE",
    "CREATE CONSTRAINT workout_session_id IF NOT EXISTS \
     FOR (ws:WorkoutSession) REQUIRE ws.id IS UNIQUE",
];

/// Node counts per label.
#[derive(Debug, Clone)]
pub struct GraphStats {
    pub exercise_count: i64,
    pub session_count: i64,
    pub record_count: i64,
    pub workout_session_count: i64,
}

/// Repository for schema-related operations.
#[derive(FromContext, Clone)]
pub struct SchemaRepository {
    graph: Graph,
}

impl SchemaRepository {
    /// Create the id uniqueness constraints, idempotently.
    pub async fn ensure_constraints(&self) -> Result<(), AppError> {
        let session = self.graph.session().await?;
        for statement in CONSTRAINTS {
            tracing::debug!(%statement, "creating constraint");
            session.query(statement).run().await?;
        }
        Ok(())
    }

    /// Count the nodes of every label.
    pub async fn stats(&self) -> Result<GraphStats, AppError> {
        Ok(GraphStats {
            exercise_count: self.count_nodes("Exercise").await?,
            session_count: self.count_nodes("ExerciseSession").await?,
            record_count: self.count_nodes("ExerciseRecord").await?,
            workout_session_count: self.count_nodes("WorkoutSession").await?,
        })
    }

    /// Count nodes of a given label.
    async fn count_nodes(&self, label: &str) -> Result<i64, AppError> {
        let session = self.graph.session().await?;
        let query = format!("MATCH (n:{}) RETURN count(n) AS cnt", label);
        let row = session.query(&query).fetch_one().await?;
        match row {
            Some(row) => Ok(row.get_opt::<i64>("cnt")?.unwrap_or(0)),
            None => Ok(0),
        }
    }
}
