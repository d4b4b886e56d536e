//! Exercise session repository for CRUD and aggregate reconstruction.

use uuid::Uuid;

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::Graph;
use crate::models::ExerciseSession;

use super::decode::{decode_last, session_from_row, sessions_from_rows};

/// Session header columns returned by create/update.
const SESSION_COLUMNS: &str =
    "es.id AS sessionId, es.note AS sessionNote, e.name AS exerciseName";

/// Joined session + record projection returned by the read queries.
///
/// Record columns carry the same aliases as the record repository's
/// queries so one decoder serves both.
const SESSION_RECORD_COLUMNS: &str =
    "es.id AS sessionId, es.note AS sessionNote, e.name AS exerciseName, \
     er.id AS id, er.epochTimestamp AS epochTimestamp, er.set AS set, er.reps AS reps, \
     er.value AS value, er.unit AS unit, er.dropSet AS dropSet, er.note AS note";

/// Repository for exercise session CRUD.
///
/// Read operations reconstruct each session together with its record list
/// from a single joined query; rows arrive sorted by session id and record
/// timestamp, and a streaming group-by splits them into aggregates.
#[derive(FromContext, Clone)]
pub struct ExerciseSessionRepository {
    graph: Graph,
}

impl ExerciseSessionRepository {
    /// Fetch every session belonging to a workout session, each with its
    /// full record list in ascending timestamp order.
    ///
    /// Sessions without records are included with an empty list. The query
    /// orders by session id before record timestamp so the group-by never
    /// splits a session whose record timestamps interleave with another's.
    pub async fn by_workout_session(
        &self,
        workout_session_id: Uuid,
    ) -> Result<Vec<ExerciseSession>, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (es:ExerciseSession)-[:FOR_WORKOUT_SESSION]->(ws:WorkoutSession {{ id: $id }}),
                       (es)-[:FOR_EXERCISE]->(e:Exercise)
                 OPTIONAL MATCH (er:ExerciseRecord)-[:FOR_EXERCISE_SESSION]->(es)
                 RETURN {SESSION_RECORD_COLUMNS}
                 ORDER BY es.id, er.epochTimestamp"
            ))
            .param("id", workout_session_id.to_string())
            .fetch_all()
            .await?;

        sessions_from_rows(&rows)
    }

    /// Fetch one session with its full record list.
    ///
    /// Returns `None` when no such session exists. A session that has no
    /// records yet comes back with an empty list.
    pub async fn get(&self, id: Uuid) -> Result<Option<ExerciseSession>, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (es:ExerciseSession {{ id: $id }})-[:FOR_EXERCISE]->(e:Exercise)
                 OPTIONAL MATCH (er:ExerciseRecord)-[:FOR_EXERCISE_SESSION]->(es)
                 RETURN {SESSION_RECORD_COLUMNS}
                 ORDER BY er.epochTimestamp"
            ))
            .param("id", id.to_string())
            .fetch_all()
            .await?;

        Ok(sessions_from_rows(&rows)?.pop())
    }

    /// Create a session under an existing exercise and workout session.
    ///
    /// The session node and both ownership edges are written in one atomic
    /// statement that first matches the parents; if either is missing,
    /// nothing is created and [`AppError::ParentNotFound`] is returned.
    /// The returned session carries no record list at all: a fresh session
    /// has nothing to load.
    pub async fn add(
        &self,
        exercise_session: &ExerciseSession,
        exercise_id: Uuid,
        workout_session_id: Uuid,
    ) -> Result<ExerciseSession, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (e:Exercise {{ id: $exerciseId }}), \
                       (ws:WorkoutSession {{ id: $workoutSessionId }})
                 CREATE (es:ExerciseSession {{ id: $id, note: $note }}),
                        (es)-[:FOR_EXERCISE]->(e),
                        (es)-[:FOR_WORKOUT_SESSION]->(ws)
                 RETURN {SESSION_COLUMNS}"
            ))
            .param("exerciseId", exercise_id.to_string())
            .param("workoutSessionId", workout_session_id.to_string())
            .param("id", exercise_session.id.to_string())
            .param("note", exercise_session.note.as_deref())
            .fetch_all()
            .await?;

        decode_last(&rows, session_from_row)?.ok_or(AppError::ParentNotFound {
            entity: "ExerciseSession",
            parents: format!("Exercise({exercise_id}), WorkoutSession({workout_session_id})"),
        })
    }

    /// Overwrite the session note.
    ///
    /// Only the note is mutable; relationships and records are untouched.
    /// Returns the session header without records.
    pub async fn update(
        &self,
        exercise_session: &ExerciseSession,
    ) -> Result<ExerciseSession, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (es:ExerciseSession {{ id: $id }})-[:FOR_EXERCISE]->(e:Exercise)
                 SET es.note = $note
                 RETURN {SESSION_COLUMNS}"
            ))
            .param("id", exercise_session.id.to_string())
            .param("note", exercise_session.note.as_deref())
            .fetch_all()
            .await?;

        decode_last(&rows, session_from_row)?
            .ok_or(AppError::SessionNotFound(exercise_session.id))
    }

    /// Delete a session and every record owned by it.
    ///
    /// Cascades over the ownership edge in one statement. Records are
    /// optional in the match, so a session with no records is deletable.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let session = self.graph.session().await?;
        session
            .query(
                "MATCH (es:ExerciseSession { id: $id })
                 OPTIONAL MATCH (er:ExerciseRecord)-[:FOR_EXERCISE_SESSION]->(es)
                 DETACH DELETE er, es",
            )
            .param("id", id.to_string())
            .run()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CypherExecutor, GraphSession, Params, Row, RowStream, SessionProvider};
    use serde_json::{json, Value as JsonValue};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct StubClient {
        responses: Arc<Mutex<VecDeque<Vec<Row>>>>,
    }

    impl StubClient {
        fn with_responses(responses: Vec<Vec<Row>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses.into())),
            }
        }
    }

    struct StubExecutor {
        responses: Arc<Mutex<VecDeque<Vec<Row>>>>,
    }

    #[async_trait::async_trait]
    impl CypherExecutor for StubExecutor {
        async fn execute_cypher(
            &self,
            _cypher: &str,
            _params: Params,
        ) -> Result<RowStream<'_>, AppError> {
            let rows = self.responses.lock().unwrap().pop_front().unwrap_or_default();
            Ok(Box::pin(futures::stream::iter(
                rows.into_iter().map(Ok::<_, AppError>),
            )))
        }

        async fn run_cypher(&self, _cypher: &str, _params: Params) -> Result<(), AppError> {
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl SessionProvider for StubClient {
        async fn acquire(&self) -> Result<GraphSession, AppError> {
            Ok(GraphSession::new(Box::new(StubExecutor {
                responses: self.responses.clone(),
            })))
        }
    }

    fn repo(responses: Vec<Vec<Row>>) -> ExerciseSessionRepository {
        ExerciseSessionRepository {
            graph: Graph::new(StubClient::with_responses(responses)),
        }
    }

    fn header_row(session_id: Uuid) -> Row {
        Row::new(
            [
                ("sessionId".to_string(), json!(session_id.to_string())),
                ("sessionNote".to_string(), json!("heavy day")),
                ("exerciseName".to_string(), json!("Bench Press")),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn joined_row(session_id: Uuid, record_id: Option<Uuid>, timestamp: f64) -> Row {
        let mut data = header_row(session_id).into_inner();
        match record_id {
            Some(record_id) => {
                data.insert("id".to_string(), json!(record_id.to_string()));
                data.insert("epochTimestamp".to_string(), json!(timestamp));
                data.insert("set".to_string(), json!("1"));
                data.insert("reps".to_string(), json!(5));
                data.insert("value".to_string(), json!(80.0));
                data.insert("unit".to_string(), JsonValue::Null);
                data.insert("dropSet".to_string(), json!(false));
                data.insert("note".to_string(), JsonValue::Null);
            }
            None => {
                for column in [
                    "id",
                    "epochTimestamp",
                    "set",
                    "reps",
                    "value",
                    "unit",
                    "dropSet",
                    "note",
                ] {
                    data.insert(column.to_string(), JsonValue::Null);
                }
            }
        }
        Row::new(data)
    }

    #[tokio::test]
    async fn test_get_reconstructs_session_with_records() {
        let session_id = Uuid::new_v4();
        let rows = vec![
            joined_row(session_id, Some(Uuid::new_v4()), 100.0),
            joined_row(session_id, Some(Uuid::new_v4()), 200.0),
        ];
        let repo = repo(vec![rows]);

        let session = repo.get(session_id).await.unwrap().unwrap();
        assert_eq!(session.id, session_id);
        assert_eq!(session.note.as_deref(), Some("heavy day"));
        assert_eq!(session.exercise_name, "Bench Press");
        let records = session.records.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].epoch_timestamp < records[1].epoch_timestamp);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = repo(vec![vec![]]);
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_fresh_session_has_empty_records() {
        let session_id = Uuid::new_v4();
        let repo = repo(vec![vec![joined_row(session_id, None, 0.0)]]);

        let session = repo.get(session_id).await.unwrap().unwrap();
        assert_eq!(session.records, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_by_workout_session_groups_per_session() {
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let rows = vec![
            joined_row(s1, Some(Uuid::new_v4()), 100.0),
            joined_row(s1, Some(Uuid::new_v4()), 300.0),
            joined_row(s2, Some(Uuid::new_v4()), 200.0),
        ];
        let repo = repo(vec![rows]);

        let sessions = repo.by_workout_session(Uuid::new_v4()).await.unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].records.as_ref().unwrap().len(), 2);
        assert_eq!(sessions[1].records.as_ref().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_returns_header_without_records() {
        let session = ExerciseSession::new(Some("heavy day".to_string()));
        let repo = repo(vec![vec![header_row(session.id)]]);

        let created = repo
            .add(&session, Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(created.id, session.id);
        assert_eq!(created.exercise_name, "Bench Press");
        assert!(created.records.is_none());
    }

    #[tokio::test]
    async fn test_add_missing_parents_is_parent_not_found() {
        let repo = repo(vec![vec![]]);

        let err = repo
            .add(
                &ExerciseSession::new(None),
                Uuid::new_v4(),
                Uuid::new_v4(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ParentNotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_is_session_not_found() {
        let session = ExerciseSession::new(None);
        let repo = repo(vec![vec![]]);

        let err = repo.update(&session).await.unwrap_err();
        assert!(matches!(err, AppError::SessionNotFound(missing) if missing == session.id));
    }
}
