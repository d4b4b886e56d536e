//! Exercise record repository for CRUD on logged sets.

use uuid::Uuid;

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::Graph;
use crate::models::ExerciseRecord;

use super::decode::{decode_last, record_from_row};

/// The fixed 8-column projection every record query returns.
const RECORD_COLUMNS: &str = "er.id AS id, er.epochTimestamp AS epochTimestamp, er.set AS set, \
     er.reps AS reps, er.value AS value, er.unit AS unit, er.dropSet AS dropSet, er.note AS note";

/// Repository for exercise record CRUD.
///
/// Each method acquires one scoped session from the shared provider and
/// runs exactly one parameterized query.
#[derive(FromContext, Clone)]
pub struct ExerciseRecordRepository {
    graph: Graph,
}

impl ExerciseRecordRepository {
    /// Fetch a record by id. Returns `None` when no such record exists.
    pub async fn get(&self, id: Uuid) -> Result<Option<ExerciseRecord>, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (er:ExerciseRecord {{ id: $id }})
                 RETURN {RECORD_COLUMNS}"
            ))
            .param("id", id.to_string())
            .fetch_all()
            .await?;

        decode_last(&rows, record_from_row)
    }

    /// Create a record under an existing exercise session.
    ///
    /// The record node and its ownership edge are written in one atomic
    /// statement that first matches the parent session; if the session does
    /// not exist, nothing is created and [`AppError::ParentNotFound`] is
    /// returned. The returned record is re-read from the store, so its
    /// values reflect the store's own type coercion.
    pub async fn add(
        &self,
        record: &ExerciseRecord,
        exercise_session_id: Uuid,
    ) -> Result<ExerciseRecord, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (es:ExerciseSession {{ id: $exerciseSessionId }})
                 CREATE (er:ExerciseRecord {{ id: $id, epochTimestamp: $epochTimestamp, \
                         set: $set, reps: $reps, value: $value, unit: $unit, \
                         dropSet: $dropSet, note: $note }}),
                        (er)-[:FOR_EXERCISE_SESSION]->(es)
                 RETURN {RECORD_COLUMNS}"
            ))
            .param("exerciseSessionId", exercise_session_id.to_string())
            .param("id", record.id.to_string())
            .param("epochTimestamp", record.epoch_timestamp)
            .param("set", record.set.as_str())
            .param("reps", record.reps)
            .param("value", record.value)
            .param("unit", record.unit.as_deref())
            .param("dropSet", record.drop_set)
            .param("note", record.note.as_deref())
            .fetch_all()
            .await?;

        decode_last(&rows, record_from_row)?.ok_or(AppError::ParentNotFound {
            entity: "ExerciseRecord",
            parents: format!("ExerciseSession({exercise_session_id})"),
        })
    }

    /// Overwrite all mutable fields of a record.
    ///
    /// No partial update and no concurrency check: the last writer wins.
    /// Updating a non-existent id matches nothing and returns
    /// [`AppError::RecordNotFound`]; it never creates a record.
    pub async fn update(&self, record: &ExerciseRecord) -> Result<ExerciseRecord, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (er:ExerciseRecord {{ id: $id }})
                 SET er.epochTimestamp = $epochTimestamp,
                     er.set = $set,
                     er.reps = $reps,
                     er.value = $value,
                     er.unit = $unit,
                     er.dropSet = $dropSet,
                     er.note = $note
                 RETURN {RECORD_COLUMNS}"
            ))
            .param("id", record.id.to_string())
            .param("epochTimestamp", record.epoch_timestamp)
            .param("set", record.set.as_str())
            .param("reps", record.reps)
            .param("value", record.value)
            .param("unit", record.unit.as_deref())
            .param("dropSet", record.drop_set)
            .param("note", record.note.as_deref())
            .fetch_all()
            .await?;

        decode_last(&rows, record_from_row)?.ok_or(AppError::RecordNotFound(record.id))
    }

    /// Delete a record and its ownership edge.
    ///
    /// Only deletes when the record is owned by the given session; a
    /// mismatched pair matches nothing and is a no-op.
    pub async fn remove(&self, id: Uuid, exercise_session_id: Uuid) -> Result<(), AppError> {
        let session = self.graph.session().await?;
        session
            .query(
                "OPTIONAL MATCH (er:ExerciseRecord { id: $id })\
                 -[r:FOR_EXERCISE_SESSION]->\
                 (es:ExerciseSession { id: $exerciseSessionId })
                 DELETE r, er",
            )
            .param("id", id.to_string())
            .param("exerciseSessionId", exercise_session_id.to_string())
            .run()
            .await
    }
}
