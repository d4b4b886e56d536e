//! Exercise catalog repository.

use uuid::Uuid;

use crate::context::Context;
use crate::di::FromContext;
use crate::error::AppError;
use crate::graph::Graph;
use crate::models::Exercise;

use super::decode::{decode_last, exercise_from_row};

const EXERCISE_COLUMNS: &str = "e.id AS id, e.name AS name, e.note AS note";

/// Repository for the exercise catalog.
#[derive(FromContext, Clone)]
pub struct ExerciseRepository {
    graph: Graph,
}

impl ExerciseRepository {
    /// Fetch an exercise by id.
    pub async fn get(&self, id: Uuid) -> Result<Option<Exercise>, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (e:Exercise {{ id: $id }})
                 RETURN {EXERCISE_COLUMNS}"
            ))
            .param("id", id.to_string())
            .fetch_all()
            .await?;

        decode_last(&rows, exercise_from_row)
    }

    /// List the whole catalog, name-ordered.
    pub async fn list(&self) -> Result<Vec<Exercise>, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (e:Exercise)
                 RETURN {EXERCISE_COLUMNS}
                 ORDER BY e.name"
            ))
            .fetch_all()
            .await?;

        rows.iter().map(exercise_from_row).collect()
    }

    /// Create a catalog exercise.
    ///
    /// An exercise has no parent, so creation cannot fail referentially;
    /// the caller-supplied value is returned as created.
    pub async fn add(&self, exercise: &Exercise) -> Result<Exercise, AppError> {
        let session = self.graph.session().await?;
        session
            .query("CREATE (e:Exercise { id: $id, name: $name, note: $note })")
            .param("id", exercise.id.to_string())
            .param("name", exercise.name.as_str())
            .param("note", exercise.note.as_deref())
            .run()
            .await?;

        Ok(exercise.clone())
    }

    /// Overwrite an exercise's name and note.
    pub async fn update(&self, exercise: &Exercise) -> Result<Exercise, AppError> {
        let session = self.graph.session().await?;
        let rows = session
            .query(&format!(
                "MATCH (e:Exercise {{ id: $id }})
                 SET e.name = $name, e.note = $note
                 RETURN {EXERCISE_COLUMNS}"
            ))
            .param("id", exercise.id.to_string())
            .param("name", exercise.name.as_str())
            .param("note", exercise.note.as_deref())
            .fetch_all()
            .await?;

        decode_last(&rows, exercise_from_row)?.ok_or(AppError::ExerciseNotFound(exercise.id))
    }
}
