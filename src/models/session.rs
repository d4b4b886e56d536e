//! Exercise session model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ExerciseRecord;

/// One exercise performed within a workout session.
///
/// Owned by exactly one `Exercise` and one `WorkoutSession`; the workout
/// session itself is external and referenced only by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    /// Unique identifier, generated by the caller before creation.
    pub id: Uuid,
    /// Free-text note.
    pub note: Option<String>,
    /// Name of the owning exercise. Read-only projection, never stored on
    /// the session node itself.
    pub exercise_name: String,
    /// Records ordered by ascending timestamp.
    ///
    /// `None` when the operation did not load records (create, update);
    /// `Some`, possibly empty, when it did. The field is omitted from
    /// serialized output when absent, so consumers can tell "not loaded"
    /// from "loaded and empty".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<ExerciseRecord>>,
}

impl ExerciseSession {
    /// Creates a new session with a caller-generated identity.
    ///
    /// The exercise name is filled in by the store when the session is
    /// created under its exercise.
    pub fn new(note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            note,
            exercise_name: String::new(),
            records: None,
        }
    }
}
