//! Exercise record model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged set under an exercise session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Unique identifier, generated by the caller before creation.
    pub id: Uuid,
    /// When the set was performed, as epoch seconds.
    pub epoch_timestamp: f64,
    /// Set label (e.g. "1", "2", "warmup").
    pub set: String,
    /// Repetition count.
    pub reps: i64,
    /// Measured value, e.g. weight or distance.
    pub value: f64,
    /// Unit for the value (e.g. "kg"), if any.
    pub unit: Option<String>,
    /// Whether this set was a drop set.
    pub drop_set: bool,
    /// Free-text note.
    pub note: Option<String>,
}
