//! Exercise catalog model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog exercise (e.g. "Bench Press").
///
/// Root entity that exercise sessions point back to via `FOR_EXERCISE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier, generated by the caller before creation.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text note.
    pub note: Option<String>,
}

impl Exercise {
    /// Creates a new exercise with a caller-generated identity.
    pub fn new(name: String, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            note,
        }
    }
}
