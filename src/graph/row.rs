//! Row and streaming types for query results.
//!
//! All type-coercion policy for decoded rows lives here: identities travel
//! as strings on the wire and parse back to [`Uuid`], numeric columns
//! tolerate integer-valued floats coming back as bare integers, and
//! nullable columns decode to `None`.

use crate::error::AppError;
use futures::Stream;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::pin::Pin;
use uuid::Uuid;

/// Parameters for Cypher queries.
///
/// A map of parameter names to JSON values that can be passed to queries.
pub type Params = HashMap<String, JsonValue>;

/// A stream of rows from a query result.
///
/// Uses `futures::Stream` for memory-efficient iteration over large result sets.
/// Rows are fetched on-demand, not loaded all at once.
pub type RowStream<'a> = Pin<Box<dyn Stream<Item = Result<Row, AppError>> + Send + 'a>>;

/// A single row from a query result.
///
/// Contains column values as JSON, with typed extraction via [`Row::get`].
#[derive(Debug, Clone)]
pub struct Row {
    data: HashMap<String, JsonValue>,
}

impl Row {
    /// Creates a new row from a map of column names to values.
    pub fn new(data: HashMap<String, JsonValue>) -> Self {
        Self { data }
    }

    /// Gets a value from the row by column name, deserializing to the requested type.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is not found or if deserialization fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let set: String = row.get("set")?;
    /// let reps: i64 = row.get("reps")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, AppError> {
        self.data
            .get(key)
            .ok_or_else(|| AppError::Decode {
                column: key.to_string(),
                message: "column not found".to_string(),
            })
            .and_then(|v| {
                serde_json::from_value(v.clone()).map_err(|e| AppError::Decode {
                    column: key.to_string(),
                    message: e.to_string(),
                })
            })
    }

    /// Gets a value from the row, returning `None` if the column is null or absent.
    ///
    /// Still returns an error if the column exists but deserialization fails.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.data.get(key) {
            Some(v) if v.is_null() => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| AppError::Decode {
                    column: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Gets an identity column, parsing its wire string into a [`Uuid`].
    pub fn get_uuid(&self, key: &str) -> Result<Uuid, AppError> {
        let text: String = self.get(key)?;
        Uuid::parse_str(&text).map_err(|e| AppError::Decode {
            column: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Gets a numeric column as `f64` via string round-trip.
    ///
    /// The store returns integer-valued floats as bare integers; rendering
    /// the cell to text and parsing it back accepts both shapes.
    pub fn get_f64_lenient(&self, key: &str) -> Result<f64, AppError> {
        let raw = self.data.get(key).ok_or_else(|| AppError::Decode {
            column: key.to_string(),
            message: "column not found".to_string(),
        })?;
        let text = match raw {
            JsonValue::Number(n) => n.to_string(),
            JsonValue::String(s) => s.clone(),
            other => {
                return Err(AppError::Decode {
                    column: key.to_string(),
                    message: format!("expected a numeric value, got {other}"),
                })
            }
        };
        text.parse::<f64>().map_err(|e| AppError::Decode {
            column: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the raw JSON value for a column, if it exists.
    pub fn get_raw(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(|s| s.as_str())
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the row and returns the underlying data map.
    pub fn into_inner(self) -> HashMap<String, JsonValue> {
        self.data
    }
}

impl From<HashMap<String, JsonValue>> for Row {
    fn from(data: HashMap<String, JsonValue>) -> Self {
        Self::new(data)
    }
}
