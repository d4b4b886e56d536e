//! Row decoding for repository queries.
//!
//! Every query in this layer returns a fixed column projection; the
//! functions here turn those rows into domain objects. Coercion rules
//! (wire-string ids, lenient doubles, null to `None`) live on
//! [`Row`](crate::graph::Row) itself.

use crate::error::AppError;
use crate::graph::Row;
use crate::models::{Exercise, ExerciseRecord, ExerciseSession};

/// Decode one exercise record from its 8-column projection.
pub(crate) fn record_from_row(row: &Row) -> Result<ExerciseRecord, AppError> {
    Ok(ExerciseRecord {
        id: row.get_uuid("id")?,
        epoch_timestamp: row.get_f64_lenient("epochTimestamp")?,
        set: row.get("set")?,
        reps: row.get("reps")?,
        value: row.get_f64_lenient("value")?,
        unit: row.get_opt("unit")?,
        drop_set: row.get("dropSet")?,
        note: row.get_opt("note")?,
    })
}

/// Decode a session header (id, note, denormalized exercise name).
///
/// Records are left unloaded; the grouped decoder fills them in for the
/// queries that join them.
pub(crate) fn session_from_row(row: &Row) -> Result<ExerciseSession, AppError> {
    Ok(ExerciseSession {
        id: row.get_uuid("sessionId")?,
        note: row.get_opt("sessionNote")?,
        exercise_name: row.get("exerciseName")?,
        records: None,
    })
}

/// Decode one catalog exercise.
pub(crate) fn exercise_from_row(row: &Row) -> Result<Exercise, AppError> {
    Ok(Exercise {
        id: row.get_uuid("id")?,
        name: row.get("name")?,
        note: row.get_opt("note")?,
    })
}

/// Decode a point lookup where at most one row is expected.
///
/// Iterates the whole result and keeps overwriting a single accumulator,
/// so if more than one row ever comes back the last one wins.
pub(crate) fn decode_last<T>(
    rows: &[Row],
    decode: impl Fn(&Row) -> Result<T, AppError>,
) -> Result<Option<T>, AppError> {
    let mut item = None;
    for row in rows {
        item = Some(decode(row)?);
    }
    Ok(item)
}

/// Decode ordered rows into grouped aggregates.
///
/// Opens a new accumulator whenever the grouping key differs from the
/// previous row's (including on the very first row); every row is then
/// appended to the current accumulator. The rows must already be sorted by
/// the grouping key; the routine never revisits a closed group.
pub(crate) fn decode_grouped<K, A>(
    rows: &[Row],
    key: impl Fn(&Row) -> Result<K, AppError>,
    open: impl Fn(&Row) -> Result<A, AppError>,
    append: impl Fn(&mut A, &Row) -> Result<(), AppError>,
) -> Result<Vec<A>, AppError>
where
    K: PartialEq,
{
    let mut groups: Vec<A> = Vec::new();
    let mut current_key: Option<K> = None;

    for row in rows {
        let row_key = key(row)?;
        if current_key.as_ref() != Some(&row_key) {
            groups.push(open(row)?);
            current_key = Some(row_key);
        }
        if let Some(group) = groups.last_mut() {
            append(group, row)?;
        }
    }

    Ok(groups)
}

/// Group joined session/record rows into sessions with ordered record lists.
///
/// Expects rows sorted by session id, then record timestamp. A session
/// with no records joins against null record columns; those rows open the
/// session but contribute nothing to its (empty) record list.
pub(crate) fn sessions_from_rows(rows: &[Row]) -> Result<Vec<ExerciseSession>, AppError> {
    decode_grouped(
        rows,
        |row| row.get_uuid("sessionId"),
        |row| {
            let mut session = session_from_row(row)?;
            session.records = Some(Vec::new());
            Ok(session)
        },
        |session, row| {
            let has_record = row.get_raw("id").is_some_and(|v| !v.is_null());
            if has_record {
                if let Some(records) = session.records.as_mut() {
                    records.push(record_from_row(row)?);
                }
            }
            Ok(())
        },
    )
}
