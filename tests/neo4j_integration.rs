//! Integration tests against a running Neo4j instance.
//!
//! Run with: `cargo test --features integration --test neo4j_integration`

#![cfg(feature = "integration")]

use exero::config::{Config, Neo4jConfig};
use exero::context::Context;
use exero::error::AppError;
use exero::graph::{backends::Neo4jClient, Graph};
use exero::models::{Exercise, ExerciseRecord, ExerciseSession};
use exero::repositories::{
    ExerciseRecordRepository, ExerciseRepository, ExerciseSessionRepository, SchemaRepository,
};
use exero::FromRef;
use serial_test::serial;
use uuid::Uuid;

const TEST_URI: &str = "bolt://localhost:7687";
const TEST_USER: &str = "neo4j";
const TEST_PASSWORD: &str = "password";

async fn create_context() -> Context {
    let client = Neo4jClient::connect(TEST_URI, TEST_USER, TEST_PASSWORD)
        .await
        .expect("Failed to connect to test database");
    Context::new(
        Graph::new(client),
        Config {
            neo4j: Neo4jConfig {
                uri: TEST_URI.to_string(),
                user: TEST_USER.to_string(),
                password: Some(TEST_PASSWORD.to_string()),
            },
        },
    )
}

/// Create a bare workout session node; the workout domain itself is
/// external to this crate and only referenced by id.
async fn create_workout_session(ctx: &Context) -> Uuid {
    let id = Uuid::new_v4();
    let session = ctx.graph.session().await.expect("Failed to open session");
    session
        .query("CREATE (ws:WorkoutSession { id: $id })")
        .param("id", id.to_string())
        .run()
        .await
        .expect("Failed to create workout session");
    id
}

/// Detach-delete every node created by a test.
async fn cleanup(ctx: &Context, ids: &[Uuid]) {
    let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    let session = ctx.graph.session().await.expect("Failed to open session");
    let _ = session
        .query("MATCH (n) WHERE n.id IN $ids DETACH DELETE n")
        .param("ids", ids)
        .run()
        .await;
}

fn record(timestamp: f64, set: &str, value: f64) -> ExerciseRecord {
    ExerciseRecord {
        id: Uuid::new_v4(),
        epoch_timestamp: timestamp,
        set: set.to_string(),
        reps: 5,
        value,
        unit: None,
        drop_set: false,
        note: None,
    }
}

/// Create exercise + workout session + exercise session, returning all ids
/// that need cleanup.
async fn seed_session(ctx: &Context, note: &str) -> (Exercise, Uuid, ExerciseSession) {
    let exercises = ExerciseRepository::from_ref(ctx);
    let sessions = ExerciseSessionRepository::from_ref(ctx);

    let exercise = exercises
        .add(&Exercise::new("Bench Press".to_string(), None))
        .await
        .expect("Failed to create exercise");
    let workout_id = create_workout_session(ctx).await;
    let session = sessions
        .add(
            &ExerciseSession::new(Some(note.to_string())),
            exercise.id,
            workout_id,
        )
        .await
        .expect("Failed to create exercise session");

    (exercise, workout_id, session)
}

#[tokio::test]
#[serial]
async fn test_constraints_are_idempotent() {
    let ctx = create_context().await;
    let schema = SchemaRepository::from_ref(&ctx);

    schema.ensure_constraints().await.expect("first run failed");
    schema.ensure_constraints().await.expect("second run failed");
}

#[tokio::test]
#[serial]
async fn test_session_add_then_get() {
    let ctx = create_context().await;
    let sessions = ExerciseSessionRepository::from_ref(&ctx);

    let (exercise, workout_id, created) = seed_session(&ctx, "heavy day").await;
    // A fresh session has no record list at all.
    assert!(created.records.is_none());
    assert_eq!(created.exercise_name, "Bench Press");

    let fetched = sessions
        .get(created.id)
        .await
        .expect("get failed")
        .expect("session should exist");
    assert_eq!(fetched.note.as_deref(), Some("heavy day"));
    assert_eq!(fetched.exercise_name, "Bench Press");
    assert_eq!(fetched.records, Some(Vec::new()));

    cleanup(&ctx, &[exercise.id, workout_id, created.id]).await;
}

#[tokio::test]
#[serial]
async fn test_bench_press_scenario() {
    let ctx = create_context().await;
    let sessions = ExerciseSessionRepository::from_ref(&ctx);
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let (exercise, workout_id, session) = seed_session(&ctx, "heavy day").await;

    // Insert out of timestamp order; reads must still come back ascending.
    let r2 = records
        .add(&record(200.0, "2", 82.5), session.id)
        .await
        .expect("add r2 failed");
    let r1 = records
        .add(&record(100.0, "1", 80.0), session.id)
        .await
        .expect("add r1 failed");

    let fetched = sessions
        .get(session.id)
        .await
        .expect("get failed")
        .expect("session should exist");
    assert_eq!(fetched.exercise_name, "Bench Press");
    assert_eq!(fetched.note.as_deref(), Some("heavy day"));

    let fetched_records = fetched.records.expect("records should be loaded");
    assert_eq!(fetched_records.len(), 2);
    assert_eq!(fetched_records[0].id, r1.id);
    assert_eq!(fetched_records[1].id, r2.id);
    assert_eq!(fetched_records[0].value, 80.0);
    assert_eq!(fetched_records[1].value, 82.5);

    cleanup(&ctx, &[exercise.id, workout_id, session.id, r1.id, r2.id]).await;
}

#[tokio::test]
#[serial]
async fn test_record_round_trip() {
    let ctx = create_context().await;
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let (exercise, workout_id, session) = seed_session(&ctx, "volume").await;

    let input = ExerciseRecord {
        id: Uuid::new_v4(),
        epoch_timestamp: 1700000000.25,
        set: "3".to_string(),
        reps: 8,
        value: 60.0,
        unit: Some("kg".to_string()),
        drop_set: true,
        note: Some("slow eccentric".to_string()),
    };

    let created = records.add(&input, session.id).await.expect("add failed");
    assert_eq!(created, input);

    let fetched = records
        .get(input.id)
        .await
        .expect("get failed")
        .expect("record should exist");
    assert_eq!(fetched, input);

    cleanup(&ctx, &[exercise.id, workout_id, session.id, input.id]).await;
}

#[tokio::test]
#[serial]
async fn test_add_record_under_missing_session_fails() {
    let ctx = create_context().await;
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let result = records.add(&record(100.0, "1", 80.0), Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::ParentNotFound { .. })));
}

#[tokio::test]
#[serial]
async fn test_add_session_under_missing_parents_fails() {
    let ctx = create_context().await;
    let sessions = ExerciseSessionRepository::from_ref(&ctx);

    let result = sessions
        .add(&ExerciseSession::new(None), Uuid::new_v4(), Uuid::new_v4())
        .await;
    assert!(matches!(result, Err(AppError::ParentNotFound { .. })));
}

#[tokio::test]
#[serial]
async fn test_update_missing_record_does_not_create() {
    let ctx = create_context().await;
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let missing = record(100.0, "1", 80.0);
    let result = records.update(&missing).await;
    assert!(matches!(result, Err(AppError::RecordNotFound(_))));

    // The failed update must not have created the record.
    assert!(records.get(missing.id).await.expect("get failed").is_none());
}

#[tokio::test]
#[serial]
async fn test_update_record_overwrites_all_fields() {
    let ctx = create_context().await;
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let (exercise, workout_id, session) = seed_session(&ctx, "update").await;
    let created = records
        .add(&record(100.0, "1", 80.0), session.id)
        .await
        .expect("add failed");

    let mut changed = created.clone();
    changed.reps = 3;
    changed.value = 90.0;
    changed.unit = Some("kg".to_string());
    changed.drop_set = true;

    let updated = records.update(&changed).await.expect("update failed");
    assert_eq!(updated, changed);

    cleanup(&ctx, &[exercise.id, workout_id, session.id, created.id]).await;
}

#[tokio::test]
#[serial]
async fn test_remove_record_with_mismatched_session_is_noop() {
    let ctx = create_context().await;
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let (exercise, workout_id, session) = seed_session(&ctx, "noop").await;
    let created = records
        .add(&record(100.0, "1", 80.0), session.id)
        .await
        .expect("add failed");

    records
        .remove(created.id, Uuid::new_v4())
        .await
        .expect("remove should not fault");

    // Still there: the record was not connected to the given session.
    assert!(records.get(created.id).await.expect("get failed").is_some());

    cleanup(&ctx, &[exercise.id, workout_id, session.id, created.id]).await;
}

#[tokio::test]
#[serial]
async fn test_remove_record_deletes_only_that_record() {
    let ctx = create_context().await;
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let (exercise, workout_id, session) = seed_session(&ctx, "single").await;
    let keep = records
        .add(&record(100.0, "1", 80.0), session.id)
        .await
        .expect("add failed");
    let gone = records
        .add(&record(200.0, "2", 82.5), session.id)
        .await
        .expect("add failed");

    records
        .remove(gone.id, session.id)
        .await
        .expect("remove failed");

    assert!(records.get(gone.id).await.expect("get failed").is_none());
    assert!(records.get(keep.id).await.expect("get failed").is_some());

    cleanup(&ctx, &[exercise.id, workout_id, session.id, keep.id]).await;
}

#[tokio::test]
#[serial]
async fn test_remove_session_cascades_to_records() {
    let ctx = create_context().await;
    let sessions = ExerciseSessionRepository::from_ref(&ctx);
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let (exercise, workout_id, session) = seed_session(&ctx, "cascade").await;
    let r1 = records
        .add(&record(100.0, "1", 80.0), session.id)
        .await
        .expect("add failed");
    let r2 = records
        .add(&record(200.0, "2", 82.5), session.id)
        .await
        .expect("add failed");

    sessions.remove(session.id).await.expect("remove failed");

    assert!(sessions.get(session.id).await.expect("get failed").is_none());
    assert!(records.get(r1.id).await.expect("get failed").is_none());
    assert!(records.get(r2.id).await.expect("get failed").is_none());

    cleanup(&ctx, &[exercise.id, workout_id]).await;
}

#[tokio::test]
#[serial]
async fn test_remove_session_without_records() {
    let ctx = create_context().await;
    let sessions = ExerciseSessionRepository::from_ref(&ctx);

    let (exercise, workout_id, session) = seed_session(&ctx, "empty").await;

    sessions.remove(session.id).await.expect("remove failed");
    assert!(sessions.get(session.id).await.expect("get failed").is_none());

    cleanup(&ctx, &[exercise.id, workout_id]).await;
}

#[tokio::test]
#[serial]
async fn test_by_workout_session_groups_interleaved_timestamps() {
    let ctx = create_context().await;
    let exercises = ExerciseRepository::from_ref(&ctx);
    let sessions = ExerciseSessionRepository::from_ref(&ctx);
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let bench = exercises
        .add(&Exercise::new("Bench Press".to_string(), None))
        .await
        .expect("add exercise failed");
    let squat = exercises
        .add(&Exercise::new("Squat".to_string(), None))
        .await
        .expect("add exercise failed");
    let workout_id = create_workout_session(&ctx).await;

    let s1 = sessions
        .add(&ExerciseSession::new(None), bench.id, workout_id)
        .await
        .expect("add session failed");
    let s2 = sessions
        .add(&ExerciseSession::new(None), squat.id, workout_id)
        .await
        .expect("add session failed");

    // Timestamps interleave across the two sessions.
    let r1 = records.add(&record(100.0, "1", 80.0), s1.id).await.unwrap();
    let r2 = records.add(&record(200.0, "1", 120.0), s2.id).await.unwrap();
    let r3 = records.add(&record(300.0, "2", 82.5), s1.id).await.unwrap();

    let all = sessions
        .by_workout_session(workout_id)
        .await
        .expect("by_workout_session failed");
    assert_eq!(all.len(), 2);

    let fetched_s1 = all.iter().find(|s| s.id == s1.id).expect("s1 missing");
    let fetched_s2 = all.iter().find(|s| s.id == s2.id).expect("s2 missing");

    let s1_records = fetched_s1.records.as_ref().expect("records not loaded");
    assert_eq!(s1_records.len(), 2);
    assert_eq!(s1_records[0].id, r1.id);
    assert_eq!(s1_records[1].id, r3.id);

    let s2_records = fetched_s2.records.as_ref().expect("records not loaded");
    assert_eq!(s2_records.len(), 1);
    assert_eq!(s2_records[0].id, r2.id);

    cleanup(
        &ctx,
        &[
            bench.id, squat.id, workout_id, s1.id, s2.id, r1.id, r2.id, r3.id,
        ],
    )
    .await;
}

#[tokio::test]
#[serial]
async fn test_session_update_changes_note_only() {
    let ctx = create_context().await;
    let sessions = ExerciseSessionRepository::from_ref(&ctx);
    let records = ExerciseRecordRepository::from_ref(&ctx);

    let (exercise, workout_id, session) = seed_session(&ctx, "before").await;
    let r1 = records
        .add(&record(100.0, "1", 80.0), session.id)
        .await
        .expect("add failed");

    let mut changed = session.clone();
    changed.note = Some("after".to_string());
    let updated = sessions.update(&changed).await.expect("update failed");
    assert_eq!(updated.note.as_deref(), Some("after"));
    assert_eq!(updated.exercise_name, "Bench Press");
    assert!(updated.records.is_none());

    // Records survive a note update.
    let fetched = sessions
        .get(session.id)
        .await
        .expect("get failed")
        .expect("session should exist");
    assert_eq!(fetched.records.as_ref().map(Vec::len), Some(1));

    cleanup(&ctx, &[exercise.id, workout_id, session.id, r1.id]).await;
}

#[tokio::test]
#[serial]
async fn test_exercise_catalog_crud() {
    let ctx = create_context().await;
    let exercises = ExerciseRepository::from_ref(&ctx);

    let created = exercises
        .add(&Exercise::new(
            "Deadlift".to_string(),
            Some("conventional".to_string()),
        ))
        .await
        .expect("add failed");

    let fetched = exercises
        .get(created.id)
        .await
        .expect("get failed")
        .expect("exercise should exist");
    assert_eq!(fetched, created);

    let mut changed = created.clone();
    changed.note = Some("sumo".to_string());
    let updated = exercises.update(&changed).await.expect("update failed");
    assert_eq!(updated.note.as_deref(), Some("sumo"));

    cleanup(&ctx, &[created.id]).await;
}
