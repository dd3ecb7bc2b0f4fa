use futures::{
    stream,
    StreamExt,
    TryStreamExt,
};

use super::reconcile::SyncPlan;
use crate::{
    anki::{
        types::{
            FieldUpdate,
            NewNote,
        },
        AnkiClient,
    },
    core::SyncError,
};

pub const BATCH_SIZE: usize = 100;
pub const UPDATE_CONCURRENCY: usize = 10;

/// The mutating surface of the note store, seamed out so the executor can be
/// driven against a recording double in tests.
#[allow(async_fn_in_trait)]
pub trait NoteStore {
    async fn add_notes(&self, notes: &[NewNote]) -> Result<(), SyncError>;
    async fn update_note_fields(&self, update: &FieldUpdate) -> Result<(), SyncError>;
    async fn delete_notes(&self, note_ids: &[u64]) -> Result<(), SyncError>;
}

impl NoteStore for AnkiClient {
    async fn add_notes(&self, notes: &[NewNote]) -> Result<(), SyncError> {
        AnkiClient::add_notes(self, notes).await
    }

    async fn update_note_fields(&self, update: &FieldUpdate) -> Result<(), SyncError> {
        AnkiClient::update_note_fields(self, update).await
    }

    async fn delete_notes(&self, note_ids: &[u64]) -> Result<(), SyncError> {
        AnkiClient::delete_notes(self, note_ids).await
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct SyncSummary {
    pub added: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// Applies the plan in add -> update -> delete order. Each phase fails
/// independently: a phase error aborts the run, phases that already completed
/// have taken effect remotely and are not rolled back, later phases do not
/// start. Prints the per-phase summary line after each successful phase.
pub async fn execute_plan<S: NoteStore>(
    store: &S,
    plan: &SyncPlan,
) -> Result<SyncSummary, SyncError> {
    add_phase(store, &plan.to_add).await.map_err(|e| phase_error("AddNotes", e))?;
    println!("{} notes added", plan.to_add.len());

    update_phase(store, &plan.to_update).await.map_err(|e| phase_error("UpdateNotes", e))?;
    println!("{} notes updated", plan.to_update.len());

    delete_phase(store, &plan.to_delete).await.map_err(|e| phase_error("DeleteNotes", e))?;
    println!("{} notes deleted", plan.to_delete.len());

    Ok(SyncSummary {
        added: plan.to_add.len(),
        updated: plan.to_update.len(),
        deleted: plan.to_delete.len(),
    })
}

/// One `addNotes` call per group, groups strictly sequential.
async fn add_phase<S: NoteStore>(store: &S, to_add: &[NewNote]) -> Result<(), SyncError> {
    for batch in to_add.chunks(BATCH_SIZE) {
        store.add_notes(batch).await?;
    }
    Ok(())
}

/// One `updateNoteFields` call per note with bounded fan-out inside each
/// group; a group fully drains before the next one starts. Updates target
/// disjoint note ids, so completion order within a group does not matter.
async fn update_phase<S: NoteStore>(store: &S, to_update: &[FieldUpdate]) -> Result<(), SyncError> {
    for batch in to_update.chunks(BATCH_SIZE) {
        stream::iter(batch.iter().map(|update| store.update_note_fields(update)))
            .buffer_unordered(UPDATE_CONCURRENCY)
            .try_collect::<Vec<()>>()
            .await?;
    }
    Ok(())
}

/// One `deleteNotes` call per group of ids, sequential.
async fn delete_phase<S: NoteStore>(store: &S, to_delete: &[u64]) -> Result<(), SyncError> {
    for batch in to_delete.chunks(BATCH_SIZE) {
        store.delete_notes(batch).await?;
    }
    Ok(())
}

fn phase_error(phase: &'static str, source: SyncError) -> SyncError {
    SyncError::Phase { phase, source: Box::new(source) }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{
                AtomicUsize,
                Ordering,
            },
            Mutex,
        },
    };

    use super::*;
    use crate::anki::{
        template,
        types::NoteFields,
    };

    fn add_entry(db_id: &str) -> NewNote {
        NewNote {
            deck_name: template::DECK_NAME.to_string(),
            model_name: template::MODEL_NAME.to_string(),
            fields: NoteFields {
                sentence: String::new(),
                translation: String::new(),
                note: String::new(),
                db_id: db_id.to_string(),
                ipa: String::new(),
                audio: String::new(),
            },
            audio: None,
        }
    }

    fn update_entry(id: u64) -> FieldUpdate {
        FieldUpdate { id, fields: HashMap::new() }
    }

    fn plan(adds: usize, updates: usize, deletes: usize) -> SyncPlan {
        SyncPlan {
            to_add: (0..adds).map(|i| add_entry(&i.to_string())).collect(),
            to_update: (0..updates).map(|i| update_entry(i as u64)).collect(),
            to_delete: (0..deletes).map(|i| i as u64).collect(),
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<String>>,
        add_batch_sizes: Mutex<Vec<usize>>,
        delete_batch_sizes: Mutex<Vec<usize>>,
        updates_in_flight: AtomicUsize,
        max_updates_in_flight: AtomicUsize,
        fail_phase: Option<&'static str>,
    }

    impl RecordingStore {
        fn failing(phase: &'static str) -> Self {
            Self { fail_phase: Some(phase), ..Self::default() }
        }

        fn check_failure(&self, phase: &str) -> Result<(), SyncError> {
            if self.fail_phase == Some(phase) {
                return Err(SyncError::Gateway("boom".to_string()));
            }
            Ok(())
        }
    }

    impl NoteStore for RecordingStore {
        async fn add_notes(&self, notes: &[NewNote]) -> Result<(), SyncError> {
            self.calls.lock().unwrap().push("addNotes".to_string());
            self.add_batch_sizes.lock().unwrap().push(notes.len());
            self.check_failure("addNotes")
        }

        async fn update_note_fields(&self, _update: &FieldUpdate) -> Result<(), SyncError> {
            let in_flight = self.updates_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_updates_in_flight.fetch_max(in_flight, Ordering::SeqCst);
            self.calls.lock().unwrap().push("updateNoteFields".to_string());

            // Suspend so the fan-out actually overlaps requests.
            tokio::task::yield_now().await;

            self.updates_in_flight.fetch_sub(1, Ordering::SeqCst);
            self.check_failure("updateNoteFields")
        }

        async fn delete_notes(&self, note_ids: &[u64]) -> Result<(), SyncError> {
            self.calls.lock().unwrap().push("deleteNotes".to_string());
            self.delete_batch_sizes.lock().unwrap().push(note_ids.len());
            self.check_failure("deleteNotes")
        }
    }

    #[tokio::test]
    async fn adds_are_chunked_into_sequential_batches() {
        let store = RecordingStore::default();

        let summary = execute_plan(&store, &plan(250, 0, 0)).await.unwrap();

        assert_eq!(summary, SyncSummary { added: 250, updated: 0, deleted: 0 });
        assert_eq!(*store.add_batch_sizes.lock().unwrap(), vec![100, 100, 50]);
    }

    #[tokio::test]
    async fn deletes_are_chunked_into_sequential_batches() {
        let store = RecordingStore::default();

        execute_plan(&store, &plan(0, 0, 101)).await.unwrap();

        assert_eq!(*store.delete_batch_sizes.lock().unwrap(), vec![100, 1]);
    }

    #[tokio::test]
    async fn updates_fan_out_up_to_the_concurrency_bound() {
        let store = RecordingStore::default();

        execute_plan(&store, &plan(0, 150, 0)).await.unwrap();

        assert_eq!(store.calls.lock().unwrap().len(), 150);
        assert_eq!(store.max_updates_in_flight.load(Ordering::SeqCst), UPDATE_CONCURRENCY);
    }

    #[tokio::test]
    async fn small_update_groups_stay_below_the_bound() {
        let store = RecordingStore::default();

        execute_plan(&store, &plan(0, 3, 0)).await.unwrap();

        assert!(store.max_updates_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn phases_run_in_add_update_delete_order() {
        let store = RecordingStore::default();

        execute_plan(&store, &plan(1, 1, 1)).await.unwrap();

        let calls = store.calls.lock().unwrap();
        assert_eq!(*calls, vec!["addNotes", "updateNoteFields", "deleteNotes"]);
    }

    #[tokio::test]
    async fn empty_plan_issues_no_calls() {
        let store = RecordingStore::default();

        let summary = execute_plan(&store, &SyncPlan::default()).await.unwrap();

        assert_eq!(summary, SyncSummary::default());
        assert!(store.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_failure_stops_the_run_before_later_phases() {
        let store = RecordingStore::failing("addNotes");

        let err = execute_plan(&store, &plan(1, 5, 5)).await.unwrap_err();

        match err {
            SyncError::Phase { phase, .. } => assert_eq!(phase, "AddNotes"),
            other => panic!("expected phase error, got {other:?}"),
        }
        let calls = store.calls.lock().unwrap();
        assert_eq!(*calls, vec!["addNotes"]);
    }

    #[tokio::test]
    async fn update_failure_does_not_reach_the_delete_phase() {
        let store = RecordingStore::failing("updateNoteFields");

        let err = execute_plan(&store, &plan(1, 1, 5)).await.unwrap_err();

        match err {
            SyncError::Phase { phase, .. } => assert_eq!(phase, "UpdateNotes"),
            other => panic!("expected phase error, got {other:?}"),
        }
        let calls = store.calls.lock().unwrap();
        assert_eq!(*calls, vec!["addNotes", "updateNoteFields"]);
    }

    #[tokio::test]
    async fn delete_failure_reports_its_phase() {
        let store = RecordingStore::failing("deleteNotes");

        let err = execute_plan(&store, &plan(0, 0, 1)).await.unwrap_err();

        match err {
            SyncError::Phase { phase, source } => {
                assert_eq!(phase, "DeleteNotes");
                assert_eq!(
                    source.to_string(),
                    "AnkiConnect request failed: boom"
                );
            }
            other => panic!("expected phase error, got {other:?}"),
        }
    }
}
