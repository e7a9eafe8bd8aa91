//! In-memory note collection with write-through persistence.
//!
//! The store owns the ordered collection and is the only place it is
//! mutated. Every create, update and delete saves the whole collection.
//! Save failures are logged and the in-memory change is kept.

use std::fmt::Write as _;

use chrono::{Local, Utc};

use crate::domain::{seed_notes, Note, NoteInput, NoteUpdate, NotesConfig};
use crate::infrastructure::NotePersistence;

/// Why the store started from seed data instead of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    /// Nothing has been persisted yet.
    Missing,
    /// A snapshot exists but could not be read or decoded.
    Unreadable,
}

/// Where the current collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// `initialize` has not run.
    Pending,
    /// Restored from the persisted snapshot.
    Snapshot,
    /// Fell back to the built-in seed notes.
    Seed(SeedReason),
}

/// What to do when no usable snapshot exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationPolicy {
    /// Start from the built-in seed notes.
    UseSeed,
}

impl HydrationPolicy {
    fn fallback(self) -> Vec<Note> {
        match self {
            Self::UseSeed => seed_notes(),
        }
    }
}

/// Policy applied when hydration finds nothing or fails.
pub const ON_HYDRATION_ERROR: HydrationPolicy = HydrationPolicy::UseSeed;

/// Single owner of the note collection.
pub struct NoteStore<P> {
    notes: Vec<Note>,
    persistence: P,
    settings: NotesConfig,
    source: HydrationSource,
    last_id: u64,
}

impl<P: NotePersistence> NoteStore<P> {
    /// Create a store holding the seed notes. Call [`Self::initialize`]
    /// before mutating; changes made earlier are not persisted.
    pub fn new(persistence: P, settings: NotesConfig) -> Self {
        Self {
            notes: seed_notes(),
            persistence,
            settings,
            source: HydrationSource::Pending,
            last_id: 0,
        }
    }

    /// Load the persisted snapshot, falling back to seed data.
    ///
    /// Never fails: read and decode errors are logged and the fallback
    /// policy applies.
    pub async fn initialize(&mut self) -> &[Note] {
        match self.persistence.load().await {
            Ok(Some(notes)) => {
                tracing::info!(count = notes.len(), "Restored notes from storage");
                self.notes = notes;
                self.source = HydrationSource::Snapshot;
            }
            Ok(None) => {
                tracing::info!("No stored notes, using seed data");
                self.notes = ON_HYDRATION_ERROR.fallback();
                self.source = HydrationSource::Seed(SeedReason::Missing);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load notes, using seed data");
                self.notes = ON_HYDRATION_ERROR.fallback();
                self.source = HydrationSource::Seed(SeedReason::Unreadable);
            }
        }

        &self.notes
    }

    /// Create a note and put it first in the collection.
    pub async fn create(&mut self, input: NoteInput) -> Note {
        let note = Note {
            id: self.next_id(),
            title: input.title,
            content: input.content,
            date: self.today(),
            color: input
                .color
                .unwrap_or_else(|| self.settings.default_color.clone()),
        };

        tracing::debug!(id = %note.id, "Created note");
        self.notes.insert(0, note.clone());
        self.persist().await;

        note
    }

    /// Replace title and content of the note with `id` and refresh its date.
    /// Unknown ids are ignored.
    pub async fn update(&mut self, id: &str, input: NoteUpdate) {
        let date = self.today();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            tracing::debug!(id, "Update skipped, note not found");
            return;
        };

        note.title = input.title;
        note.content = input.content;
        note.date = date;

        tracing::debug!(id, "Updated note");
        self.persist().await;
    }

    /// Remove the note with `id`. Unknown ids are ignored.
    pub async fn delete(&mut self, id: &str) {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);

        if self.notes.len() == before {
            tracing::debug!(id, "Delete skipped, note not found");
            return;
        }

        tracing::debug!(id, "Deleted note");
        self.persist().await;
    }

    /// All notes in collection order.
    #[must_use]
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Notes whose title or content contains `query`, ignoring case.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.matches(query)).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    #[must_use]
    pub const fn hydration_source(&self) -> HydrationSource {
        self.source
    }

    #[cfg(test)]
    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    async fn persist(&self) {
        if self.source == HydrationSource::Pending {
            tracing::debug!("Store not initialized, skipping save");
            return;
        }

        if let Err(e) = self.persistence.save(&self.notes).await {
            tracing::error!(error = %e, "Failed to save notes");
        }
    }

    /// Millisecond timestamp id, bumped past the last issued one.
    fn next_id(&mut self) -> String {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        self.last_id = now.max(self.last_id + 1);
        self.last_id.to_string()
    }

    fn today(&self) -> String {
        let now = Local::now();
        let mut out = String::new();
        if write!(out, "{}", now.format(&self.settings.date_format)).is_err() {
            tracing::warn!(format = %self.settings.date_format, "Invalid date format");
            out = now.format("%b %d, %Y").to_string();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::seed::DEFAULT_COLOR;
    use crate::domain::{AppError, Result};
    use crate::infrastructure::{BlobPersistence, BlobStore, MemoryBlobStore};

    /// Persistence double with switchable failures and a save counter.
    #[derive(Default)]
    struct TestPersistence {
        snapshot: Mutex<Option<Vec<Note>>>,
        fail_load: AtomicBool,
        fail_save: AtomicBool,
        saves: AtomicUsize,
    }

    impl TestPersistence {
        fn with_snapshot(notes: Vec<Note>) -> Self {
            Self {
                snapshot: Mutex::new(Some(notes)),
                ..Default::default()
            }
        }

        fn saved(&self) -> Option<Vec<Note>> {
            self.snapshot.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotePersistence for TestPersistence {
        async fn load(&self) -> Result<Option<Vec<Note>>> {
            if self.fail_load.load(Ordering::SeqCst) {
                return Err(AppError::InvalidData {
                    message: "disk on fire".into(),
                });
            }
            Ok(self.saved())
        }

        async fn save(&self, notes: &[Note]) -> Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_save.load(Ordering::SeqCst) {
                return Err(AppError::InvalidData {
                    message: "disk full".into(),
                });
            }
            *self.snapshot.lock().unwrap() = Some(notes.to_vec());
            Ok(())
        }
    }

    fn input(title: &str, content: &str) -> NoteInput {
        NoteInput {
            title: title.into(),
            content: content.into(),
            color: None,
        }
    }

    const DATE_FORMAT: &str = "%b %d, %Y";

    /// Passes if `date` is the local day at `before` or right now, so a
    /// run spanning midnight still matches.
    fn assert_dated_since(date: &str, before: &str, format: &str) {
        let after = Local::now().format(format).to_string();
        assert!(
            date == before || date == after,
            "date {date:?} is neither {before:?} nor {after:?}"
        );
    }

    async fn empty_store() -> NoteStore<TestPersistence> {
        let mut store =
            NoteStore::new(TestPersistence::with_snapshot(Vec::new()), NotesConfig::default());
        store.initialize().await;
        store
    }

    #[tokio::test]
    async fn test_initialize_restores_snapshot() {
        let snapshot = vec![seed_notes().remove(2)];
        let mut store = NoteStore::new(
            TestPersistence::with_snapshot(snapshot.clone()),
            NotesConfig::default(),
        );

        assert_eq!(store.initialize().await, snapshot.as_slice());
        assert_eq!(store.hydration_source(), HydrationSource::Snapshot);
    }

    #[tokio::test]
    async fn test_initialize_missing_uses_seed() {
        let mut store = NoteStore::new(TestPersistence::default(), NotesConfig::default());
        store.initialize().await;

        assert_eq!(store.list(), seed_notes().as_slice());
        assert_eq!(
            store.hydration_source(),
            HydrationSource::Seed(SeedReason::Missing)
        );
    }

    #[tokio::test]
    async fn test_initialize_unreadable_uses_seed() {
        let persistence = TestPersistence::with_snapshot(Vec::new());
        persistence.fail_load.store(true, Ordering::SeqCst);
        let mut store = NoteStore::new(persistence, NotesConfig::default());

        assert_eq!(store.initialize().await.len(), 6);
        assert_eq!(
            store.hydration_source(),
            HydrationSource::Seed(SeedReason::Unreadable)
        );
    }

    #[tokio::test]
    async fn test_initialize_corrupt_blob_uses_seed() {
        let blobs = MemoryBlobStore::with_entry("notes", "not json");
        let mut store = NoteStore::new(BlobPersistence::new(blobs), NotesConfig::default());
        store.initialize().await;

        assert_eq!(store.len(), 6);
        assert_eq!(
            store.hydration_source(),
            HydrationSource::Seed(SeedReason::Unreadable)
        );
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let mut store = empty_store().await;
        let before = Local::now().format(DATE_FORMAT).to_string();
        let note = store.create(input("Groceries", "milk")).await;

        let found = store.find(&note.id).unwrap();
        assert_eq!(found.title, "Groceries");
        assert_eq!(found.content, "milk");
        assert_eq!(found.color, DEFAULT_COLOR);
        assert_dated_since(&found.date, &before, DATE_FORMAT);
    }

    #[tokio::test]
    async fn test_create_uses_given_color() {
        let mut store = empty_store().await;
        let note = store
            .create(NoteInput {
                color: Some("#D1B3FF".into()),
                ..input("t", "")
            })
            .await;
        assert_eq!(note.color, "#D1B3FF");
    }

    #[tokio::test]
    async fn test_create_prepends_with_increasing_ids() {
        let mut store = empty_store().await;
        let mut previous: Option<u64> = None;

        for i in 0..5 {
            let note = store.create(input(&format!("n{i}"), "")).await;
            assert_eq!(store.list()[0], note);

            let id: u64 = note.id.parse().unwrap();
            if let Some(prev) = previous {
                assert!(id > prev);
            }
            previous = Some(id);
        }

        assert_eq!(store.len(), 5);
    }

    #[tokio::test]
    async fn test_every_mutation_persists_whole_collection() {
        let mut store = empty_store().await;
        let a = store.create(input("a", "")).await;
        store.create(input("b", "")).await;
        store
            .update(
                &a.id,
                NoteUpdate {
                    title: "a2".into(),
                    content: "x".into(),
                },
            )
            .await;
        store.delete(&a.id).await;

        let persistence = store.persistence();
        assert_eq!(persistence.saves.load(Ordering::SeqCst), 4);
        assert_eq!(persistence.saved().unwrap(), store.list());
    }

    #[tokio::test]
    async fn test_update_touches_only_target() {
        let mut store = NoteStore::new(TestPersistence::default(), NotesConfig::default());
        store.initialize().await;
        let before = store.list().to_vec();
        let today = Local::now().format(DATE_FORMAT).to_string();

        store
            .update(
                "3",
                NoteUpdate {
                    title: "Fonts".into(),
                    content: "**serif**".into(),
                },
            )
            .await;

        for (old, new) in before.iter().zip(store.list()) {
            if old.id == "3" {
                assert_eq!(new.title, "Fonts");
                assert_eq!(new.content, "**serif**");
                assert_eq!(new.color, old.color);
                assert_dated_since(&new.date, &today, DATE_FORMAT);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_id_is_noop() {
        let mut store = NoteStore::new(TestPersistence::default(), NotesConfig::default());
        store.initialize().await;
        let before = store.list().to_vec();

        for _ in 0..2 {
            store.update("missing", NoteUpdate::default()).await;
            store.delete("missing").await;
        }

        assert_eq!(store.list(), before.as_slice());
        assert_eq!(store.persistence().saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let mut store = NoteStore::new(TestPersistence::default(), NotesConfig::default());
        store.initialize().await;

        store.delete("4").await;
        assert_eq!(store.len(), 5);
        assert!(store.find("4").is_none());

        store.delete("4").await;
        assert_eq!(store.len(), 5);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_memory_state() {
        let mut store = empty_store().await;
        store.persistence().fail_save.store(true, Ordering::SeqCst);

        let note = store.create(input("kept", "")).await;

        assert_eq!(store.find(&note.id).map(|n| n.title.as_str()), Some("kept"));
        assert_eq!(store.persistence().saved().unwrap(), Vec::<Note>::new());
    }

    #[tokio::test]
    async fn test_mutations_before_initialize_not_persisted() {
        let mut store = NoteStore::new(TestPersistence::default(), NotesConfig::default());
        store.create(input("early", "")).await;

        assert_eq!(store.len(), 7);
        assert_eq!(store.persistence().saves.load(Ordering::SeqCst), 0);
        assert_eq!(store.hydration_source(), HydrationSource::Pending);
    }

    #[tokio::test]
    async fn test_round_trip_through_blob_persistence() {
        let mut store =
            NoteStore::new(BlobPersistence::new(MemoryBlobStore::new()), NotesConfig::default());
        store.initialize().await;
        store.create(input("first", "a\nb")).await;
        store.create(input("second", "*x*")).await;
        let expected = store.list().to_vec();

        let blobs = MemoryBlobStore::with_entry(
            "notes",
            &store.persistence().blobs().get("notes").await.unwrap().unwrap(),
        );
        let mut reopened = NoteStore::new(BlobPersistence::new(blobs), NotesConfig::default());
        reopened.initialize().await;

        assert_eq!(reopened.list(), expected.as_slice());
        assert_eq!(reopened.hydration_source(), HydrationSource::Snapshot);
    }

    #[tokio::test]
    async fn test_search() {
        let mut store = NoteStore::new(TestPersistence::default(), NotesConfig::default());
        store.initialize().await;

        let hits: Vec<_> = store.search("DESIGN").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(hits, vec!["3", "4", "6"]);
        assert_eq!(store.search("").len(), 6);
        assert!(store.search("nothing like this").is_empty());
    }

    #[tokio::test]
    async fn test_custom_date_format_and_color() {
        let settings = NotesConfig {
            default_color: "#B6F0F7".into(),
            date_format: "%Y-%m-%d".into(),
        };
        let mut store = NoteStore::new(TestPersistence::default(), settings);
        store.initialize().await;

        let before = Local::now().format("%Y-%m-%d").to_string();
        let note = store.create(input("t", "")).await;
        assert_eq!(note.color, "#B6F0F7");
        assert_dated_since(&note.date, &before, "%Y-%m-%d");
    }
}
