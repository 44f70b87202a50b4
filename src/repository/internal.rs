use std::cmp::Reverse;
use async_trait::async_trait;
use log::{debug, info, trace};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::data::{NewNote, Note, NoteDate, NoteUpdate};
use crate::lib_constants::MAX_ID_GENERATION_ATTEMPTS;
use crate::repository::errors::RepositoryError;
use crate::rng::{IdGenerator, RandomIdGenerator};
use crate::storage::{JsonNoteStore, NoteStore};

#[cfg(test)] mod tests;

#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Note>, RepositoryError>;

    async fn create(&self, new_note: NewNote) -> Result<Note, RepositoryError>;

    /// Zero or one notes, never an error for an unknown id.
    async fn find_by_id(&self, id: Uuid) -> Result<Vec<Note>, RepositoryError>;

    /// Fails with [`RepositoryError::NotFound`] without touching the store
    /// when there's no note with this id.
    async fn replace_by_id(
        &self,
        id: Uuid,
        update: NoteUpdate,
    ) -> Result<Note, RepositoryError>;

    async fn filter_by_date_after(
        &self,
        threshold: &NoteDate,
    ) -> Result<Vec<Note>, RepositoryError>;

    async fn top_n_by_recency(&self, n: usize) -> Result<Vec<Note>, RepositoryError>;
}

pub type ProductionNoteRepository = NoteRepositoryImpl<JsonNoteStore, RandomIdGenerator>;

impl ProductionNoteRepository {
    pub fn new(store: JsonNoteStore) -> Self {
        NoteRepositoryImpl::with_id_generator(store, RandomIdGenerator)
    }
}

pub struct NoteRepositoryImpl<S: NoteStore, G: IdGenerator> {
    store: S,
    id_generator: G,

    // held across every load-modify-save cycle
    write_lock: Mutex<()>,
}

impl<S: NoteStore, G: IdGenerator> NoteRepositoryImpl<S, G> {
    pub fn with_id_generator(store: S, id_generator: G) -> Self {
        NoteRepositoryImpl {
            store,
            id_generator,
            write_lock: Mutex::new(()),
        }
    }

    fn generate_unused_id(&self, notes: &[Note]) -> Result<Uuid, RepositoryError> {
        for _ in 0..MAX_ID_GENERATION_ATTEMPTS {
            let id = self.id_generator.generate_id();
            if notes.iter().all(|note| note.id != id) {
                return Ok(id);
            }
            debug!("generated note id {id} is already taken, retrying");
        }
        Err(RepositoryError::IdCollision)
    }
}

#[async_trait]
impl<S: NoteStore, G: IdGenerator> NoteRepository for NoteRepositoryImpl<S, G> {
    async fn list_all(&self) -> Result<Vec<Note>, RepositoryError> {
        debug!("listing all notes");
        Ok(self.store.load().await?)
    }

    async fn create(&self, new_note: NewNote) -> Result<Note, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.store.load().await?;
        let id = self.generate_unused_id(&notes)?;
        info!(
            "creating note {id} for user \"{}\" dated {}",
            new_note.user,
            new_note.date,
        );
        let note = Note::from_new(id, new_note);
        notes.push(note.clone());
        self.store.save(&notes).await?;
        Ok(note)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Vec<Note>, RepositoryError> {
        debug!("looking up note {id}");
        Ok(find_by_id(self.store.load().await?, id))
    }

    async fn replace_by_id(
        &self,
        id: Uuid,
        update: NoteUpdate,
    ) -> Result<Note, RepositoryError> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.store.load().await?;
        let note = notes.iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| {
                debug!("note {id} doesn't exist, nothing to update");
                RepositoryError::NotFound
            })?;
        info!("updating note {id}");
        note.apply_update(update);
        let updated = note.clone();
        self.store.save(&notes).await?;
        Ok(updated)
    }

    async fn filter_by_date_after(
        &self,
        threshold: &NoteDate,
    ) -> Result<Vec<Note>, RepositoryError> {
        debug!("filtering notes dated after {threshold}");
        Ok(filter_by_date_after(self.store.load().await?, threshold))
    }

    async fn top_n_by_recency(&self, n: usize) -> Result<Vec<Note>, RepositoryError> {
        debug!("taking {n} most recent notes");
        Ok(top_n_by_recency(self.store.load().await?, n))
    }
}

fn find_by_id(notes: Vec<Note>, id: Uuid) -> Vec<Note> {
    notes.into_iter()
        .filter(|note| note.id == id)
        .take(1)
        .collect()
}

fn filter_by_date_after(notes: Vec<Note>, threshold: &NoteDate) -> Vec<Note> {
    let filtered: Vec<_> = notes.into_iter()
        .filter(|note| note.date.is_after(threshold))
        .collect();
    trace!("{} notes dated after {threshold}", filtered.len());
    filtered
}

fn top_n_by_recency(mut notes: Vec<Note>, n: usize) -> Vec<Note> {
    // stable: equal dates keep their stored order
    notes.sort_by_key(|note| Reverse(note.date.instant()));
    notes.truncate(n);
    notes
}
