use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use tokio::io;
use uuid::Uuid;
use crate::data::Note;
use crate::rng::IdGenerator;
use crate::storage::{NoteStore, StoreError};

/// Collection kept in memory. Every `load` yields to the scheduler before
/// returning, so concurrent read-modify-write cycles interleave unless
/// something serializes them.
#[derive(Clone, Default)]
pub struct MemoryNoteStore {
    notes: Arc<Mutex<Vec<Note>>>,
    saves: Arc<AtomicUsize>,
    pub fail_load: Arc<AtomicBool>,
    pub fail_save: Arc<AtomicBool>,
}

impl MemoryNoteStore {
    pub fn new(notes: Vec<Note>) -> Self {
        MemoryNoteStore {
            notes: Arc::new(Mutex::new(notes)),
            ..Default::default()
        }
    }

    pub fn notes(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        if self.fail_load.load(Ordering::Relaxed) {
            return Err(io::Error::other("injected load fault").into());
        }
        let notes = self.notes();
        tokio::task::yield_now().await;
        Ok(notes)
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        if self.fail_save.load(Ordering::Relaxed) {
            return Err(io::Error::other("injected save fault").into());
        }
        self.saves.fetch_add(1, Ordering::Relaxed);
        *self.notes.lock().unwrap() = notes.to_vec();
        Ok(())
    }
}

/// Hands out the queued ids first, then `1, 2, 3, ...` as u128 uuids.
#[derive(Default)]
pub struct SequentialIdGenerator {
    queued: Mutex<VecDeque<Uuid>>,
    next: AtomicUsize,
}

impl SequentialIdGenerator {
    pub fn with_queued(ids: impl IntoIterator<Item=Uuid>) -> Self {
        SequentialIdGenerator {
            queued: Mutex::new(ids.into_iter().collect()),
            next: AtomicUsize::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> Uuid {
        self.queued.lock().unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                let next = self.next.fetch_add(1, Ordering::Relaxed) + 1;
                Uuid::from_u128(next as u128)
            })
    }
}

pub struct ConstantIdGenerator(pub Uuid);

impl IdGenerator for ConstantIdGenerator {
    fn generate_id(&self) -> Uuid {
        self.0
    }
}
