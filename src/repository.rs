mod errors;
mod internal;

pub use errors::RepositoryError;
pub use internal::{NoteRepository, NoteRepositoryImpl, ProductionNoteRepository};
