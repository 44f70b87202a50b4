use thiserror::Error;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("note not found")]
    NotFound,

    #[error("could not generate an unused note id")]
    IdCollision,

    #[error(transparent)]
    Store(#[from] StoreError),
}
