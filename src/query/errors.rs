use thiserror::Error;
use crate::data::NoteDateParseError;
use crate::repository::RepositoryError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing field \"{0}\"")]
    MissingField(&'static str),

    #[error("field \"{0}\" must not be blank")]
    BlankField(&'static str),

    #[error(transparent)]
    InvalidDate(#[from] NoteDateParseError),

    #[error("\"{0}\" is not a valid note id")]
    InvalidId(String),

    #[error("\"{0}\" is not a non-negative integer")]
    InvalidLimit(String),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("note does not exist")]
    NotFound,

    #[error("could not generate an unused note id")]
    IdCollision,

    #[error("note store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl From<RepositoryError> for QueryError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => QueryError::NotFound,
            RepositoryError::IdCollision => QueryError::IdCollision,
            RepositoryError::Store(e) => QueryError::StoreUnavailable(e),
        }
    }
}
