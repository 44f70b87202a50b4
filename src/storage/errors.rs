use thiserror::Error;
use tokio::io::Error as IoError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data directory is not initialized properly")]
    DataDirNotInitialized,

    #[error("data file path has no file name")]
    InvalidDataFile,

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("note file too large")]
    TooBig,

    #[error("cannot parse note file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("cannot serialize notes: {0}")]
    Serialize(#[source] serde_json::Error),
}
