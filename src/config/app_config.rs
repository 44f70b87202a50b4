use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::bin_constants::{DEFAULT_DATA_FILE, DEFAULT_MAX_STORE_SIZE};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub max_store_size: u64,

    /// Bearer tokens allowed to call the guarded endpoints.
    pub auth_tokens: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            max_store_size: DEFAULT_MAX_STORE_SIZE,
            auth_tokens: Vec::new(),
        }
    }
}
