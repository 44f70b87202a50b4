pub const TMP_FILENAME_INFIX: &str = ".tmp.";

pub const HYPHENED_UUID_SIZE: usize = 36;

// retries before giving up on an id collision
pub const MAX_ID_GENERATION_ATTEMPTS: usize = 8;
