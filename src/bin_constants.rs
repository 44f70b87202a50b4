pub const DEFAULT_CONFIG_FILE: &str = "/etc/notesd/notesd.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "NOTESD_";

pub const DEFAULT_DATA_FILE: &str = "/var/notesd/notes.json";

pub const DEFAULT_MAX_STORE_SIZE: u64 = 16 * 1024 * 1024;
