pub const API_PREFIX: &str = "/api";
pub const BEARER_PREFIX: &str = "Bearer ";
