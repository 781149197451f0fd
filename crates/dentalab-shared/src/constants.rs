//! Application-wide constants

pub const API_PREFIX: &str = "/api/v1";
pub const MAX_NAME_LENGTH: usize = 200;
pub const LABORATORY_ID_QUERY: &str = "laboratory_id";
pub const DEFAULT_TOKEN_LEEWAY_SECS: u64 = 60;
pub const DEFAULT_PORT: u16 = 8080;
