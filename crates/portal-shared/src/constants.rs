//! Application-wide constants

/// Storage folder holding a client's identity documents (passport, ID card).
pub const IDENTITY_DOCUMENTS_PREFIX: &str = "documents";
/// Storage folder holding a client's general workspace documents.
pub const CLIENT_DOCUMENTS_PREFIX: &str = "documents/clients";

pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;
pub const RESET_TOKEN_TTL_SECONDS: i64 = 3600;
pub const DEFAULT_SIGNED_URL_TTL: u64 = 900;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
