//! Topic classification
//!
//! Raw topic URLs may carry the reserved `/arena/` prefix. Arena topics are
//! stored under the remainder of the URL and mirrored to the host process.

use crate::utils::error::RegistryError;

pub const ARENA_PREFIX: &str = "/arena/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified<'a> {
    /// Canonical storage key, never empty.
    pub key: &'a str,
    pub arena: bool,
}

/// Strips the arena prefix and rejects URLs whose canonical key is empty.
pub fn classify(raw: &str) -> Result<Classified<'_>, RegistryError> {
    let (key, arena) = match raw.strip_prefix(ARENA_PREFIX) {
        Some(rest) => (rest, true),
        None => (raw, false),
    };

    if key.is_empty() {
        return Err(RegistryError::InvalidTopic(raw.to_string()));
    }

    Ok(Classified { key, arena })
}
