//! Persistence error types.
//!
//! Loaders log these and fall back to defaults; nothing here ever reaches
//! the simulation.

use std::fmt;

/// Errors raised while reading or writing saved data
#[derive(Debug)]
pub enum PersistError {
    /// The backing store rejected the operation or is unavailable.
    Storage {
        /// Key being accessed.
        key: String,
        /// Store-specific description.
        reason: String,
    },

    /// JSON encoding or decoding failed.
    Serialize(serde_json::Error),

    /// The stored value parsed but is not a valid envelope.
    Corrupt {
        /// Key holding the bad value.
        key: String,
    },

    /// The envelope was written by a newer format version.
    UnsupportedVersion {
        /// Version found in the envelope.
        found: u32,
        /// Highest version this build understands.
        supported: u32,
    },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Storage { key, reason } => {
                write!(f, "storage error for '{}': {}", key, reason)
            }
            PersistError::Serialize(e) => write!(f, "serialization failed: {}", e),
            PersistError::Corrupt { key } => write!(f, "saved data under '{}' is corrupt", key),
            PersistError::UnsupportedVersion { found, supported } => write!(
                f,
                "save format version {} is newer than supported version {}",
                found, supported
            ),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Serialize(e)
    }
}
