//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Backup rotation (old save → backup)
//! - Corruption detection and recovery from the backup

mod error;

pub use error::PersistError;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::platform::storage::KeyValueStore;

/// Current envelope format version
pub const FORMAT_VERSION: u32 = 1;

/// Wrapper written around every saved payload
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    payload: T,
}

fn backup_key(key: &str) -> String {
    format!("{}.bak", key)
}

/// Write `value` under `key`, keeping the previous save as a backup
pub fn save<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistError> {
    let json = serde_json::to_string(&Envelope {
        version: FORMAT_VERSION,
        payload: value,
    })?;

    if let Some(previous) = store.get(key)? {
        store.set(&backup_key(key), &previous)?;
    }
    store.set(key, &json)?;
    Ok(())
}

fn decode<T: DeserializeOwned>(key: &str, json: &str) -> Result<T, PersistError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let version = value
        .get("version")
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| PersistError::Corrupt {
            key: key.to_string(),
        })?;
    if version > FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }
    let envelope: Envelope<T> = serde_json::from_value(value)?;
    Ok(envelope.payload)
}

/// Read the value under `key`, recovering from the backup if the main save is bad
///
/// Returns `Ok(None)` when nothing has been saved yet.
pub fn load<T: DeserializeOwned>(
    store: &impl KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistError> {
    let primary = match store.get(key)? {
        Some(json) => decode(key, &json),
        None => return Ok(None),
    };

    match primary {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("Save '{}' unreadable ({}), trying backup", key, e);
            let backup = backup_key(key);
            match store.get(&backup)? {
                Some(json) => decode(&backup, &json).map(Some),
                None => Err(e),
            }
        }
    }
}

/// Load a value or fall back to its default, logging why
pub fn load_or_default<T: DeserializeOwned + Default>(store: &impl KeyValueStore, key: &str) -> T {
    match load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => {
            log::info!("No saved '{}', starting fresh", key);
            T::default()
        }
        Err(e) => {
            log::warn!("Could not load '{}': {}", key, e);
            T::default()
        }
    }
}
