//! API key storage.
//!
//! The key lives in the extension's `localStorage` and is read right before
//! each request, so saving a new key takes effect on the next popup open.
//! Outside the browser nothing is stored and resolution always fails.

use moodlens::KeyResolver;
use moodlens::api::KeyError;

#[cfg(feature = "csr")]
const STORAGE_KEY: &str = "moodlens_api_key";

const MISSING_KEY_HINT: &str = "save your API key in the popup settings";

/// Read the stored API key, if any.
pub fn read_stored() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let storage = web_sys::window()?.local_storage();
        match storage {
            Ok(Some(storage)) => match storage.get_item(STORAGE_KEY) {
                Ok(value) => value,
                Err(error) => {
                    tracing::warn!(?error, "failed to read API key from localStorage");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(?error, "localStorage unavailable");
                None
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

/// Persist `key`. Returns `false` when the key is blank or storage failed.
pub fn store(key: &str) -> bool {
    let key = key.trim();
    if key.is_empty() {
        return false;
    }
    #[cfg(feature = "csr")]
    {
        let Some(window) = web_sys::window() else {
            return false;
        };
        match window.local_storage() {
            Ok(Some(storage)) => match storage.set_item(STORAGE_KEY, key) {
                Ok(()) => true,
                Err(error) => {
                    tracing::warn!(?error, "failed to store API key");
                    false
                }
            },
            _ => false,
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

/// Resolves the key from `localStorage` at request time.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoredKey;

#[async_trait::async_trait(?Send)]
impl KeyResolver for StoredKey {
    async fn resolve(&self) -> Result<String, KeyError> {
        usable(read_stored())
    }
}

fn usable(stored: Option<String>) -> Result<String, KeyError> {
    match stored {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_owned()),
        _ => Err(KeyError(MISSING_KEY_HINT.into())),
    }
}

#[cfg(test)]
#[path = "api_key_test.rs"]
mod api_key_test;
