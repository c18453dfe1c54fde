//! Session store

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Key the cart collection is persisted under.
pub const CART_KEY: &str = "si_cart_v1";

/// Error raised by a session store backend.
///
/// The engine treats the store as best-effort convenience, so these are
/// swallowed (and logged) rather than surfaced to the visitor.
#[derive(Debug, Error)]
#[error("session store unavailable: {0}")]
pub struct StoreError(pub String);

/// A key-scoped store whose contents live for the browsing session.
///
/// The browser shell backs this with `sessionStorage`; tests and native
/// shells use [`MemoryStore`].
pub trait SessionStore {
    /// Read the serialized value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be written, e.g.
    /// a quota rejection.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory session store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
