//! # localStorage session store — browser-side persistence
//!
//! [`LocalStorageStore`] is the [`SessionStore`] implementation used on the **web
//! platform**. It keeps the session in the browser's durable key-value store
//! (`window.localStorage`) through [`web_sys::Storage`], under the same well-known
//! keys every other backend uses (`"user"` and `"token"`).
//!
//! ## Connection management
//!
//! `LocalStorageStore` is a zero-size struct that looks up `window.localStorage`
//! on every operation. `Storage` handles are not `Send`, and the lookup is a
//! property read, so nothing is cached.
//!
//! ## Error handling
//!
//! Reads swallow errors and report "absent" (private browsing modes may deny
//! storage access). Writes surface [`StoreError::Unavailable`] so a login that
//! cannot persist its token fails instead of silently losing it.

use web_sys::Storage;

use crate::error::StoreError;
use crate::models::Session;
use crate::session_store::{decode_session, encode_session, SessionStore, SESSION_KEY, TOKEN_KEY};

/// `window.localStorage`-backed SessionStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.storage().ok()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}

impl SessionStore for LocalStorageStore {
    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw = encode_session(session)?;
        self.set_item(SESSION_KEY, &raw)
    }

    async fn load(&self) -> Option<Session> {
        let raw = self.get_item(SESSION_KEY)?;
        decode_session(&raw)
    }

    async fn save_token(&self, token: &str) -> Result<(), StoreError> {
        self.set_item(TOKEN_KEY, token)
    }

    async fn load_token(&self) -> Option<String> {
        self.get_item(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.remove_item(SESSION_KEY)?;
        self.remove_item(TOKEN_KEY)
    }
}
