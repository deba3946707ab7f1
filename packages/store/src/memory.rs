use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StoreError;
use crate::models::Session;
use crate::session_store::{decode_session, encode_session, SessionStore, SESSION_KEY, TOKEN_KEY};

/// In-memory SessionStore for testing and as a fallback when no durable storage exists.
///
/// Clones share the same entries, so a test can hand one clone to a client and
/// inspect the other.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw = encode_session(session)?;
        self.entries().insert(SESSION_KEY.to_string(), raw);
        Ok(())
    }

    async fn load(&self) -> Option<Session> {
        let raw = self.entries().get(SESSION_KEY).cloned()?;
        decode_session(&raw)
    }

    async fn save_token(&self, token: &str) -> Result<(), StoreError> {
        self.entries().insert(TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    async fn load_token(&self) -> Option<String> {
        self.entries()
            .get(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
            .cloned()
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries().clear();
        Ok(())
    }
}
