//! # Filesystem-backed session store
//!
//! [`FileStore`] is a [`SessionStore`] implementation that keeps the session on the
//! local filesystem. It is used on desktop and mobile platforms so a login survives
//! app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── user      # JSON-serialized Session
//! └── token     # bearer token string
//! ```
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/movieflix/` |
//! | Linux | `~/.local/share/movieflix/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\movieflix\` |
//!
//! [`dirs::data_dir()`]: https://docs.rs/dirs

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::Session;
use crate::session_store::{decode_session, encode_session, SessionStore, SESSION_KEY, TOKEN_KEY};

/// Filesystem-backed SessionStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }

    fn read_entry(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn write_entry(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.entry_path(key), value)?;
        Ok(())
    }

    fn remove_entry(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for FileStore {
    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let raw = encode_session(session)?;
        self.write_entry(SESSION_KEY, &raw)
    }

    async fn load(&self) -> Option<Session> {
        let raw = self.read_entry(SESSION_KEY)?;
        decode_session(&raw)
    }

    async fn save_token(&self, token: &str) -> Result<(), StoreError> {
        self.write_entry(TOKEN_KEY, token)
    }

    async fn load_token(&self) -> Option<String> {
        let token = self.read_entry(TOKEN_KEY)?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.remove_entry(SESSION_KEY)?;
        self.remove_entry(TOKEN_KEY)
    }
}
