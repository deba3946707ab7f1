//! # SessionStore trait
//!
//! The single process-wide cache of the authenticated identity. Every backend keeps
//! two entries under well-known keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`SESSION_KEY`] (`"user"`) | the [`Session`] serialized as JSON |
//! | [`TOKEN_KEY`] (`"token"`) | the raw bearer token string |
//!
//! `save` overwrites the stored session wholesale. `load` yields `None` when nothing
//! was saved, after `clear`, or when the stored record no longer decodes. `clear`
//! removes both entries.
//!
//! The store holds at most one session. Writes only ever follow a completed request
//! on the single UI execution context, so no backend locks across calls.

use crate::error::StoreError;
use crate::models::Session;

/// Key under which the serialized session lives.
pub const SESSION_KEY: &str = "user";
/// Key under which the bearer token lives.
pub const TOKEN_KEY: &str = "token";

/// Async trait for persisting the current session and its bearer token.
pub trait SessionStore {
    fn save(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn load(&self) -> impl std::future::Future<Output = Option<Session>>;
    fn save_token(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn load_token(&self) -> impl std::future::Future<Output = Option<String>>;
    fn clear(&self) -> impl std::future::Future<Output = Result<(), StoreError>>;
}

pub(crate) fn encode_session(session: &Session) -> Result<String, StoreError> {
    Ok(serde_json::to_string(session)?)
}

pub(crate) fn decode_session(raw: &str) -> Option<Session> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!("Discarding undecodable stored session: {}", e);
            None
        }
    }
}
