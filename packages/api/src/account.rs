//! Session lifecycle: sign in, keep the profile current, sign out.
//!
//! These are the read-modify-write sequences the views run around the client.
//! Each one saves the resulting session wholesale; none of them merge with a
//! session saved concurrently by another flow.

use store::{Session, SessionStore};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Ack, Credentials, UserDetails};

/// Log in and persist the new session alongside the token.
///
/// If the session cannot be saved the token stored by `login` is cleared again,
/// so a failed sign-in never leaves the store half-authenticated.
pub async fn sign_in<S: SessionStore>(client: &ApiClient<S>, credentials: &Credentials) -> Result<Session, ApiError> {
    let response = client.login(credentials).await?;
    let session = response.user.into_session(response.token);
    if let Err(e) = client.store().save(&session).await {
        if let Err(clear) = client.store().clear().await {
            tracing::warn!("Failed to clear token after sign-in failure: {}", clear);
        }
        return Err(e.into());
    }
    Ok(session)
}

pub async fn sign_out<S: SessionStore>(store: &S) -> Result<(), ApiError> {
    store.clear().await?;
    tracing::info!("Signed out");
    Ok(())
}

/// Re-read the user record and fold it into `session`.
pub async fn refresh_profile<S: SessionStore>(client: &ApiClient<S>, session: &Session) -> Result<Session, ApiError> {
    let user = client.get_user(&session.username).await?;
    let refreshed = user.merge_into(session);
    client.store().save(&refreshed).await?;
    Ok(refreshed)
}

pub async fn update_profile<S: SessionStore>(
    client: &ApiClient<S>,
    session: &Session,
    details: &UserDetails,
) -> Result<Session, ApiError> {
    let user = client.edit_user(details).await?;
    let updated = user.merge_into(session);
    client.store().save(&updated).await?;
    tracing::info!("Updated profile for {}", updated.username);
    Ok(updated)
}

/// Delete the account, then forget the session. A failed delete keeps the session.
pub async fn delete_account<S: SessionStore>(client: &ApiClient<S>, session: &Session) -> Result<Ack, ApiError> {
    let ack = client.delete_user(&session.username).await?;
    client.store().clear().await?;
    tracing::info!("Deleted account {}", session.username);
    Ok(ack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use store::{MemoryStore, StoreError};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for<S: SessionStore>(server: &MockServer, store: S) -> ApiClient<S> {
        ApiClient::new(&ClientConfig::new(server.uri()), store).unwrap()
    }

    /// Keeps tokens in memory but refuses to save sessions.
    #[derive(Clone, Default)]
    struct SessionWriteFails {
        inner: MemoryStore,
    }

    impl SessionStore for SessionWriteFails {
        async fn save(&self, _session: &Session) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk full".to_string()))
        }

        async fn load(&self) -> Option<Session> {
            self.inner.load().await
        }

        async fn save_token(&self, token: &str) -> Result<(), StoreError> {
            self.inner.save_token(token).await
        }

        async fn load_token(&self) -> Option<String> {
            self.inner.load_token().await
        }

        async fn clear(&self) -> Result<(), StoreError> {
            self.inner.clear().await
        }
    }

    async fn mount_login(server: &MockServer, favorites: &[&str]) {
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": { "_id": "1", "username": "alice", "favorites": favorites },
                "token": "tok123"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_sign_in_with_no_favorites() {
        let server = MockServer::start().await;
        mount_login(&server, &[]).await;

        let store = MemoryStore::new();
        let client = client_for(&server, store.clone());

        let session = sign_in(&client, &Credentials::new("alice", "secret")).await.unwrap();

        let stored = store.load().await.unwrap();
        assert_eq!(stored, session);
        assert_eq!(stored.username, "alice");
        assert!(stored.favorite_movie_ids.is_empty());
        assert_eq!(stored.auth_token, "tok123");
        assert_eq!(store.load_token().await.as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_sign_in_save_failure_clears_token() {
        let server = MockServer::start().await;
        mount_login(&server, &["m1"]).await;

        let store = SessionWriteFails::default();
        let client = client_for(&server, store.clone());

        let error = sign_in(&client, &Credentials::new("alice", "secret")).await.unwrap_err();

        assert_eq!(error.message, "session storage unavailable: disk full");
        assert!(store.load_token().await.is_none());
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_in_then_favorites_use_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": { "_id": "1", "username": "alice", "favorites": ["m1"] },
                "token": "tok123"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/alice/movies"))
            .and(header("Authorization", "Bearer tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["m1"])))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        let client = client_for(&server, store.clone());

        let session = sign_in(&client, &Credentials::new("alice", "secret")).await.unwrap();
        assert_eq!(session.auth_token, "tok123");
        assert!(session.has_favorite("m1"));
        assert_eq!(store.load().await, Some(session.clone()));

        let favorites = client.get_favorites(&session.username).await.unwrap();
        assert_eq!(favorites, vec!["m1"]);
    }

    #[tokio::test]
    async fn test_sign_out_clears_everything() {
        let store = MemoryStore::new();
        store.save(&Session::new("1", "alice", "tok123")).await.unwrap();
        store.save_token("tok123").await.unwrap();

        sign_out(&store).await.unwrap();

        assert!(store.load().await.is_none());
        assert!(store.load_token().await.is_none());
    }

    #[tokio::test]
    async fn test_update_profile_keeps_token() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "1", "username": "alice", "email": "new@example.com", "favorites": ["m2"]
            })))
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        store.save_token("tok123").await.unwrap();
        let client = client_for(&server, store.clone());
        let session = Session::new("1", "alice", "tok123").with_favorites(["m1"]);
        let details = UserDetails::from_session(&session).with_email("new@example.com");

        let updated = update_profile(&client, &session, &details).await.unwrap();

        assert_eq!(updated.auth_token, "tok123");
        assert_eq!(updated.email.as_deref(), Some("new@example.com"));
        assert!(updated.has_favorite("m2"));
        assert_eq!(store.load().await, Some(updated));
    }

    #[tokio::test]
    async fn test_refresh_profile_failure_keeps_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies/users/alice"))
            .respond_with(ResponseTemplate::new(404).set_body_string("User not found"))
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        let session = Session::new("1", "alice", "tok123");
        store.save(&session).await.unwrap();
        let client = client_for(&server, store.clone());

        let error = refresh_profile(&client, &session).await.unwrap_err();

        assert_eq!(error.message, "User not found");
        assert_eq!(store.load().await, Some(session));
    }

    #[tokio::test]
    async fn test_delete_account_clears_store() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_string("alice was deleted."))
            .mount(&server)
            .await;

        let store = MemoryStore::new();
        let session = Session::new("1", "alice", "tok123");
        store.save(&session).await.unwrap();
        store.save_token("tok123").await.unwrap();
        let client = client_for(&server, store.clone());

        let ack = delete_account(&client, &session).await.unwrap();

        assert_eq!(ack.message, "alice was deleted.");
        assert!(store.load().await.is_none());
        assert!(store.load_token().await.is_none());
    }
}
