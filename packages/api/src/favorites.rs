//! Favorite-movie bookkeeping between the session and the service.
//!
//! Membership is always derived from the session passed in, never cached here.
//! A toggle reads the flag, issues the matching remote call, and on success saves
//! the updated session; two overlapping toggles resolve last-write-wins.

use store::{Session, SessionStore};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Movie, MovieEntry};

pub struct FavoritesCoordinator<'a, S> {
    client: &'a ApiClient<S>,
}

impl<'a, S: SessionStore> FavoritesCoordinator<'a, S> {
    pub fn new(client: &'a ApiClient<S>) -> Self {
        Self { client }
    }

    pub fn is_favorite(movie: &Movie, session: &Session) -> bool {
        session.has_favorite(&movie.id)
    }

    /// Flip `movie`'s membership in the user's favorites.
    ///
    /// Returns the updated session, which has also been saved to the store. On
    /// failure nothing is saved and `session` is left as it was.
    pub async fn toggle_favorite(&self, movie: &Movie, session: &Session) -> Result<Session, ApiError> {
        let mut updated = session.clone();

        if Self::is_favorite(movie, session) {
            self.client
                .remove_favorite(&session.username, &movie.id)
                .await?;
            updated.favorite_movie_ids.remove(&movie.id);
            tracing::info!("Removed {} from {}'s favorites", movie.id, session.username);
        } else {
            self.client
                .add_favorite(&session.username, &movie.id)
                .await?;
            updated.favorite_movie_ids.insert(movie.id.clone());
            tracing::info!("Added {} to {}'s favorites", movie.id, session.username);
        }

        self.client.store().save(&updated).await?;
        Ok(updated)
    }

    /// Pair each movie with its favorite flag. Without a session nothing is a favorite.
    pub fn annotate(movies: Vec<Movie>, session: Option<&Session>) -> Vec<MovieEntry> {
        movies
            .into_iter()
            .map(|movie| {
                let is_favorite = session.is_some_and(|s| Self::is_favorite(&movie, s));
                MovieEntry { movie, is_favorite }
            })
            .collect()
    }

    pub async fn load_catalog(&self, session: Option<&Session>) -> Result<Vec<MovieEntry>, ApiError> {
        let movies = self.client.list_movies().await?;
        Ok(Self::annotate(movies, session))
    }

    /// Reload the catalog into `entries`. A failed reload leaves `entries` untouched.
    pub async fn refresh(&self, entries: &mut Vec<MovieEntry>, session: Option<&Session>) -> Result<(), ApiError> {
        *entries = self.load_catalog(session).await?;
        Ok(())
    }

    /// The catalog movies the user has marked, in catalog order.
    pub async fn favorite_movies(&self, session: &Session) -> Result<Vec<Movie>, ApiError> {
        let movies = self.client.list_movies().await?;
        Ok(movies
            .into_iter()
            .filter(|movie| Self::is_favorite(movie, session))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use store::MemoryStore;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn movie(id: &str) -> Movie {
        serde_json::from_value(json!({ "_id": id, "title": format!("Movie {id}") })).unwrap()
    }

    fn user_json(favorites: &[&str]) -> serde_json::Value {
        json!({ "_id": "1", "username": "alice", "favorites": favorites })
    }

    async fn client_for(server: &MockServer) -> ApiClient<MemoryStore> {
        let store = MemoryStore::new();
        store.save_token("tok123").await.unwrap();
        ApiClient::new(&ClientConfig::new(server.uri()), store).unwrap()
    }

    #[test]
    fn test_is_favorite_follows_session() {
        let session = Session::new("1", "alice", "tok123").with_favorites(["m1"]);
        assert!(FavoritesCoordinator::<MemoryStore>::is_favorite(&movie("m1"), &session));
        assert!(!FavoritesCoordinator::<MemoryStore>::is_favorite(&movie("m2"), &session));
    }

    #[test]
    fn test_annotate_without_session() {
        let entries = FavoritesCoordinator::<MemoryStore>::annotate(vec![movie("m1"), movie("m2")], None);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| !entry.is_favorite));
    }

    #[tokio::test]
    async fn test_toggle_removes_existing_favorite() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/users/alice/movies/m1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(&[])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let coordinator = FavoritesCoordinator::new(&client);
        let session = Session::new("1", "alice", "tok123").with_favorites(["m1"]);

        let updated = coordinator.toggle_favorite(&movie("m1"), &session).await.unwrap();

        assert!(updated.favorite_movie_ids.is_empty());
        assert_eq!(client.store().load().await, Some(updated));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_favorites() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/alice/movies/m2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(&["m1", "m2"])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/users/alice/movies/m2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json(&["m1"])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let coordinator = FavoritesCoordinator::new(&client);
        let session = Session::new("1", "alice", "tok123").with_favorites(["m1"]);

        let added = coordinator.toggle_favorite(&movie("m2"), &session).await.unwrap();
        assert!(added.has_favorite("m2"));

        let restored = coordinator.toggle_favorite(&movie("m2"), &added).await.unwrap();
        assert_eq!(restored.favorite_movie_ids, session.favorite_movie_ids);
    }

    #[tokio::test]
    async fn test_failed_toggle_saves_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users/alice/movies/m2"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Database down" })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let coordinator = FavoritesCoordinator::new(&client);
        let session = Session::new("1", "alice", "tok123").with_favorites(["m1"]);

        let error = coordinator.toggle_favorite(&movie("m2"), &session).await.unwrap_err();

        assert_eq!(error.message, "Database down");
        assert!(client.store().load().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_keeps_entries_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let coordinator = FavoritesCoordinator::new(&client);
        let session = Session::new("1", "alice", "tok123").with_favorites(["m1"]);
        let mut entries = FavoritesCoordinator::<MemoryStore>::annotate(vec![movie("m1")], Some(&session));

        assert!(coordinator.refresh(&mut entries, Some(&session)).await.is_err());
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_favorite);
    }

    #[tokio::test]
    async fn test_refresh_keeps_entries_when_unreachable() {
        let store = MemoryStore::new();
        let client = ApiClient::new(&ClientConfig::new(crate::client::tests::closed_port_uri()), store).unwrap();
        let coordinator = FavoritesCoordinator::new(&client);
        let session = Session::new("1", "alice", "tok123").with_favorites(["m2"]);
        let mut entries = FavoritesCoordinator::<MemoryStore>::annotate(vec![movie("m1"), movie("m2")], Some(&session));
        let before = entries.clone();

        let error = coordinator.refresh(&mut entries, Some(&session)).await.unwrap_err();

        assert!(matches!(error.cause, crate::error::ErrorCause::Network(_)));
        assert_eq!(entries, before);
    }

    #[tokio::test]
    async fn test_load_catalog_and_favorite_movies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "_id": "m1", "title": "Alien" },
                { "_id": "m2", "title": "Heat" },
                { "_id": "m3", "title": "Ran" }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let coordinator = FavoritesCoordinator::new(&client);
        let session = Session::new("1", "alice", "tok123").with_favorites(["m3", "m1"]);

        let entries = coordinator.load_catalog(Some(&session)).await.unwrap();
        let flags: Vec<bool> = entries.iter().map(|e| e.is_favorite).collect();
        assert_eq!(flags, [true, false, true]);

        let favorites = coordinator.favorite_movies(&session).await.unwrap();
        let titles: Vec<&str> = favorites.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Alien", "Ran"]);
    }
}
