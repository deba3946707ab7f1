//! # ApiClient — single point of contact with the movie service
//!
//! Each operation issues exactly one HTTP request and resolves to either the
//! decoded record or an [`ApiError`]. There is no retry, queueing, or cancellation;
//! dependent work is sequenced by awaiting.
//!
//! ## Authentication
//!
//! | Policy | Operations | Behaviour |
//! |--------|-----------|-----------|
//! | anonymous | `register`, `login` | never sends `Authorization` |
//! | optional | `list_movies`, `get_movie`, `get_director`, `get_genre` | sends `Bearer <token>` when one is stored |
//! | required | every `/users/...` operation | fails with "Not authenticated" before any request when no token is stored |
//!
//! The token is read from the store's `"token"` entry, falling back to the stored
//! session's `auth_token`. [`ApiClient::login`] is the only operation that writes to
//! the store, and it does so before resolving so the very next call is authenticated.
//!
//! ## Paths
//!
//! Path parameters (titles, names, usernames, ids) are percent-encoded as single
//! segments. Director, genre, and user lookups follow the configured [`RouteStyle`].

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::SessionStore;

use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorCause};
use crate::models::{
    Ack, Credentials, DirectorInfo, GenreInfo, LoginResponse, Movie, RegistrationInput, UserDetails,
    UserRecord,
};
use crate::routes::RouteStyle;

const NO_BODY: Option<&()> = None;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Anonymous,
    Optional,
    Required,
}

/// The shapes `/users/{username}/movies` is known to answer with.
#[derive(Deserialize)]
#[serde(untagged)]
enum FavoritesPayload {
    Ids(Vec<String>),
    Movies(Vec<Movie>),
    User(UserRecord),
}

/// HTTP client for the movie service, bound to one session store.
pub struct ApiClient<S> {
    http: Client,
    base_url: Url,
    routes: RouteStyle,
    store: S,
}

impl<S: SessionStore> ApiClient<S> {
    /// Build a client for the configured service.
    ///
    /// Fails when the base URL does not parse or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, store: S) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.api.base_url).map_err(|e| {
            ApiError::validation(format!("Invalid API base URL {:?}: {e}", config.api.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::validation(format!(
                "Invalid API base URL {:?}",
                config.api.base_url
            )));
        }
        let http = Client::builder().build().map_err(|e| ApiError::network(&e))?;

        Ok(Self {
            http,
            base_url,
            routes: config.api.route_style,
            store,
        })
    }

    /// The session store this client reads tokens from.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn route_style(&self) -> RouteStyle {
        self.routes
    }

    /// `POST /users`
    pub async fn register(&self, input: &RegistrationInput) -> Result<UserRecord, ApiError> {
        input.validate()?;
        self.fetch(Method::POST, &["users"], Auth::Anonymous, Some(input))
            .await
    }

    /// `POST /login`. Stores the returned token before resolving.
    ///
    /// A response without a usable token is a failure; nothing is stored.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        credentials.validate()?;
        let response: LoginResponse = self
            .fetch(Method::POST, &["login"], Auth::Anonymous, Some(credentials))
            .await?;

        if response.token.trim().is_empty() {
            let error = ApiError::from_cause(ErrorCause::Decode("login response carried no token".to_string()));
            tracing::error!("Login for {} failed: {}", response.user.username, error.cause);
            return Err(error);
        }
        self.store.save_token(&response.token).await?;
        tracing::info!("Logged in as {}", response.user.username);
        Ok(response)
    }

    /// `GET /movies`
    pub async fn list_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.fetch(Method::GET, &["movies"], Auth::Optional, NO_BODY)
            .await
    }

    /// `GET /movies/{title}`
    pub async fn get_movie(&self, title: &str) -> Result<Movie, ApiError> {
        self.fetch(Method::GET, &["movies", title], Auth::Optional, NO_BODY)
            .await
    }

    pub async fn get_director(&self, name: &str) -> Result<DirectorInfo, ApiError> {
        self.fetch(Method::GET, &self.routes.director(name), Auth::Optional, NO_BODY)
            .await
    }

    pub async fn get_genre(&self, name: &str) -> Result<GenreInfo, ApiError> {
        self.fetch(Method::GET, &self.routes.genre(name), Auth::Optional, NO_BODY)
            .await
    }

    pub async fn get_user(&self, username: &str) -> Result<UserRecord, ApiError> {
        self.fetch(Method::GET, &self.routes.user(username), Auth::Required, NO_BODY)
            .await
    }

    /// `GET /users/{username}/movies`, reduced to movie ids whatever shape the
    /// service answers with.
    pub async fn get_favorites(&self, username: &str) -> Result<Vec<String>, ApiError> {
        let payload: FavoritesPayload = self
            .fetch(Method::GET, &["users", username, "movies"], Auth::Required, NO_BODY)
            .await?;

        Ok(match payload {
            FavoritesPayload::Ids(ids) => ids,
            FavoritesPayload::Movies(movies) => movies.into_iter().map(|m| m.id).collect(),
            FavoritesPayload::User(user) => user.favorites,
        })
    }

    /// `POST /users/{username}/movies/{movie_id}`. Adding an existing favorite
    /// succeeds like any other add.
    pub async fn add_favorite(&self, username: &str, movie_id: &str) -> Result<UserRecord, ApiError> {
        let empty = serde_json::Map::new();
        self.fetch(
            Method::POST,
            &["users", username, "movies", movie_id],
            Auth::Required,
            Some(&empty),
        )
        .await
    }

    /// `DELETE /users/{username}/movies/{movie_id}`
    pub async fn remove_favorite(&self, username: &str, movie_id: &str) -> Result<UserRecord, ApiError> {
        self.fetch(
            Method::DELETE,
            &["users", username, "movies", movie_id],
            Auth::Required,
            NO_BODY,
        )
        .await
    }

    /// `PUT /users/{username}` with `details` as the body.
    pub async fn edit_user(&self, details: &UserDetails) -> Result<UserRecord, ApiError> {
        details.validate()?;
        self.fetch(
            Method::PUT,
            &["users", details.username.as_str()],
            Auth::Required,
            Some(details),
        )
        .await
    }

    /// `DELETE /users/{username}`
    pub async fn delete_user(&self, username: &str) -> Result<Ack, ApiError> {
        let body = self
            .send(Method::DELETE, &["users", username], Auth::Required, NO_BODY)
            .await?;
        Ok(Ack {
            message: ack_message(&body).unwrap_or_else(|| format!("{username} was deleted")),
        })
    }

    async fn fetch<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        auth: Auth,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let text = self.execute(method.clone(), url.clone(), auth, body).await?;
        serde_json::from_str(&text).map_err(|e| fail(&method, &url, ApiError::decode(&e)))
    }

    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        auth: Auth,
        body: Option<&B>,
    ) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        self.execute(method, url, auth, body).await
    }

    async fn execute<B>(
        &self,
        method: Method,
        url: Url,
        auth: Auth,
        body: Option<&B>,
    ) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");

        if auth != Auth::Anonymous {
            match self.bearer_token().await {
                Some(token) => request = request.bearer_auth(token),
                None if auth == Auth::Required => {
                    return Err(fail(&method, &url, ApiError::not_authenticated()));
                }
                None => {}
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!("{} {}", method, url);
        let response = request
            .send()
            .await
            .map_err(|e| fail(&method, &url, ApiError::network(&e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| fail(&method, &url, ApiError::network(&e)))?;
        if !status.is_success() {
            return Err(fail(&method, &url, ApiError::http(status.as_u16(), &text)));
        }
        Ok(text)
    }

    async fn bearer_token(&self) -> Option<String> {
        let stored = self.store.load_token().await;
        if let Some(token) = stored.filter(|token| !token.trim().is_empty()) {
            return Some(token);
        }
        self.store
            .load()
            .await
            .map(|session| session.auth_token)
            .filter(|token| !token.trim().is_empty())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if segments.iter().any(|segment| segment.trim().is_empty()) {
            return Err(ApiError::validation("Missing path parameter"));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::validation("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Log a normalized failure once, at the boundary, and hand it back.
fn fail(method: &Method, url: &Url, error: ApiError) -> ApiError {
    tracing::error!("{} {} failed: {}", method, url, error.message);
    error
}

fn ack_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(text)) => Some(text),
        Ok(Value::Object(fields)) => fields
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => Some(trimmed.to_string()),
    }
}
