//! # Session model
//!
//! [`Session`] is the locally cached identity of the signed-in user: profile fields
//! copied from the last user record the server returned, the set of favorite movie
//! ids, and the bearer token obtained at login.
//!
//! A session is created on successful login, replaced wholesale on every profile or
//! favorites change, and destroyed on logout. Stores never merge sessions; callers
//! read, modify, and write back.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Authenticated user plus their auth token, as persisted under the `"user"` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Ids of movies the user marked as favorite. A set, so never holds duplicates.
    #[serde(default)]
    pub favorite_movie_ids: BTreeSet<String>,
    pub auth_token: String,
}

impl Session {
    /// Create a session with no favorites and no optional profile fields.
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            email: None,
            birthday: None,
            favorite_movie_ids: BTreeSet::new(),
            auth_token: auth_token.into(),
        }
    }

    /// Builder method to set the favorite ids.
    pub fn with_favorites<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.favorite_movie_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Whether `movie_id` is one of the user's favorites.
    pub fn has_favorite(&self, movie_id: &str) -> bool {
        self.favorite_movie_ids.contains(movie_id)
    }
}
