//! Path layout of the remote movie service.
//!
//! Deployed variants of the service disagree on where director, genre, and user
//! lookups live. [`RouteStyle`] picks one layout per client; every other path is
//! the same in both.
//!
//! | Operation | `Nested` (default) | `Flat` |
//! |-----------|--------------------|--------|
//! | director | `/movies/directors/{name}` | `/directors/{name}` |
//! | genre | `/movies/genres/{name}` | `/genres/{name}` |
//! | user | `/movies/users/{username}` | `/users/{username}` |

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStyle {
    #[default]
    Nested,
    Flat,
}

impl RouteStyle {
    /// Parse `"nested"` or `"flat"` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "nested" => Some(Self::Nested),
            "flat" => Some(Self::Flat),
            _ => None,
        }
    }

    pub fn director<'a>(&self, name: &'a str) -> Vec<&'a str> {
        self.lookup("directors", name)
    }

    pub fn genre<'a>(&self, name: &'a str) -> Vec<&'a str> {
        self.lookup("genres", name)
    }

    pub fn user<'a>(&self, username: &'a str) -> Vec<&'a str> {
        self.lookup("users", username)
    }

    fn lookup<'a>(&self, collection: &'static str, key: &'a str) -> Vec<&'a str> {
        match self {
            Self::Nested => vec!["movies", collection, key],
            Self::Flat => vec![collection, key],
        }
    }
}
