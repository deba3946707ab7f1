//! # User records and request payloads
//!
//! - [`UserRecord`]: the service's view of a user. `favorites` defaults to empty
//!   when the field is absent or `null`, so a sparse record never breaks favorite
//!   lookups.
//! - [`Credentials`], [`RegistrationInput`], [`UserDetails`]: transient request
//!   bodies. They are never persisted.
//! - [`LoginResponse`]: `{ user, token }` returned by `/login`.
//!
//! Birthdays travel as `YYYY-MM-DD`. Incoming records sometimes carry a full
//! timestamp (`1990-04-01T00:00:00.000Z`); only the date part is kept.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use store::Session;

use crate::error::ApiError;

const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// A user as returned by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(alias = "Username")]
    pub username: String,
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(default, alias = "Birthday", with = "birthday")]
    pub birthday: Option<NaiveDate>,
    #[serde(
        default,
        alias = "FavoriteMovies",
        alias = "favoriteMovies",
        deserialize_with = "null_as_empty"
    )]
    pub favorites: Vec<String>,
}

impl UserRecord {
    /// Build a fresh session for this user.
    pub fn into_session(self, auth_token: impl Into<String>) -> Session {
        Session {
            user_id: self.id,
            username: self.username,
            email: self.email,
            birthday: self.birthday,
            favorite_movie_ids: self.favorites.into_iter().collect::<BTreeSet<_>>(),
            auth_token: auth_token.into(),
        }
    }

    /// Replace the profile fields of `session` with this record, keeping its token.
    pub fn merge_into(self, session: &Session) -> Session {
        self.into_session(session.auth_token.clone())
    }
}

/// `{ user, token }` body of a successful login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserRecord,
    pub token: String,
}

/// Acknowledgement of an operation that returns no record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ack {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        require("Username", &self.username)?;
        require("Password", &self.password)
    }
}

/// Body of `POST /users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationInput {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "birthday")]
    pub birthday: Option<NaiveDate>,
}

impl RegistrationInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: None,
            birthday: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the birthday from form input, rejecting anything but `YYYY-MM-DD`.
    pub fn with_birthday(mut self, raw: &str) -> Result<Self, ApiError> {
        self.birthday = Some(parse_birthday(raw)?);
        Ok(self)
    }

    /// The credentials to log in with after registering.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        self.credentials().validate()
    }
}

/// Body of `PUT /users/{username}`. The path uses `username`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserDetails {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", with = "birthday")]
    pub birthday: Option<NaiveDate>,
}

impl UserDetails {
    /// Details prefilled from the current session, as a profile form starts out.
    pub fn from_session(session: &Session) -> Self {
        Self {
            username: session.username.clone(),
            password: None,
            email: session.email.clone(),
            birthday: session.birthday,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_birthday(mut self, raw: &str) -> Result<Self, ApiError> {
        self.birthday = Some(parse_birthday(raw)?);
        Ok(self)
    }

    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        require("Username", &self.username)?;
        match &self.password {
            Some(password) => require("Password", password),
            None => Ok(()),
        }
    }
}

/// Parse a `YYYY-MM-DD` birthday from user input.
pub fn parse_birthday(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), BIRTHDAY_FORMAT)
        .map_err(|_| ApiError::validation(format!("Invalid birthday {:?}: expected YYYY-MM-DD", raw.trim())))
}

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

mod birthday {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::BIRTHDAY_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.collect_str(&date.format(BIRTHDAY_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    /// Lenient: keeps the leading date of a timestamp, drops what does not parse.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|raw| {
            let date = raw.get(..10).unwrap_or(raw.as_str());
            NaiveDate::parse_from_str(date, BIRTHDAY_FORMAT).ok()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCause;

    #[test]
    fn test_login_response_decodes_minimal_user() {
        let json = r#"{"user":{"_id":"1","username":"alice","favorites":[]},"token":"tok123"}"#;
        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user.id, "1");
        assert!(response.user.favorites.is_empty());
        assert_eq!(response.token, "tok123");
    }

    #[test]
    fn test_absent_or_null_favorites_default_to_empty() {
        let absent: UserRecord = serde_json::from_str(r#"{"_id":"1","username":"alice"}"#).unwrap();
        let null: UserRecord =
            serde_json::from_str(r#"{"_id":"1","username":"alice","favorites":null}"#).unwrap();
        assert!(absent.favorites.is_empty());
        assert!(null.favorites.is_empty());
    }

    #[test]
    fn test_timestamp_birthday_keeps_date() {
        let json = r#"{"_id":"1","Username":"alice","Birthday":"1990-04-01T00:00:00.000Z","FavoriteMovies":["m1"]}"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.birthday, NaiveDate::from_ymd_opt(1990, 4, 1));
        assert_eq!(user.favorites, vec!["m1".to_string()]);
    }

    #[test]
    fn test_into_session_dedupes_favorites() {
        let user = UserRecord {
            id: "1".to_string(),
            username: "alice".to_string(),
            email: None,
            birthday: None,
            favorites: vec!["m1".to_string(), "m1".to_string(), "m2".to_string()],
        };
        let session = user.into_session("tok123");
        assert_eq!(session.favorite_movie_ids.len(), 2);
        assert_eq!(session.auth_token, "tok123");
    }

    #[test]
    fn test_registration_body_omits_missing_fields() {
        let input = RegistrationInput::new("alice", "secret");
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body, serde_json::json!({"username": "alice", "password": "secret"}));

        let input = input.with_email("a@example.com").with_birthday("1990-04-01").unwrap();
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["birthday"], "1990-04-01");
        assert_eq!(body["email"], "a@example.com");
    }

    #[test]
    fn test_unparsable_birthday_is_validation_error() {
        let error = RegistrationInput::new("alice", "secret")
            .with_birthday("01/04/1990")
            .unwrap_err();
        assert!(matches!(error.cause, ErrorCause::Validation(_)));
        assert!(error.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let error = Credentials::new("alice", "  ").validate().unwrap_err();
        assert_eq!(error.message, "Password is required");
    }
}
