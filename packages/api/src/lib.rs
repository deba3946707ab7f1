//! # API crate — client for the MovieFlix catalog service
//!
//! Everything the frontends need to talk to the remote movie service and keep the
//! signed-in user's session consistent with it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: one async method per service operation, bearer auth, error normalization |
//! | [`favorites`] | [`FavoritesCoordinator`]: favorite flags for catalog entries and the add/remove toggle |
//! | [`account`] | Sign-in, sign-out, profile refresh/update, and account deletion flows |
//! | [`config`] | [`ClientConfig`] loaded from `movieflix.toml` or the environment |
//! | [`routes`] | [`RouteStyle`]: which path layout the deployed service uses |
//! | [`models`] | Wire records (`Movie`, `UserRecord`, ...) and request bodies |
//! | [`error`] | [`ApiError`], the single failure shape every operation returns |
//!
//! Session persistence lives in the `store` crate; its types are re-exported here so
//! callers can depend on this crate alone.

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod models;
pub mod routes;

pub use client::ApiClient;
pub use config::{ApiConfig, ClientConfig};
pub use error::{ApiError, ErrorCause};
pub use favorites::FavoritesCoordinator;
pub use models::{
    Ack, Credentials, Director, DirectorInfo, Genre, GenreInfo, LoginResponse, Movie, MovieEntry,
    RegistrationInput, UserDetails, UserRecord,
};
pub use routes::RouteStyle;

pub use store::{FileStore, MemoryStore, Session, SessionStore, StoreError};
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use store::LocalStorageStore;
