//! Client-side session persistence.
//!
//! [`SessionStore`] is the one shared mutable resource of the client: a cache of the
//! signed-in user's [`Session`] and bearer token. Backends:
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`MemoryStore`] | tests, fallback |
//! | [`FileStore`] | desktop / mobile |
//! | `LocalStorageStore` | web (`wasm32` + `web` feature) |

pub mod error;
pub mod models;
pub mod session_store;

mod file_store;
mod memory;
pub use file_store::FileStore;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use error::StoreError;
pub use models::Session;
pub use session_store::{SessionStore, SESSION_KEY, TOKEN_KEY};
