//! Platform-appropriate session store and API client.
//!
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStorageStore`]
//! - **WASM without `web`**: in-memory, lost on reload
//! - **Desktop / Mobile** (native): JSON files under `<data_dir>/movieflix/`

use api::{ApiClient, ApiError, ClientConfig};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;

pub fn make_session_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("movieflix");
        store::FileStore::new(base)
    }
}

/// Client for the configured service (environment overrides applied), bound to
/// the platform store.
pub fn make_client() -> Result<ApiClient<PlatformStore>, ApiError> {
    ApiClient::new(&ClientConfig::from_env(), make_session_store())
}
