//! # Client configuration — `movieflix.toml`
//!
//! Where the remote movie service lives and which path layout it speaks.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://movie-flex-api-95d248252fac.herokuapp.com"
//! route_style = "nested"   # or "flat"
//! ```
//!
//! All structs derive `Default` with production values, so a missing or empty
//! config file is equivalent to the default configuration.
//!
//! [`ClientConfig::from_env`] starts from the defaults, loads a `.env` file if one
//! exists, and applies `MOVIEFLIX_API_URL` / `MOVIEFLIX_ROUTE_STYLE` overrides.

use serde::{Deserialize, Serialize};

use crate::routes::RouteStyle;

const DEFAULT_BASE_URL: &str = "https://movie-flex-api-95d248252fac.herokuapp.com";

/// Top-level configuration stored in `movieflix.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

/// Remote service location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub route_style: RouteStyle,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            route_style: RouteStyle::default(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                route_style: RouteStyle::default(),
            },
        }
    }

    /// Builder method to set the route style.
    pub fn with_route_style(mut self, style: RouteStyle) -> Self {
        self.api.route_style = style;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "movieflix.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Defaults overridden by environment variables (and `.env`, when present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();
        if let Ok(url) = std::env::var("MOVIEFLIX_API_URL") {
            if !url.trim().is_empty() {
                config.api.base_url = url.trim().to_string();
            }
        }
        if let Ok(raw) = std::env::var("MOVIEFLIX_ROUTE_STYLE") {
            match RouteStyle::parse(&raw) {
                Some(style) => config.api.route_style = style,
                None => tracing::warn!("Ignoring unknown MOVIEFLIX_ROUTE_STYLE {:?}", raw),
            }
        }
        config
    }
}
