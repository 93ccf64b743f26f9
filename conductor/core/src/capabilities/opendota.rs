//! OpenDota Roster Service
//!
//! [`RosterService`] backed by the public OpenDota REST API.
//!
//! # Endpoints
//!
//! - `/heroes` - hero roster (id, names, attribute, attack type, roles)
//! - `/heroStats` - same heroes with full base stats
//!
//! Both return a JSON array. Non-success statuses and undecodable bodies map to
//! [`TransportError`]; the caller decides what that means for the screen.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::traits::RosterService;
use crate::error::TransportError;
use crate::hero::{HeroRecord, HeroStats};

/// Default OpenDota API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.opendota.com/api";

/// Longest error body kept in a [`TransportError::Status`]
const MAX_ERROR_BODY: usize = 512;

/// OpenDota roster client
#[derive(Clone, Debug)]
pub struct OpenDotaRoster {
    /// Base URL without trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl OpenDotaRoster {
    /// Create a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("herodeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Base URL in use
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn heroes_url(&self) -> String {
        format!("{}/heroes", self.base_url)
    }

    fn hero_stats_url(&self) -> String {
        format!("{}/heroStats", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, TransportError> {
        tracing::debug!(url = %url, "Fetching roster");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
                body: clip(&body, MAX_ERROR_BODY).to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        decode_roster(&url, &bytes)
    }
}

impl Default for OpenDotaRoster {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }
}

/// Longest prefix of `text` within `max` bytes that ends on a char boundary
fn clip(text: &str, max: usize) -> &str {
    let mut end = text.len().min(max);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Decode a roster body, naming the URL on failure
fn decode_roster<T: DeserializeOwned>(url: &str, bytes: &[u8]) -> Result<T, TransportError> {
    serde_json::from_slice(bytes).map_err(|e| TransportError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl RosterService for OpenDotaRoster {
    fn name(&self) -> &str {
        "OpenDota"
    }

    async fn heroes(&self) -> Result<Vec<HeroRecord>, TransportError> {
        self.get_json(self.heroes_url()).await
    }

    async fn hero_stats(&self) -> Result<Vec<HeroStats>, TransportError> {
        self.get_json(self.hero_stats_url()).await
    }
}
