//! Read-only client for the creature-data API.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::error::{ApiError, DETAIL_FALLBACK, LIST_FALLBACK};
use crate::domain::{Ability, AbilityDetail, AbilityPage};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
/// Size of the one page the browser ever asks for.
pub const PAGE_LIMIT: u32 = 20;

/// The remote collaborator behind the ability browser.
#[async_trait]
pub trait AbilityApi: Send + Sync {
    /// First page of abilities (offset 0).
    async fn list_abilities(&self) -> Result<Vec<Ability>, ApiError>;

    /// Detail document behind a locator returned by [`list_abilities`].
    ///
    /// [`list_abilities`]: AbilityApi::list_abilities
    async fn ability_detail(&self, url: &str) -> Result<AbilityDetail, ApiError>;
}

/// HTTP implementation over `reqwest`. No retries and no timeouts are
/// configured beyond the client defaults.
#[derive(Debug, Clone)]
pub struct HttpAbilityApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAbilityApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn list_url(&self) -> String {
        format!("{}/ability?limit={PAGE_LIMIT}&offset=0", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, fallback: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Collaborator returned an error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
            });
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AbilityApi for HttpAbilityApi {
    #[instrument(skip(self))]
    async fn list_abilities(&self) -> Result<Vec<Ability>, ApiError> {
        let url = self.list_url();
        debug!(%url, "Fetching ability page");
        let page: AbilityPage = self.get_json(&url, LIST_FALLBACK).await?;
        Ok(page.results)
    }

    #[instrument(skip(self))]
    async fn ability_detail(&self, url: &str) -> Result<AbilityDetail, ApiError> {
        debug!("Fetching ability detail");
        self.get_json(url, DETAIL_FALLBACK).await
    }
}

/// Extracts the collaborator's own message from an error body: the
/// `message` field of a JSON object, or a short plain-text body.
pub fn error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        return value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
    }
    let text = body.trim();
    (!text.is_empty() && text.len() <= 200).then(|| text.to_string())
}
