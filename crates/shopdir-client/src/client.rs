//! HTTP client for the shop listing REST API.
//!
//! Every response is normalized into [`ShopRecord`]s before it leaves this
//! module, so callers never see the loosely-typed wire shape.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use shopdir_core::{AppConfig, ShopRecord};

use crate::error::ClientError;
use crate::normalize::{normalize_items, normalize_shop};
use crate::retry::retry_with_backoff;
use crate::types::{RawShop, ShopListResponse};

/// Client for the shop listing API.
///
/// Use [`ShopApiClient::from_config`] in the binary or
/// [`ShopApiClient::new`] to point at a mock server in tests.
pub struct ShopApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl ShopApiClient {
    /// Creates a client with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse
    /// as an absolute URL, or [`ClientError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A single trailing slash keeps the base path when segments are appended.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            token: None,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Creates a client from application configuration, including the
    /// bearer token when one is configured.
    ///
    /// # Errors
    ///
    /// Same as [`ShopApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let client = Self::new(
            &config.api_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )?;
        Ok(match &config.api_token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        })
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fetches every listed shop from `GET {base}/shops`.
    ///
    /// Records that cannot be normalized are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-2xx status, or a
    /// body that is not a shop list.
    pub async fn list_shops(&self) -> Result<Vec<ShopRecord>, ClientError> {
        let url = self.endpoint(&["shops"]);
        self.fetch_list(url, "list_shops").await
    }

    /// Fetches shops the API considers near a point, from
    /// `GET {base}/shops/nearby?lat=..&lng=..&radius=..` (`radius` in metres).
    ///
    /// The API's own distance filter is not trusted for ordering; run the
    /// result through [`shopdir_core::find_nearby`] before display.
    ///
    /// # Errors
    ///
    /// Same as [`ShopApiClient::list_shops`].
    pub async fn nearby_shops(
        &self,
        lat: f64,
        lng: f64,
        radius_m: u32,
    ) -> Result<Vec<ShopRecord>, ClientError> {
        let mut url = self.endpoint(&["shops", "nearby"]);
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lng", &lng.to_string())
            .append_pair("radius", &radius_m.to_string());
        self.fetch_list(url, "nearby_shops").await
    }

    /// Fetches a single shop from `GET {base}/shops/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] for an unknown id,
    /// [`ClientError::Deserialize`] or [`ClientError::Normalization`] for an
    /// unusable body, and other [`ClientError`] variants on transport failure.
    pub async fn get_shop(&self, id: &str) -> Result<ShopRecord, ClientError> {
        let url = self.endpoint(&["shops", id]);
        let body = self.get_json(&url).await?;

        // Single-record endpoints may wrap the record like list endpoints do.
        let record = unwrap_single(body);

        let raw: RawShop =
            serde_json::from_value(record).map_err(|e| ClientError::Deserialize {
                context: format!("get_shop(id={id})"),
                source: e,
            })?;
        normalize_shop(raw)
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch_list(&self, url: Url, context: &str) -> Result<Vec<ShopRecord>, ClientError> {
        let body = self.get_json(&url).await?;
        let response: ShopListResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: format!("{context} from {url}"),
                source: e,
            })?;

        let shops = normalize_items(response.into_items());
        tracing::debug!(url = %url, count = shops.len(), "fetched shop list");
        Ok(shops)
    }

    /// Sends a GET with retries and maps HTTP failures onto [`ClientError`].
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let mut request = self
                .client
                .get(url.clone())
                .header(reqwest::header::ACCEPT, "application/json");
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            let status = response.status();

            if status == StatusCode::UNAUTHORIZED {
                return Err(ClientError::Unauthorized {
                    url: url.to_string(),
                });
            }

            if status == StatusCode::NOT_FOUND {
                return Err(ClientError::NotFound {
                    url: url.to_string(),
                });
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(ClientError::RateLimited { retry_after_secs });
            }

            if !status.is_success() {
                return Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })
        })
        .await
    }
}

/// Unwraps `{"data": {...}}` or `{"shop": {...}}`; anything else is returned
/// unchanged and treated as the record itself.
fn unwrap_single(body: serde_json::Value) -> serde_json::Value {
    match body {
        serde_json::Value::Object(mut map) => {
            for key in ["data", "shop"] {
                if map.get(key).is_some_and(serde_json::Value::is_object) {
                    if let Some(inner) = map.remove(key) {
                        return inner;
                    }
                }
            }
            serde_json::Value::Object(map)
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
