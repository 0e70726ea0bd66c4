//! HTTP client for the Oruko name meaning service
//!
//! Talks to the two JSON endpoints of the service:
//!
//! - `POST {base}/api/translate/heritage-suggestions` with `{"name"}`
//! - `POST {base}/api/translate/translate-with-heritage` with `{"name", "heritage"}`
//!
//! # Configuration
//!
//! The base address is read from the `ORUKO_API_BASE_URL` environment
//! variable by [`HttpTranslationClient::from_env`], or passed explicitly
//! through [`ClientConfig`].

use crate::client::TranslationClient;
use crate::error::{ConfigError, LookupError, LookupResult};
use async_trait::async_trait;
use oruko::{HeritageCandidate, TranslationResult, ValidatedName};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable holding the service base address
pub const BASE_URL_ENV: &str = "ORUKO_API_BASE_URL";

const HERITAGE_PATH: &str = "/api/translate/heritage-suggestions";
const TRANSLATION_PATH: &str = "/api/translate/translate-with-heritage";

const HERITAGE_FALLBACK: &str = "Failed to get heritage suggestions. Please try again.";
const TRANSLATION_FALLBACK: &str = "Failed to translate name with heritage. Please try again.";

/// Connection settings for [`HttpTranslationClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service address without the `/api` suffix, e.g. `https://api.oruko.mi`
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Read the base address from `ORUKO_API_BASE_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var(BASE_URL_ENV).map_err(|_| ConfigError::MissingEnv(BASE_URL_ENV))?;
        Ok(Self::new(base_url))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Error body the service sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: Option<String>,
}

/// Client for the remote heritage and translation endpoints
#[derive(Debug, Clone)]
pub struct HttpTranslationClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranslationClient {
    /// Create a client from explicit settings
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - Ready to use
    /// * `Err(ConfigError)` - If the base URL is blank or the HTTP client cannot be built
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Ok(Self { client, base_url })
    }

    /// Create a client from the `ORUKO_API_BASE_URL` environment variable
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `path` and decode the JSON answer
    ///
    /// 429 becomes [`LookupError::RateLimited`]. Any other failure becomes a
    /// service error carrying the server's `message` when it sent one, and
    /// `fallback` otherwise.
    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
        fallback: &str,
    ) -> LookupResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "request failed before a response arrived");
                return Err(LookupError::service(fallback));
            }
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(%url, "rate limited by service");
            return Err(LookupError::RateLimited);
        }

        if !status.is_success() {
            let message = response
                .json::<ServiceErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty());
            warn!(%url, %status, ?message, "service returned an error");
            return Err(LookupError::service(
                message.unwrap_or_else(|| fallback.to_string()),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            warn!(%url, error = %e, "failed to decode service response");
            LookupError::service(fallback)
        })
    }
}

#[async_trait]
impl TranslationClient for HttpTranslationClient {
    async fn fetch_heritage_candidates(
        &self,
        name: &ValidatedName,
    ) -> LookupResult<Vec<HeritageCandidate>> {
        self.post(HERITAGE_PATH, json!({ "name": name }), HERITAGE_FALLBACK)
            .await
    }

    async fn fetch_translation(
        &self,
        name: &ValidatedName,
        heritage: &HeritageCandidate,
    ) -> LookupResult<TranslationResult> {
        self.post(
            TRANSLATION_PATH,
            json!({ "name": name, "heritage": heritage }),
            TRANSLATION_FALLBACK,
        )
        .await
    }

    fn client_name(&self) -> &str {
        "Oruko HTTP"
    }
}
