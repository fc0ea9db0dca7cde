//! Client for the external search / extract / chat API.
//!
//! Provides [`ResearchClient`], a thin async wrapper that attaches auth and the
//! beta-feature header to every call and hands back the response body. Bodies
//! are returned as raw JSON so callers can persist exactly what the service sent.

pub mod types;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use types::{AuthScheme, ChatCompletion, ChatRequest, ExtractRequest, LimitField, SearchRequest};

pub const SEARCH_PATH: &str = "/v1beta/search";
pub const EXTRACT_PATH: &str = "/v1beta/extract";
pub const CHAT_PATH: &str = "/v1beta/chat/completions";
pub const BETA_HEADER: &str = "parallel-beta";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("PARALLEL_API_KEY is not set (export it or set api.api_key in the config file)")]
    MissingApiKey,

    #[error("invalid header value for {name}")]
    InvalidHeader { name: &'static str },

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Authenticated client for one API deployment.
#[derive(Debug, Clone)]
pub struct ResearchClient {
    http: reqwest::Client,
    base_url: String,
    limit_field: LimitField,
}

impl ResearchClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let api_key = config.api_key().ok_or(ApiError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        match config.auth {
            AuthScheme::ApiKeyHeader => {
                headers.insert("x-api-key", header_value("x-api-key", api_key)?);
            }
            AuthScheme::Bearer => {
                let mut value = header_value("authorization", &format!("Bearer {api_key}"))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers.insert(BETA_HEADER, header_value(BETA_HEADER, &config.beta)?);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ApiError::Transport {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit_field: config.limit_field,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a search and return the response JSON.
    pub async fn search(&self, request: &SearchRequest) -> Result<Value, ApiError> {
        let text = self.search_raw(request).await?;
        self.decode(SEARCH_PATH, &text)
    }

    /// Run a search and return the body exactly as the service sent it.
    pub async fn search_raw(&self, request: &SearchRequest) -> Result<String, ApiError> {
        let body = request.to_body(self.limit_field);
        self.post(SEARCH_PATH, &body).await
    }

    /// Extract page content for the given URLs and return the response JSON.
    pub async fn extract(&self, request: &ExtractRequest) -> Result<Value, ApiError> {
        let text = self.extract_raw(request).await?;
        self.decode(EXTRACT_PATH, &text)
    }

    /// Extract page content and return the body exactly as the service sent it.
    pub async fn extract_raw(&self, request: &ExtractRequest) -> Result<String, ApiError> {
        self.post(EXTRACT_PATH, request).await
    }

    /// Request a single chat completion.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatCompletion, ApiError> {
        let raw = self.post(CHAT_PATH, request).await?;
        Ok(ChatCompletion { raw })
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(ApiError::Status { status, body: text });
        }
        Ok(text)
    }

    fn decode(&self, path: &str, text: &str) -> Result<Value, ApiError> {
        serde_json::from_str(text).map_err(|source| ApiError::Decode {
            url: format!("{}{}", self.base_url, path),
            source,
        })
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|_| ApiError::InvalidHeader { name })
}
