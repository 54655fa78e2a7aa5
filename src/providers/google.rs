use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::{Provider, TranslationRequest};

/// Client for the Google `translate_a/single` endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL
    endpoint: String,
    /// Optional API key
    api_key: String,
    /// `client` query parameter
    client_id: String,
    /// Request timeout, kept for error reporting
    timeout: Duration,
}

/// Translated segments of one response, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoogleResponse {
    /// `translatedSegment` values from the first element of the response
    pub segments: Vec<String>,
}

impl GoogleResponse {
    /// Decode the nested-array body.
    ///
    /// The first element is a list of `[translated, original, ...]` tuples;
    /// everything after it is metadata this client ignores.
    pub fn from_json(body: &Value) -> Result<Self, ProviderError> {
        let tuples = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError(format!("unexpected response shape: {}", truncate(body))))?;

        let segments = tuples
            .iter()
            .filter_map(|tuple| tuple.get(0).and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        Ok(Self { segments })
    }
}

fn truncate(body: &Value) -> String {
    let text = body.to_string();
    match text.char_indices().nth(120) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text,
    }
}

impl GoogleTranslate {
    /// Create a new client from the translation configuration
    pub fn new(config: &TranslationConfig) -> Result<Self, ProviderError> {
        Url::parse(&config.endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("invalid endpoint {}: {}", config.endpoint, e)))?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            client_id: config.client.clone(),
            timeout,
        })
    }

    /// Build the full request URL with query parameters
    pub fn request_url(&self, request: &TranslationRequest) -> Result<Url, ProviderError> {
        let mut params = vec![
            ("client", self.client_id.as_str()),
            ("sl", request.source_language.as_str()),
            ("tl", request.target_language.as_str()),
            ("dt", "t"),
            ("q", request.text.as_str()),
        ];
        if !self.api_key.is_empty() {
            params.push(("key", self.api_key.as_str()));
        }

        Url::parse_with_params(&self.endpoint, &params)
            .map_err(|e| ProviderError::RequestFailed(format!("invalid request URL: {}", e)))
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = TranslationRequest;
    type Response = GoogleResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = self.request_url(&request)?;
        debug!("GET {} ({} chars)", self.endpoint, request.text.chars().count());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        GoogleResponse::from_json(&body)
    }

    fn extract_text(response: &Self::Response) -> String {
        response.segments.concat().trim().to_string()
    }
}
