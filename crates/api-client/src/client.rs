//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{OverpassPlaces, OverpassQuery, SupabasePlaces, SupabaseReviews};
use crate::error::{ApiError, ApiResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sportspot_core::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// PostgREST preference header; inserts and updates echo the written rows
const PREFER_HEADER: &str = "Prefer";

/// sportspot API client with built-in resilience patterns
///
/// This client wraps `reqwest` and adds:
/// - Automatic retry with exponential backoff
/// - Circuit breaker to prevent cascading failures
/// - Request correlation IDs for tracing
/// - Supabase credentials, sent only to the configured project
#[derive(Clone)]
pub struct SportspotClient {
    inner: Client,
    config: Arc<ClientConfig>,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl SportspotClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("sportspot/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let circuit_breaker = Arc::new(CircuitBreaker::new(CircuitBreakerConfig::default()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            circuit_breaker,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get circuit breaker state
    #[must_use]
    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    /// Reset the circuit breaker
    pub fn reset_circuit(&self) {
        self.circuit_breaker.reset();
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Supabase `places` table as a place repository
    #[must_use]
    pub fn places(&self) -> SupabasePlaces {
        SupabasePlaces::new(self.clone())
    }

    /// Supabase `reviews` table as a review store
    #[must_use]
    pub fn reviews(&self) -> SupabaseReviews {
        SupabaseReviews::new(self.clone())
    }

    /// Overpass interpreter as a place repository
    #[must_use]
    pub fn overpass(&self, query: OverpassQuery) -> OverpassPlaces {
        OverpassPlaces::new(self.clone(), query)
    }

    // -------------------------------------------------------------------------
    // URL building
    // -------------------------------------------------------------------------

    /// Absolute URL of a PostgREST table with encoded query parameters.
    pub fn rest_url(&self, table: &str, params: &[(&str, &str)]) -> ApiResult<String> {
        let base = format!("{}/rest/v1/{table}", self.config.base_url.trim_end_matches('/'));
        Url::parse_with_params(&base, params)
            .map(String::from)
            .map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods with resilience
    // -------------------------------------------------------------------------

    /// Perform a GET request with resilience patterns
    #[instrument(skip(self), fields(request_id))]
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.request_url(Method::GET, url, Option::<&()>::None).await
    }

    /// Perform a POST request with resilience patterns
    #[instrument(skip(self, body), fields(request_id))]
    pub async fn post_url<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request_url(Method::POST, url, Some(body)).await
    }

    /// Perform a PATCH request with resilience patterns
    #[instrument(skip(self, body), fields(request_id))]
    pub async fn patch_url<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request_url(Method::PATCH, url, Some(body)).await
    }

    /// Perform a DELETE request; the response body is ignored
    #[instrument(skip(self), fields(request_id))]
    pub async fn delete_url(&self, url: &str) -> ApiResult<()> {
        self.request_url::<serde_json::Value, ()>(Method::DELETE, url, None)
            .await
            .map(drop)
    }

    /// Execute a request to an absolute URL with full resilience patterns
    async fn request_url<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        if !self.circuit_breaker.can_execute() {
            warn!(
                request_id = %request_id,
                url = %url,
                "Circuit breaker is open, rejecting request"
            );
            return Err(ApiError::CircuitOpen);
        }

        self.execute_with_retry(&request_id, method, url, body).await
    }

    /// Execute request with retry logic
    async fn execute_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        request_id: &str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let retry_config = &self.config.retry;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self
                .execute_single_request(request_id, method.clone(), url, body)
                .await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    self.circuit_breaker.record_success();
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    // 4xx means the request was wrong, not that the service is down
                    if !e.is_client_error() {
                        self.circuit_breaker.record_failure();
                    }

                    if e.is_retryable() && attempt + 1 < retry_config.max_attempts {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, will retry"
                        );
                        last_error = Some(e);
                    } else {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, not retrying"
                        );
                        return Err(e);
                    }
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry_config.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single request without retry
    async fn execute_single_request<T: DeserializeOwned, B: Serialize>(
        &self,
        request_id: &str,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let writes = method == Method::POST || method == Method::PATCH;
        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, request_id);

        if self.is_supabase_url(url) {
            if let Some(ref key) = self.config.anon_key {
                request = request
                    .header(APIKEY_HEADER, key)
                    .header(AUTHORIZATION, format!("Bearer {key}"));
            }
            if writes {
                request = request.header(PREFER_HEADER, "return=representation");
            }
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        handle_response(response).await
    }

    fn is_supabase_url(&self, url: &str) -> bool {
        url.starts_with(self.config.base_url.trim_end_matches('/'))
    }
}

/// Check the status and deserialize; an empty body reads as JSON `null`.
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        decode_body(&body)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::api_response(status.as_u16(), message))
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SportspotClient {
        let config = ClientConfig::development().with_base_url("https://demo.supabase.co/");
        SportspotClient::with_config(config).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = SportspotClient::with_config(ClientConfig::development());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().circuit_state(), CircuitState::Closed);
    }

    #[test]
    fn test_rest_url_encodes_params() {
        let url = client()
            .rest_url("places", &[("select", "*"), ("id", "eq.a b")])
            .unwrap();
        assert_eq!(url, "https://demo.supabase.co/rest/v1/places?select=*&id=eq.a+b");
    }

    #[test]
    fn test_credentials_stay_on_project_host() {
        let client = client();
        assert!(client.is_supabase_url("https://demo.supabase.co/rest/v1/places"));
        assert!(!client.is_supabase_url("https://overpass.kumi.systems/api/interpreter"));
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        decode_body::<()>("").unwrap();
        let rows: Option<Vec<u8>> = decode_body("  ").unwrap();
        assert!(rows.is_none());
        let rows: Vec<u8> = decode_body("[1,2]").unwrap();
        assert_eq!(rows, [1, 2]);
    }
}
