//! Runway HTTP client.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::types::GenerateRequest;

const DEFAULT_API_URL: &str = "https://api.runwayml.com/v1/generate";

/// Configuration for the Runway client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Generate endpoint URL
    pub api_url: String,
    /// Bearer token
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl ProviderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("RUNWAY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: std::env::var("RUNWAY_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout: Duration::from_secs(
                std::env::var("RUNWAY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        }
    }
}

/// Client for the Runway generate API.
pub struct RunwayClient {
    http: Client,
    config: ProviderConfig,
}

impl RunwayClient {
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        Self::new(ProviderConfig::from_env())
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Request a generation. Returns the provider's JSON response verbatim.
    pub async fn generate(
        &self,
        prompt: &str,
        image_url: Option<&str>,
    ) -> ProviderResult<serde_json::Value> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::NotConfigured("RUNWAY_API_KEY not set".to_string()))?;

        let request = GenerateRequest {
            prompt: prompt.to_string(),
            image_url: image_url.map(str::to_string),
        };

        debug!("Sending generate request to {}", self.config.api_url);

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Runway API returned {}: {}", status, body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ProviderConfig {
        ProviderConfig {
            api_url: format!("{}/v1/generate", server.uri()),
            api_key: Some("test-key".to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.api_key.is_none());
    }

    #[tokio::test]
    async fn test_generate_posts_prompt_and_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/generate"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_json(serde_json::json!({
                "prompt": "A dragon",
                "image_url": "https://img/1.png"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "gen_1"})))
            .mount(&server)
            .await;

        let client = RunwayClient::new(config_for(&server)).unwrap();
        let result = client.generate("A dragon", Some("https://img/1.png")).await.unwrap();
        assert_eq!(result["id"], "gen_1");
    }

    #[tokio::test]
    async fn test_text_only_omits_image_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({"prompt": "A dragon"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = RunwayClient::new(config_for(&server)).unwrap();
        tokio_test::assert_ok!(client.generate("A dragon", None).await);
    }

    #[tokio::test]
    async fn test_error_status_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = RunwayClient::new(config_for(&server)).unwrap();
        let err = client.generate("A dragon", None).await.unwrap_err();
        assert!(matches!(&err, ProviderError::Api { status: 503, body } if body == "overloaded"));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = RunwayClient::new(config_for(&server)).unwrap();
        let err = client.generate("A dragon", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_missing_key() {
        let client = RunwayClient::new(ProviderConfig::default()).unwrap();
        assert!(!client.is_configured());
        let err = client.generate("A dragon", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
