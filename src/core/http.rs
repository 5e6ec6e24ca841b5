//! Shared HTTP client with retry logic for the generation endpoint.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use super::error::GenerationError;
use super::retry::RetryPolicy;

/// Configuration for HTTP client resilience
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Upper bound for a single attempt, connect through body
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}

/// JSON-over-HTTPS client that retries failed attempts per its [`RetryPolicy`].
pub struct HttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(
        config: HttpClientConfig,
        user_agent: Option<&str>,
    ) -> Result<Self, GenerationError> {
        let default_ua = format!("sanora-studio/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                GenerationError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// POST `body` as JSON and decode the success body as `Res`.
    ///
    /// The URL is kept out of logs and errors since it carries the API key.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, url, body),
        fields(max_attempts = self.config.retry.max_attempts),
        err
    )]
    pub async fn post_json<Req, Res>(&self, url: &str, body: &Req) -> Result<Res, GenerationError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        self.config
            .retry
            .run(|attempt| self.attempt(url, body, attempt))
            .await
    }

    async fn attempt<Req, Res>(
        &self,
        url: &str,
        body: &Req,
        attempt: u32,
    ) -> Result<Res, GenerationError>
    where
        Req: Serialize + ?Sized,
        Res: DeserializeOwned,
    {
        let max_attempts = self.config.retry.max_attempts;

        let res = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Network {
                message: format!("Request failed (attempt {attempt}/{max_attempts})"),
                source: Box::new(e.without_url()),
            })?;

        let status = res.status();
        if !status.is_success() {
            let error_text = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            debug!(attempt, status = %status, body = %error_text, "API returned error status");

            return Err(GenerationError::Api {
                message: format!("API returned {status}"),
                status_code: status.as_u16(),
            });
        }

        debug!(attempt, status = %status, "HTTP request successful");

        let response_text = res.text().await.map_err(|e| GenerationError::Parse {
            message: "Failed to read response body".to_string(),
            source: Box::new(e.without_url()),
        })?;

        serde_json::from_str(&response_text).map_err(|e| GenerationError::Parse {
            message: "Failed to parse API response".to_string(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::retry::RetryMode;
    use serde_json::{Value, json};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn fast_client(mode: RetryMode) -> HttpClient {
        let config = HttpClientConfig {
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::default()
                .with_base_delay(Duration::from_millis(5))
                .with_mode(mode),
        };
        HttpClient::new(config, None).expect("Failed to create client")
    }

    #[tokio::test]
    async fn test_retry_logic() {
        let server = MockServer::start().await;
        let client = fast_client(RetryMode::Uniform);

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let result: Value = client
            .post_json(&format!("{}/generate", server.uri()), &json!({}))
            .await
            .expect("Client should succeed after retries");

        assert_eq!(result["ok"], true);
    }

    #[tokio::test]
    async fn test_fatal_errors_401_in_transient_mode() {
        let server = MockServer::start().await;
        let client = fast_client(RetryMode::TransientOnly);

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .expect(1)
            .mount(&server)
            .await;

        let result: Result<Value, _> = client
            .post_json(&format!("{}/generate", server.uri()), &json!({}))
            .await;

        match result {
            Err(GenerationError::Api {
                status_code: 401, ..
            }) => (),
            other => panic!("Expected 401 Api Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_retried() {
        let server = MockServer::start().await;
        let client = fast_client(RetryMode::Uniform);

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": 1 })))
            .mount(&server)
            .await;

        let result: Value = client
            .post_json(&format!("{}/generate", server.uri()), &json!({}))
            .await
            .unwrap();

        assert_eq!(result["ok"], 1);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_connection_refused_exhausts_with_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/generate", listener.local_addr().unwrap());
        drop(listener);

        let client = fast_client(RetryMode::Uniform);
        let result: Result<Value, _> = client.post_json(&url, &json!({})).await;

        match result {
            Err(GenerationError::Exhausted { attempts: 5, last }) => {
                assert!(matches!(*last, GenerationError::Network { .. }));
            }
            other => panic!("Expected exhaustion, got {other:?}"),
        }
    }
}
