//! HTTP collaborator
//!
//! All network traffic goes through the [`Transport`] trait: verb-level
//! requests against paths relative to the configured base URL. The
//! production implementation is reqwest-backed and applies basic auth and
//! the HAL media type on every exchange; tests substitute a recording mock.

use crate::config::Config;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Media type of every results-site exchange.
const HAL_JSON: &str = "application/hal+json";

/// Verb-level HTTP operations against the results site
///
/// Paths are relative to the base URL and carry no leading slash. Transport
/// concerns (connection handling, timeouts, TLS) belong to the
/// implementation; the core imposes no retry policy of its own.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET path`, returning the parsed JSON body.
    async fn get(&self, path: &str) -> Result<Value>;

    /// `POST path` with a HAL document body, returning the `Location`
    /// response header if the remote sent one.
    async fn post(&self, path: &str, body: &Value) -> Result<Option<String>>;

    /// `PATCH path` with a HAL document body.
    async fn patch(&self, path: &str, body: &Value) -> Result<()>;
}

/// Decodes a JSON body into typed records.
pub(crate) fn decode<T: DeserializeOwned>(body: Value, what: &str) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| ClientError::ParseError(format!("failed to parse {what}: {e}")))
}

/// Serializes a HAL document into the erased body the transport carries.
pub(crate) fn encode<T: Serialize>(document: &T, what: &str) -> Result<Value> {
    serde_json::to_value(document)
        .map_err(|e| ClientError::ParseError(format!("failed to serialize {what}: {e}")))
}

/// reqwest-backed [`Transport`]
///
/// Every request authenticates with the configured basic auth credentials;
/// reads send `Accept: application/hal+json`, writes send the matching
/// `Content-type`.
pub struct HttpTransport {
    config: Config,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a default reqwest client.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Creates a transport with a custom reqwest client.
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(config: Config, client: Client) -> Self {
        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    /// Turns a non-success status into an error carrying the response text.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        Ok(response)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(self.config.username(), Some(self.config.password()))
            .header(ACCEPT, HAL_JSON)
            .send()
            .await?;
        let response = Self::check(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("failed to parse body of {url}: {e}")))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Option<String>> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .basic_auth(self.config.username(), Some(self.config.password()))
            .header(CONTENT_TYPE, HAL_JSON)
            .body(body.to_string())
            .send()
            .await?;
        let response = Self::check(response).await?;

        Ok(response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string))
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<()> {
        let url = self.url(path);
        debug!("PATCH {}", url);

        let response = self
            .client
            .patch(&url)
            .basic_auth(self.config.username(), Some(self.config.password()))
            .header(CONTENT_TYPE, HAL_JSON)
            .body(body.to_string())
            .send()
            .await?;
        Self::check(response).await?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording transport for unit tests
    //!
    //! Scripts GET responses per path and records every call so tests can
    //! assert exact request counts and write bodies.

    use super::Transport;
    use crate::error::Result;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// One recorded transport call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Get(String),
        Post(String, Value),
        Patch(String, Value),
    }

    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<HashMap<String, VecDeque<Value>>>,
        location: Mutex<Option<String>>,
        calls: Mutex<Vec<Call>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a response for `GET path`. Multiple stubs for the same
        /// path are served in order; the last one repeats.
        pub fn stub_get(&self, path: &str, body: Value) {
            self.responses
                .lock()
                .unwrap()
                .entry(path.to_string())
                .or_default()
                .push_back(body);
        }

        /// Sets the `Location` header returned by every POST.
        pub fn stub_location(&self, location: &str) {
            *self.location.lock().unwrap() = Some(location.to_string());
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// The mutating calls only (POST and PATCH).
        pub fn writes(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|call| !matches!(call, Call::Get(_)))
                .collect()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, path: &str) -> Result<Value> {
            self.calls.lock().unwrap().push(Call::Get(path.to_string()));

            let mut responses = self.responses.lock().unwrap();
            let queue = responses
                .get_mut(path)
                .unwrap_or_else(|| panic!("no stubbed response for GET {path}"));

            if queue.len() > 1 {
                Ok(queue.pop_front().unwrap())
            } else {
                Ok(queue.front().cloned().unwrap())
            }
        }

        async fn post(&self, path: &str, body: &Value) -> Result<Option<String>> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Post(path.to_string(), body.clone()));

            Ok(self.location.lock().unwrap().clone())
        }

        async fn patch(&self, path: &str, body: &Value) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Patch(path.to_string(), body.clone()));

            Ok(())
        }
    }
}
