//! Tally Client
//!
//! A client library that records the lifecycle of a continuous-integration
//! build as entities on a remote results site speaking HAL+JSON.
//!
//! A build is created in the `new` workflow state, progressed through the
//! remote-defined states by machine name, and enriched with artefacts, a
//! summary, and tags. State and tag names are resolved to remote ids on
//! every call (no caching); tags that do not exist yet are created on
//! demand.
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use tally_client::{Config, ResultsClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new("https://results.example.org", "ci-bot", "hunter2")?;
//!     let client = ResultsClient::new(config);
//!
//!     // The create response is the new record's Location; the node id is
//!     // its last path segment.
//!     let location = client.create_build("Build #42").await?;
//!     let build_id = location.rsplit('/').next().unwrap_or(&location);
//!
//!     client.progress(build_id, "testing").await?;
//!     client.set_artefacts(build_id, json!({ "phpunit": { "passed": 1312 } })).await?;
//!     client.set_summary(build_id, "All suites green").await?;
//!     client.set_tags(build_id, &["postgres".into(), "php8".into()]).await?;
//!     client.progress(build_id, "complete").await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod transport;

mod builds;
mod states;
mod tags;

// Re-export commonly used types
pub use config::Config;
pub use error::{ClientError, Result};
pub use tally_core::domain::state::WorkflowState;
pub use tally_core::domain::term::Term;

use std::fmt;
use std::sync::Arc;
use transport::{HttpTransport, Transport};

/// Client for the build-results site
///
/// Operations are organized into logical groups:
/// - Build record lifecycle (create, progress, artefacts, summary, tags)
/// - Workflow state resolution (machine name to remote id)
/// - Tag resolution (name to remote id, creating missing tags)
///
/// The client holds no state between calls beyond its configuration and
/// transport; every operation is a fresh round trip and the remote is the
/// sole source of truth.
pub struct ResultsClient {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl ResultsClient {
    /// Creates a client backed by the reqwest transport.
    pub fn new(config: Config) -> Self {
        let transport = Arc::new(HttpTransport::new(config.clone()));
        Self { config, transport }
    }

    /// Creates a client with a custom transport.
    ///
    /// The seam for substituting the HTTP collaborator, e.g. a recording
    /// mock in tests or a reqwest client with tuned timeouts wrapped in
    /// [`HttpTransport::with_client`].
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// The normalized endpoint URL, always ending in `/`.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

impl fmt::Debug for ResultsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = Config::new("https://results.example.org", "ci", "secret").unwrap();
        let client = ResultsClient::new(config);
        assert_eq!(client.base_url(), "https://results.example.org/");
    }

    #[test]
    fn test_client_debug_hides_credentials() {
        let config = Config::new("https://results.example.org", "ci", "hunter2").unwrap();
        let client = ResultsClient::new(config);

        assert!(!format!("{:?}", client).contains("hunter2"));
    }
}
