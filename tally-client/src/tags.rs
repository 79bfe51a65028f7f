//! Tag resolution
//!
//! Maps requested tag names to remote term ids, creating any term that does
//! not exist yet and re-reading the list afterwards so resolved ids always
//! come from the remote's current truth.

use crate::ResultsClient;
use crate::error::{ClientError, Result};
use crate::transport::{decode, encode};
use std::collections::{HashMap, HashSet};
use tally_core::domain::term::Term;
use tally_core::dto::hal::{CreateTerm, HalLinks, TERM_VOCABULARY, ValueItem};
use tally_core::dto::term::TermRecord;
use tracing::{debug, info};

impl ResultsClient {
    /// Resolves tag names to terms, creating any that do not exist yet.
    ///
    /// Names are treated as a set: duplicates resolve once and the returned
    /// list preserves first-occurrence order. When every name already
    /// exists this is a pure read with no write side effects. Two
    /// concurrent resolvers can still both create the same missing name;
    /// the remote is the arbiter of that race.
    ///
    /// Fails with [`ClientError::TagResolutionFailed`] when a name is still
    /// absent after creation and refresh.
    pub async fn resolve_tags(&self, names: &[String]) -> Result<Vec<Term>> {
        let mut known = self.fetch_tags().await?;

        let mut requested: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        for name in names {
            if seen.insert(name.as_str()) {
                requested.push(name.as_str());
            }
        }

        let missing: Vec<&str> = requested
            .iter()
            .copied()
            .filter(|name| !known.contains_key(*name))
            .collect();

        // One creation at a time keeps the refresh below consistent with
        // the diff above.
        for name in &missing {
            self.create_tag(name).await?;
        }

        if !missing.is_empty() {
            known = self.fetch_tags().await?;
        }

        requested
            .into_iter()
            .map(|name| {
                known
                    .get(name)
                    .map(|id| Term {
                        id: *id,
                        name: name.to_string(),
                    })
                    .ok_or_else(|| ClientError::TagResolutionFailed(name.to_string()))
            })
            .collect()
    }

    /// Fetches the current tag set as a name-to-id table.
    async fn fetch_tags(&self) -> Result<HashMap<String, u64>> {
        debug!("fetching tags");
        let body = self.transport().get("tags").await?;
        let records: Vec<TermRecord> = decode(body, "tag listing")?;

        Ok(records
            .into_iter()
            .map(|record| (record.name, record.tid))
            .collect())
    }

    /// Creates one term in the tags vocabulary. The remote assigns the id.
    async fn create_tag(&self, name: &str) -> Result<()> {
        let document = CreateTerm {
            links: HalLinks::taxonomy_term(self.base_url()),
            name: vec![ValueItem {
                value: name.to_string(),
            }],
            vid: vec![ValueItem {
                value: TERM_VOCABULARY.to_string(),
            }],
        };

        self.transport()
            .post("entity/taxonomy_term", &encode(&document, "term document")?)
            .await?;
        info!("created tag '{}'", name);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use crate::transport::mock::{Call, MockTransport};
    use serde_json::json;
    use std::sync::Arc;

    fn mock_client() -> (Arc<MockTransport>, ResultsClient) {
        let transport = Arc::new(MockTransport::new());
        let config = Config::new("https://results.example.org", "ci", "secret").unwrap();
        let client = ResultsClient::with_transport(config, transport.clone());
        (transport, client)
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_existing_tags_resolve_without_writes() {
        let (transport, client) = mock_client();
        transport.stub_get(
            "tags",
            json!([
                { "tid": 1, "name": "postgres" },
                { "tid": 2, "name": "php8" }
            ]),
        );

        let terms = client.resolve_tags(&names(&["postgres", "php8"])).await.unwrap();

        assert_eq!(
            terms,
            vec![
                Term { id: 1, name: "postgres".to_string() },
                Term { id: 2, name: "php8".to_string() }
            ]
        );
        // Pure read: one listing fetch, no creations, no refresh.
        assert_eq!(transport.calls(), vec![Call::Get("tags".to_string())]);
    }

    #[tokio::test]
    async fn test_missing_tags_are_created_and_refetched() {
        let (transport, client) = mock_client();
        transport.stub_get(
            "tags",
            json!([
                { "tid": 1, "name": "a" },
                { "tid": 2, "name": "b" }
            ]),
        );
        transport.stub_get(
            "tags",
            json!([
                { "tid": 1, "name": "a" },
                { "tid": 2, "name": "b" },
                { "tid": 3, "name": "c" }
            ]),
        );

        let terms = client.resolve_tags(&names(&["b", "c"])).await.unwrap();

        assert_eq!(
            terms,
            vec![
                Term { id: 2, name: "b".to_string() },
                Term { id: 3, name: "c".to_string() }
            ]
        );

        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], Call::Get("tags".to_string()));
        match &calls[1] {
            Call::Post(path, body) => {
                assert_eq!(path, "entity/taxonomy_term");
                assert_eq!(body["name"], json!([{ "value": "c" }]));
                assert_eq!(body["vid"], json!([{ "value": "tags" }]));
            }
            other => panic!("expected term creation, got {:?}", other),
        }
        assert_eq!(calls[2], Call::Get("tags".to_string()));
    }

    #[tokio::test]
    async fn test_result_keys_match_request_exactly() {
        let (transport, client) = mock_client();
        transport.stub_get(
            "tags",
            json!([
                { "tid": 1, "name": "a" },
                { "tid": 2, "name": "b" },
                { "tid": 3, "name": "c" },
                { "tid": 4, "name": "d" }
            ]),
        );

        let terms = client.resolve_tags(&names(&["c", "a"])).await.unwrap();

        let resolved: Vec<&str> = terms.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(resolved, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_duplicate_names_resolve_once() {
        let (transport, client) = mock_client();
        transport.stub_get(
            "tags",
            json!([
                { "tid": 1, "name": "postgres" }
            ]),
        );

        let terms = client
            .resolve_tags(&names(&["postgres", "postgres"]))
            .await
            .unwrap();

        assert_eq!(terms.len(), 1);
        assert!(transport.writes().is_empty());
    }

    #[tokio::test]
    async fn test_unresolvable_tag_after_refresh_fails() {
        let (transport, client) = mock_client();
        // The refresh still misses "ghost": creation silently failed or a
        // concurrent mutation removed it.
        transport.stub_get("tags", json!([{ "tid": 1, "name": "a" }]));
        transport.stub_get("tags", json!([{ "tid": 1, "name": "a" }]));

        let err = client.resolve_tags(&names(&["ghost"])).await.unwrap_err();

        assert!(matches!(err, ClientError::TagResolutionFailed(name) if name == "ghost"));
    }
}
