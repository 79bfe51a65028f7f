//! HAL document payloads
//!
//! Every write against the results site is a HAL document: a `_links.type`
//! envelope naming the remote bundle, plus the fields being set. Each
//! document carries only the fields its operation targets; the remote
//! merges at field level.

use serde::Serialize;
use serde_json::Value;

/// Machine name of the content type holding build records.
pub const NODE_BUNDLE: &str = "result";

/// Machine name of the taxonomy vocabulary holding tags.
pub const TERM_VOCABULARY: &str = "tags";

/// The `_links` envelope carried by every write.
#[derive(Debug, Clone, Serialize)]
pub struct HalLinks {
    #[serde(rename = "type")]
    pub bundle: TypeLink,
}

/// Link to the remote type definition of the target bundle.
#[derive(Debug, Clone, Serialize)]
pub struct TypeLink {
    pub href: String,
}

impl HalLinks {
    /// Envelope for build-record (node) writes.
    pub fn node(base_url: &str) -> Self {
        Self {
            bundle: TypeLink {
                href: format!("{}rest/type/node/{}", base_url, NODE_BUNDLE),
            },
        }
    }

    /// Envelope for taxonomy-term writes.
    pub fn taxonomy_term(base_url: &str) -> Self {
        Self {
            bundle: TypeLink {
                href: format!("{}rest/type/taxonomy_term/{}", base_url, TERM_VOCABULARY),
            },
        }
    }
}

/// Single-value field item, serialized as `{"value": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ValueItem {
    pub value: String,
}

/// Entity-reference field item, serialized as `{"target_id": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct TargetItem {
    pub target_id: u64,
}

/// Body of `POST entity/node`: a build record in its initial state.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBuild {
    #[serde(rename = "_links")]
    pub links: HalLinks,
    pub title: Vec<ValueItem>,
    pub field_state: Vec<TargetItem>,
}

/// Body of `PATCH node/{id}` setting the workflow state.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateState {
    #[serde(rename = "_links")]
    pub links: HalLinks,
    pub field_state: Vec<TargetItem>,
}

/// Body of `PATCH node/{id}` replacing the artefacts payload.
///
/// The payload is whatever the caller supplied, forwarded untouched.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateArtefacts {
    #[serde(rename = "_links")]
    pub links: HalLinks,
    pub field_artefacts: Value,
}

/// Body of `PATCH node/{id}` setting the summary text.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSummary {
    #[serde(rename = "_links")]
    pub links: HalLinks,
    pub field_summary: Vec<ValueItem>,
}

/// Body of `PATCH node/{id}` replacing the tag reference list.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTags {
    #[serde(rename = "_links")]
    pub links: HalLinks,
    pub field_tags: Vec<TargetItem>,
}

/// Body of `POST entity/taxonomy_term`: a new tag in the configured
/// vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTerm {
    #[serde(rename = "_links")]
    pub links: HalLinks,
    pub name: Vec<ValueItem>,
    pub vid: Vec<ValueItem>,
}
