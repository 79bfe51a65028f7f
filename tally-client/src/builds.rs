//! Build record operations
//!
//! Each operation issues exactly one mutating request; state and tag
//! resolution add reads in front of it. Updates are independent partial
//! patches: no read-modify-write merge happens locally and no optimistic
//! concurrency control is applied; the remote merges at field level.

use crate::ResultsClient;
use crate::error::{ClientError, Result};
use crate::transport::encode;
use serde_json::Value;
use tally_core::dto::hal::{
    CreateBuild, HalLinks, TargetItem, UpdateArtefacts, UpdateState, UpdateSummary, UpdateTags,
    ValueItem,
};
use tracing::info;

impl ResultsClient {
    /// Creates a build record in the `new` workflow state.
    ///
    /// Returns the created record's address from the `Location` response
    /// header; its last path segment is the node id the other operations
    /// take.
    pub async fn create_build(&self, title: &str) -> Result<String> {
        require_non_empty(title, "title")?;

        let state_id = self.resolve_state("new").await?;
        let document = CreateBuild {
            links: HalLinks::node(self.base_url()),
            title: vec![ValueItem {
                value: title.to_string(),
            }],
            field_state: vec![TargetItem {
                target_id: state_id,
            }],
        };

        info!("creating build '{}'", title);
        let location = self
            .transport()
            .post("entity/node", &encode(&document, "build document")?)
            .await?;

        location.ok_or_else(|| {
            ClientError::ParseError("create response carried no Location header".to_string())
        })
    }

    /// Advances a build to the named workflow state.
    pub async fn progress(&self, build_id: &str, state_machine_name: &str) -> Result<()> {
        require_non_empty(build_id, "build_id")?;
        require_non_empty(state_machine_name, "state_machine_name")?;

        let state_id = self.resolve_state(state_machine_name).await?;
        let document = UpdateState {
            links: HalLinks::node(self.base_url()),
            field_state: vec![TargetItem {
                target_id: state_id,
            }],
        };

        info!("progressing build {} to '{}'", build_id, state_machine_name);
        self.patch_build(build_id, &encode(&document, "state update")?)
            .await
    }

    /// Replaces a build's artefacts payload.
    ///
    /// The payload is forwarded verbatim; its internal structure is not
    /// validated, only rejected when empty (`null`, `""`, `[]`, `{}`).
    pub async fn set_artefacts(&self, build_id: &str, artefacts: Value) -> Result<()> {
        require_non_empty(build_id, "build_id")?;
        if artefacts_is_empty(&artefacts) {
            return Err(ClientError::InvalidArgument(
                "artefacts must not be empty".to_string(),
            ));
        }

        let document = UpdateArtefacts {
            links: HalLinks::node(self.base_url()),
            field_artefacts: artefacts,
        };

        info!("setting artefacts on build {}", build_id);
        self.patch_build(build_id, &encode(&document, "artefacts update")?)
            .await
    }

    /// Sets a build's summary text.
    pub async fn set_summary(&self, build_id: &str, text: &str) -> Result<()> {
        require_non_empty(build_id, "build_id")?;
        require_non_empty(text, "summary")?;

        let document = UpdateSummary {
            links: HalLinks::node(self.base_url()),
            field_summary: vec![ValueItem {
                value: text.to_string(),
            }],
        };

        info!("setting summary on build {}", build_id);
        self.patch_build(build_id, &encode(&document, "summary update")?)
            .await
    }

    /// Replaces a build's tag list, creating missing tags first.
    pub async fn set_tags(&self, build_id: &str, tag_names: &[String]) -> Result<()> {
        require_non_empty(build_id, "build_id")?;
        if tag_names.is_empty() {
            return Err(ClientError::InvalidArgument(
                "tag_names must not be empty".to_string(),
            ));
        }

        let tags = self.resolve_tags(tag_names).await?;
        let document = UpdateTags {
            links: HalLinks::node(self.base_url()),
            field_tags: tags
                .iter()
                .map(|tag| TargetItem { target_id: tag.id })
                .collect(),
        };

        info!("tagging build {} with {} tags", build_id, tags.len());
        self.patch_build(build_id, &encode(&document, "tags update")?)
            .await
    }

    async fn patch_build(&self, build_id: &str, body: &Value) -> Result<()> {
        self.transport()
            .patch(&format!("node/{}", build_id), body)
            .await
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ClientError::InvalidArgument(format!(
            "{field} must not be empty"
        )));
    }

    Ok(())
}

fn artefacts_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}
