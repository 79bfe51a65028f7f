//! Workflow state resolution
//!
//! States are defined on the results site and keyed by machine name. Every
//! resolution re-fetches the full list, so remote additions and removals
//! are observed immediately; nothing is cached across calls.

use crate::ResultsClient;
use crate::error::{ClientError, Result};
use crate::transport::decode;
use std::collections::HashMap;
use tally_core::domain::state::WorkflowState;
use tally_core::dto::state::StateRecord;
use tracing::debug;

impl ResultsClient {
    /// Fetches the full workflow table, keyed by machine name.
    pub async fn workflow_states(&self) -> Result<HashMap<String, WorkflowState>> {
        debug!("fetching workflow states");
        let body = self.transport().get("states").await?;
        let records: Vec<StateRecord> = decode(body, "state listing")?;

        Ok(records
            .into_iter()
            .map(|record| {
                (
                    record.field_machine,
                    WorkflowState {
                        id: record.tid,
                        label: record.name,
                        percentage: record.field_percentage,
                    },
                )
            })
            .collect())
    }

    /// Resolves a workflow state machine-name to its remote id.
    ///
    /// Fails with [`ClientError::StateNotFound`] when the name is absent
    /// from the remote list at call time.
    pub async fn resolve_state(&self, machine_name: &str) -> Result<u64> {
        let states = self.workflow_states().await?;

        states
            .get(machine_name)
            .map(|state| state.id)
            .ok_or_else(|| ClientError::StateNotFound(machine_name.to_string()))
    }
}
