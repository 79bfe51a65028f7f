//! Workflow state domain types

use serde::{Deserialize, Serialize};

/// A workflow state defined on the results site.
///
/// States drive build progression. The full set is remote-defined and is
/// fetched fresh on every resolution, keyed by machine name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Remote id referenced by `target_id` fields.
    pub id: u64,
    /// Human-readable display name.
    pub label: String,
    /// Progress through the workflow, 0-100.
    pub percentage: u8,
}

impl WorkflowState {
    /// Renders the completion percentage for display, e.g. `"40%"`.
    pub fn percentage_label(&self) -> String {
        format!("{}%", self.percentage)
    }
}
