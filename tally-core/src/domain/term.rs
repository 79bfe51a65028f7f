//! Taxonomy term domain types

use serde::{Deserialize, Serialize};

/// A taxonomy term (tag) on the results site.
///
/// Names are the stable key; ids are assigned by the remote when a term is
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Remote id referenced by `target_id` fields.
    pub id: u64,
    /// Unique term name.
    pub name: String,
}
