//! Tag listing wire records

use serde::{Deserialize, Serialize};

/// One entry of the `GET tags` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRecord {
    pub tid: u64,
    pub name: String,
}
