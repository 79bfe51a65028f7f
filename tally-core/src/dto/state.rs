//! State listing wire records

use serde::{Deserialize, Serialize};

/// One entry of the `GET states` listing.
///
/// Field names match the remote serialization verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    pub tid: u64,
    pub name: String,
    pub field_machine: String,
    pub field_percentage: u8,
}
