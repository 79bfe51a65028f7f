//! Wire-format records and HAL documents
//!
//! Shapes exchanged with the results site REST interface. The list
//! endpoints return flat records; writes are HAL documents carrying a
//! `_links.type` envelope plus the fields being set.

pub mod hal;
pub mod state;
pub mod term;
