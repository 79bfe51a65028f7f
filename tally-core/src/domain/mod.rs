//! Core domain types
//!
//! Client-facing representations of the entities managed on the results
//! site. The remote serialization of each entity lives in [`crate::dto`].

pub mod state;
pub mod term;
