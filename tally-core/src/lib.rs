//! Tally Core
//!
//! Core types for the tally build-results client.
//!
//! This crate contains:
//! - Domain types: entities as callers see them (WorkflowState, Term)
//! - DTOs: wire-format records and HAL documents exchanged with the results site

pub mod domain;
pub mod dto;
