//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with summaries within the domain layer, while the underlying
//! persistence details remain in the `entity_api` crate.
pub use entity_api::{
    key_metrics, language, resolution_status, sentiment, summaries,
    summary::{Page, MAX_OFFSET},
    Id,
};

pub mod error;
pub mod prompt;
pub mod summary;
pub mod validation;

pub mod gateway;
