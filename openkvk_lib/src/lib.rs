//! Library layer for OpenKVK: paged query execution, result reassembly and
//! named company lookups.
//!
//! Wraps the `openkvk_api` transport with a query engine that splits large
//! requests into pages the service accepts and merges the pages back into a
//! single result.

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod reassemble;
pub mod statement;
pub mod validation;

pub use openkvk_api;
pub use openkvk_api::types;
pub use openkvk_api::{FilterSet, MAX_ROWS, PAGE_LIMIT};

pub use client::KvkClient;
pub use config::EngineConfig;
pub use engine::QueryEngine;
pub use error::OpenKvkError;
pub use reassemble::{KvkResult, Record};
