//! Modules layer - Infrastructure components behind the feature services
//!
//! Contains the query cache and credential persistence.

pub mod query;
pub mod storage;
