//! Core layer - configuration, errors and the HTTP pipeline every service shares

pub mod config;
pub mod error;
pub mod http_client;
pub mod navigation;
pub mod resource;
