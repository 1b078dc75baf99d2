//! Storage module for persisted credentials
//!
//! Provides the cookie/local-storage pair that keeps the session token and
//! user profile across restarts.

mod credential_store;

pub use credential_store::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, SyncedCredentialStore,
    TOKEN_KEY, USER_KEY,
};
