//! Local attempt cache for offline history.
//!
//! This module provides the `LocalAttemptStore`, a keyed collection of
//! attempts persisted as a single versioned JSON database in the cache
//! directory. It only ever acts as a read cache: entries never expire and
//! are never reconciled with the remote service.

pub mod store;

pub use store::{AttemptCache, LocalAttemptStore, DATABASE_NAME, SCHEMA_VERSION, STORE_ATTEMPTS};
