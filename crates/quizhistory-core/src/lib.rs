//! Core library for quizhistory.
//!
//! Provides the local-first quiz attempt history: a device-local attempt
//! cache, a client for the remote scoring service, the policy choosing
//! between them, pagination over the result, and the score write path.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod report;

pub use api::{ScoreService, ScoringClient};
pub use auth::{Session, SessionData};
pub use cache::{AttemptCache, LocalAttemptStore};
pub use config::Config;
pub use error::HistoryError;
pub use history::{HistoryLoader, HistoryPager, Page, ScoreRecorder, ITEMS_PER_PAGE};
pub use models::{AttemptRecord, ScoreRecord};
pub use report::{CollectingReporter, ErrorReporter, TracingReporter};
