//! REST client module for the remote scoring service.
//!
//! This module provides the `ScoringClient` for reading a user's attempt
//! history and recording new scores. Both calls ride on the caller's
//! session token; the service derives the user identity from it.

pub mod client;

pub use client::{ScoreService, ScoringClient, FETCH_SCORES_PATH, SAVE_SCORE_PATH};
