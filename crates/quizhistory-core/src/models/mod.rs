//! Data models for quiz history.
//!
//! - `AttemptRecord`: one quiz attempt as cached on the device
//! - `ScoreRecord`: one persisted score owned by a user on the remote service

pub mod attempt;
pub mod score;

pub use attempt::AttemptRecord;
pub use score::{SaveScoreRequest, ScoreRecord};
