use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A score persisted by the remote service. `id`, `user_id` and `created_at`
/// are assigned server-side from the caller's session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: String,
    pub user_id: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

/// Body of the score write request. Carries no user identity.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SaveScoreRequest {
    pub score: u32,
}
