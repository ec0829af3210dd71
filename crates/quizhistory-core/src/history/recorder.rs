use tracing::{info, warn};

use crate::api::ScoreService;
use crate::auth::Session;
use crate::error::HistoryError;
use crate::models::ScoreRecord;

/// Appends scores for the signed-in user to the remote service.
///
/// Fails closed: without a live session carrying a user identity nothing is
/// sent and `Unauthorized` is returned. Never writes to the local cache.
pub struct ScoreRecorder<R> {
    service: R,
}

impl<R: ScoreService> ScoreRecorder<R> {
    pub fn new(service: R) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &R {
        &self.service
    }

    pub async fn record(&self, session: &Session, score: u32) -> Result<ScoreRecord, HistoryError> {
        let Some(identity) = session.identity() else {
            warn!("Refusing to record score without an authenticated session");
            return Err(HistoryError::Unauthorized);
        };

        let saved = self.service.save_score(&identity.token, score).await?;
        if saved.user_id != identity.user_id {
            warn!(
                expected = %identity.user_id,
                actual = %saved.user_id,
                "Recorded score belongs to a different user than the session"
            );
        }

        info!(id = %saved.id, score = saved.score, "Recorded score");
        Ok(saved)
    }
}
