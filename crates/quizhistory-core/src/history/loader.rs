use std::sync::Arc;

use tracing::debug;

use crate::api::ScoreService;
use crate::cache::AttemptCache;
use crate::models::AttemptRecord;
use crate::report::ErrorReporter;

/// Where a loaded history came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistorySource {
    Local,
    Remote,
    /// Both sources were empty or failed
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedHistory {
    pub attempts: Vec<AttemptRecord>,
    pub source: HistorySource,
}

/// Decides per request whether the local cache or the remote service is
/// trusted. A non-empty cache always wins and the remote is never asked;
/// the two are never merged.
pub struct HistoryLoader<L, R> {
    local: L,
    remote: R,
    reporter: Arc<dyn ErrorReporter>,
    write_back: bool,
}

impl<L: AttemptCache, R: ScoreService> HistoryLoader<L, R> {
    pub fn new(local: L, remote: R, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            local,
            remote,
            reporter,
            write_back: false,
        }
    }

    /// Copy successful remote results into the local cache.
    ///
    /// The first load shows the remote list in the order it arrived. Later
    /// loads are served from the cache, which yields ascending `date`, so the
    /// same history can come back in a different order.
    pub fn with_write_back(mut self, enabled: bool) -> Self {
        self.write_back = enabled;
        self
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Cached attempts, or `None` on a cache miss.
    pub async fn try_local(&self) -> Option<Vec<AttemptRecord>> {
        let attempts = self.local.get_all().await;
        if attempts.is_empty() {
            debug!("Local attempt cache miss");
            None
        } else {
            debug!(count = attempts.len(), "Local attempt cache hit");
            Some(attempts)
        }
    }

    /// One remote read. Failures are reported and yield an empty list.
    pub async fn try_remote(&self) -> Vec<AttemptRecord> {
        match self.remote.fetch_attempts().await {
            Ok(attempts) => attempts,
            Err(e) => {
                debug!(error = %e, "Failed to fetch attempts from remote");
                self.reporter.report(&e);
                Vec::new()
            }
        }
    }

    pub async fn load(&self) -> LoadedHistory {
        if let Some(attempts) = self.try_local().await {
            return LoadedHistory {
                attempts,
                source: HistorySource::Local,
            };
        }

        let attempts = self.try_remote().await;
        if attempts.is_empty() {
            return LoadedHistory {
                attempts,
                source: HistorySource::Empty,
            };
        }

        if self.write_back {
            if let Err(e) = self.local.put_all(&attempts).await {
                debug!(error = %e, "Failed to write remote attempts to local cache");
                self.reporter.report(&e);
            }
        }

        LoadedHistory {
            attempts,
            source: HistorySource::Remote,
        }
    }

    /// The user's attempt history. Never fails; worst case is empty.
    pub async fn load_attempts(&self) -> Vec<AttemptRecord> {
        self.load().await.attempts
    }
}
