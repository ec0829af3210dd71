use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::HistoryError;
use crate::models::AttemptRecord;
use crate::report::ErrorReporter;

/// Database file name (without extension) inside the cache directory
pub const DATABASE_NAME: &str = "QuizDatabase";

/// Name of the keyed attempt collection
pub const STORE_ATTEMPTS: &str = "attempts";

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Read side of the local attempt cache.
#[async_trait]
pub trait AttemptCache: Send + Sync {
    /// Every cached attempt. Failures are reported and yield an empty list.
    async fn get_all(&self) -> Vec<AttemptRecord>;

    /// Insert or replace attempts by `date`.
    async fn put_all(&self, attempts: &[AttemptRecord]) -> Result<(), HistoryError>;
}

#[async_trait]
impl<T: AttemptCache + ?Sized> AttemptCache for Arc<T> {
    async fn get_all(&self) -> Vec<AttemptRecord> {
        (**self).get_all().await
    }

    async fn put_all(&self, attempts: &[AttemptRecord]) -> Result<(), HistoryError> {
        (**self).put_all(attempts).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct DatabaseFile {
    version: u32,
    #[serde(default)]
    stores: BTreeMap<String, Vec<AttemptRecord>>,
}

impl DatabaseFile {
    fn with_attempts(attempts: Vec<AttemptRecord>) -> Self {
        let mut stores = BTreeMap::new();
        stores.insert(STORE_ATTEMPTS.to_string(), attempts);
        Self {
            version: SCHEMA_VERSION,
            stores,
        }
    }
}

type AttemptMap = BTreeMap<DateTime<Utc>, AttemptRecord>;

/// Process-wide handle to the on-device attempt database.
///
/// Obtain it once with [`LocalAttemptStore::initialize`] and reuse it. A
/// handle whose database could not be opened stays usable and behaves as an
/// empty cache.
pub struct LocalAttemptStore {
    path: PathBuf,
    /// `None` when the database could not be opened
    attempts: Mutex<Option<AttemptMap>>,
    reporter: Arc<dyn ErrorReporter>,
}

impl LocalAttemptStore {
    /// Open the database in `dir`, creating it on first use.
    pub fn open(dir: &Path, reporter: Arc<dyn ErrorReporter>) -> Result<Self, HistoryError> {
        let path = Self::database_path(dir);
        let attempts = Self::open_database(dir, &path)
            .map_err(|e| HistoryError::StoreUnavailable(format!("{:#}", e)))?;

        debug!(path = %path.display(), count = attempts.len(), "Opened local attempt store");

        Ok(Self {
            path,
            attempts: Mutex::new(Some(attempts)),
            reporter,
        })
    }

    /// Like [`open`](Self::open), but a failure is reported and an
    /// unavailable handle is returned instead.
    pub fn initialize(dir: &Path, reporter: Arc<dyn ErrorReporter>) -> Self {
        match Self::open(dir, reporter.clone()) {
            Ok(store) => store,
            Err(e) => {
                reporter.report(&e);
                Self {
                    path: Self::database_path(dir),
                    attempts: Mutex::new(None),
                    reporter,
                }
            }
        }
    }

    pub fn database_path(dir: &Path) -> PathBuf {
        dir.join(format!("{}.json", DATABASE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn len(&self) -> usize {
        self.attempts.lock().await.as_ref().map(|a| a.len()).unwrap_or(0)
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn put(&self, attempt: AttemptRecord) -> Result<(), HistoryError> {
        self.put_all(std::slice::from_ref(&attempt)).await
    }

    fn open_database(dir: &Path, path: &Path) -> anyhow::Result<AttemptMap> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create store directory: {}", dir.display()))?;

        if !path.exists() {
            Self::write_database(path, &DatabaseFile::with_attempts(Vec::new()))?;
            return Ok(AttemptMap::new());
        }

        let contents = std::fs::read_to_string(path).context("Failed to read attempt database")?;
        let mut db: DatabaseFile =
            serde_json::from_str(&contents).context("Failed to parse attempt database")?;

        if db.version > SCHEMA_VERSION {
            bail!(
                "Database version {} is newer than supported version {}",
                db.version,
                SCHEMA_VERSION
            );
        }

        if db.version < SCHEMA_VERSION || !db.stores.contains_key(STORE_ATTEMPTS) {
            debug!(from = db.version, to = SCHEMA_VERSION, "Upgrading attempt database");
            db.version = SCHEMA_VERSION;
            db.stores.entry(STORE_ATTEMPTS.to_string()).or_default();
            Self::write_database(path, &db)?;
        }

        let records = db.stores.remove(STORE_ATTEMPTS).unwrap_or_default();
        // Later duplicates of a date replace earlier ones
        Ok(records
            .into_iter()
            .filter(|r| {
                if !r.is_valid() {
                    warn!(date = %r.date, "Ignoring cached attempt with no questions");
                }
                r.is_valid()
            })
            .map(|r| (r.date, r))
            .collect())
    }

    fn write_database(path: &Path, db: &DatabaseFile) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(db)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write attempt database: {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to replace attempt database: {}", path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl AttemptCache for LocalAttemptStore {
    async fn get_all(&self) -> Vec<AttemptRecord> {
        match self.attempts.lock().await.as_ref() {
            Some(attempts) => attempts.values().cloned().collect(),
            None => {
                let err = HistoryError::StoreUnavailable("store was not opened".to_string());
                debug!(path = %self.path.display(), "Reading from unavailable attempt store");
                self.reporter.report(&err);
                Vec::new()
            }
        }
    }

    async fn put_all(&self, attempts: &[AttemptRecord]) -> Result<(), HistoryError> {
        let mut guard = self.attempts.lock().await;
        let current = guard
            .as_ref()
            .ok_or_else(|| HistoryError::StoreUnavailable("store was not opened".to_string()))?;

        let mut updated = current.clone();
        for attempt in attempts {
            if !attempt.is_valid() {
                warn!(date = %attempt.date, "Skipping attempt with no questions");
                continue;
            }
            updated.insert(attempt.date, attempt.clone());
        }

        let db = DatabaseFile::with_attempts(updated.values().cloned().collect());
        Self::write_database(&self.path, &db)
            .map_err(|e| HistoryError::StoreUnavailable(format!("{:#}", e)))?;

        *guard = Some(updated);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
