//! Diagnostic channel for failures that are absorbed rather than surfaced.
//!
//! The local store and the history loader both swallow read-path failures.
//! They hand each one to an injected `ErrorReporter` so the failure is still
//! observable: logged in production, collected in tests.

use std::sync::Mutex;

use tracing::warn;

use crate::error::HistoryError;

pub trait ErrorReporter: Send + Sync {
    fn report(&self, error: &HistoryError);
}

/// Reports absorbed failures as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, error: &HistoryError) {
        warn!(error = %error, "Absorbed history failure");
    }
}

/// Keeps every reported failure in memory.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    errors: Mutex<Vec<HistoryError>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.errors.lock().map(|e| e.len()).unwrap_or_else(|p| p.into_inner().len())
    }

    pub fn errors(&self) -> Vec<HistoryError> {
        match self.errors.lock() {
            Ok(errors) => errors.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, error: &HistoryError) {
        let mut errors = self.errors.lock().unwrap_or_else(|p| p.into_inner());
        errors.push(error.clone());
    }
}
