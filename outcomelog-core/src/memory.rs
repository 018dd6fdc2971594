//! ## outcomelog-core::memory
//! Backend that keeps every dispatched record in memory.
//!
//! Clones share one buffer, so a test can hand one clone to an
//! [`OutcomeLogger`](crate::OutcomeLogger) and inspect the other.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::backend::{Backend, Record};
use crate::outcome::Outcome;
use crate::severity::Severity;

/// Owned copy of a dispatched [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedRecord {
    #[serde(rename = "level")]
    pub severity: Severity,
    pub pkg: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&Record<'_>> for CapturedRecord {
    fn from(record: &Record<'_>) -> Self {
        Self {
            severity: record.severity,
            pkg: record.pkg.to_string(),
            outcome: record.outcome.clone(),
            message: record.message.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far, oldest first.
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    pub fn last(&self) -> Option<CapturedRecord> {
        self.records.lock().last().cloned()
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// One JSON object per captured record.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let records = self.records.lock();
        let mut out = String::new();
        for record in records.iter() {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl Backend for MemoryBackend {
    fn dispatch(&self, record: &Record<'_>) {
        self.records.lock().push(CapturedRecord::from(record));
    }
}
