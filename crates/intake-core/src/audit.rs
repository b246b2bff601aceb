//! Per-request audit trail.
//!
//! Every processed request produces one [`AuditRecord`]: the request id, the
//! number of validation issues, and whether the checklist passed. Sinks are
//! best-effort; the pipeline logs a failed write and carries on.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{IntakeError, Result};

/// Overall outcome of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub fn from_ok(ok: bool) -> Self {
        if ok { Self::Pass } else { Self::Fail }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        })
    }
}

/// One audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub issue_count: usize,
    pub outcome: Outcome,
}

impl AuditRecord {
    pub fn new(request_id: impl Into<String>, issue_count: usize, outcome: Outcome) -> Self {
        Self {
            request_id: request_id.into(),
            timestamp: Utc::now(),
            issue_count,
            outcome,
        }
    }

    /// Single-line rendering used by [`FileAuditSink`].
    pub fn to_line(&self) -> String {
        format!(
            "{} request_id={} issues={} outcome={}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.request_id,
            self.issue_count,
            self.outcome
        )
    }
}

/// Destination for audit records.
pub trait AuditSink: Send + Sync {
    /// Record one entry.
    fn record(&self, record: &AuditRecord) -> Result<()>;
}

/// Appends one line per record to a file.
pub struct FileAuditSink {
    path: PathBuf,
    // Serializes appends so concurrent requests never interleave a line
    lock: Mutex<()>,
}

impl FileAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| IntakeError::Audit("audit log lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.to_line())?;

        Ok(())
    }
}

/// Emits each record as a tracing event on the `intake::audit` target.
#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<()> {
        info!(
            target: "intake::audit",
            request_id = %record.request_id,
            issues = record.issue_count,
            outcome = %record.outcome,
            "request audited"
        );
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records so far.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| IntakeError::Audit("audit buffer lock poisoned".to_string()))?
            .push(record.clone());
        Ok(())
    }
}

/// Fans a record out to several sinks. Every sink is attempted; the first
/// error is returned.
pub struct MultiAuditSink {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl MultiAuditSink {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }
}

impl AuditSink for MultiAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.record(record) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_line_contains_required_facts() {
        let record = AuditRecord::new("req-1", 3, Outcome::Fail);
        let line = record.to_line();
        assert!(line.contains("request_id=req-1"));
        assert!(line.contains("issues=3"));
        assert!(line.ends_with("outcome=FAIL"));
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileAuditSink::new(dir.path().join("logs").join("audit.log"));

        sink.record(&AuditRecord::new("a", 0, Outcome::Pass)).unwrap();
        sink.record(&AuditRecord::new("b", 2, Outcome::Fail)).unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("request_id=a issues=0 outcome=PASS"));
        assert!(lines[1].contains("request_id=b issues=2 outcome=FAIL"));
    }

    #[test]
    fn test_file_sink_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for appending
        let sink = FileAuditSink::new(dir.path());
        assert!(sink.record(&AuditRecord::new("a", 0, Outcome::Pass)).is_err());
    }

    #[test]
    fn test_multi_sink_attempts_every_sink() {
        let dir = tempfile::tempdir().unwrap();
        let memory = Arc::new(MemoryAuditSink::new());
        let multi = MultiAuditSink::new(vec![
            Arc::new(FileAuditSink::new(dir.path())) as Arc<dyn AuditSink>,
            memory.clone(),
        ]);

        assert!(multi.record(&AuditRecord::new("a", 0, Outcome::Pass)).is_err());
        assert_eq!(memory.records().len(), 1);
    }

    #[test]
    fn test_outcome_serialization() {
        assert_eq!(serde_json::to_string(&Outcome::Pass).unwrap(), "\"PASS\"");
        assert_eq!(Outcome::from_ok(false), Outcome::Fail);
    }
}
