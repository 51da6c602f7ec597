// crates/es-connection-config/src/audit.rs
// ============================================================================
// Module: Connection Audit Logging
// Description: Structured audit events for connection resolution.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: es-connection-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events describe which fields were set, which constraints failed,
//! and which defaults were injected. They carry field names and labels only;
//! connection values are never recorded. Sinks write JSON lines so
//! deployments can route events to their own logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use es_connection_core::FieldName;
use es_connection_core::Scope;
use serde::Serialize;

use crate::config::ConstraintViolation;
use crate::defaults::AppliedDefault;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Block validated and defaults applied.
    Resolved,
    /// Block rejected by value or constraint validation.
    Rejected,
}

/// Connection resolution audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Scope the block was resolved for.
    pub scope: Scope,
    /// Block attribute key.
    pub block_key: String,
    /// Resolution outcome.
    pub outcome: ResolutionOutcome,
    /// Fields supplied by the user.
    pub fields_set: Vec<FieldName>,
    /// Constraint violations, when rejected.
    pub violations: Vec<ConstraintViolation>,
    /// Error message for non-constraint rejections.
    pub error: Option<String>,
    /// Defaults injected, when resolved.
    pub defaults_applied: Vec<AppliedDefault>,
    /// Redaction classification for payload logging.
    pub redaction: &'static str,
}

/// Inputs for constructing a [`ConnectionAuditEvent`].
pub struct ConnectionAuditEventParams {
    /// Scope the block was resolved for.
    pub scope: Scope,
    /// Block attribute key.
    pub block_key: String,
    /// Resolution outcome.
    pub outcome: ResolutionOutcome,
    /// Fields supplied by the user.
    pub fields_set: Vec<FieldName>,
    /// Constraint violations.
    pub violations: Vec<ConstraintViolation>,
    /// Error message for non-constraint rejections.
    pub error: Option<String>,
    /// Defaults injected.
    pub defaults_applied: Vec<AppliedDefault>,
}

impl ConnectionAuditEvent {
    /// Creates a new connection audit event.
    #[must_use]
    pub fn new(params: ConnectionAuditEventParams) -> Self {
        Self {
            event: "connection_resolution",
            timestamp_ms: now_ms(),
            scope: params.scope,
            block_key: params.block_key,
            outcome: params.outcome,
            fields_set: params.fields_set,
            violations: params.violations,
            error: params.error,
            defaults_applied: params.defaults_applied,
            redaction: "values_omitted",
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for connection resolution events.
pub trait ConnectionAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ConnectionAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ConnectionAuditSink for StderrAuditSink {
    fn record(&self, event: &ConnectionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ConnectionAuditSink for FileAuditSink {
    fn record(&self, event: &ConnectionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ConnectionAuditSink for NoopAuditSink {
    fn record(&self, _event: &ConnectionAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |duration| duration.as_millis())
}
