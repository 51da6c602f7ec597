// crates/es-connection-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for connection config tests.
// Purpose: Reduce duplication across integration tests for es-connection-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Mutex;

use es_connection_config::ConfigError;
use es_connection_config::ConnectionAuditEvent;
use es_connection_config::ConnectionAuditSink;
use es_connection_config::ConnectionConfig;
use es_connection_config::ConnectionFile;

/// Parses a TOML string and returns its single connection block.
pub fn connection_from_toml(toml_str: &str) -> Result<ConnectionConfig, String> {
    let file = ConnectionFile::from_toml_str(toml_str).map_err(|err| err.to_string())?;
    let block = file.connection().map_err(|err| err.to_string())?;
    block.cloned().ok_or_else(|| "missing connection block".to_string())
}

/// Returns a block with basic-auth credentials set.
pub fn basic_auth() -> ConnectionConfig {
    ConnectionConfig {
        username: Some("elastic".to_string()),
        password: Some("changeme".to_string()),
        ..ConnectionConfig::default()
    }
}

/// Assert that a result is an error whose message contains `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct RecordingSink {
    /// Recorded events.
    events: Mutex<Vec<ConnectionAuditEvent>>,
}

impl RecordingSink {
    /// Returns a snapshot of recorded events.
    pub fn events(&self) -> Vec<ConnectionAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl ConnectionAuditSink for RecordingSink {
    fn record(&self, event: &ConnectionAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
