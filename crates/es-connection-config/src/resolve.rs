// crates/es-connection-config/src/resolve.rs
// ============================================================================
// Module: Connection Resolution
// Description: Validate-then-default pipeline for a connection block.
// Purpose: Produce final connection values for a scope with one audit event.
// Dependencies: es-connection-core
// ============================================================================

//! ## Overview
//! Resolution builds the effective model for the requested scope, validates
//! the user-supplied values against it, and only then injects defaults. A
//! value that came purely from a default therefore never trips a requires
//! check. Conflicts are checked again on the defaulted values, so an env
//! default that collides with a user value is rejected. Every call records
//! exactly one audit event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use es_connection_core::Scope;
use es_connection_core::build_effective_model;

use crate::audit::ConnectionAuditEvent;
use crate::audit::ConnectionAuditEventParams;
use crate::audit::ConnectionAuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::ResolutionOutcome;
use crate::config::ConfigError;
use crate::config::ConnectionConfig;
use crate::config::ConstraintViolations;
use crate::config::DEFAULT_BLOCK_KEY;
use crate::config::check_conflicts;
use crate::config::validate_connection;
use crate::defaults::DefaultedConnection;
use crate::defaults::EnvSource;
use crate::defaults::apply_defaults;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves connection blocks and audits each attempt.
#[derive(Clone)]
pub struct ConnectionResolver {
    /// Attribute key used in field paths.
    block_key: String,
    /// Destination for audit events.
    audit: Arc<dyn ConnectionAuditSink>,
}

impl Default for ConnectionResolver {
    fn default() -> Self {
        Self::new(Arc::new(NoopAuditSink))
    }
}

impl ConnectionResolver {
    /// Creates a resolver for the default block key.
    #[must_use]
    pub fn new(audit: Arc<dyn ConnectionAuditSink>) -> Self {
        Self {
            block_key: DEFAULT_BLOCK_KEY.to_string(),
            audit,
        }
    }

    /// Returns the resolver with a different block key.
    #[must_use]
    pub fn with_block_key(mut self, block_key: impl Into<String>) -> Self {
        self.block_key = block_key.into();
        self
    }

    /// Validates `config` for `scope`, then applies the scope's defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails, an environment
    /// default cannot be parsed, or a default conflicts with a set field.
    pub fn resolve(
        &self,
        config: &ConnectionConfig,
        scope: Scope,
        env: &dyn EnvSource,
    ) -> Result<DefaultedConnection, ConfigError> {
        let model = build_effective_model(scope);
        let result = validate_connection(config, &model, &self.block_key)
            .and_then(|()| apply_defaults(config, &model, env))
            .and_then(|resolved| {
                let conflicts = check_conflicts(&resolved.config, &model);
                if conflicts.is_empty() {
                    Ok(resolved)
                } else {
                    Err(ConfigError::Constraint(ConstraintViolations::new(&self.block_key, conflicts)))
                }
            });
        let (outcome, violations, error, defaults_applied) = match &result {
            Ok(resolved) => (ResolutionOutcome::Resolved, Vec::new(), None, resolved.applied.clone()),
            Err(ConfigError::Constraint(found)) => {
                (ResolutionOutcome::Rejected, found.violations().to_vec(), None, Vec::new())
            }
            Err(err) => (ResolutionOutcome::Rejected, Vec::new(), Some(err.to_string()), Vec::new()),
        };
        self.audit.record(&ConnectionAuditEvent::new(ConnectionAuditEventParams {
            scope,
            block_key: self.block_key.clone(),
            outcome,
            fields_set: config.set_fields(),
            violations,
            error,
            defaults_applied,
        }));
        result
    }
}
