// crates/es-connection-config/src/lib.rs
// ============================================================================
// Module: ES Connection Config Library
// Description: Connection block loading, validation, defaults, and audit.
// Purpose: Apply the effective connection model to user-supplied values.
// Dependencies: es-connection-core, serde, serde_json, thiserror, toml
// ============================================================================

//! ## Overview
//! `es-connection-config` is the consumer side of `es-connection-core`. It
//! loads a connection block, enforces the scope's requires and conflicts
//! rules with fail-closed errors, injects environment defaults where the
//! scope allows them, and records redacted audit events.
//!
//! Security posture: connection values may hold credentials and are never
//! written to errors, debug output, or audit events.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod config;
pub mod defaults;
pub mod resolve;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::ConnectionAuditEvent;
pub use audit::ConnectionAuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::ResolutionOutcome;
pub use audit::StderrAuditSink;
pub use config::*;
pub use defaults::AppliedDefault;
pub use defaults::DefaultOrigin;
pub use defaults::DefaultedConnection;
pub use defaults::EnvSource;
pub use defaults::MapEnv;
pub use defaults::ProcessEnv;
pub use defaults::apply_defaults;
pub use resolve::ConnectionResolver;
