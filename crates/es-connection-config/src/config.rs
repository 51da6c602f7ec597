// crates/es-connection-config/src/config.rs
// ============================================================================
// Module: Connection Configuration
// Description: Connection block values, loading, and constraint validation.
// Purpose: Enforce the effective model's cross-field rules on user input.
// Dependencies: es-connection-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! A connection file holds at most one `[[elasticsearch_connection]]` block.
//! Values are checked against an [`EffectiveModel`]: every active requires
//! edge and every conflicts edge. All violations are reported together with
//! the offending field paths. Sensitive values never reach error text or
//! debug output.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use es_connection_core::EffectiveModel;
use es_connection_core::FieldName;
use es_connection_core::catalog;
use es_connection_core::field_path;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "es-connection.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "ES_CONNECTION_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Attribute key of the connection block.
pub const DEFAULT_BLOCK_KEY: &str = "elasticsearch_connection";
/// Maximum number of connection blocks.
pub const MAX_CONNECTION_BLOCKS: usize = 1;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Values of a single connection block. Unset fields are `None`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Basic-auth username.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// API key.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Cluster endpoints including scheme and port.
    #[serde(default)]
    pub endpoints: Option<Vec<String>>,
    /// Disables TLS certificate validation.
    #[serde(default)]
    pub insecure: Option<bool>,
    /// Path to a custom CA certificate.
    #[serde(default)]
    pub ca_file: Option<String>,
    /// Inline PEM CA certificate.
    #[serde(default)]
    pub ca_data: Option<String>,
    /// Path to a client certificate.
    #[serde(default)]
    pub cert_file: Option<String>,
    /// Inline PEM client certificate.
    #[serde(default)]
    pub cert_data: Option<String>,
    /// Path to a client private key.
    #[serde(default)]
    pub key_file: Option<String>,
    /// Inline PEM client private key.
    #[serde(default)]
    pub key_data: Option<String>,
}

impl ConnectionConfig {
    /// Returns true when `field` has a value.
    #[must_use]
    pub const fn is_set(&self, field: FieldName) -> bool {
        match field {
            FieldName::Username => self.username.is_some(),
            FieldName::Password => self.password.is_some(),
            FieldName::ApiKey => self.api_key.is_some(),
            FieldName::Endpoints => self.endpoints.is_some(),
            FieldName::Insecure => self.insecure.is_some(),
            FieldName::CaFile => self.ca_file.is_some(),
            FieldName::CaData => self.ca_data.is_some(),
            FieldName::CertFile => self.cert_file.is_some(),
            FieldName::CertData => self.cert_data.is_some(),
            FieldName::KeyFile => self.key_file.is_some(),
            FieldName::KeyData => self.key_data.is_some(),
        }
    }

    /// Returns the set fields in catalog order.
    #[must_use]
    pub fn set_fields(&self) -> Vec<FieldName> {
        FieldName::ALL.into_iter().filter(|field| self.is_set(*field)).collect()
    }

    /// Returns the value of `field` for debug rendering.
    fn debug_value(&self, field: FieldName) -> &dyn fmt::Debug {
        match field {
            FieldName::Username => &self.username,
            FieldName::Password => &self.password,
            FieldName::ApiKey => &self.api_key,
            FieldName::Endpoints => &self.endpoints,
            FieldName::Insecure => &self.insecure,
            FieldName::CaFile => &self.ca_file,
            FieldName::CaData => &self.ca_data,
            FieldName::CertFile => &self.cert_file,
            FieldName::CertData => &self.cert_data,
            FieldName::KeyFile => &self.key_file,
            FieldName::KeyData => &self.key_data,
        }
    }

    /// Returns violations of value-level rules that do not involve other fields.
    fn value_violations(&self) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();
        for (field, value) in [
            (FieldName::CaFile, &self.ca_file),
            (FieldName::CertFile, &self.cert_file),
            (FieldName::KeyFile, &self.key_file),
        ] {
            if let Some(reason) = value.as_deref().and_then(path_value_problem) {
                violations.push(ConstraintViolation::InvalidValue {
                    field,
                    reason,
                });
            }
        }
        if let Some(endpoints) = &self.endpoints
            && endpoints.iter().any(|endpoint| endpoint.trim().is_empty())
        {
            violations.push(ConstraintViolation::InvalidValue {
                field: FieldName::Endpoints,
                reason: "entries must be non-empty",
            });
        }
        violations
    }
}

/// Placeholder printed for sensitive values.
struct Redacted;

impl fmt::Debug for Redacted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("ConnectionConfig");
        for spec in catalog().fields() {
            if spec.sensitive && self.is_set(spec.name) {
                out.field(spec.name.as_str(), &Redacted);
            } else {
                out.field(spec.name.as_str(), self.debug_value(spec.name));
            }
        }
        out.finish()
    }
}

/// Parsed connection file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionFile {
    /// Connection blocks; at most [`MAX_CONNECTION_BLOCKS`] are accepted.
    #[serde(default)]
    pub elasticsearch_connection: Vec<ConnectionConfig>,
}

impl ConnectionFile {
    /// Loads a connection file from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses a connection file from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the TOML is malformed or has
    /// unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Returns the single connection block, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Constraint`] when more than one block is present.
    pub fn connection(&self) -> Result<Option<&ConnectionConfig>, ConfigError> {
        let count = self.elasticsearch_connection.len();
        if count > MAX_CONNECTION_BLOCKS {
            return Err(ConfigError::Constraint(ConstraintViolations::new(
                DEFAULT_BLOCK_KEY,
                vec![ConstraintViolation::TooManyBlocks {
                    count,
                }],
            )));
        }
        Ok(self.elasticsearch_connection.first())
    }

    /// Validates the file against `model`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when block cardinality, values, or cross-field
    /// constraints are violated.
    pub fn validate(&self, model: &EffectiveModel) -> Result<(), ConfigError> {
        match self.connection()? {
            Some(config) => validate_connection(config, model, DEFAULT_BLOCK_KEY),
            None => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Single rule violation within a connection block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintViolation {
    /// `field` holds a malformed value. The value itself is never recorded.
    InvalidValue {
        /// Offending field.
        field: FieldName,
        /// What is wrong with the value.
        reason: &'static str,
    },
    /// `field` is set without its required partner.
    MissingRequired {
        /// Field that is set.
        field: FieldName,
        /// Field that must also be set.
        requires: FieldName,
    },
    /// Two mutually exclusive fields are both set.
    Conflict {
        /// Field carrying the rule.
        field: FieldName,
        /// Field it excludes.
        conflicts_with: FieldName,
    },
    /// More connection blocks than allowed.
    TooManyBlocks {
        /// Number of blocks supplied.
        count: usize,
    },
}

impl ConstraintViolation {
    /// Returns the short kind label used in audit events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidValue {
                ..
            } => "invalid_value",
            Self::MissingRequired {
                ..
            } => "missing_required",
            Self::Conflict {
                ..
            } => "conflict",
            Self::TooManyBlocks {
                ..
            } => "too_many_blocks",
        }
    }

    /// Renders the violation with field paths under `block_key`.
    #[must_use]
    pub fn describe(&self, block_key: &str) -> String {
        match self {
            Self::InvalidValue {
                field,
                reason,
            } => format!("{} {reason}", field_path(block_key, *field)),
            Self::MissingRequired {
                field,
                requires,
            } => format!(
                "{} requires {} to also be set",
                field_path(block_key, *field),
                field_path(block_key, *requires)
            ),
            Self::Conflict {
                field,
                conflicts_with,
            } => format!(
                "{} conflicts with {}",
                field_path(block_key, *field),
                field_path(block_key, *conflicts_with)
            ),
            Self::TooManyBlocks {
                count,
            } => format!("{block_key} accepts at most {MAX_CONNECTION_BLOCKS} block, found {count}"),
        }
    }
}

/// Every violation found in one block, with the block key used for paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintViolations {
    /// Attribute key of the block.
    block_key: String,
    /// Violations in detection order.
    violations: Vec<ConstraintViolation>,
}

impl ConstraintViolations {
    /// Creates a violation set for `block_key`.
    #[must_use]
    pub fn new(block_key: impl Into<String>, violations: Vec<ConstraintViolation>) -> Self {
        Self {
            block_key: block_key.into(),
            violations,
        }
    }

    /// Returns the violations.
    #[must_use]
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    /// Returns the block key.
    #[must_use]
    pub fn block_key(&self) -> &str {
        &self.block_key
    }
}

impl fmt::Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&violation.describe(&self.block_key))?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Connection configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Cross-field constraint violations.
    #[error("invalid connection: {0}")]
    Constraint(ConstraintViolations),
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Returns every violation of `config` under `model`: malformed values
/// first, then requires edges, then conflicts.
///
/// Conflicts are reported once per pair, in the direction the graph
/// declares first.
#[must_use]
pub fn check_connection(config: &ConnectionConfig, model: &EffectiveModel) -> Vec<ConstraintViolation> {
    let mut violations = config.value_violations();
    for edge in model.requires_edges() {
        if config.is_set(edge.field) && !config.is_set(edge.requires) {
            violations.push(ConstraintViolation::MissingRequired {
                field: edge.field,
                requires: edge.requires,
            });
        }
    }
    violations.extend(check_conflicts(config, model));
    violations
}

/// Returns every conflicts-edge violation of `config` under `model`.
///
/// Used on its own after defaults are applied, where requires edges no
/// longer apply but conflicts still do.
#[must_use]
pub fn check_conflicts(config: &ConnectionConfig, model: &EffectiveModel) -> Vec<ConstraintViolation> {
    let mut violations = Vec::new();
    let mut reported = BTreeSet::new();
    for edge in model.conflicts_edges() {
        if !(config.is_set(edge.field) && config.is_set(edge.conflicts_with)) {
            continue;
        }
        let pair = if edge.field < edge.conflicts_with {
            (edge.field, edge.conflicts_with)
        } else {
            (edge.conflicts_with, edge.field)
        };
        if reported.insert(pair) {
            violations.push(ConstraintViolation::Conflict {
                field: edge.field,
                conflicts_with: edge.conflicts_with,
            });
        }
    }
    violations
}

/// Validates one connection block against `model`.
///
/// # Errors
///
/// Returns [`ConfigError::Constraint`] listing every malformed value and
/// cross-field violation.
pub fn validate_connection(
    config: &ConnectionConfig,
    model: &EffectiveModel,
    block_key: &str,
) -> Result<(), ConfigError> {
    let violations = check_connection(config, model);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Constraint(ConstraintViolations::new(block_key, violations)))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from an explicit path or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Checks a path-valued field against length constraints.
fn path_value_problem(value: &str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("must be non-empty");
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Some("exceeds max length");
    }
    Path::new(trimmed)
        .components()
        .any(|component| component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH)
        .then_some("path component too long")
}
