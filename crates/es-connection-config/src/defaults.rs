// crates/es-connection-config/src/defaults.rs
// ============================================================================
// Module: Default Application
// Description: Applies the effective model's environment default directives.
// Purpose: Fill unset connection fields from the environment or fallbacks.
// Dependencies: es-connection-core, serde
// ============================================================================

//! ## Overview
//! Only fields whose directive is active in the model's scope are touched,
//! and only when the user left them unset. An empty environment variable
//! counts as unset. Environment access goes through [`EnvSource`] so callers
//! and tests control what is visible.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;

use es_connection_core::DefaultDirective;
use es_connection_core::EffectiveModel;
use es_connection_core::FallbackValue;
use es_connection_core::FieldName;
use es_connection_core::FieldType;
use serde::Serialize;

use crate::config::ConfigError;
use crate::config::ConnectionConfig;

// ============================================================================
// SECTION: Environment Sources
// ============================================================================

/// Read-only view of environment variables.
pub trait EnvSource: Send + Sync {
    /// Returns the value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// Fixed in-memory environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    /// Variables by name.
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the environment with `name` set to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

// ============================================================================
// SECTION: Applied Defaults
// ============================================================================

/// Where an injected value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultOrigin {
    /// The directive's environment variable.
    Env,
    /// The directive's literal fallback.
    Fallback,
}

/// Record of one injected default. Never carries the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedDefault {
    /// Field that received a value.
    pub field: FieldName,
    /// Source of the value.
    pub origin: DefaultOrigin,
    /// Environment variable the directive names.
    pub env_var: &'static str,
}

/// Connection values after default application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultedConnection {
    /// Connection values including injected defaults.
    pub config: ConnectionConfig,
    /// Defaults injected, in catalog order.
    pub applied: Vec<AppliedDefault>,
}

/// Typed value ready to assign to a field.
enum FieldValue {
    /// String value.
    Text(String),
    /// Boolean value.
    Bool(bool),
    /// List value.
    List(Vec<String>),
}

// ============================================================================
// SECTION: Application
// ============================================================================

/// Applies the active default directives of `model` to unset fields.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when an environment value cannot be
/// parsed as the field's type. The message names the variable, never the
/// value.
pub fn apply_defaults(
    config: &ConnectionConfig,
    model: &EffectiveModel,
    env: &dyn EnvSource,
) -> Result<DefaultedConnection, ConfigError> {
    let mut resolved = config.clone();
    let mut applied = Vec::new();
    for field in model.fields() {
        let DefaultDirective::Env {
            var,
            fallback,
        } = field.default
        else {
            continue;
        };
        if resolved.is_set(field.name) {
            continue;
        }
        let (value, origin) = match env.var(var).filter(|value| !value.is_empty()) {
            Some(raw) => (parse_env_value(field.field_type, var, &raw)?, DefaultOrigin::Env),
            None => match fallback {
                Some(literal) => {
                    (fallback_value(field.field_type, field.name, literal)?, DefaultOrigin::Fallback)
                }
                None => continue,
            },
        };
        assign(&mut resolved, field.name, value)?;
        applied.push(AppliedDefault {
            field: field.name,
            origin,
            env_var: var,
        });
    }
    Ok(DefaultedConnection {
        config: resolved,
        applied,
    })
}

/// Parses an environment value as `field_type`.
fn parse_env_value(field_type: FieldType, var: &str, raw: &str) -> Result<FieldValue, ConfigError> {
    match field_type {
        FieldType::String => Ok(FieldValue::Text(raw.to_string())),
        FieldType::Bool => parse_bool(raw)
            .map(FieldValue::Bool)
            .ok_or_else(|| ConfigError::Invalid(format!("{var} must be a boolean"))),
        FieldType::StringList => Ok(FieldValue::List(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        )),
    }
}

/// Accepts the boolean spellings operators already use for these variables.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Converts a catalog fallback literal into a value of `field_type`.
fn fallback_value(
    field_type: FieldType,
    field: FieldName,
    literal: FallbackValue,
) -> Result<FieldValue, ConfigError> {
    match (field_type, literal) {
        (FieldType::Bool, FallbackValue::Bool(value)) => Ok(FieldValue::Bool(value)),
        (FieldType::String, FallbackValue::Text(value)) => Ok(FieldValue::Text(value.to_string())),
        _ => Err(ConfigError::Invalid(format!("fallback for {field} does not match its type"))),
    }
}

/// Stores `value` in `field`.
fn assign(config: &mut ConnectionConfig, field: FieldName, value: FieldValue) -> Result<(), ConfigError> {
    match (field, value) {
        (FieldName::Username, FieldValue::Text(value)) => config.username = Some(value),
        (FieldName::Password, FieldValue::Text(value)) => config.password = Some(value),
        (FieldName::ApiKey, FieldValue::Text(value)) => config.api_key = Some(value),
        (FieldName::Endpoints, FieldValue::List(value)) => config.endpoints = Some(value),
        (FieldName::Insecure, FieldValue::Bool(value)) => config.insecure = Some(value),
        (FieldName::CaFile, FieldValue::Text(value)) => config.ca_file = Some(value),
        (FieldName::CaData, FieldValue::Text(value)) => config.ca_data = Some(value),
        (FieldName::CertFile, FieldValue::Text(value)) => config.cert_file = Some(value),
        (FieldName::CertData, FieldValue::Text(value)) => config.cert_data = Some(value),
        (FieldName::KeyFile, FieldValue::Text(value)) => config.key_file = Some(value),
        (FieldName::KeyData, FieldValue::Text(value)) => config.key_data = Some(value),
        (field, _) => {
            return Err(ConfigError::Invalid(format!("default for {field} does not match its type")));
        }
    }
    Ok(())
}
