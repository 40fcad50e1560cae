//! Wire-form document envelope.
//!
//! Command documents arrive as JSON in one of two schema families:
//! v1.x carries a `runtimeConfig` mapping of plugin name to
//! configuration, v2.x carries an ordered `mainSteps` list. Plugin
//! settings, inputs and parameter defaults are kept as raw
//! [`serde_json::Value`] trees until parameter substitution runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameter value type for a plain string.
pub const PARAM_TYPE_STRING: &str = "String";
/// Parameter value type for a list of strings.
pub const PARAM_TYPE_STRING_LIST: &str = "StringList";
/// Parameter value type for a string-keyed map.
pub const PARAM_TYPE_STRING_MAP: &str = "StringMap";

/// A standard command document (v1.x or v2.x).
///
/// `runtime_config` is a sorted map, so v1.x plugin emission order is
/// deterministic by plugin name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommandContent {
    pub schema_version: String,
    pub description: String,
    pub parameters: BTreeMap<String, Parameter>,
    pub runtime_config: BTreeMap<String, PluginConfig>,
    pub main_steps: Vec<CommandStep>,
}

/// A parameter declared by the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Parameter {
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(rename = "default")]
    pub default_value: Value,
    pub description: String,
    pub allowed_values: Vec<String>,
    pub allowed_pattern: String,
}

/// One `runtimeConfig` entry (v1.x).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    pub settings: Value,
    pub properties: Value,
}

/// One `mainSteps` entry (v2.x).
///
/// `max_attempts`, `timeout_seconds` and `on_failure` are passed
/// through to the plugin untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommandStep {
    pub action: String,
    pub name: String,
    pub inputs: Value,
    pub settings: Value,
    #[serde(rename = "precondition")]
    pub preconditions: BTreeMap<String, Vec<String>>,
    pub max_attempts: i64,
    pub timeout_seconds: i64,
    pub on_failure: String,
}

/// A session document describing an interactive stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionContent {
    pub schema_version: String,
    pub description: String,
    pub session_type: String,
    pub inputs: SessionInputs,
    pub properties: Value,
    pub parameters: BTreeMap<String, Parameter>,
}

/// Session document inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionInputs {
    pub s3_bucket_name: String,
    pub s3_key_prefix: String,
    pub s3_encryption_enabled: bool,
    pub cloud_watch_log_group_name: String,
    pub cloud_watch_encryption_enabled: bool,
    pub kms_key_id: String,
}
