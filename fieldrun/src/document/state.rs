//! Executable document state emitted by the parser.
//!
//! The parser turns a wire-form envelope into a [`DocState`]: document
//! metadata plus an ordered list of [`PluginState`] entries, one per
//! plugin step, each carrying the full [`Configuration`] its plugin
//! needs to run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Kind of document being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// A remotely dispatched command document.
    SendCommand,
    /// A request to cancel a previously dispatched command.
    CancelCommand,
    /// A document applied by the association workflow.
    Association,
    /// An interactive session document.
    StartSession,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SendCommand => write!(f, "SendCommand"),
            Self::CancelCommand => write!(f, "CancelCommand"),
            Self::Association => write!(f, "Association"),
            Self::StartSession => write!(f, "StartSession"),
        }
    }
}

/// CloudWatch output destination for a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudWatchConfig {
    pub log_group_name: String,
    pub log_group_encryption_enabled: bool,
}

/// Request-scoped context the transport hands to the parser.
#[derive(Debug, Clone, Default)]
pub struct ParserInfo {
    pub orchestration_dir: PathBuf,
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_encryption_enabled: bool,
    pub message_id: String,
    pub document_id: String,
    pub default_working_dir: PathBuf,
    pub cloudwatch_config: CloudWatchConfig,
}

/// Identity of the document instance being executed.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub document_id: String,
    pub message_id: String,
    pub client_id: String,
    pub document_name: String,
    pub document_version: String,
    pub created_date: DateTime<Utc>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            document_id: String::new(),
            message_id: String::new(),
            client_id: String::new(),
            document_name: String::new(),
            document_version: String::new(),
            created_date: DateTime::UNIX_EPOCH,
        }
    }
}

/// Output routing shared by every step of a document.
#[derive(Debug, Clone, Default)]
pub struct IoConfiguration {
    pub orchestration_directory: PathBuf,
    pub output_s3_bucket_name: String,
    pub output_s3_key_prefix: String,
    pub cloudwatch_config: CloudWatchConfig,
}

/// Everything a plugin needs to execute one step.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    pub settings: Value,
    pub properties: Value,
    pub output_s3_bucket_name: String,
    pub output_s3_key_prefix: String,
    pub orchestration_directory: PathBuf,
    pub message_id: String,
    pub document_id: String,
    pub plugin_name: String,
    pub plugin_id: String,
    pub preconditions: BTreeMap<String, Vec<String>>,
    pub is_precondition_enabled: bool,
    pub default_working_directory: PathBuf,
    pub session_id: String,
    pub client_id: String,
    pub s3_encryption_enabled: bool,
    pub cloud_watch_log_group: String,
    pub cloud_watch_encryption_enabled: bool,
}

/// One parsed plugin step, ready for submission to the pool.
#[derive(Debug, Clone, Default)]
pub struct PluginState {
    pub id: String,
    pub name: String,
    pub configuration: Configuration,
}

/// Parsed document state: metadata plus the ordered plugin plan.
#[derive(Debug, Clone)]
pub struct DocState {
    pub schema_version: String,
    pub document_type: DocumentType,
    pub document_information: DocumentInfo,
    pub io_config: IoConfiguration,
    pub plugins: Vec<PluginState>,
}
