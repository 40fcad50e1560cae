//! Integration tests for document parsing.
//!
//! These tests feed wire-form JSON envelopes through the full parsing
//! pipeline: schema gate, parameter merge, store validation,
//! substitution and schema-family dispatch.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};

use fieldrun::document::{
    initialize_doc_state, CloudWatchConfig, CommandContent, DocumentInfo, DocumentType,
    NullParameterStore, Parameter, ParameterStore, ParameterStoreError, ParseError, ParserInfo,
    SessionContent, STANDARD_STREAM_PLUGIN,
};
use fieldrun::log::{Logger, NoOpLogger};

// =============================================================================
// Test Helpers
// =============================================================================

fn test_logger() -> Arc<dyn Logger> {
    Arc::new(NoOpLogger)
}

fn parser_info() -> ParserInfo {
    ParserInfo {
        orchestration_dir: PathBuf::from("/var/lib/agent/orchestration/doc-1"),
        s3_bucket: "agent-output".to_string(),
        s3_prefix: "runs/doc-1".to_string(),
        s3_encryption_enabled: true,
        message_id: "message-1".to_string(),
        document_id: "doc-1".to_string(),
        default_working_dir: PathBuf::from("/home/agent"),
        cloudwatch_config: CloudWatchConfig {
            log_group_name: "agent-sessions".to_string(),
            log_group_encryption_enabled: true,
        },
    }
}

/// A store that resolves `{{ssm:...}}` references and rejects one key.
struct FakeParameterStore;

impl ParameterStore for FakeParameterStore {
    fn validate_references(
        &self,
        _declared: &BTreeMap<String, Parameter>,
        merged: &HashMap<String, Value>,
    ) -> Result<(), ParameterStoreError> {
        for value in merged.values() {
            if value == &json!("{{ssm:forbidden}}") {
                return Err(ParameterStoreError(
                    "reference to forbidden key".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn resolve(&self, value: Value) -> Result<Value, ParameterStoreError> {
        Ok(match value {
            Value::String(text) => json!(text.replace("{{ssm:secret}}", "resolved-secret")),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.resolve(item))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, item)| self.resolve(item).map(|resolved| (key, resolved)))
                    .collect::<Result<_, _>>()?,
            ),
            other => other,
        })
    }
}

// =============================================================================
// Integration Tests
// =============================================================================

#[test]
fn test_v22_document_with_platform_preconditions() {
    let raw = r#"{
        "schemaVersion": "2.2",
        "description": "Run a command on either platform",
        "mainSteps": [
            {
                "action": "aws:runShellScript",
                "name": "pluginLinux",
                "precondition": {"StringEquals": ["platformType", "Linux"]},
                "inputs": {"runCommand": ["echo Linux"]}
            },
            {
                "action": "aws:runPowerShellScript",
                "name": "pluginWindows",
                "precondition": {"StringEquals": ["platformType", "Windows"]},
                "inputs": {"runCommand": ["Write-Output Windows"]}
            }
        ]
    }"#;
    let content: CommandContent = serde_json::from_str(raw).unwrap();

    let doc_state = initialize_doc_state(
        &test_logger(),
        DocumentType::SendCommand,
        &content,
        DocumentInfo::default(),
        &parser_info(),
        &HashMap::new(),
        &NullParameterStore,
    )
    .unwrap();

    assert_eq!(doc_state.plugins.len(), 2);

    let linux = &doc_state.plugins[0];
    assert_eq!(linux.id, "pluginLinux");
    assert_eq!(linux.name, "aws:runShellScript");
    assert!(linux.configuration.is_precondition_enabled);
    assert_eq!(
        linux.configuration.preconditions.get("StringEquals"),
        Some(&vec!["platformType".to_string(), "Linux".to_string()])
    );

    let windows = &doc_state.plugins[1];
    assert_eq!(windows.id, "pluginWindows");
    assert_eq!(windows.name, "aws:runPowerShellScript");
    assert!(windows.configuration.is_precondition_enabled);
    assert_eq!(
        windows.configuration.preconditions.get("StringEquals"),
        Some(&vec!["platformType".to_string(), "Windows".to_string()])
    );
}

#[test]
fn test_v12_document_end_to_end_substitution() {
    let raw = r#"{
        "schemaVersion": "1.2",
        "parameters": {
            "message": {"type": "String", "default": "from-default"},
            "secret": {"type": "String", "default": "{{ssm:secret}}"}
        },
        "runtimeConfig": {
            "aws:runShellScript": {
                "properties": {
                    "runCommand": ["echo {{ message }}", "use {{ secret }}"]
                }
            }
        }
    }"#;
    let content: CommandContent = serde_json::from_str(raw).unwrap();

    let params = HashMap::from([("message".to_string(), json!("from-caller"))]);
    let doc_state = initialize_doc_state(
        &test_logger(),
        DocumentType::SendCommand,
        &content,
        DocumentInfo::default(),
        &parser_info(),
        &params,
        &FakeParameterStore,
    )
    .unwrap();

    assert_eq!(doc_state.plugins.len(), 1);
    let plugin = &doc_state.plugins[0];
    assert_eq!(plugin.id, "aws:runShellScript");
    assert_eq!(
        plugin.configuration.properties,
        json!({"runCommand": ["echo from-caller", "use resolved-secret"]})
    );
    assert_eq!(
        plugin.configuration.output_s3_key_prefix,
        "runs/doc-1/aws:runShellScript"
    );
    assert_eq!(
        plugin.configuration.orchestration_directory,
        PathBuf::from("/var/lib/agent/orchestration/doc-1").join("aws:runShellScript")
    );
}

#[test]
fn test_invalid_store_reference_rejects_document() {
    let raw = r#"{
        "schemaVersion": "2.2",
        "parameters": {
            "secret": {"type": "String", "default": "{{ssm:forbidden}}"}
        },
        "mainSteps": [
            {
                "action": "aws:runShellScript",
                "name": "step",
                "inputs": {"runCommand": ["use {{ secret }}"]}
            }
        ]
    }"#;
    let content: CommandContent = serde_json::from_str(raw).unwrap();

    let err = initialize_doc_state(
        &test_logger(),
        DocumentType::SendCommand,
        &content,
        DocumentInfo::default(),
        &parser_info(),
        &HashMap::new(),
        &FakeParameterStore,
    )
    .unwrap_err();

    assert!(matches!(err, ParseError::InvalidParameters(_)));
}

#[test]
fn test_unsupported_schema_rejects_document() {
    let content: CommandContent =
        serde_json::from_str(r#"{"schemaVersion": "3.0", "mainSteps": []}"#).unwrap();

    let err = initialize_doc_state(
        &test_logger(),
        DocumentType::SendCommand,
        &content,
        DocumentInfo::default(),
        &parser_info(),
        &HashMap::new(),
        &NullParameterStore,
    )
    .unwrap_err();

    assert!(matches!(err, ParseError::UnsupportedSchema(v) if v == "3.0"));
}

#[test]
fn test_session_document_end_to_end() {
    let raw = r#"{
        "schemaVersion": "1.0",
        "description": "Interactive session",
        "sessionType": "Standard_Stream",
        "inputs": {"s3BucketName": "session-logs"}
    }"#;
    let content: SessionContent = serde_json::from_str(raw).unwrap();

    let info = DocumentInfo {
        document_id: "session-42".to_string(),
        client_id: "client-7".to_string(),
        ..Default::default()
    };
    let doc_state = initialize_doc_state(
        &test_logger(),
        DocumentType::StartSession,
        &content,
        info,
        &parser_info(),
        &HashMap::new(),
        &NullParameterStore,
    )
    .unwrap();

    assert_eq!(doc_state.plugins.len(), 1);
    let config = &doc_state.plugins[0].configuration;
    assert_eq!(doc_state.plugins[0].id, STANDARD_STREAM_PLUGIN);
    assert_eq!(config.session_id, "session-42");
    assert_eq!(config.client_id, "client-7");
    assert_eq!(config.cloud_watch_log_group, "agent-sessions");
    assert!(config.cloud_watch_encryption_enabled);
    assert!(config.s3_encryption_enabled);
}
