//! Schema-dispatched document parsing.
//!
//! Parsing runs in two stages. First the common gate: schema version
//! check, parameter merge, store-reference validation, then `{{ name }}`
//! substitution and store resolution through every step's settings and
//! inputs. Then dispatch by schema family: v1.x documents emit one
//! plugin per `runtimeConfig` entry, v2.x documents emit `mainSteps`
//! in source order, and session documents emit the single
//! standard-stream plugin.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::document::content::{CommandContent, SessionContent};
use crate::document::error::ParseError;
use crate::document::parameters::{merged_parameters, replace_parameters};
use crate::document::paramstore::ParameterStore;
use crate::document::state::{
    CloudWatchConfig, Configuration, DocState, DocumentInfo, DocumentType, IoConfiguration,
    ParserInfo, PluginState,
};
use crate::log::Logger;
use crate::paths::{build_path, build_s3_path};
use crate::version;
use crate::{log_debug, log_info};

/// Schema versions this agent accepts.
pub const SUPPORTED_DOCUMENT_VERSIONS: &[&str] =
    &["1.0", "1.2", "2.0", "2.0.1", "2.0.2", "2.0.3", "2.2"];

/// First schema version with step preconditions.
const PRECONDITION_SCHEMA_VERSION: &str = "2.2";

/// Plugin that services interactive session streams.
pub const STANDARD_STREAM_PLUGIN: &str = "Standard_Stream";

/// Capability trait over the document content families.
///
/// The transport deserializes the envelope into the concrete content
/// type and hands it to [`initialize_doc_state`] through this trait;
/// the assembler never inspects the family itself.
pub trait DocumentContent {
    /// The document's declared schema version.
    fn schema_version(&self) -> &str;

    /// Document-level output routing derived from the request context.
    fn io_configuration(&self, parser_info: &ParserInfo) -> IoConfiguration;

    /// Parses the content into an ordered plugin-step plan.
    fn parse_document(
        &self,
        logger: &Arc<dyn Logger>,
        info: &DocumentInfo,
        parser_info: &ParserInfo,
        params: &HashMap<String, Value>,
        store: &dyn ParameterStore,
    ) -> Result<Vec<PluginState>, ParseError>;
}

/// Assembles the executable state of a document.
pub fn initialize_doc_state(
    logger: &Arc<dyn Logger>,
    document_type: DocumentType,
    content: &dyn DocumentContent,
    info: DocumentInfo,
    parser_info: &ParserInfo,
    params: &HashMap<String, Value>,
    store: &dyn ParameterStore,
) -> Result<DocState, ParseError> {
    let plugins = content.parse_document(logger, &info, parser_info, params, store)?;
    Ok(DocState {
        schema_version: content.schema_version().to_string(),
        document_type,
        io_config: content.io_configuration(parser_info),
        document_information: info,
        plugins,
    })
}

impl DocumentContent for CommandContent {
    fn schema_version(&self) -> &str {
        &self.schema_version
    }

    fn io_configuration(&self, parser_info: &ParserInfo) -> IoConfiguration {
        IoConfiguration {
            orchestration_directory: parser_info.orchestration_dir.clone(),
            output_s3_bucket_name: parser_info.s3_bucket.clone(),
            output_s3_key_prefix: parser_info.s3_prefix.clone(),
            cloudwatch_config: parser_info.cloudwatch_config.clone(),
        }
    }

    fn parse_document(
        &self,
        logger: &Arc<dyn Logger>,
        _info: &DocumentInfo,
        parser_info: &ParserInfo,
        params: &HashMap<String, Value>,
        store: &dyn ParameterStore,
    ) -> Result<Vec<PluginState>, ParseError> {
        validate_schema(&self.schema_version)?;

        let merged = merged_parameters(logger, params, &self.parameters);
        log_info!(logger, "validating parameter-store references");
        store
            .validate_references(&self.parameters, &merged)
            .map_err(|e| ParseError::InvalidParameters(e.to_string()))?;

        let substituted = substitute_content(self, &merged, logger, store)?;
        parse_command_content(&substituted, parser_info)
    }
}

impl DocumentContent for SessionContent {
    fn schema_version(&self) -> &str {
        &self.schema_version
    }

    fn io_configuration(&self, parser_info: &ParserInfo) -> IoConfiguration {
        // Session documents route their CloudWatch destination through
        // the plugin configuration, not the document IO config.
        IoConfiguration {
            orchestration_directory: parser_info.orchestration_dir.clone(),
            output_s3_bucket_name: parser_info.s3_bucket.clone(),
            output_s3_key_prefix: parser_info.s3_prefix.clone(),
            cloudwatch_config: CloudWatchConfig::default(),
        }
    }

    fn parse_document(
        &self,
        _logger: &Arc<dyn Logger>,
        info: &DocumentInfo,
        parser_info: &ParserInfo,
        _params: &HashMap<String, Value>,
        _store: &dyn ParameterStore,
    ) -> Result<Vec<PluginState>, ParseError> {
        Ok(vec![session_plugin_state(
            parser_info,
            &info.document_id,
            &info.client_id,
        )])
    }
}

/// Rejects schema versions outside the supported set.
fn validate_schema(schema_version: &str) -> Result<(), ParseError> {
    if SUPPORTED_DOCUMENT_VERSIONS.contains(&schema_version) {
        Ok(())
    } else {
        Err(ParseError::UnsupportedSchema(schema_version.to_string()))
    }
}

/// Substitutes merged parameters and resolves store references through
/// every step's settings and inputs.
fn substitute_content(
    content: &CommandContent,
    merged: &HashMap<String, Value>,
    logger: &Arc<dyn Logger>,
    store: &dyn ParameterStore,
) -> Result<CommandContent, ParseError> {
    let mut substituted = content.clone();

    for config in substituted.runtime_config.values_mut() {
        log_debug!(logger, "resolving parameter-store references");
        config.settings = store.resolve(replace_parameters(&config.settings, merged, logger))?;
        config.properties =
            store.resolve(replace_parameters(&config.properties, merged, logger))?;
    }

    for step in substituted.main_steps.iter_mut() {
        log_debug!(logger, "resolving parameter-store references");
        step.settings = store.resolve(replace_parameters(&step.settings, merged, logger))?;
        step.inputs = store.resolve(replace_parameters(&step.inputs, merged, logger))?;
    }

    Ok(substituted)
}

/// Dispatches to the schema family's step extraction.
fn parse_command_content(
    content: &CommandContent,
    parser_info: &ParserInfo,
) -> Result<Vec<PluginState>, ParseError> {
    match content.schema_version.as_str() {
        "1.0" | "1.2" => parse_runtime_config(content, parser_info),
        "2.0" | "2.0.1" | "2.0.2" | "2.0.3" | "2.2" => parse_main_steps(content, parser_info),
        _ => Err(ParseError::UnsupportedSchema(
            content.schema_version.clone(),
        )),
    }
}

/// v1.x: one plugin per `runtimeConfig` entry, keyed by plugin name.
fn parse_runtime_config(
    content: &CommandContent,
    parser_info: &ParserInfo,
) -> Result<Vec<PluginState>, ParseError> {
    if content.runtime_config.is_empty() {
        return Err(ParseError::UnsupportedFormat);
    }

    let mut plugins = Vec::with_capacity(content.runtime_config.len());
    for (plugin_name, plugin_config) in &content.runtime_config {
        let configuration = Configuration {
            settings: plugin_config.settings.clone(),
            properties: plugin_config.properties.clone(),
            output_s3_bucket_name: parser_info.s3_bucket.clone(),
            output_s3_key_prefix: build_s3_path(&[&parser_info.s3_prefix, plugin_name]),
            orchestration_directory: build_path(&parser_info.orchestration_dir, &[plugin_name]),
            message_id: parser_info.message_id.clone(),
            document_id: parser_info.document_id.clone(),
            plugin_name: plugin_name.clone(),
            plugin_id: plugin_name.clone(),
            default_working_directory: parser_info.default_working_dir.clone(),
            ..Default::default()
        };
        plugins.push(PluginState {
            id: configuration.plugin_id.clone(),
            name: configuration.plugin_name.clone(),
            configuration,
        });
    }
    Ok(plugins)
}

/// v2.x: `mainSteps` in source order; plugin name is the action, id is
/// the step name.
fn parse_main_steps(
    content: &CommandContent,
    parser_info: &ParserInfo,
) -> Result<Vec<PluginState>, ParseError> {
    if content.main_steps.is_empty() {
        return Err(ParseError::UnsupportedFormat);
    }

    let is_precondition_enabled = is_precondition_enabled(&content.schema_version);

    let mut plugins = Vec::with_capacity(content.main_steps.len());
    for step in &content.main_steps {
        let plugin_name = step.action.clone();
        let configuration = Configuration {
            settings: step.settings.clone(),
            properties: step.inputs.clone(),
            output_s3_bucket_name: parser_info.s3_bucket.clone(),
            output_s3_key_prefix: build_s3_path(&[&parser_info.s3_prefix, &plugin_name]),
            orchestration_directory: build_path(&parser_info.orchestration_dir, &[&step.name]),
            message_id: parser_info.message_id.clone(),
            document_id: parser_info.document_id.clone(),
            plugin_name,
            plugin_id: step.name.clone(),
            preconditions: step.preconditions.clone(),
            is_precondition_enabled,
            default_working_directory: parser_info.default_working_dir.clone(),
            ..Default::default()
        };
        plugins.push(PluginState {
            id: configuration.plugin_id.clone(),
            name: configuration.plugin_name.clone(),
            configuration,
        });
    }
    Ok(plugins)
}

/// The single plugin state behind an interactive session.
fn session_plugin_state(
    parser_info: &ParserInfo,
    session_id: &str,
    client_id: &str,
) -> PluginState {
    let configuration = Configuration {
        message_id: parser_info.message_id.clone(),
        document_id: parser_info.document_id.clone(),
        plugin_name: STANDARD_STREAM_PLUGIN.to_string(),
        plugin_id: STANDARD_STREAM_PLUGIN.to_string(),
        default_working_directory: parser_info.default_working_dir.clone(),
        session_id: session_id.to_string(),
        client_id: client_id.to_string(),
        output_s3_bucket_name: parser_info.s3_bucket.clone(),
        output_s3_key_prefix: parser_info.s3_prefix.clone(),
        s3_encryption_enabled: parser_info.s3_encryption_enabled,
        orchestration_directory: build_path(
            &parser_info.orchestration_dir,
            &[STANDARD_STREAM_PLUGIN],
        ),
        cloud_watch_log_group: parser_info.cloudwatch_config.log_group_name.clone(),
        cloud_watch_encryption_enabled: parser_info
            .cloudwatch_config
            .log_group_encryption_enabled,
        ..Default::default()
    };
    PluginState {
        id: configuration.plugin_id.clone(),
        name: configuration.plugin_name.clone(),
        configuration,
    }
}

/// Preconditions apply from schema 2.2 onwards.
fn is_precondition_enabled(schema_version: &str) -> bool {
    version::compare(schema_version, PRECONDITION_SCHEMA_VERSION, false) != std::cmp::Ordering::Less
}

/// Splits a document name into name and version.
///
/// The version is the piece after the first `:` in the basename; the
/// returned name is the input minus its `:version` suffix, so a full
/// ARN prefix is preserved:
/// `arn:aws:ssm:us-east-1:1234:document/MyDoc:2` parses to
/// (`arn:aws:ssm:us-east-1:1234:document/MyDoc`, `2`).
pub fn parse_document_name_and_version(name: &str) -> (String, String) {
    if name.is_empty() {
        return (String::new(), String::new());
    }

    let base = name
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(name);
    let pieces: Vec<&str> = base.split(':').collect();
    let version = if pieces.len() > 1 {
        pieces[1].to_string()
    } else {
        String::new()
    };

    let suffix = format!(":{version}");
    let doc_name = name.strip_suffix(&suffix).unwrap_or(name).to_string();
    (doc_name, version)
}
