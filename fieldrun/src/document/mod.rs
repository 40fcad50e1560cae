//! Command document parsing.
//!
//! Turns a wire-form document envelope into executable state:
//!
//! - [`content`]: serde model of the envelope (v1.x `runtimeConfig`,
//!   v2.x `mainSteps`, session documents)
//! - [`state`]: the emitted model ([`DocState`], [`PluginState`],
//!   [`Configuration`])
//! - [`parser`]: schema gate, parameter merge/substitution and the
//!   schema-family dispatch
//! - [`parameters`]: parameter validation and `{{ name }}` substitution
//! - [`paramstore`]: the external parameter-store seam
//!
//! The entry point is [`initialize_doc_state`].

pub mod content;
pub mod error;
pub mod parameters;
pub mod paramstore;
pub mod parser;
pub mod state;

pub use content::{
    CommandContent, CommandStep, Parameter, PluginConfig, SessionContent, SessionInputs,
};
pub use error::{ParameterStoreError, ParseError};
pub use parameters::{merged_parameters, parse_parameters, replace_parameters, valid_parameters};
pub use paramstore::{NullParameterStore, ParameterStore};
pub use parser::{
    initialize_doc_state, parse_document_name_and_version, DocumentContent,
    STANDARD_STREAM_PLUGIN, SUPPORTED_DOCUMENT_VERSIONS,
};
pub use state::{
    CloudWatchConfig, Configuration, DocState, DocumentInfo, DocumentType, IoConfiguration,
    ParserInfo, PluginState,
};
