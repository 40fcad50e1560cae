//! Parameter validation, merging and substitution.
//!
//! Documents reference parameters as `{{ name }}` inside plugin settings
//! and inputs. Substitution walks the value trees explicitly: a string
//! that consists of exactly one reference takes the parameter's full
//! (possibly non-string) value, any other occurrence interpolates
//! textually.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Value;

use crate::document::content::{
    Parameter, PARAM_TYPE_STRING, PARAM_TYPE_STRING_LIST, PARAM_TYPE_STRING_MAP,
};
use crate::log::Logger;
use crate::{log_debug, log_warn};

/// Filters out parameters with invalid names.
///
/// Valid names are non-empty and contain only ASCII alphanumerics,
/// `-`, `_` and `.`. Dropped entries are logged.
pub fn valid_parameters(
    logger: &Arc<dyn Logger>,
    params: &HashMap<String, Value>,
) -> HashMap<String, Value> {
    params
        .iter()
        .filter(|(name, _)| {
            if is_valid_parameter_name(name) {
                true
            } else {
                log_warn!(logger, "dropping parameter with invalid name {name:?}");
                false
            }
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Merges caller-supplied parameters with declared defaults.
///
/// Caller names are validated first; any declared parameter the caller
/// did not supply falls back to its declared default value.
pub fn merged_parameters(
    logger: &Arc<dyn Logger>,
    params: &HashMap<String, Value>,
    declared: &BTreeMap<String, Parameter>,
) -> HashMap<String, Value> {
    let mut merged = valid_parameters(logger, params);
    for (name, definition) in declared {
        merged
            .entry(name.clone())
            .or_insert_with(|| definition.default_value.clone());
    }
    merged
}

/// Replaces `{{ name }}` references throughout a value tree.
pub fn replace_parameters(
    value: &Value,
    params: &HashMap<String, Value>,
    logger: &Arc<dyn Logger>,
) -> Value {
    match value {
        Value::String(text) => substitute_string(text, params),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| replace_parameters(item, params, logger))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), replace_parameters(item, params, logger)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Converts wire-form parameter values into typed values using the
/// document's declared parameter types.
///
/// The transport delivers every parameter as a list of strings; the
/// declaration decides whether that is a single string, a string list
/// or a serialized map. Undeclared names and unknown types are dropped.
pub fn parse_parameters(
    logger: &Arc<dyn Logger>,
    raw: &HashMap<String, Vec<String>>,
    declared: &BTreeMap<String, Parameter>,
) -> HashMap<String, Value> {
    let mut result = HashMap::new();
    for (name, values) in raw {
        let Some(definition) = declared.get(name) else {
            continue;
        };
        match definition.param_type.as_str() {
            PARAM_TYPE_STRING | PARAM_TYPE_STRING_MAP => {
                if let Some(first) = values.first() {
                    result.insert(name.clone(), Value::String(first.clone()));
                }
            }
            PARAM_TYPE_STRING_LIST => {
                result.insert(
                    name.clone(),
                    Value::Array(values.iter().cloned().map(Value::String).collect()),
                );
            }
            unknown => {
                log_debug!(logger, "unknown parameter type {unknown:?} for {name:?}");
            }
        }
    }
    result
}

fn is_valid_parameter_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Substitutes references in one string node.
fn substitute_string(text: &str, params: &HashMap<String, Value>) -> Value {
    // A string that is exactly one reference keeps the parameter's type.
    if let Some(name) = sole_reference(text) {
        if let Some(value) = params.get(name) {
            return value.clone();
        }
    }

    let mut output = String::new();
    let mut rest = text;
    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open..].find("}}") else {
            break;
        };
        let end = open + close + 2;
        let name = rest[open + 2..open + close].trim();
        match params.get(name) {
            Some(value) => {
                output.push_str(&rest[..open]);
                output.push_str(&value_as_text(value));
            }
            // Unknown references stay in place verbatim.
            None => output.push_str(&rest[..end]),
        }
        rest = &rest[end..];
    }
    output.push_str(rest);
    Value::String(output)
}

/// Returns the referenced name if the whole string is one `{{ ref }}`.
fn sole_reference(text: &str) -> Option<&str> {
    let inner = text.strip_prefix("{{")?.strip_suffix("}}")?;
    if inner.contains('{') || inner.contains('}') {
        return None;
    }
    let name = inner.trim();
    (!name.is_empty()).then_some(name)
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
