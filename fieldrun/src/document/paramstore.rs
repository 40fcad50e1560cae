//! Parameter-store collaborator seam.
//!
//! Some parameter values are references into an external parameter
//! store (resolved host-side, after substitution). The core only knows
//! the contract; the agent wires in a concrete backend.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::document::content::Parameter;
use crate::document::error::ParameterStoreError;

/// External parameter-store backend.
///
/// Implementations must be `Send + Sync`; the parser may be called from
/// any worker context.
pub trait ParameterStore: Send + Sync {
    /// Validates every store reference appearing in the merged
    /// parameter values against the document's declarations.
    fn validate_references(
        &self,
        declared: &BTreeMap<String, Parameter>,
        merged: &HashMap<String, Value>,
    ) -> Result<(), ParameterStoreError>;

    /// Resolves any remaining store references inside a value tree to
    /// their concrete values.
    fn resolve(&self, value: Value) -> Result<Value, ParameterStoreError>;
}

/// A backend for documents that use no parameter-store references.
///
/// Accepts everything and resolves values unchanged. Useful in tests
/// and in hosts without a store configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullParameterStore;

impl ParameterStore for NullParameterStore {
    fn validate_references(
        &self,
        _declared: &BTreeMap<String, Parameter>,
        _merged: &HashMap<String, Value>,
    ) -> Result<(), ParameterStoreError> {
        Ok(())
    }

    fn resolve(&self, value: Value) -> Result<Value, ParameterStoreError> {
        Ok(value)
    }
}
