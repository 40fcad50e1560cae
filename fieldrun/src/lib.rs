//! FieldRun - execution core for remotely dispatched command documents
//!
//! This library provides the two subsystems at the heart of an on-host
//! agent: a bounded worker pool with cooperative cancellation and a
//! graceful-then-forceful shutdown protocol, and a schema-dispatched
//! document parser that turns wire-form command documents into an
//! executable plugin-step plan.
//!
//! # High-Level Flow
//!
//! ```ignore
//! use fieldrun::document::{initialize_doc_state, NullParameterStore};
//! use fieldrun::taskpool::{Pool, TokioClock};
//!
//! // Parse an incoming document envelope into plugin steps...
//! let doc_state = initialize_doc_state(
//!     &logger, DocumentType::SendCommand, &content, info, parser_info,
//!     params, &NullParameterStore,
//! )?;
//!
//! // ...then submit each step to the pool for bounded execution.
//! let pool = Pool::new(logger, 2, Duration::from_millis(100), Arc::new(TokioClock));
//! for plugin in doc_state.plugins {
//!     pool.submit(step_logger, &plugin.id, make_job(plugin)).await?;
//! }
//! ```

pub mod document;
pub mod log;
pub mod paths;
pub mod taskpool;
pub mod version;

/// Version of the FieldRun library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
