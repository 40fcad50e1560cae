//! Logging abstraction layer.
//!
//! This module provides the logging interface the execution core hands to
//! every component it owns (pool, workers, parser). Components log through
//! an `Arc<dyn Logger>` and never depend on a concrete backend.
//!
//! - `Logger` trait: the interface components use for logging
//! - `TracingLogger`: production adapter that delegates to the `tracing` crate
//! - `NoOpLogger`: silent logger for tests
//!
//! ```
//! use fieldrun::log::{Logger, NoOpLogger};
//! use fieldrun::log_info;
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_info!(logger, "agent core starting");
//! ```

mod noop;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
