//! Observability for the personas service
//!
//! Structured JSON logging plus start/complete scopes around
//! lifecycle operations (database open, server boot).
//!
//! ```ignore
//! use personas::observability::{Logger, OperationScope};
//!
//! Logger::info("PERSONA_CREATED", &[("id", "42")]);
//!
//! let scope = OperationScope::new("SERVER_BOOT", &[]);
//! // ... do work ...
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::OperationScope;
