//! The rule engine: issue vocabulary, rule modules, and the orchestrator.
pub mod error;
pub mod issue;
pub mod result;
pub(crate) mod rules;
pub mod validator;

// Re-export key types for convenient access
pub use error::EngineError;
pub use issue::{Category, IssueCode, Severity, ValidationIssue};
pub use result::{IssueSummary, NetworkStatistics, ValidationResult, ValueRange};
pub use validator::{validate_batch, validate_with_registry, NetworkValidator};
