//! Programming-level failures: the only conditions that fail a validation
//! call outright instead of becoming findings.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The caller handed the engine input that violates the data contract
    /// (e.g. a pipe record with no identifier). This is a defect in the
    /// caller, not in the design being validated.
    #[error("invalid input: {detail}")]
    InvalidInput { detail: String },

    /// A profile name that the registry does not know.
    #[error("unknown standards profile '{name}'")]
    UnknownProfile { name: String },
}
