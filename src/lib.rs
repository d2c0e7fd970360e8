//! hydronet-core: validation engine for designed stormwater and sanitary
//! pipe networks.
//!
//! The engine consumes a plain in-memory snapshot of one network (pipes and
//! structures) together with a jurisdiction standards profile, and produces a
//! single serializable [`ValidationResult`]. It checks continuity, Manning
//! hydraulics, standards compliance, drainage topology, and geometric
//! completeness. It knows nothing about HTTP, SQL, or file formats, and it
//! never modifies the design it evaluates.
//!
//! A run is a deterministic pure function of its inputs, so validating
//! independent networks concurrently (see [`validation::validate_batch`])
//! needs no locking.

pub mod hydraulics;
pub mod network;
pub mod standards;
pub mod validation;

pub use network::{Network, Pipe, PipeStatus, Point, Polyline, Structure, StructureKind};
pub use standards::{StandardsProfile, StandardsRegistry};
pub use validation::{
    validate_batch, validate_with_registry, Category, EngineError, IssueCode, NetworkValidator,
    Severity, ValidationIssue, ValidationResult,
};
