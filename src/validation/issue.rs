//! The uniform finding record and its closed tag vocabulary.
//!
//! Severity, category, and code are closed enumerations attached to a single
//! `ValidationIssue` record rather than an inheritance hierarchy, so the
//! vocabulary stays centrally enumerable and exhaustively matchable. The
//! serialized strings are a stable external contract: the UI groups by
//! `category`/`severity` and filters by exact `code`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a finding is. Any `Error` makes the whole run invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Which checker family produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Continuity,
    Hydraulic,
    Standards,
    Topology,
    Geometry,
}

/// Machine-readable finding codes. Callers and tests key off these exact
/// strings, never off message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    // Continuity
    MissingUpstreamStructure,
    MissingDownstreamStructure,
    NoUpstreamConnection,
    NoDownstreamConnection,
    InvertMismatchUpstream,
    InvertMismatchDownstream,
    SlopeInvertMismatch,
    // Hydraulic
    MissingHydraulicData,
    SlopeTooLow,
    SlopeTooHigh,
    VelocityTooLow,
    VelocityTooHigh,
    // Standards
    DiameterTooSmall,
    NonStandardDiameter,
    MaterialNotSpecified,
    DiameterIncreaseDownstream,
    InsufficientCover,
    ExcessiveCover,
    // Topology
    NoOutfall,
    NetworkLoopDetected,
    ReverseDrainage,
    // Geometry
    MissingGeometry,
    PipeTooShort,
}

impl IssueCode {
    /// Every code in the vocabulary, in declaration order.
    pub const ALL: [IssueCode; 23] = [
        IssueCode::MissingUpstreamStructure,
        IssueCode::MissingDownstreamStructure,
        IssueCode::NoUpstreamConnection,
        IssueCode::NoDownstreamConnection,
        IssueCode::InvertMismatchUpstream,
        IssueCode::InvertMismatchDownstream,
        IssueCode::SlopeInvertMismatch,
        IssueCode::MissingHydraulicData,
        IssueCode::SlopeTooLow,
        IssueCode::SlopeTooHigh,
        IssueCode::VelocityTooLow,
        IssueCode::VelocityTooHigh,
        IssueCode::DiameterTooSmall,
        IssueCode::NonStandardDiameter,
        IssueCode::MaterialNotSpecified,
        IssueCode::DiameterIncreaseDownstream,
        IssueCode::InsufficientCover,
        IssueCode::ExcessiveCover,
        IssueCode::NoOutfall,
        IssueCode::NetworkLoopDetected,
        IssueCode::ReverseDrainage,
        IssueCode::MissingGeometry,
        IssueCode::PipeTooShort,
    ];

    /// The wire string, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::MissingUpstreamStructure => "MISSING_UPSTREAM_STRUCTURE",
            IssueCode::MissingDownstreamStructure => "MISSING_DOWNSTREAM_STRUCTURE",
            IssueCode::NoUpstreamConnection => "NO_UPSTREAM_CONNECTION",
            IssueCode::NoDownstreamConnection => "NO_DOWNSTREAM_CONNECTION",
            IssueCode::InvertMismatchUpstream => "INVERT_MISMATCH_UPSTREAM",
            IssueCode::InvertMismatchDownstream => "INVERT_MISMATCH_DOWNSTREAM",
            IssueCode::SlopeInvertMismatch => "SLOPE_INVERT_MISMATCH",
            IssueCode::MissingHydraulicData => "MISSING_HYDRAULIC_DATA",
            IssueCode::SlopeTooLow => "SLOPE_TOO_LOW",
            IssueCode::SlopeTooHigh => "SLOPE_TOO_HIGH",
            IssueCode::VelocityTooLow => "VELOCITY_TOO_LOW",
            IssueCode::VelocityTooHigh => "VELOCITY_TOO_HIGH",
            IssueCode::DiameterTooSmall => "DIAMETER_TOO_SMALL",
            IssueCode::NonStandardDiameter => "NON_STANDARD_DIAMETER",
            IssueCode::MaterialNotSpecified => "MATERIAL_NOT_SPECIFIED",
            IssueCode::DiameterIncreaseDownstream => "DIAMETER_INCREASE_DOWNSTREAM",
            IssueCode::InsufficientCover => "INSUFFICIENT_COVER",
            IssueCode::ExcessiveCover => "EXCESSIVE_COVER",
            IssueCode::NoOutfall => "NO_OUTFALL",
            IssueCode::NetworkLoopDetected => "NETWORK_LOOP_DETECTED",
            IssueCode::ReverseDrainage => "REVERSE_DRAINAGE",
            IssueCode::MissingGeometry => "MISSING_GEOMETRY",
            IssueCode::PipeTooShort => "PIPE_TOO_SHORT",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding from one checker. Pure data; constructing an issue has no
/// side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub category: Category,
    pub code: IssueCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipe_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<f64>,
}

impl ValidationIssue {
    pub fn new(
        severity: Severity,
        category: Category,
        code: IssueCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            code,
            message: message.into(),
            pipe_id: None,
            structure_id: None,
            expected_value: None,
            actual_value: None,
        }
    }

    pub fn for_pipe(mut self, pipe_id: impl Into<String>) -> Self {
        self.pipe_id = Some(pipe_id.into());
        self
    }

    pub fn for_structure(mut self, structure_id: impl Into<String>) -> Self {
        self.structure_id = Some(structure_id.into());
        self
    }

    /// Attaches the threshold that was violated and the value observed.
    pub fn with_values(mut self, expected: f64, actual: f64) -> Self {
        self.expected_value = Some(expected);
        self.actual_value = Some(actual);
        self
    }
}
