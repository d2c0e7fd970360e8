//! Geometry rule: spatial data must exist and carry sane dimensions.

use crate::network::Network;
use crate::validation::issue::{Category, IssueCode, Severity, ValidationIssue};

/// Segments shorter than this are usually digitizing artifacts, feet.
const MIN_PIPE_LENGTH: f64 = 0.5;

pub(crate) fn check(network: &Network) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for pipe in &network.pipes {
        if pipe.geometry.is_none() {
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    Category::Geometry,
                    IssueCode::MissingGeometry,
                    format!("pipe {} has no line geometry", pipe.id),
                )
                .for_pipe(&pipe.id),
            );
        }
        // Geometry length when drawn, stored length otherwise.
        let length = pipe.measured_length();
        if length < MIN_PIPE_LENGTH {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    Category::Geometry,
                    IssueCode::PipeTooShort,
                    format!("pipe {} is only {:.2} ft long", pipe.id, length),
                )
                .for_pipe(&pipe.id)
                .with_values(MIN_PIPE_LENGTH, length),
            );
        }
    }

    for structure in &network.structures {
        if structure.geometry.is_none() {
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    Category::Geometry,
                    IssueCode::MissingGeometry,
                    format!("structure {} has no point geometry", structure.id),
                )
                .for_structure(&structure.id),
            );
        }
    }

    issues
}
