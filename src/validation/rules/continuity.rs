//! Continuity rule: endpoint references resolve, and elevations agree where
//! pipes meet.

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::network::Network;
use crate::validation::issue::{Category, IssueCode, Severity, ValidationIssue};

/// Inverts of pipes joined at one structure must agree within this, feet.
const INVERT_TOLERANCE: f64 = 0.1;

/// Stored slope must agree with the invert-derived slope within this fraction.
const SLOPE_TOLERANCE: f64 = 0.001;

#[derive(Clone, Copy, PartialEq)]
enum PipeEnd {
    Upstream,
    Downstream,
}

struct InvertAt<'a> {
    pipe_id: &'a str,
    end: PipeEnd,
    invert: f64,
}

pub(crate) fn check(
    network: &Network,
    structure_index: &HashMap<&str, usize>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    // Structure id -> inverts of the pipe ends landing there. Junctions
    // rarely join more than a few pipes.
    let mut inverts_by_structure: HashMap<&str, SmallVec<[InvertAt; 4]>> = HashMap::new();

    for pipe in &network.pipes {
        check_reference(
            pipe.upstream_structure.as_deref(),
            &pipe.id,
            structure_index,
            PipeEnd::Upstream,
            &mut issues,
        );
        check_reference(
            pipe.downstream_structure.as_deref(),
            &pipe.id,
            structure_index,
            PipeEnd::Downstream,
            &mut issues,
        );

        // Cross-check the stored slope field against the invert geometry.
        if let (Some(stored), Some(derived)) = (pipe.slope, pipe.slope_from_inverts()) {
            if (stored - derived).abs() > SLOPE_TOLERANCE {
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        Category::Continuity,
                        IssueCode::SlopeInvertMismatch,
                        format!(
                            "pipe {} stored slope {:.4} disagrees with invert-derived slope {:.4}",
                            pipe.id, stored, derived
                        ),
                    )
                    .for_pipe(&pipe.id)
                    .with_values(derived, stored),
                );
            }
        }

        // Gather invert observations for the joint-agreement pass below.
        if let (Some(id), Some(invert)) = (pipe.upstream_structure.as_deref(), pipe.upstream_invert)
        {
            inverts_by_structure.entry(id).or_default().push(InvertAt {
                pipe_id: &pipe.id,
                end: PipeEnd::Upstream,
                invert,
            });
        }
        if let (Some(id), Some(invert)) =
            (pipe.downstream_structure.as_deref(), pipe.downstream_invert)
        {
            inverts_by_structure.entry(id).or_default().push(InvertAt {
                pipe_id: &pipe.id,
                end: PipeEnd::Downstream,
                invert,
            });
        }
    }

    // Joint agreement: within one structure, every pipe end is compared to
    // the lowest invert observed there. Iterates the structure list (not the
    // map) to keep issue order deterministic.
    for structure in &network.structures {
        let Some(ends) = inverts_by_structure.get(structure.id.as_str()) else {
            continue;
        };
        if ends.len() < 2 {
            continue;
        }
        let lowest = ends.iter().map(|e| e.invert).fold(f64::INFINITY, f64::min);
        for at in ends {
            if at.invert - lowest > INVERT_TOLERANCE {
                let (code, end_name) = match at.end {
                    PipeEnd::Upstream => (IssueCode::InvertMismatchUpstream, "upstream"),
                    PipeEnd::Downstream => (IssueCode::InvertMismatchDownstream, "downstream"),
                };
                issues.push(
                    ValidationIssue::new(
                        Severity::Warning,
                        Category::Continuity,
                        code,
                        format!(
                            "pipe {} {} invert {:.2} sits {:.2} above the lowest invert at structure {}",
                            at.pipe_id,
                            end_name,
                            at.invert,
                            at.invert - lowest,
                            structure.id
                        ),
                    )
                    .for_pipe(at.pipe_id)
                    .for_structure(&structure.id)
                    .with_values(lowest, at.invert),
                );
            }
        }
    }

    issues
}

fn check_reference(
    reference: Option<&str>,
    pipe_id: &str,
    structure_index: &HashMap<&str, usize>,
    end: PipeEnd,
    issues: &mut Vec<ValidationIssue>,
) {
    match reference {
        // An open end can be legitimate during partial design.
        None => {
            let (code, end_name) = match end {
                PipeEnd::Upstream => (IssueCode::NoUpstreamConnection, "upstream"),
                PipeEnd::Downstream => (IssueCode::NoDownstreamConnection, "downstream"),
            };
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    Category::Continuity,
                    code,
                    format!("pipe {pipe_id} has no {end_name} connection"),
                )
                .for_pipe(pipe_id),
            );
        }
        Some(id) if !structure_index.contains_key(id) => {
            let (code, end_name) = match end {
                PipeEnd::Upstream => (IssueCode::MissingUpstreamStructure, "upstream"),
                PipeEnd::Downstream => (IssueCode::MissingDownstreamStructure, "downstream"),
            };
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    Category::Continuity,
                    code,
                    format!("pipe {pipe_id} references missing {end_name} structure {id}"),
                )
                .for_pipe(pipe_id)
                .for_structure(id),
            );
        }
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Pipe, Structure};

    fn structure(id: &str) -> Structure {
        Structure {
            id: id.into(),
            ..Default::default()
        }
    }

    fn issues_for(network: &Network) -> Vec<ValidationIssue> {
        check(network, &network.structure_index())
    }

    #[test]
    fn test_missing_downstream_reference_is_an_error() {
        let mut network = Network::new("N1", "t");
        network.structures.push(structure("S1"));
        network.pipes.push(Pipe {
            id: "P1".into(),
            upstream_structure: Some("S1".into()),
            downstream_structure: Some("GHOST".into()),
            ..Default::default()
        });

        let issues = issues_for(&network);
        let missing: Vec<_> = issues
            .iter()
            .filter(|i| i.code == IssueCode::MissingDownstreamStructure)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].severity, Severity::Error);
        assert_eq!(missing[0].structure_id.as_deref(), Some("GHOST"));
    }

    #[test]
    fn test_open_ends_warn_only() {
        let mut network = Network::new("N1", "t");
        network.pipes.push(Pipe {
            id: "P1".into(),
            ..Default::default()
        });

        let issues = issues_for(&network);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::NoUpstreamConnection));
        assert!(issues
            .iter()
            .any(|i| i.code == IssueCode::NoDownstreamConnection));
    }

    #[test]
    fn test_invert_mismatch_at_shared_junction() {
        // Two pipes meet at S2 with inverts 0.5 apart (tolerance 0.1): the
        // higher end flags, the lower is the reference.
        let mut network = Network::new("N1", "t");
        for id in ["S1", "S2", "S3"] {
            network.structures.push(structure(id));
        }
        network.pipes.push(Pipe {
            id: "P1".into(),
            upstream_structure: Some("S1".into()),
            downstream_structure: Some("S2".into()),
            downstream_invert: Some(100.5),
            ..Default::default()
        });
        network.pipes.push(Pipe {
            id: "P2".into(),
            upstream_structure: Some("S2".into()),
            downstream_structure: Some("S3".into()),
            upstream_invert: Some(100.0),
            ..Default::default()
        });

        let issues = issues_for(&network);
        let mismatches: Vec<_> = issues
            .iter()
            .filter(|i| {
                i.code == IssueCode::InvertMismatchUpstream
                    || i.code == IssueCode::InvertMismatchDownstream
            })
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].code, IssueCode::InvertMismatchDownstream);
        assert_eq!(mismatches[0].pipe_id.as_deref(), Some("P1"));
        assert_eq!(mismatches[0].structure_id.as_deref(), Some("S2"));
        assert_eq!(mismatches[0].expected_value, Some(100.0));
    }

    #[test]
    fn test_inverts_within_tolerance_pass() {
        let mut network = Network::new("N1", "t");
        for id in ["S1", "S2", "S3"] {
            network.structures.push(structure(id));
        }
        network.pipes.push(Pipe {
            id: "P1".into(),
            upstream_structure: Some("S1".into()),
            downstream_structure: Some("S2".into()),
            downstream_invert: Some(100.05),
            ..Default::default()
        });
        network.pipes.push(Pipe {
            id: "P2".into(),
            upstream_structure: Some("S2".into()),
            downstream_structure: Some("S3".into()),
            upstream_invert: Some(100.0),
            ..Default::default()
        });

        assert!(issues_for(&network)
            .iter()
            .all(|i| i.code != IssueCode::InvertMismatchDownstream));
    }

    #[test]
    fn test_stored_slope_cross_checked_against_inverts() {
        let mut network = Network::new("N1", "t");
        for id in ["S1", "S2"] {
            network.structures.push(structure(id));
        }
        // Inverts imply 0.004 but the stored field says 0.010.
        network.pipes.push(Pipe {
            id: "P1".into(),
            upstream_structure: Some("S1".into()),
            downstream_structure: Some("S2".into()),
            slope: Some(0.010),
            length: 250.0,
            upstream_invert: Some(100.0),
            downstream_invert: Some(99.0),
            ..Default::default()
        });

        let issues = issues_for(&network);
        let mismatch = issues
            .iter()
            .find(|i| i.code == IssueCode::SlopeInvertMismatch)
            .expect("expected a slope/invert mismatch");
        assert_eq!(mismatch.severity, Severity::Warning);
        assert!((mismatch.expected_value.unwrap() - 0.004).abs() < 1e-9);
    }
}
