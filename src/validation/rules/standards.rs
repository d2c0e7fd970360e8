//! Standards compliance rule: per-pipe threshold checks plus the
//! downstream-diameter walk from each outfall.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::network::{Network, NetworkGraph, Pipe};
use crate::standards::StandardsProfile;
use crate::validation::issue::{Category, IssueCode, Severity, ValidationIssue};

/// Diameter comparisons ignore differences below this, inches.
const DIAMETER_TOLERANCE: f64 = 0.01;

pub(crate) fn check(
    network: &Network,
    profile: &StandardsProfile,
    graph: &NetworkGraph,
    structure_index: &HashMap<&str, usize>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for pipe in &network.pipes {
        if let Some(diameter) = pipe.diameter {
            if diameter < profile.min_diameter {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        Category::Standards,
                        IssueCode::DiameterTooSmall,
                        format!(
                            "pipe {} diameter {}\" is below the {}\" minimum",
                            pipe.id, diameter, profile.min_diameter
                        ),
                    )
                    .for_pipe(&pipe.id)
                    .with_values(profile.min_diameter, diameter),
                );
            }
            if !profile.is_standard_diameter(diameter) {
                issues.push(
                    ValidationIssue::new(
                        Severity::Info,
                        Category::Standards,
                        IssueCode::NonStandardDiameter,
                        format!("pipe {} diameter {}\" is not a standard size", pipe.id, diameter),
                    )
                    .for_pipe(&pipe.id),
                );
            }
        }

        if pipe.material.as_deref().map_or(true, |m| m.trim().is_empty()) {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    Category::Standards,
                    IssueCode::MaterialNotSpecified,
                    format!("pipe {} has no material specified", pipe.id),
                )
                .for_pipe(&pipe.id),
            );
        }

        check_cover(pipe_ends(network, structure_index, pipe), pipe, profile, &mut issues);
    }

    issues.extend(diameter_walk(network, graph));
    issues
}

struct EndElevations<'a> {
    structure_id: &'a str,
    rim: f64,
    invert: f64,
}

fn pipe_ends<'a>(
    network: &'a Network,
    structure_index: &HashMap<&str, usize>,
    pipe: &'a Pipe,
) -> Vec<EndElevations<'a>> {
    let mut ends = Vec::with_capacity(2);
    let pairs = [
        (pipe.upstream_structure.as_deref(), pipe.upstream_invert),
        (pipe.downstream_structure.as_deref(), pipe.downstream_invert),
    ];
    for (reference, invert) in pairs {
        let (Some(id), Some(invert)) = (reference, invert) else {
            continue;
        };
        let Some(&idx) = structure_index.get(id) else {
            continue; // dangling reference: continuity already reported it
        };
        if let Some(rim) = network.structures[idx].rim_elevation {
            ends.push(EndElevations {
                structure_id: id,
                rim,
                invert,
            });
        }
    }
    ends
}

/// Soil cover over the crown at each known end, against the profile's burial
/// limits. Crown = invert + outside diameter (approximated by the inside
/// diameter; wall thickness is not modeled).
fn check_cover(
    ends: Vec<EndElevations>,
    pipe: &Pipe,
    profile: &StandardsProfile,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(diameter) = pipe.diameter.filter(|&d| d > 0.0) else {
        return;
    };
    for end in ends {
        let cover = end.rim - (end.invert + diameter / 12.0);
        if cover < profile.min_cover {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    Category::Standards,
                    IssueCode::InsufficientCover,
                    format!(
                        "pipe {} has {:.2} ft of cover at structure {} ({:.2} ft required)",
                        pipe.id, cover, end.structure_id, profile.min_cover
                    ),
                )
                .for_pipe(&pipe.id)
                .for_structure(end.structure_id)
                .with_values(profile.min_cover, cover),
            );
        } else if cover > profile.max_cover {
            issues.push(
                ValidationIssue::new(
                    Severity::Info,
                    Category::Standards,
                    IssueCode::ExcessiveCover,
                    format!(
                        "pipe {} is buried {:.2} ft deep at structure {} ({:.2} ft maximum)",
                        pipe.id, cover, end.structure_id, profile.max_cover
                    ),
                )
                .for_pipe(&pipe.id)
                .for_structure(end.structure_id)
                .with_values(profile.max_cover, cover),
            );
        }
    }
}

/// Walks upstream from every outfall. Diameter must never decrease in the
/// flow direction, so a pipe whose immediate upstream feeder is larger marks
/// a constriction and flags the downstream (smaller) pipe.
fn diameter_walk(network: &Network, graph: &NetworkGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut stack: Vec<NodeIndex> = graph.outfalls();
    let mut visited = vec![false; graph.node_count()];
    for &node in &stack {
        visited[node.index()] = true;
    }

    while let Some(node) = stack.pop() {
        for (pipe_idx, source) in graph.incoming_pipes(node) {
            let pipe = &network.pipes[pipe_idx];
            if let Some(diameter) = pipe.diameter {
                let feeder_max = graph
                    .incoming_pipes(source)
                    .iter()
                    .filter_map(|&(feeder_idx, _)| network.pipes[feeder_idx].diameter)
                    .fold(None, |acc: Option<f64>, d| {
                        Some(acc.map_or(d, |m| m.max(d)))
                    });
                if let Some(feeder_max) = feeder_max {
                    if feeder_max > diameter + DIAMETER_TOLERANCE {
                        issues.push(
                            ValidationIssue::new(
                                Severity::Warning,
                                Category::Standards,
                                IssueCode::DiameterIncreaseDownstream,
                                format!(
                                    "pipe {} ({}\") is smaller than its {}\" upstream feeder at structure {}",
                                    pipe.id,
                                    diameter,
                                    feeder_max,
                                    graph.structure_id(source)
                                ),
                            )
                            .for_pipe(&pipe.id)
                            .for_structure(graph.structure_id(source))
                            .with_values(feeder_max, diameter),
                        );
                    }
                }
            }
            if !visited[source.index()] {
                visited[source.index()] = true;
                stack.push(source);
            }
        }
    }

    issues
}
