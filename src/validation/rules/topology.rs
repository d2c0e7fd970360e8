//! Topology rule: global drainage properties of the directed network graph.

use std::collections::HashMap;

use crate::network::{Network, NetworkGraph};
use crate::validation::issue::{Category, IssueCode, Severity, ValidationIssue};

/// Downstream rims this much higher than upstream count as uphill flow, feet.
const ELEVATION_TOLERANCE: f64 = 0.1;

pub(crate) fn check(
    network: &Network,
    graph: &NetworkGraph,
    structure_index: &HashMap<&str, usize>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // Outfall presence. A network with zero graph nodes has no sink either;
    // an empty snapshot still drains nowhere.
    if graph.outfalls().is_empty() {
        issues.push(ValidationIssue::new(
            Severity::Error,
            Category::Topology,
            IssueCode::NoOutfall,
            "network has no outfall: every structure discharges into another pipe",
        ));
    }

    // Merging back into the path means water would circulate; storm and
    // sanitary systems branch but never loop.
    for node in graph.loop_entry_points() {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                Category::Topology,
                IssueCode::NetworkLoopDetected,
                format!(
                    "flow loops back to structure {}",
                    graph.structure_id(node)
                ),
            )
            .for_structure(graph.structure_id(node)),
        );
    }

    // Flow direction vs. ground elevation. Skipped when either structure
    // record or rim is missing; continuity owns dangling references. Known
    // limitation: a deliberate force main will be flagged here too.
    for pipe in &network.pipes {
        let rims = [
            pipe.upstream_structure.as_deref(),
            pipe.downstream_structure.as_deref(),
        ]
        .map(|reference| {
            reference
                .and_then(|id| structure_index.get(id))
                .and_then(|&idx| network.structures[idx].rim_elevation)
        });
        let [Some(up_rim), Some(dn_rim)] = rims else {
            continue;
        };
        if dn_rim > up_rim + ELEVATION_TOLERANCE {
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    Category::Topology,
                    IssueCode::ReverseDrainage,
                    format!(
                        "pipe {} drains uphill: downstream rim {:.2} is above upstream rim {:.2}",
                        pipe.id, dn_rim, up_rim
                    ),
                )
                .for_pipe(&pipe.id)
                .with_values(up_rim, dn_rim),
            );
        }
    }

    issues
}
