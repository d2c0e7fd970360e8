//! Hydraulic rule: slope bounds and Manning velocity bounds per pipe.

use crate::hydraulics::manning;
use crate::network::{Network, Pipe};
use crate::standards::StandardsProfile;
use crate::validation::issue::{Category, IssueCode, Severity, ValidationIssue};

pub(crate) fn check(network: &Network, profile: &StandardsProfile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for pipe in &network.pipes {
        // A pipe without positive diameter and slope gets one finding and no
        // further hydraulic checks; the solver is never fed values that would
        // produce NaN.
        let (diameter, slope) = match hydraulic_inputs(pipe) {
            Ok(inputs) => inputs,
            Err(detail) => {
                issues.push(
                    ValidationIssue::new(
                        Severity::Error,
                        Category::Hydraulic,
                        IssueCode::MissingHydraulicData,
                        format!("pipe {}: {detail}", pipe.id),
                    )
                    .for_pipe(&pipe.id),
                );
                continue;
            }
        };

        let min_slope = profile.min_slope_for_diameter(diameter);
        if slope < min_slope {
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    Category::Hydraulic,
                    IssueCode::SlopeTooLow,
                    format!(
                        "pipe {} slope {:.4} is below the {:.4} minimum for {}\" pipe",
                        pipe.id, slope, min_slope, diameter
                    ),
                )
                .for_pipe(&pipe.id)
                .with_values(min_slope, slope),
            );
        }
        if slope > profile.max_slope {
            issues.push(
                ValidationIssue::new(
                    Severity::Error,
                    Category::Hydraulic,
                    IssueCode::SlopeTooHigh,
                    format!(
                        "pipe {} slope {:.4} exceeds the {:.4} maximum",
                        pipe.id, slope, profile.max_slope
                    ),
                )
                .for_pipe(&pipe.id)
                .with_values(profile.max_slope, slope),
            );
        }

        let roughness = manning::roughness_for_material(pipe.material.as_deref());
        let Some(flow) = manning::solve_full_pipe(diameter, slope, roughness) else {
            continue; // unreachable given the input guard, but never panic
        };

        if flow.velocity < profile.min_velocity {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    Category::Hydraulic,
                    IssueCode::VelocityTooLow,
                    format!(
                        "pipe {} velocity {:.2} ft/s is below the {:.2} ft/s self-cleansing minimum",
                        pipe.id, flow.velocity, profile.min_velocity
                    ),
                )
                .for_pipe(&pipe.id)
                .with_values(profile.min_velocity, flow.velocity),
            );
        }
        let max_velocity = profile.max_velocity_for_material(pipe.material.as_deref());
        if flow.velocity > max_velocity {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    Category::Hydraulic,
                    IssueCode::VelocityTooHigh,
                    format!(
                        "pipe {} velocity {:.2} ft/s exceeds the {:.2} ft/s erosion limit",
                        pipe.id, flow.velocity, max_velocity
                    ),
                )
                .for_pipe(&pipe.id)
                .with_values(max_velocity, flow.velocity),
            );
        }
    }

    issues
}

/// Computed full-pipe velocity, for statistics. `None` when the pipe lacks
/// valid hydraulic data.
pub(crate) fn computed_velocity(pipe: &Pipe) -> Option<f64> {
    let (diameter, slope) = hydraulic_inputs(pipe).ok()?;
    let roughness = manning::roughness_for_material(pipe.material.as_deref());
    manning::solve_full_pipe(diameter, slope, roughness).map(|flow| flow.velocity)
}

fn hydraulic_inputs(pipe: &Pipe) -> Result<(f64, f64), &'static str> {
    let diameter = match pipe.diameter {
        Some(d) if d > 0.0 => d,
        Some(_) => return Err("non-positive diameter"),
        None => return Err("diameter not specified"),
    };
    let slope = match pipe.slope {
        Some(s) if s > 0.0 => s,
        Some(_) => return Err("non-positive slope"),
        None => return Err("slope not specified"),
    };
    Ok((diameter, slope))
}
