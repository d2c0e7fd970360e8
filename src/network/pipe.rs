//! The `Pipe` record: a directed edge from an upstream structure to a
//! downstream structure.

use serde::{Deserialize, Serialize};

use super::geometry::Polyline;

/// Lifecycle status of a pipe within the design.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeStatus {
    #[default]
    Proposed,
    Existing,
    Abandoned,
}

/// One gravity pipe segment.
///
/// Most fields are optional: a partially authored design is a legitimate input
/// and missing data surfaces as validation findings, never as a failed call.
/// Units are fixed at the system boundary: diameter in inches, everything else
/// in feet, slope as a dimensionless fraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Caller-assigned identifier, unique within one network snapshot.
    pub id: String,
    /// Identifier of the structure at the upstream (inflow) end.
    pub upstream_structure: Option<String>,
    /// Identifier of the structure at the downstream (outflow) end.
    pub downstream_structure: Option<String>,
    /// Inside diameter in inches.
    pub diameter: Option<f64>,
    /// Pipe material, e.g. "PVC" or "RCP". Matched case-insensitively.
    pub material: Option<String>,
    /// Stored design slope as a fraction (0.004 = 0.4%).
    pub slope: Option<f64>,
    /// Stored segment length in feet.
    pub length: f64,
    pub upstream_invert: Option<f64>,
    pub downstream_invert: Option<f64>,
    pub status: PipeStatus,
    pub geometry: Option<Polyline>,
}

impl Pipe {
    /// Slope implied by the invert difference over the stored length, when all
    /// three are available. Used to cross-check the stored slope field.
    pub fn slope_from_inverts(&self) -> Option<f64> {
        match (self.upstream_invert, self.downstream_invert) {
            (Some(up), Some(dn)) if self.length > 0.0 => Some((up - dn) / self.length),
            _ => None,
        }
    }

    /// Plan length measured from geometry, falling back to the stored length
    /// when no geometry was captured.
    pub fn measured_length(&self) -> f64 {
        match &self.geometry {
            Some(line) => line.length(),
            None => self.length,
        }
    }
}
