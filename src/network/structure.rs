//! The `Structure` record: a node in the drainage network.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// The physical role of a structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    #[default]
    Manhole,
    Inlet,
    Outfall,
    JunctionBox,
    Headwall,
}

/// A junction, inlet, or discharge point in the network.
///
/// Structures are authored upstream of the engine and are immutable for the
/// duration of a validation run. Geometry is optional on purpose: its absence
/// is a design finding (`MISSING_GEOMETRY`), not a malformed record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Caller-assigned identifier, unique within one network snapshot.
    pub id: String,
    pub kind: StructureKind,
    /// Rim or finished-ground elevation at the structure, in feet.
    pub rim_elevation: Option<f64>,
    /// Depth of the sump below the lowest invert, in feet.
    pub sump_depth: Option<f64>,
    pub geometry: Option<Point>,
}
