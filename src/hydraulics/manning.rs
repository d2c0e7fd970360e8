//! Full-pipe Manning hydraulics.
//!
//! US customary units throughout: diameter in inches at the interface, feet
//! internally, velocity in ft/s, flow in cfs. The solver is a pure function
//! and refuses inputs that would put a non-positive value under the square
//! root, so it can never return NaN.

/// Manning unit constant for US customary units.
pub const MANNING_K_US: f64 = 1.486;

/// Roughness coefficient used when the material has no table entry.
pub const DEFAULT_ROUGHNESS: f64 = 0.013;

/// Manning roughness by material. Matched case-insensitively; unknown
/// materials get [`DEFAULT_ROUGHNESS`].
pub fn roughness_for_material(material: Option<&str>) -> f64 {
    match material.map(|m| m.to_lowercase()).as_deref() {
        Some("pvc") => 0.010,
        Some("hdpe") => 0.012,
        Some("rcp") => 0.013,
        Some("cmp") => 0.024,
        _ => DEFAULT_ROUGHNESS,
    }
}

/// The hydraulic state of one pipe flowing full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSolution {
    /// Cross-sectional area, sq ft.
    pub area: f64,
    /// Hydraulic radius, ft. For a full circular pipe this is diameter/4.
    pub hydraulic_radius: f64,
    /// Flow velocity, ft/s.
    pub velocity: f64,
    /// Full-pipe capacity, cfs.
    pub capacity: f64,
}

/// Solves `V = (k/n) * R^(2/3) * S^(1/2)` and `Q = A * V` for a circular pipe
/// flowing full.
///
/// Returns `None` when diameter, slope, or roughness is non-positive. The
/// hydraulic rule reports `MISSING_HYDRAULIC_DATA` for those pipes instead of
/// ever calling this with a value that would produce NaN.
pub fn solve_full_pipe(diameter_in: f64, slope: f64, roughness: f64) -> Option<FlowSolution> {
    if diameter_in <= 0.0 || slope <= 0.0 || roughness <= 0.0 {
        return None;
    }

    let diameter_ft = diameter_in / 12.0;
    let area = std::f64::consts::PI * diameter_ft * diameter_ft / 4.0;
    let hydraulic_radius = diameter_ft / 4.0;
    let velocity = (MANNING_K_US / roughness) * hydraulic_radius.powf(2.0 / 3.0) * slope.sqrt();

    Some(FlowSolution {
        area,
        hydraulic_radius,
        velocity,
        capacity: area * velocity,
    })
}
