//! Jurisdiction standards as immutable data.
//!
//! A profile is a plain value object built from declarative tables, so adding
//! a jurisdiction's rules is a data change, not a code change. Profiles must
//! never be mutated after construction; concurrent validation runs share them
//! read-only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tolerance used when matching a queried diameter against a table entry.
const DIAMETER_MATCH_TOL: f64 = 0.01;

/// A named bundle of design thresholds for one jurisdiction.
///
/// Units follow the engine's boundary convention: diameters in inches,
/// cover in feet, velocity in ft/s, slope as a fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsProfile {
    pub name: String,
    /// Smallest allowed pipe diameter, inches.
    pub min_diameter: f64,
    /// Self-cleansing minimum velocity, ft/s.
    pub min_velocity: f64,
    /// Erosion-limit velocity for materials without a table entry, ft/s.
    pub max_velocity_default: f64,
    /// Minimum soil cover over the pipe crown, feet.
    pub min_cover: f64,
    /// Maximum burial depth, feet.
    pub max_cover: f64,
    /// Absolute maximum slope as a fraction.
    pub max_slope: f64,
    /// Commercially available diameters, inches, ascending.
    pub standard_diameters: Vec<f64>,
    /// Minimum self-cleansing slope per standard diameter, ascending by
    /// diameter. Smaller pipes need steeper slopes, so the slope column is
    /// non-increasing.
    pub min_slope_table: Vec<(f64, f64)>,
    /// Erosion-limit velocity per material, keyed lowercase.
    pub max_velocity_by_material: BTreeMap<String, f64>,
}

impl StandardsProfile {
    /// Minimum slope for a diameter, resolved to the nearest standard size at
    /// or above the query. Requirements are defined at discrete pipe sizes,
    /// so there is no numeric interpolation; queries beyond the largest entry
    /// clamp to the last row.
    pub fn min_slope_for_diameter(&self, diameter: f64) -> f64 {
        for &(table_diameter, slope) in &self.min_slope_table {
            if diameter <= table_diameter + DIAMETER_MATCH_TOL {
                return slope;
            }
        }
        self.min_slope_table
            .last()
            .map(|&(_, slope)| slope)
            .unwrap_or(0.0)
    }

    /// Maximum velocity for a material, falling back to the profile-wide
    /// default for unknown or unspecified materials.
    pub fn max_velocity_for_material(&self, material: Option<&str>) -> f64 {
        material
            .and_then(|m| self.max_velocity_by_material.get(&m.to_lowercase()))
            .copied()
            .unwrap_or(self.max_velocity_default)
    }

    /// Whether a diameter matches one of the commercially standard sizes.
    pub fn is_standard_diameter(&self, diameter: f64) -> bool {
        self.standard_diameters
            .iter()
            .any(|&d| (d - diameter).abs() <= DIAMETER_MATCH_TOL)
    }

    /// The built-in baseline profile.
    pub fn default_profile() -> Self {
        Self {
            name: "default".into(),
            min_diameter: 12.0,
            min_velocity: 2.0,
            max_velocity_default: 10.0,
            min_cover: 3.0,
            max_cover: 20.0,
            max_slope: 0.10,
            standard_diameters: vec![
                6.0, 8.0, 10.0, 12.0, 15.0, 18.0, 21.0, 24.0, 30.0, 36.0, 42.0, 48.0, 54.0, 60.0,
            ],
            min_slope_table: vec![
                (6.0, 0.0060),
                (8.0, 0.0045),
                (10.0, 0.0038),
                (12.0, 0.0033),
                (15.0, 0.0028),
                (18.0, 0.0024),
                (21.0, 0.0020),
                (24.0, 0.0018),
                (30.0, 0.0015),
                (36.0, 0.0012),
                (42.0, 0.0010),
                (48.0, 0.0008),
            ],
            max_velocity_by_material: [
                ("pvc".to_string(), 5.0),
                ("hdpe".to_string(), 6.0),
                ("cmp".to_string(), 8.0),
                ("rcp".to_string(), 10.0),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// A tighter profile for jurisdictions with stricter review.
    pub fn strict_profile() -> Self {
        let base = Self::default_profile();
        Self {
            name: "strict".into(),
            min_diameter: 15.0,
            min_velocity: 2.5,
            max_velocity_default: 8.0,
            min_cover: 4.0,
            max_cover: 16.0,
            max_slope: 0.08,
            min_slope_table: base
                .min_slope_table
                .iter()
                .map(|&(d, s)| (d, s * 1.25))
                .collect(),
            max_velocity_by_material: [
                ("pvc".to_string(), 4.0),
                ("hdpe".to_string(), 5.0),
                ("cmp".to_string(), 6.0),
                ("rcp".to_string(), 8.0),
            ]
            .into_iter()
            .collect(),
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(12.0, 0.0033)] // exact table entry
    #[case(11.0, 0.0033)] // resolves to nearest size at or above
    #[case(13.0, 0.0028)] // between 12 and 15 -> 15's requirement
    #[case(4.0, 0.0060)] // below the smallest entry -> first row
    #[case(72.0, 0.0008)] // beyond the largest entry clamps to the last row
    fn test_min_slope_lookup(#[case] diameter: f64, #[case] expected: f64) {
        let profile = StandardsProfile::default_profile();
        assert!((profile.min_slope_for_diameter(diameter) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_min_slope_table_is_monotonic() {
        for profile in [
            StandardsProfile::default_profile(),
            StandardsProfile::strict_profile(),
        ] {
            for pair in profile.min_slope_table.windows(2) {
                let (d1, s1) = pair[0];
                let (d2, s2) = pair[1];
                assert!(d1 < d2, "{}: diameters must ascend", profile.name);
                assert!(s1 >= s2, "{}: smaller pipes need steeper slope", profile.name);
            }
        }
    }

    #[rstest]
    #[case(Some("PVC"), 5.0)] // case-insensitive table hit
    #[case(Some("rcp"), 10.0)]
    #[case(Some("vitrified clay"), 10.0)] // unknown material -> default
    #[case(None, 10.0)]
    fn test_max_velocity_lookup(#[case] material: Option<&str>, #[case] expected: f64) {
        let profile = StandardsProfile::default_profile();
        assert_eq!(profile.max_velocity_for_material(material), expected);
    }

    #[test]
    fn test_standard_diameter_matching() {
        let profile = StandardsProfile::default_profile();
        assert!(profile.is_standard_diameter(18.0));
        assert!(!profile.is_standard_diameter(13.5));
    }
}
