//! The orchestrator that runs every rule over one network snapshot and
//! assembles the single immutable result.

use log::debug;
use rayon::prelude::*;

use super::error::EngineError;
use super::result::{NetworkStatistics, ValidationResult, ValueRange};
use super::rules::{continuity, geometry, hydraulic, standards, topology};
use crate::network::{Network, NetworkGraph};
use crate::standards::{StandardsProfile, StandardsRegistry};

/// Runs the five checkers over one snapshot against one standards profile.
///
/// A run is a deterministic pure function of (snapshot, profile): rules
/// execute in a fixed order, each iterating the snapshot in storage order,
/// so the same inputs always produce an identical issue list. The validator
/// itself raises nothing for design problems; only a contract violation in
/// the input fails the call.
pub struct NetworkValidator<'a> {
    network: &'a Network,
    profile: &'a StandardsProfile,
}

impl<'a> NetworkValidator<'a> {
    pub fn new(network: &'a Network, profile: &'a StandardsProfile) -> Self {
        Self { network, profile }
    }

    pub fn validate(&self) -> Result<ValidationResult, EngineError> {
        self.network.verify_contract()?;
        debug!(
            "validating network {} ({} pipes, {} structures) against profile {}",
            self.network.id,
            self.network.pipes.len(),
            self.network.structures.len(),
            self.profile.name
        );

        let structure_index = self.network.structure_index();
        let graph = NetworkGraph::from_network(self.network);

        let mut issues = continuity::check(self.network, &structure_index);
        issues.extend(hydraulic::check(self.network, self.profile));
        issues.extend(standards::check(
            self.network,
            self.profile,
            &graph,
            &structure_index,
        ));
        issues.extend(topology::check(self.network, &graph, &structure_index));
        issues.extend(geometry::check(self.network));

        let statistics = compute_statistics(self.network);
        debug!(
            "network {}: {} issue(s) found",
            self.network.id,
            issues.len()
        );

        Ok(ValidationResult::new(
            &self.network.id,
            &self.network.name,
            &self.profile.name,
            issues,
            statistics,
        ))
    }
}

/// Validates independent networks in parallel. Each run reads only its own
/// snapshot and the shared immutable profile, so no locking is involved and
/// the output order matches the input order.
pub fn validate_batch(
    networks: &[Network],
    profile: &StandardsProfile,
) -> Vec<Result<ValidationResult, EngineError>> {
    networks
        .par_iter()
        .map(|network| NetworkValidator::new(network, profile).validate())
        .collect()
}

/// Resolves a profile by name through the built-in registry and validates.
/// `None` selects the "default" profile.
pub fn validate_with_registry(
    network: &Network,
    profile_name: Option<&str>,
) -> Result<ValidationResult, EngineError> {
    let registry = StandardsRegistry::builtin();
    let name = profile_name.unwrap_or("default");
    let profile = registry.get(name).ok_or_else(|| EngineError::UnknownProfile {
        name: name.to_string(),
    })?;
    NetworkValidator::new(network, profile).validate()
}

fn compute_statistics(network: &Network) -> NetworkStatistics {
    let slopes: Vec<f64> = network.pipes.iter().filter_map(|p| p.slope).collect();
    let diameters: Vec<f64> = network.pipes.iter().filter_map(|p| p.diameter).collect();
    let velocities: Vec<f64> = network
        .pipes
        .iter()
        .filter_map(hydraulic::computed_velocity)
        .collect();

    NetworkStatistics {
        pipe_count: network.pipes.len(),
        structure_count: network.structures.len(),
        total_length: network.pipes.iter().map(|p| p.length).sum(),
        average_slope: ValueRange::from_samples(&slopes).map(|r| r.mean),
        diameter: ValueRange::from_samples(&diameters),
        velocity: ValueRange::from_samples(&velocities),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Pipe, Point, Polyline, Structure, StructureKind};
    use crate::validation::issue::{IssueCode, Severity};

    /// A small, fully clean two-structure network: 12" PVC at 0.4% draining
    /// S1 (rim 100) to S2 (rim 99), drawn 250 ft long with matching inverts.
    fn clean_network() -> Network {
        let mut network = Network::new("N1", "Storm A");
        network.structures.push(Structure {
            id: "S1".into(),
            kind: StructureKind::Manhole,
            rim_elevation: Some(100.0),
            sump_depth: Some(1.0),
            geometry: Some(Point::new(0.0, 0.0)),
        });
        network.structures.push(Structure {
            id: "S2".into(),
            kind: StructureKind::Outfall,
            rim_elevation: Some(99.0),
            sump_depth: None,
            geometry: Some(Point::new(250.0, 0.0)),
        });
        network.pipes.push(Pipe {
            id: "P1".into(),
            upstream_structure: Some("S1".into()),
            downstream_structure: Some("S2".into()),
            diameter: Some(12.0),
            material: Some("PVC".into()),
            slope: Some(0.004),
            length: 250.0,
            upstream_invert: Some(96.0),
            downstream_invert: Some(95.0),
            status: Default::default(),
            geometry: Some(Polyline::new(vec![
                Point::new(0.0, 0.0),
                Point::new(250.0, 0.0),
            ])),
        });
        network
    }

    fn validate(network: &Network) -> ValidationResult {
        let profile = StandardsProfile::default_profile();
        NetworkValidator::new(network, &profile).validate().unwrap()
    }

    #[test]
    fn test_clean_network_is_valid() {
        let result = validate(&clean_network());
        assert!(result.is_valid, "unexpected issues: {:?}", result.issues);
        assert!(result.issues.is_empty());
        assert_eq!(result.statistics.pipe_count, 1);
        assert_eq!(result.statistics.total_length, 250.0);
        let velocity = result.statistics.velocity.unwrap();
        assert!((velocity.mean - 3.73).abs() < 0.01);
    }

    #[test]
    fn test_shallow_slope_invalidates_the_run() {
        // 0.25% on a 12" pipe against the 0.33% table minimum.
        let mut network = clean_network();
        network.pipes[0].slope = Some(0.0025);
        network.pipes[0].upstream_invert = Some(95.625);
        let result = validate(&network);
        assert!(!result.is_valid);
        assert!(result
            .issues
            .iter()
            .any(|i| i.code == IssueCode::SlopeTooLow && i.severity == Severity::Error));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let mut network = clean_network();
        // Pile on findings of every category.
        network.pipes[0].slope = Some(0.0025);
        network.pipes[0].material = None;
        network.structures[0].geometry = None;
        network.pipes.push(Pipe {
            id: "P2".into(),
            upstream_structure: Some("S2".into()),
            downstream_structure: Some("GHOST".into()),
            ..Default::default()
        });

        let first = validate(&network);
        let second = validate(&network);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_validity_matches_error_presence() {
        let mut network = clean_network();
        network.pipes[0].material = None; // warning only
        let result = validate(&network);
        assert!(result.is_valid);
        assert_eq!(result.summary.warnings, 1);

        network.structures.pop(); // now P1 references a missing structure
        let result = validate(&network);
        assert!(!result.is_valid);
        assert_eq!(
            result.issues.iter().filter(|i| i.severity == Severity::Error).count(),
            result.summary.errors
        );
    }

    #[test]
    fn test_empty_network_shapes_a_result_without_failing() {
        let result = validate(&Network::new("N0", "empty"));
        assert!(!result.is_valid); // NO_OUTFALL is an error
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, IssueCode::NoOutfall);
        assert_eq!(result.statistics.pipe_count, 0);
        assert_eq!(result.statistics.structure_count, 0);
        assert_eq!(result.statistics.total_length, 0.0);
        assert!(result.statistics.velocity.is_none());
    }

    #[test]
    fn test_contract_violation_fails_the_call() {
        let mut network = clean_network();
        network.pipes.push(Pipe::default()); // empty id
        let profile = StandardsProfile::default_profile();
        let err = NetworkValidator::new(&network, &profile)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_registry_resolution_and_unknown_profile() {
        let network = clean_network();
        let result = validate_with_registry(&network, None).unwrap();
        assert_eq!(result.profile, "default");

        // The same pipe fails the stricter jurisdiction on diameter.
        let strict = validate_with_registry(&network, Some("strict")).unwrap();
        assert!(strict
            .issues
            .iter()
            .any(|i| i.code == IssueCode::DiameterTooSmall));

        let err = validate_with_registry(&network, Some("atlantis")).unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownProfile {
                name: "atlantis".into()
            }
        );
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let clean = clean_network();
        let mut broken = clean_network();
        broken.id = "N2".into();
        broken.pipes[0].slope = Some(0.0025);
        broken.pipes[0].upstream_invert = Some(95.625);

        let profile = StandardsProfile::default_profile();
        let results = validate_batch(&[clean, broken], &profile);
        assert_eq!(results.len(), 2);
        assert!(results[0].as_ref().unwrap().is_valid);
        assert!(!results[1].as_ref().unwrap().is_valid);
        assert_eq!(results[1].as_ref().unwrap().network_id, "N2");
    }

    #[test]
    fn test_result_serializes_with_stable_field_names() {
        let result = validate(&clean_network());
        let json = serde_json::to_value(&result).unwrap();
        for field in [
            "network_id",
            "network_name",
            "profile",
            "is_valid",
            "issues",
            "statistics",
            "summary",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["statistics"]["pipe_count"], 1);
        assert_eq!(json["summary"]["errors"], 0);

        // Wire strings from a real run: downstream UIs key off these exactly.
        let mut broken = clean_network();
        broken.structures.pop();
        let json = serde_json::to_value(validate(&broken)).unwrap();
        let codes: Vec<&str> = json["issues"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["code"].as_str().unwrap())
            .collect();
        assert!(codes.contains(&"MISSING_DOWNSTREAM_STRUCTURE"));
        assert_eq!(json["issues"][0]["severity"], "error");
        assert_eq!(json["issues"][0]["category"], "continuity");
    }
}
