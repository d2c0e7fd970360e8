//! The `Network` snapshot: the read-only input of one validation run.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::pipe::Pipe;
use super::structure::Structure;
use crate::validation::error::EngineError;

/// One logical pipe system (e.g. a single storm network within a project),
/// captured as a snapshot for the duration of a validation call.
///
/// The engine never mutates a `Network`. Records with missing optional data
/// are valid inputs; only identifier-level malformation (empty or duplicate
/// ids) rejects the call, since every finding must be attributable to a
/// specific record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    pub pipes: Vec<Pipe>,
    pub structures: Vec<Structure>,
}

impl Network {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pipes: Vec::new(),
            structures: Vec::new(),
        }
    }

    /// Enforces the input contract: every pipe and structure carries a
    /// non-empty identifier, and identifiers are unique per collection.
    ///
    /// Violations are programming-level failures on the caller's side, so
    /// they fail the call instead of becoming findings.
    pub fn verify_contract(&self) -> Result<(), EngineError> {
        let mut seen_structures = HashSet::with_capacity(self.structures.len());
        for structure in &self.structures {
            if structure.id.trim().is_empty() {
                return Err(EngineError::InvalidInput {
                    detail: "structure with empty identifier".into(),
                });
            }
            if !seen_structures.insert(structure.id.as_str()) {
                return Err(EngineError::InvalidInput {
                    detail: format!("duplicate structure identifier '{}'", structure.id),
                });
            }
        }

        let mut seen_pipes = HashSet::with_capacity(self.pipes.len());
        for pipe in &self.pipes {
            if pipe.id.trim().is_empty() {
                return Err(EngineError::InvalidInput {
                    detail: "pipe with empty identifier".into(),
                });
            }
            if !seen_pipes.insert(pipe.id.as_str()) {
                return Err(EngineError::InvalidInput {
                    detail: format!("duplicate pipe identifier '{}'", pipe.id),
                });
            }
        }

        Ok(())
    }

    /// Builds the structure-id lookup used by the checkers. Rebuilt per run;
    /// the snapshot itself stays plain serializable data.
    pub fn structure_index(&self) -> HashMap<&str, usize> {
        self.structures
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.id.as_str(), idx))
            .collect()
    }

    /// Looks up a structure record by identifier.
    pub fn structure(&self, id: &str) -> Option<&Structure> {
        self.structures.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_rejects_empty_pipe_id() {
        let mut network = Network::new("N1", "Storm A");
        network.pipes.push(Pipe::default());
        let err = network.verify_contract().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_contract_rejects_duplicate_structure_id() {
        let mut network = Network::new("N1", "Storm A");
        network.structures.push(Structure {
            id: "S1".into(),
            ..Default::default()
        });
        network.structures.push(Structure {
            id: "S1".into(),
            ..Default::default()
        });
        assert!(network.verify_contract().is_err());
    }

    #[test]
    fn test_contract_accepts_sparse_records() {
        let mut network = Network::new("N1", "Storm A");
        network.pipes.push(Pipe {
            id: "P1".into(),
            ..Default::default()
        });
        assert!(network.verify_contract().is_ok());
    }
}
