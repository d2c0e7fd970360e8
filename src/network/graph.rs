//! Directed topology graph derived from a network snapshot.
//!
//! Structures referenced by any pipe become nodes (whether or not a matching
//! structure record exists; dangling references are the continuity rule's
//! business) and every pipe with both end references becomes one directed
//! upstream→downstream edge carrying the pipe's index into the snapshot.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use smallvec::SmallVec;

use super::snapshot::Network;

/// Index-based adjacency view of one network, used by the topology and
/// standards rules. Node and edge ordering follows snapshot order, which
/// keeps every traversal deterministic.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    graph: DiGraph<String, usize>,
    by_id: HashMap<String, NodeIndex>,
}

impl NetworkGraph {
    pub fn from_network(network: &Network) -> Self {
        let mut built = Self::default();
        for (pipe_idx, pipe) in network.pipes.iter().enumerate() {
            let up = pipe.upstream_structure.as_deref().map(|id| built.intern(id));
            let dn = pipe
                .downstream_structure
                .as_deref()
                .map(|id| built.intern(id));
            if let (Some(up), Some(dn)) = (up, dn) {
                built.graph.add_edge(up, dn, pipe_idx);
            }
        }
        built
    }

    fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&node) = self.by_id.get(id) {
            return node;
        }
        let node = self.graph.add_node(id.to_string());
        self.by_id.insert(id.to_string(), node);
        node
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn structure_id(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// Nodes with out-degree zero: the sinks the network drains to.
    pub fn outfalls(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&n| {
                self.graph
                    .neighbors_directed(n, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .collect()
    }

    /// Pipe indices of edges flowing into `node`, paired with their source
    /// node. Junctions rarely join more than a few pipes, hence the SmallVec.
    pub fn incoming_pipes(&self, node: NodeIndex) -> SmallVec<[(usize, NodeIndex); 4]> {
        use petgraph::visit::EdgeRef;
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|edge| (*edge.weight(), edge.source()))
            .collect()
    }

    /// Finds structures that a traversal re-enters while they are still on
    /// the active path (back-edge targets), using an iterative depth-first
    /// search with an explicit stack so arbitrarily deep networks cannot
    /// overflow the call stack. Returns each distinct loop entry point once.
    pub fn loop_entry_points(&self) -> Vec<NodeIndex> {
        #[derive(Clone, Copy, PartialEq)]
        enum VisitState {
            Unvisited,
            OnPath,
            Done,
        }
        enum Frame {
            Enter(NodeIndex),
            Leave(NodeIndex),
        }

        let mut state = vec![VisitState::Unvisited; self.graph.node_count()];
        let mut entry_points = Vec::new();
        let mut flagged = vec![false; self.graph.node_count()];
        let mut stack = Vec::new();

        for root in self.graph.node_indices() {
            if state[root.index()] != VisitState::Unvisited {
                continue;
            }
            stack.push(Frame::Enter(root));
            while let Some(frame) = stack.pop() {
                match frame {
                    Frame::Enter(node) => {
                        if state[node.index()] != VisitState::Unvisited {
                            continue;
                        }
                        state[node.index()] = VisitState::OnPath;
                        stack.push(Frame::Leave(node));
                        for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                            match state[next.index()] {
                                VisitState::Unvisited => stack.push(Frame::Enter(next)),
                                VisitState::OnPath => {
                                    if !flagged[next.index()] {
                                        flagged[next.index()] = true;
                                        entry_points.push(next);
                                    }
                                }
                                VisitState::Done => {}
                            }
                        }
                    }
                    Frame::Leave(node) => state[node.index()] = VisitState::Done,
                }
            }
        }

        entry_points
    }
}
