//! The in-memory representation of one pipe network snapshot.
pub mod geometry;
pub mod graph;
pub mod pipe;
pub mod snapshot;
pub mod structure;

// Re-export key types for convenient access
pub use geometry::{Point, Polyline};
pub use graph::NetworkGraph;
pub use pipe::{Pipe, PipeStatus};
pub use snapshot::Network;
pub use structure::{Structure, StructureKind};
