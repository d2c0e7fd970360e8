//! Open-channel/pipe-flow computation.
pub mod manning;

pub use manning::{solve_full_pipe, FlowSolution};
