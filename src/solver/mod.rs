//! Loop evaluation and the re-evaluating simulator.
//!
//! The evaluator is a reachability approximation rather than a nodal
//! solver: a component is powered when it lies on a loop running from a
//! battery to a ground and back, and carries `V / ΣR` of the strongest
//! such loop.

mod adjacency;
mod disjoint;
mod evaluate;
mod fingerprint;
mod loops;
mod simulator;

pub use evaluate::{evaluate, Evaluation, NodeState};
pub use fingerprint::Fingerprint;
pub use loops::{loop_current, CircuitLoop};
pub use simulator::{Simulator, SimulatorConfig};
