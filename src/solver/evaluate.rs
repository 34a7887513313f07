//! Circuit evaluation: which components are energized and how much
//! current runs through them.

use std::collections::HashMap;

use log::{debug, trace};

use crate::circuit::{NodeId, Snapshot, Wire};

use super::adjacency::Adjacency;
use super::loops::{trace_battery, CircuitLoop};

/// Evaluator verdict for one component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeState {
    /// Lies on at least one complete loop
    pub powered: bool,
    /// Largest loop current among the loops it lies on (amperes)
    pub current: f64,
}

impl NodeState {
    /// The verdict for a component on no loop.
    pub const OFF: NodeState = NodeState {
        powered: false,
        current: 0.0,
    };
}

/// Result of evaluating a board: a verdict for every component plus the
/// loops that produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    states: HashMap<NodeId, NodeState>,
    loops: Vec<CircuitLoop>,
}

impl Evaluation {
    /// Verdict for a component; unknown ids read as unpowered.
    pub fn state(&self, id: &NodeId) -> NodeState {
        self.states.get(id).copied().unwrap_or(NodeState::OFF)
    }

    /// Verdict for a component, `None` if it was not part of the snapshot.
    pub fn get(&self, id: &NodeId) -> Option<&NodeState> {
        self.states.get(id)
    }

    pub fn is_powered(&self, id: &NodeId) -> bool {
        self.state(id).powered
    }

    pub fn current(&self, id: &NodeId) -> f64 {
        self.state(id).current
    }

    /// All verdicts, keyed by component id.
    pub fn states(&self) -> &HashMap<NodeId, NodeState> {
        &self.states
    }

    /// Complete loops, grouped by battery in board order.
    pub fn loops(&self) -> &[CircuitLoop] {
        &self.loops
    }

    /// Number of components covered.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn powered_count(&self) -> usize {
        self.states.values().filter(|s| s.powered).count()
    }

    /// A wire is energized when both of its ends are powered.
    pub fn is_wire_energized(&self, wire: &Wire) -> bool {
        self.is_powered(&wire.source) && self.is_powered(&wire.target)
    }
}

/// Evaluate a board snapshot.
///
/// Total over any snapshot: boards without batteries, disconnected
/// parts, self-loops and zero-resistance loops are all handled by policy.
/// The result has an entry for every component in the snapshot.
pub fn evaluate(snapshot: Snapshot<'_>) -> Evaluation {
    let mut states: HashMap<NodeId, NodeState> = snapshot
        .nodes
        .iter()
        .map(|n| (n.id().clone(), NodeState::OFF))
        .collect();

    let batteries: Vec<usize> = snapshot
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.is_battery())
        .map(|(slot, _)| slot)
        .collect();

    if batteries.is_empty() {
        debug!("no battery on board, {} components unpowered", states.len());
        return Evaluation {
            states,
            loops: Vec::new(),
        };
    }

    let adjacency = Adjacency::build(&snapshot);
    let mut loops = Vec::new();

    for battery in batteries {
        for path in trace_battery(snapshot.nodes, &adjacency, battery) {
            let found = path.into_loop(snapshot.nodes);
            trace!(
                "loop {} -> {}: {} members, {:.3} ohm, {:.4} A",
                found.battery,
                found.ground,
                found.nodes.len(),
                found.resistance,
                found.current
            );
            for id in &found.nodes {
                if let Some(state) = states.get_mut(id) {
                    state.powered = true;
                    // Strongest loop wins; currents are not summed
                    state.current = state.current.max(found.current);
                }
            }
            loops.push(found);
        }
    }

    let evaluation = Evaluation { states, loops };
    debug!(
        "evaluated {} components: {} loops, {} powered",
        evaluation.len(),
        evaluation.loops.len(),
        evaluation.powered_count()
    );
    evaluation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Board, Position};
    use crate::components::ComponentKind;

    #[test]
    fn test_no_battery_all_off() {
        let mut board = Board::new();
        let r = board.add_node(ComponentKind::Resistor, Position::default());
        let g = board.add_node(ComponentKind::Ground, Position::default());
        board.connect(&r, &g).unwrap();
        board.connect(&g, &r).unwrap();

        let eval = evaluate(board.snapshot());
        assert_eq!(eval.len(), 2);
        assert_eq!(eval.state(&r), NodeState::OFF);
        assert_eq!(eval.state(&g), NodeState::OFF);
        assert!(eval.loops().is_empty());
    }

    #[test]
    fn test_empty_board() {
        let eval = evaluate(Board::new().snapshot());
        assert!(eval.is_empty());
    }

    #[test]
    fn test_open_switch_demo_unpowered() {
        let board = Board::demo();
        let eval = evaluate(board.snapshot());
        assert_eq!(eval.len(), 5);
        assert_eq!(eval.powered_count(), 0);
        assert!(board.wires().iter().all(|w| !eval.is_wire_energized(w)));
    }

    #[test]
    fn test_closed_demo_powered() {
        let mut board = Board::demo();
        board.toggle_switch(&"switch-1".into());
        let eval = evaluate(board.snapshot());
        assert_eq!(eval.powered_count(), 5);
        for node in board.nodes() {
            assert!((eval.current(node.id()) - 9.0 / 111.2).abs() < 1e-12);
        }
        assert!(board.wires().iter().all(|w| eval.is_wire_energized(w)));
    }
}
