//! Change detection for re-evaluation.
//!
//! A [`Fingerprint`] captures everything the evaluator reads from a board
//! and nothing else. Two boards with equal fingerprints evaluate to the
//! same result, so a re-run can be skipped. Positions and labels are left
//! out so dragging a component around never triggers one.

use crate::circuit::{NodeId, Snapshot};
use crate::components::ComponentKind;

/// Electrical identity of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    node_count: usize,
    wire_count: usize,
    /// Ordered `(switch id, closed)` pairs
    switches: Vec<(NodeId, bool)>,
    /// Ordered `(id, kind, resistance bits, voltage bits)` per component
    components: Vec<(NodeId, ComponentKind, u64, u64)>,
    /// Ordered wire endpoints
    wires: Vec<(NodeId, NodeId)>,
}

impl Fingerprint {
    /// Fingerprint a snapshot.
    pub fn of(snapshot: &Snapshot<'_>) -> Self {
        Self {
            node_count: snapshot.nodes.len(),
            wire_count: snapshot.wires.len(),
            switches: snapshot
                .nodes
                .iter()
                .filter(|n| n.is_switch())
                .map(|n| (n.id().clone(), n.is_closed()))
                .collect(),
            components: snapshot
                .nodes
                .iter()
                .map(|n| {
                    (
                        n.id().clone(),
                        n.kind(),
                        n.resistance().to_bits(),
                        n.voltage().to_bits(),
                    )
                })
                .collect(),
            wires: snapshot
                .wires
                .iter()
                .map(|w| (w.source.clone(), w.target.clone()))
                .collect(),
        }
    }

    /// Short `nodes-wires-switches` summary, e.g. `5-5-switch-1:false`.
    pub fn summary(&self) -> String {
        let switches: Vec<String> = self
            .switches
            .iter()
            .map(|(id, closed)| format!("{}:{}", id, closed))
            .collect();
        format!("{}-{}-{}", self.node_count, self.wire_count, switches.join("|"))
    }
}
