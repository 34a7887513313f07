//! Undirected adjacency over a board snapshot.
//!
//! Components are addressed by their slot in the snapshot, wires by their
//! index in the wire list. Keeping the wire index on every link lets the
//! loop search tell parallel wires apart.

use std::collections::HashMap;

use log::trace;

use crate::circuit::{NodeId, Snapshot};

/// One half of a wire as seen from a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    /// Slot of the component on the other end
    pub node: usize,
    /// Index of the wire in the snapshot
    pub wire: usize,
}

/// Neighbour lists for every component slot.
#[derive(Debug)]
pub(crate) struct Adjacency {
    links: Vec<Vec<Link>>,
}

impl Adjacency {
    /// Build neighbour lists in wire order.
    ///
    /// A wire between `a` and `b` lists `b` under `a` and `a` under `b`; a
    /// self-loop lists its component once. Wires whose ends are not in the
    /// snapshot are skipped.
    pub fn build(snapshot: &Snapshot<'_>) -> Self {
        let slots: HashMap<&NodeId, usize> = snapshot
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, n)| (n.id(), slot))
            .collect();

        let mut links = vec![Vec::new(); snapshot.nodes.len()];
        for (wire, w) in snapshot.wires.iter().enumerate() {
            let (Some(&a), Some(&b)) = (slots.get(&w.source), slots.get(&w.target)) else {
                trace!("skipping dangling wire '{}'", w.id);
                continue;
            };
            links[a].push(Link { node: b, wire });
            if a != b {
                links[b].push(Link { node: a, wire });
            }
        }

        Self { links }
    }

    /// Neighbours of a slot, in wire order.
    pub fn links(&self, slot: usize) -> &[Link] {
        &self.links[slot]
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Board, Position};
    use crate::components::ComponentKind;

    #[test]
    fn test_demo_adjacency() {
        let board = Board::demo();
        let adj = Adjacency::build(&board.snapshot());
        assert_eq!(adj.len(), 5);
        // battery-1 (slot 0): e1 to switch-1, e5 from ground-1
        assert_eq!(
            adj.links(0),
            &[Link { node: 1, wire: 0 }, Link { node: 4, wire: 4 }]
        );
    }

    #[test]
    fn test_self_loop_listed_once() {
        let mut board = Board::new();
        let r = board.add_node(ComponentKind::Resistor, Position::default());
        board.connect(&r, &r).unwrap();
        let adj = Adjacency::build(&board.snapshot());
        assert_eq!(adj.links(0), &[Link { node: 0, wire: 0 }]);
    }
}
