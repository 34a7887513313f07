//! Exhaustive loop search between one battery and one ground.
//!
//! The breadth-first loop search commits to the shortest way out to a
//! ground and then looks for a way back around it. When that way out
//! occupies a component every way back needs, the loop is missed even
//! though one exists. This search settles the question exactly: it looks
//! for two routes between the battery and the ground that share no
//! component and no wire, as a unit-capacity flow of value two.
//!
//! Every component other than the two terminals is split into an entry
//! half `2 * slot` and an exit half `2 * slot + 1` joined by one unit of
//! capacity, so it can carry a single route. Open switches get no
//! capacity at all.

use std::collections::VecDeque;

use crate::components::Component;

use super::adjacency::Adjacency;

#[derive(Debug, Clone, Copy)]
struct FlowArc {
    to: usize,
    /// Remaining capacity, 0 or 1
    cap: u8,
    /// Index of the paired arc in `arcs[to]`
    rev: usize,
    /// Present in the network, as opposed to a residual back-arc
    forward: bool,
}

struct Network {
    arcs: Vec<Vec<FlowArc>>,
}

impl Network {
    fn with_len(len: usize) -> Self {
        Self {
            arcs: vec![Vec::new(); len],
        }
    }

    fn add(&mut self, from: usize, to: usize) {
        let rev_from = self.arcs[to].len();
        let rev_to = self.arcs[from].len();
        self.arcs[from].push(FlowArc {
            to,
            cap: 1,
            rev: rev_from,
            forward: true,
        });
        self.arcs[to].push(FlowArc {
            to: from,
            cap: 0,
            rev: rev_to,
            forward: false,
        });
    }

    /// Push one unit along a shortest residual path. Returns `false` when
    /// the sink is out of reach.
    fn augment(&mut self, source: usize, sink: usize) -> bool {
        let mut prev: Vec<Option<(usize, usize)>> = vec![None; self.arcs.len()];
        let mut seen = vec![false; self.arcs.len()];
        let mut queue = VecDeque::new();
        seen[source] = true;
        queue.push_back(source);

        while let Some(at) = queue.pop_front() {
            if at == sink {
                break;
            }
            for (i, arc) in self.arcs[at].iter().enumerate() {
                if arc.cap > 0 && !seen[arc.to] {
                    seen[arc.to] = true;
                    prev[arc.to] = Some((at, i));
                    queue.push_back(arc.to);
                }
            }
        }

        if !seen[sink] {
            return false;
        }

        let mut at = sink;
        while let Some((from, i)) = prev[at] {
            let (to, rev) = {
                let arc = &mut self.arcs[from][i];
                arc.cap -= 1;
                (arc.to, arc.rev)
            };
            self.arcs[to][rev].cap += 1;
            at = from;
        }
        true
    }

    /// Follow one unit of flow from `source` to `sink`, consuming it.
    ///
    /// Returns the component slots entered on the way, ending with the
    /// sink's component.
    fn take_route(&mut self, source: usize, sink: usize) -> Option<Vec<usize>> {
        let mut route = Vec::new();
        let mut at = source;
        while at != sink {
            let i = self.arcs[at].iter().position(|a| a.forward && a.cap == 0)?;
            let arc = &mut self.arcs[at][i];
            // Mark the unit as taken
            arc.cap = 1;
            at = arc.to;
            if at % 2 == 0 {
                route.push(at / 2);
            }
        }
        Some(route)
    }
}

/// Find a loop through `battery` and `ground`, members in loop order:
/// the battery, the shorter route out to the ground, then the other route
/// back.
pub(crate) fn disjoint_loop(
    nodes: &[Component],
    adjacency: &Adjacency,
    battery: usize,
    ground: usize,
) -> Option<Vec<usize>> {
    if battery == ground {
        return None;
    }

    let mut network = Network::with_len(2 * nodes.len());
    for (slot, node) in nodes.iter().enumerate() {
        if slot != battery && slot != ground && node.is_conducting() {
            network.add(2 * slot, 2 * slot + 1);
        }
        for link in adjacency.links(slot) {
            if link.node != slot {
                network.add(2 * slot + 1, 2 * link.node);
            }
        }
    }

    let (source, sink) = (2 * battery + 1, 2 * ground);
    for _ in 0..2 {
        if !network.augment(source, sink) {
            return None;
        }
    }

    let first = network.take_route(source, sink)?;
    let second = network.take_route(source, sink)?;
    let (out, back) = if first.len() <= second.len() {
        (first, second)
    } else {
        (second, first)
    };

    let mut members = Vec::with_capacity(out.len() + back.len());
    members.push(battery);
    members.extend(out);
    // The way back ends at the ground, which is already listed
    members.extend(back.into_iter().rev().skip(1));
    Some(members)
}
