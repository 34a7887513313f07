//! Loop search: battery → ... → ground → ... → battery.
//!
//! For every battery a breadth-first walk follows wires outward, stopping
//! at open switches. Each ground it reaches is tried as the turning point
//! of a loop: a second search looks for a way back to the battery that
//! shares no wire and no intermediate component with the outward path and
//! also respects open switches. When one exists, the outward path plus
//! the way back form a complete circuit. If the shortest way out leaves
//! no way back, an exhaustive two-route search decides instead.

use std::collections::{HashSet, VecDeque};

use crate::circuit::NodeId;
use crate::components::Component;

use super::adjacency::{Adjacency, Link};
use super::disjoint::disjoint_loop;

/// A complete circuit found by the loop search.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitLoop {
    /// Battery driving the loop
    pub battery: NodeId,
    /// Ground the loop turns at
    pub ground: NodeId,
    /// Members in loop order, battery first, each listed once
    pub nodes: Vec<NodeId>,
    /// Sum of member resistances (ohms)
    pub resistance: f64,
    /// Loop current (amperes), zero when the resistance sum is zero
    pub current: f64,
}

/// Loop members as snapshot slots, before ids are attached.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LoopPath {
    pub battery: usize,
    pub ground: usize,
    pub members: Vec<usize>,
}

impl LoopPath {
    /// Resolve slots to ids and compute resistance and current.
    pub fn into_loop(self, nodes: &[Component]) -> CircuitLoop {
        let resistance: f64 = self.members.iter().map(|&s| nodes[s].resistance()).sum();
        CircuitLoop {
            battery: nodes[self.battery].id().clone(),
            ground: nodes[self.ground].id().clone(),
            current: loop_current(nodes[self.battery].voltage(), resistance),
            nodes: self.members.iter().map(|&s| nodes[s].id().clone()).collect(),
            resistance,
        }
    }
}

/// Ohm's law over the whole loop.
///
/// A zero resistance sum yields zero current instead of infinity.
pub fn loop_current(voltage: f64, resistance: f64) -> f64 {
    if resistance > 0.0 {
        voltage.abs() / resistance
    } else {
        0.0
    }
}

/// Find every complete loop driven by the battery in `battery`.
///
/// Grounds are tried in breadth-first discovery order, so each ground is
/// attributed the outward path with the fewest hops.
pub(crate) fn trace_battery(nodes: &[Component], adjacency: &Adjacency, battery: usize) -> Vec<LoopPath> {
    debug_assert_eq!(adjacency.len(), nodes.len());
    let mut found = Vec::new();
    let mut visited = vec![false; nodes.len()];
    let mut parent: Vec<Option<Link>> = vec![None; nodes.len()];
    let mut queue = VecDeque::new();

    visited[battery] = true;
    queue.push_back(battery);

    while let Some(slot) = queue.pop_front() {
        // An open switch is reached but does not pass anything on
        if !nodes[slot].is_conducting() {
            continue;
        }

        if slot != battery && nodes[slot].is_ground() {
            let (outward, wires) = walk_back(&parent, slot);
            let members = match find_return(nodes, adjacency, &outward, &wires) {
                Some(way_back) => {
                    let mut members = outward;
                    members.extend(way_back);
                    Some(members)
                }
                // The shortest way out may occupy a component every way
                // back needs; settle it with the exhaustive search
                None => disjoint_loop(nodes, adjacency, battery, slot),
            };
            if let Some(members) = members {
                found.push(LoopPath {
                    battery,
                    ground: slot,
                    members,
                });
            }
        }

        for link in adjacency.links(slot) {
            if !visited[link.node] {
                visited[link.node] = true;
                parent[link.node] = Some(Link {
                    node: slot,
                    wire: link.wire,
                });
                queue.push_back(link.node);
            }
        }
    }

    found
}

/// Rebuild the outward path (battery first) and the wires it used.
fn walk_back(parent: &[Option<Link>], end: usize) -> (Vec<usize>, HashSet<usize>) {
    let mut path = vec![end];
    let mut wires = HashSet::new();
    let mut slot = end;
    while let Some(link) = parent[slot] {
        wires.insert(link.wire);
        path.push(link.node);
        slot = link.node;
    }
    path.reverse();
    (path, wires)
}

/// Search a way from the ground at the end of `outward` back to the
/// battery at its start.
///
/// Returns the intermediate components of the way back (ground side
/// first), possibly empty when a separate wire joins them directly.
fn find_return(
    nodes: &[Component],
    adjacency: &Adjacency,
    outward: &[usize],
    used_wires: &HashSet<usize>,
) -> Option<Vec<usize>> {
    let (&battery, &ground) = (outward.first()?, outward.last()?);

    let mut blocked = vec![false; nodes.len()];
    for &slot in outward {
        blocked[slot] = true;
    }

    let mut parent: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut queue = VecDeque::new();
    queue.push_back(ground);

    while let Some(slot) = queue.pop_front() {
        for link in adjacency.links(slot) {
            if used_wires.contains(&link.wire) {
                continue;
            }
            if link.node == battery {
                let mut way_back = Vec::new();
                let mut at = slot;
                while at != ground {
                    way_back.push(at);
                    at = parent[at]?;
                }
                way_back.reverse();
                return Some(way_back);
            }
            if blocked[link.node] || !nodes[link.node].is_conducting() {
                continue;
            }
            blocked[link.node] = true;
            parent[link.node] = Some(slot);
            queue.push_back(link.node);
        }
    }

    None
}
