//! Board validation.

use std::collections::HashSet;

use log::warn;

use crate::error::{CircuitError, Result};

use super::Board;

/// Validate a board before handing it to the evaluator.
///
/// Checks:
/// - Component ids are unique
/// - Every wire references existing components
/// - Resistances are finite and non-negative, voltages finite
///
/// Boards that are legal but can never light up (no battery, no ground,
/// components without wires) only produce warnings.
pub fn validate_board(board: &Board) -> Result<()> {
    let mut seen = HashSet::new();
    for node in board.nodes() {
        if !seen.insert(node.id()) {
            return Err(CircuitError::DuplicateComponent {
                id: node.id().to_string(),
            });
        }
        if !node.resistance().is_finite() || node.resistance() < 0.0 {
            return Err(CircuitError::invalid_parameter(
                node.id().as_str(),
                "resistance",
                "must be a non-negative number of ohms",
            ));
        }
        if !node.voltage().is_finite() {
            return Err(CircuitError::invalid_parameter(
                node.id().as_str(),
                "voltage",
                "must be finite",
            ));
        }
    }

    let mut wire_ids = HashSet::new();
    for wire in board.wires() {
        if !wire_ids.insert(&wire.id) {
            return Err(CircuitError::DuplicateWire {
                id: wire.id.to_string(),
            });
        }
        for end in [&wire.source, &wire.target] {
            if !board.contains(end) {
                return Err(CircuitError::node_not_found(end.as_str()));
            }
        }
        if wire.is_self_loop() {
            warn!("wire '{}' joins '{}' to itself and carries nothing", wire.id, wire.source);
        }
    }

    if !board.is_empty() {
        if !board.nodes().iter().any(|n| n.is_battery()) {
            warn!("board has no battery; nothing can be powered");
        }
        if !board.nodes().iter().any(|n| n.is_ground()) {
            warn!("board has no ground; no loop can be completed");
        }
    }
    for node in board.nodes() {
        if !board.wires().iter().any(|w| w.touches(node.id())) {
            warn!("component '{}' is not wired to anything", node.id());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Position;
    use crate::components::ComponentKind;

    #[test]
    fn test_demo_is_valid() {
        assert!(validate_board(&Board::demo()).is_ok());
    }

    #[test]
    fn test_isolated_components_are_legal() {
        let mut board = Board::new();
        board.add_node(ComponentKind::Led, Position::default());
        assert!(validate_board(&board).is_ok());
    }

    #[test]
    fn test_self_loop_is_legal() {
        let mut board = Board::demo();
        let w = board.connect(&"led-1".into(), &"led-1".into()).unwrap();
        assert!(board.wire(&w).unwrap().is_self_loop());
        assert!(validate_board(&board).is_ok());
    }
}
