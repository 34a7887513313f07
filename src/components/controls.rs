//! Switch control.
//!
//! A switch is the only component whose state the user flips directly.
//! An open switch still receives a powered verdict of its own but never
//! passes traversal on to its neighbours.

use super::{Component, ComponentKind};

impl Component {
    pub fn is_switch(&self) -> bool {
        self.kind == ComponentKind::Switch
    }

    /// Whether the switch is closed. Always `false` for other kinds.
    pub fn is_closed(&self) -> bool {
        self.is_switch() && self.closed
    }

    /// Whether traversal may continue through this component.
    pub fn is_conducting(&self) -> bool {
        !self.is_switch() || self.closed
    }

    /// Set the switch state.
    ///
    /// Returns the new state, or `None` (and does nothing) for non-switches.
    pub fn set_closed(&mut self, closed: bool) -> Option<bool> {
        if !self.is_switch() {
            return None;
        }
        self.closed = closed;
        self.refresh_label();
        Some(closed)
    }

    /// Toggle the switch state.
    pub fn toggle(&mut self) -> Option<bool> {
        self.set_closed(!self.closed)
    }
}

#[cfg(test)]
mod tests {
    use crate::circuit::{NodeId, Position};
    use crate::components::{Component, ComponentKind};

    #[test]
    fn test_toggle_switch() {
        let mut s = Component::new(NodeId::new("switch-1"), ComponentKind::Switch, Position::default());
        assert!(!s.is_conducting());
        assert_eq!(s.toggle(), Some(true));
        assert!(s.is_closed());
        assert!(s.is_conducting());
        assert_eq!(s.label, "Switch (Closed)");
        assert_eq!(s.toggle(), Some(false));
        assert_eq!(s.label, "Switch (Open)");
    }

    #[test]
    fn test_toggle_ignores_other_kinds() {
        let mut r = Component::new(NodeId::new("resistor-1"), ComponentKind::Resistor, Position::default());
        assert_eq!(r.toggle(), None);
        assert!(!r.is_closed());
        assert!(r.is_conducting());
    }
}
