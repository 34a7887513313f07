//! Core types for board representation.

use std::fmt;

/// A unique, stable identifier for a component on the board.
///
/// Ids are strings so that boards built by the browser editor
/// (`battery-1`, `led-1712345`) round-trip without translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A unique identifier for a wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub String);

impl WireId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WireId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WireId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Canvas position of a component. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A wire joining two components.
///
/// `source`/`target` only orient the arrowhead in the editor; for the
/// evaluator a wire conducts both ways.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub id: WireId,
    pub source: NodeId,
    pub target: NodeId,
    /// Optional caption (`+`, `-`, `Return`)
    pub label: Option<String>,
}

impl Wire {
    /// Check whether this wire touches the given component.
    pub fn touches(&self, node: &NodeId) -> bool {
        self.source == *node || self.target == *node
    }

    /// Check whether this wire joins `a` and `b`, in either direction.
    pub fn joins(&self, a: &NodeId, b: &NodeId) -> bool {
        (self.source == *a && self.target == *b) || (self.source == *b && self.target == *a)
    }

    /// Check whether both ends sit on the same component.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_joins_either_direction() {
        let w = Wire {
            id: WireId::new("e1"),
            source: NodeId::new("a"),
            target: NodeId::new("b"),
            label: None,
        };
        assert!(w.joins(&"a".into(), &"b".into()));
        assert!(w.joins(&"b".into(), &"a".into()));
        assert!(!w.joins(&"a".into(), &"c".into()));
        assert!(w.touches(&"b".into()));
        assert!(!w.is_self_loop());
    }
}
