//! Abstract Syntax Tree types for the board description language.

use std::collections::HashMap;

use crate::components::ComponentKind;

/// Complete AST representation of a parsed board.
#[derive(Debug, Clone, Default)]
pub struct BoardAst {
    /// Start from the demonstration circuit (`.demo`)
    pub use_demo: bool,
    /// All component declarations, in file order
    pub components: Vec<ComponentDef>,
    /// All wire declarations, in file order
    pub wires: Vec<WireDef>,
}

impl BoardAst {
    /// Create a new empty board AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component declaration.
#[derive(Debug, Clone)]
pub struct ComponentDef {
    pub kind: ComponentKind,
    /// Component id
    pub name: String,
    /// Headline value (voltage, resistance, capacitance or switch state)
    pub value: Option<f64>,
    /// Named parameters (`x=`, `closed=`, ...)
    pub params: HashMap<String, f64>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A wire declaration.
#[derive(Debug, Clone)]
pub struct WireDef {
    /// Wire id; generated when omitted
    pub name: Option<String>,
    /// The two component ids it joins
    pub nodes: [String; 2],
    /// Optional caption drawn on the wire
    pub label: Option<String>,
    /// Source line number for error reporting
    pub line: usize,
}
