//! Board graph structure.

use std::collections::HashMap;

use log::debug;

use super::types::{NodeId, Position, Wire, WireId};
use crate::components::{Component, ComponentKind};
use crate::dsl::BoardAst;
use crate::error::{CircuitError, Result};
use crate::solver::Evaluation;

/// A borrowed, read-only view of a board handed to the evaluator.
///
/// Holding a snapshot borrows the board, so it cannot change while an
/// evaluation runs.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub nodes: &'a [Component],
    pub wires: &'a [Wire],
}

impl<'a> Snapshot<'a> {
    pub fn new(nodes: &'a [Component], wires: &'a [Wire]) -> Self {
        Self { nodes, wires }
    }
}

/// The editable circuit: an arena of components and the wires between them.
///
/// Components live in insertion order; `index` maps ids to slots and is
/// rebuilt after removals so ids stay stable for wire references.
#[derive(Debug, Clone)]
pub struct Board {
    nodes: Vec<Component>,
    index: HashMap<NodeId, usize>,
    wires: Vec<Wire>,
    /// Counter for generated component ids
    next_node: usize,
    /// Counter for generated wire ids
    next_wire: usize,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            wires: Vec::new(),
            next_node: 1,
            next_wire: 1,
        }
    }

    /// The demonstration circuit: battery → switch → resistor → LED →
    /// ground, with a return wire from ground to the battery. The switch
    /// starts open.
    pub fn demo() -> Self {
        let mut board = Self::new();
        let parts = [
            ("battery-1", ComponentKind::Battery, 100.0, 200.0),
            ("switch-1", ComponentKind::Switch, 320.0, 200.0),
            ("resistor-1", ComponentKind::Resistor, 540.0, 200.0),
            ("led-1", ComponentKind::Led, 760.0, 200.0),
            ("ground-1", ComponentKind::Ground, 430.0, 350.0),
        ];
        for (id, kind, x, y) in parts {
            board.push_node(Component::new(NodeId::new(id), kind, Position::new(x, y)));
        }

        let wires = [
            ("e1", "battery-1", "switch-1", Some("+")),
            ("e2", "switch-1", "resistor-1", None),
            ("e3", "resistor-1", "led-1", None),
            ("e4", "led-1", "ground-1", Some("Return")),
            ("e5", "ground-1", "battery-1", Some("-")),
        ];
        for (id, source, target, label) in wires {
            board.wires.push(Wire {
                id: WireId::new(id),
                source: NodeId::new(source),
                target: NodeId::new(target),
                label: label.map(str::to_string),
            });
        }
        board
    }

    /// Build a board from a parsed description.
    pub fn from_ast(ast: BoardAst) -> Result<Self> {
        let mut board = if ast.use_demo {
            Self::demo()
        } else {
            Self::new()
        };

        for def in &ast.components {
            let position = Position::new(
                def.params.get("x").copied().unwrap_or(0.0),
                def.params.get("y").copied().unwrap_or(0.0),
            );
            let id = board
                .insert_node(NodeId::new(def.name.clone()), def.kind, position)
                .map_err(|e| CircuitError::invalid_component(&def.name, def.line, e.to_string()))?;

            let component = board.node_mut(&id)?;
            let apply = |component: &mut Component| -> Result<()> {
                // A bare value means the kind's headline quantity
                if let Some(value) = def.value {
                    match def.kind {
                        ComponentKind::Battery => component.set_voltage(value)?,
                        ComponentKind::Capacitor => component.set_capacitance(value)?,
                        ComponentKind::Switch => {
                            component.set_closed(value > 0.5);
                        }
                        _ => component.set_resistance(value)?,
                    }
                }
                for (param, value) in &def.params {
                    match param.as_str() {
                        "x" | "y" => {}
                        "voltage" | "v" => component.set_voltage(*value)?,
                        "resistance" | "r" => component.set_resistance(*value)?,
                        "capacitance" => component.set_capacitance(*value)?,
                        "closed" | "state" => {
                            if component.set_closed(*value > 0.5).is_none() {
                                return Err(CircuitError::invalid_parameter(
                                    &def.name,
                                    param.as_str(),
                                    "only switches can be opened or closed",
                                ));
                            }
                        }
                        _ => {
                            return Err(CircuitError::invalid_parameter(
                                &def.name,
                                param.as_str(),
                                "unknown parameter",
                            ))
                        }
                    }
                }
                Ok(())
            };
            apply(component)
                .map_err(|e| CircuitError::invalid_component(&def.name, def.line, e.to_string()))?;
        }

        for def in ast.wires {
            let [source, target] = def.nodes.map(NodeId::new);
            let id = match def.name {
                Some(name) => WireId::new(name),
                None => board.fresh_wire_id(),
            };
            board
                .connect_with_id(id.clone(), &source, &target, def.label)
                .map_err(|e| CircuitError::invalid_component(id.0, def.line, e.to_string()))?;
        }

        debug!(
            "built board with {} components and {} wires",
            board.node_count(),
            board.wire_count()
        );
        Ok(board)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All components in insertion order.
    pub fn nodes(&self) -> &[Component] {
        &self.nodes
    }

    /// All wires in insertion order.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Find a component by id.
    pub fn node(&self, id: &NodeId) -> Option<&Component> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    /// Find a wire by id.
    pub fn wire(&self, id: &WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id == *id)
    }

    /// Read-only view for the evaluator.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(&self.nodes, &self.wires)
    }

    /// Place a new component with the defaults of its kind.
    ///
    /// The id is generated as `<kind>-<n>` and never collides with an
    /// existing component.
    pub fn add_node(&mut self, kind: ComponentKind, position: Position) -> NodeId {
        let id = loop {
            let candidate = NodeId::new(format!("{}-{}", kind, self.next_node));
            self.next_node += 1;
            if !self.contains(&candidate) {
                break candidate;
            }
        };
        self.push_node(Component::new(id.clone(), kind, position));
        id
    }

    /// Place a new component under an explicit id.
    pub fn insert_node(&mut self, id: NodeId, kind: ComponentKind, position: Position) -> Result<NodeId> {
        if self.contains(&id) {
            return Err(CircuitError::DuplicateComponent { id: id.0 });
        }
        self.push_node(Component::new(id.clone(), kind, position));
        Ok(id)
    }

    /// Remove a component and every wire touching it.
    ///
    /// Returns `false` when the component did not exist.
    pub fn remove_node(&mut self, id: &NodeId) -> bool {
        self.remove_nodes(std::slice::from_ref(id)) > 0
    }

    /// Remove several components at once. Returns how many existed.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|n| !ids.contains(n.id()));
        let removed = before - self.nodes.len();
        if removed > 0 {
            self.wires
                .retain(|w| !ids.contains(&w.source) && !ids.contains(&w.target));
            self.rebuild_index();
        }
        removed
    }

    /// Wire two existing components together under a generated id.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<WireId> {
        let id = self.fresh_wire_id();
        self.connect_with_id(id, source, target, None)
    }

    /// Wire two existing components together under an explicit id.
    ///
    /// Parallel wires and self-loops are accepted.
    pub fn connect_with_id(
        &mut self,
        id: WireId,
        source: &NodeId,
        target: &NodeId,
        label: Option<String>,
    ) -> Result<WireId> {
        for end in [source, target] {
            if !self.contains(end) {
                return Err(CircuitError::node_not_found(end.as_str()));
            }
        }
        if self.wire(&id).is_some() {
            return Err(CircuitError::DuplicateWire { id: id.0 });
        }
        self.wires.push(Wire {
            id: id.clone(),
            source: source.clone(),
            target: target.clone(),
            label,
        });
        Ok(id)
    }

    /// Remove a wire by id. Returns `false` when it did not exist.
    pub fn remove_wire(&mut self, id: &WireId) -> bool {
        let before = self.wires.len();
        self.wires.retain(|w| w.id != *id);
        self.wires.len() != before
    }

    /// Remove every wire joining `a` and `b`, in either direction.
    pub fn disconnect(&mut self, a: &NodeId, b: &NodeId) -> usize {
        let before = self.wires.len();
        self.wires.retain(|w| !w.joins(a, b));
        before - self.wires.len()
    }

    /// Flip a switch. Returns the new state, or `None` when `id` is not a
    /// switch on this board.
    pub fn toggle_switch(&mut self, id: &NodeId) -> Option<bool> {
        let slot = *self.index.get(id)?;
        self.nodes[slot].toggle()
    }

    /// Force a switch into a state. Returns `None` when `id` is not a switch.
    pub fn set_switch(&mut self, id: &NodeId, closed: bool) -> Option<bool> {
        let slot = *self.index.get(id)?;
        self.nodes[slot].set_closed(closed)
    }

    pub fn set_resistance(&mut self, id: &NodeId, ohms: f64) -> Result<()> {
        self.node_mut(id)?.set_resistance(ohms)
    }

    pub fn set_voltage(&mut self, id: &NodeId, volts: f64) -> Result<()> {
        self.node_mut(id)?.set_voltage(volts)
    }

    pub fn set_capacitance(&mut self, id: &NodeId, farads: f64) -> Result<()> {
        self.node_mut(id)?.set_capacitance(farads)
    }

    /// Replace a component's caption.
    pub fn set_label(&mut self, id: &NodeId, label: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.label = label.into();
        Ok(())
    }

    /// Move a component on the canvas.
    pub fn move_node(&mut self, id: &NodeId, position: Position) -> Result<()> {
        self.node_mut(id)?.position = position;
        Ok(())
    }

    /// Whether a wire carries current, i.e. both of its ends are powered.
    pub fn is_wire_energized(&self, id: &WireId) -> bool {
        self.wire(id).is_some_and(|w| {
            let powered = |n: &NodeId| self.node(n).is_some_and(Component::is_powered);
            powered(&w.source) && powered(&w.target)
        })
    }

    /// Copy an evaluation onto the components' derived fields.
    pub(crate) fn apply(&mut self, evaluation: &Evaluation) {
        for node in &mut self.nodes {
            let state = evaluation.state(node.id());
            node.set_derived(state.powered, state.current);
        }
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut Component> {
        let slot = *self
            .index
            .get(id)
            .ok_or_else(|| CircuitError::node_not_found(id.as_str()))?;
        Ok(&mut self.nodes[slot])
    }

    /// Next unused `e<n>` wire id.
    fn fresh_wire_id(&mut self) -> WireId {
        loop {
            let candidate = WireId::new(format!("e{}", self.next_wire));
            self.next_wire += 1;
            if self.wire(&candidate).is_none() {
                return candidate;
            }
        }
    }

    fn push_node(&mut self, component: Component) {
        self.index.insert(component.id().clone(), self.nodes.len());
        self.nodes.push(component);
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, n)| (n.id().clone(), slot))
            .collect();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
