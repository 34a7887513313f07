//! Main simulator interface.
//!
//! The [`Simulator`] owns the board, performs every edit, and re-evaluates
//! after each one. Re-evaluation is skipped when the board's
//! [`Fingerprint`] has not changed since the last run.

use log::{debug, info};

use crate::circuit::{Board, NodeId, Position, WireId};
use crate::components::ComponentKind;
use crate::error::Result;

use super::evaluate::{evaluate, Evaluation, NodeState};
use super::fingerprint::Fingerprint;

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Whether evaluation runs at all (the editor's "Simulation ON/OFF").
    pub active: bool,
    /// Skip re-evaluation when the fingerprint is unchanged.
    pub change_detection: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            active: true,
            change_detection: true,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with simulation switched on or off.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Enable or disable fingerprint-based change detection.
    ///
    /// With change detection off the evaluator runs after every edit;
    /// results are identical either way.
    pub fn with_change_detection(mut self, enabled: bool) -> Self {
        self.change_detection = enabled;
        self
    }
}

/// The interactive circuit simulator.
#[derive(Debug)]
pub struct Simulator {
    /// The board being edited
    board: Board,
    config: SimulatorConfig,
    /// Fingerprint of the board at the last evaluation
    last: Option<Fingerprint>,
    /// Result of the last evaluation
    evaluation: Evaluation,
    /// Number of times the evaluator actually ran
    runs: u64,
}

impl Simulator {
    /// Create a simulator for the given board with default configuration.
    pub fn new(board: Board) -> Self {
        Self::with_config(board, SimulatorConfig::default())
    }

    /// Create a simulator for the given board with custom configuration.
    pub fn with_config(board: Board, config: SimulatorConfig) -> Self {
        let mut simulator = Self {
            board,
            config,
            last: None,
            evaluation: Evaluation::default(),
            runs: 0,
        };
        simulator.refresh();
        simulator
    }

    /// A simulator loaded with the demonstration circuit.
    pub fn demo() -> Self {
        Self::new(Board::demo())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Result of the most recent evaluation.
    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Verdict for one component.
    pub fn state(&self, id: &NodeId) -> NodeState {
        self.evaluation.state(id)
    }

    /// How many times the evaluator has run.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn is_active(&self) -> bool {
        self.config.active
    }

    /// Place a new component.
    pub fn add_component(&mut self, kind: ComponentKind, position: Position) -> NodeId {
        let id = self.board.add_node(kind, position);
        self.refresh();
        id
    }

    /// Place a new component under an explicit id.
    pub fn insert_component(&mut self, id: NodeId, kind: ComponentKind, position: Position) -> Result<NodeId> {
        let id = self.board.insert_node(id, kind, position)?;
        self.refresh();
        Ok(id)
    }

    /// Remove a component and its wires. Idempotent.
    pub fn remove_component(&mut self, id: &NodeId) -> bool {
        let removed = self.board.remove_node(id);
        self.refresh();
        removed
    }

    /// Remove a selection of components and their wires.
    pub fn remove_components(&mut self, ids: &[NodeId]) -> usize {
        let removed = self.board.remove_nodes(ids);
        self.refresh();
        removed
    }

    /// Wire two components together.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<WireId> {
        let id = self.board.connect(source, target)?;
        self.refresh();
        Ok(id)
    }

    /// Remove a wire by id.
    pub fn disconnect(&mut self, wire: &WireId) -> bool {
        let removed = self.board.remove_wire(wire);
        self.refresh();
        removed
    }

    /// Remove every wire between two components.
    pub fn disconnect_nodes(&mut self, a: &NodeId, b: &NodeId) -> usize {
        let removed = self.board.disconnect(a, b);
        self.refresh();
        removed
    }

    /// Flip a switch; a no-op for anything that is not a switch.
    pub fn toggle_switch(&mut self, id: &NodeId) -> Option<bool> {
        let state = self.board.toggle_switch(id);
        self.refresh();
        state
    }

    /// Force a switch into a state; a no-op for anything that is not a switch.
    pub fn set_switch(&mut self, id: &NodeId, closed: bool) -> Option<bool> {
        let state = self.board.set_switch(id, closed);
        self.refresh();
        state
    }

    pub fn set_resistance(&mut self, id: &NodeId, ohms: f64) -> Result<()> {
        self.board.set_resistance(id, ohms)?;
        self.refresh();
        Ok(())
    }

    pub fn set_voltage(&mut self, id: &NodeId, volts: f64) -> Result<()> {
        self.board.set_voltage(id, volts)?;
        self.refresh();
        Ok(())
    }

    pub fn set_capacitance(&mut self, id: &NodeId, farads: f64) -> Result<()> {
        self.board.set_capacitance(id, farads)?;
        self.refresh();
        Ok(())
    }

    /// Move a component. Never triggers a re-evaluation on its own.
    pub fn move_component(&mut self, id: &NodeId, position: Position) -> Result<()> {
        self.board.move_node(id, position)?;
        self.refresh();
        Ok(())
    }

    /// Replace the whole board.
    pub fn load(&mut self, board: Board) {
        self.board = board;
        self.last = None;
        self.refresh();
    }

    /// Restore the demonstration circuit.
    pub fn reset(&mut self) {
        info!("resetting to demonstration circuit");
        self.load(Board::demo());
    }

    /// Switch simulation on or off.
    ///
    /// While off, edits are applied but results stay frozen. Switching
    /// back on catches up immediately.
    pub fn set_active(&mut self, active: bool) {
        self.config.active = active;
        self.refresh();
    }

    /// Re-evaluate if the board changed electrically since the last run.
    ///
    /// Returns `true` when the evaluator ran.
    pub fn refresh(&mut self) -> bool {
        if !self.config.active {
            return false;
        }

        let fingerprint = Fingerprint::of(&self.board.snapshot());
        if self.config.change_detection && self.last.as_ref() == Some(&fingerprint) {
            return false;
        }

        debug!("re-evaluating board {}", fingerprint.summary());
        self.evaluation = evaluate(self.board.snapshot());
        self.board.apply(&self.evaluation);
        self.last = Some(fingerprint);
        self.runs += 1;
        true
    }
}
