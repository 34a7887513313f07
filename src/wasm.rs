//! WASM bindings for Circuit Lab Core.
//!
//! This module provides JavaScript-friendly bindings for the browser
//! graph editor. Every edit re-evaluates the board; the editor then reads
//! back powered state and currents to style components and wires.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitSim } from 'circuitlab_core';
//!
//! await init();
//!
//! const sim = new WasmCircuitSim();          // demo circuit, switch open
//! sim.toggle_switch("switch-1");
//!
//! for (const id of sim.node_ids()) {
//!   const glow = sim.is_powered(id);
//!   const amps = sim.current(id);
//! }
//! const animated = sim.is_wire_energized("e1");
//! ```

use log::Level;
use wasm_bindgen::prelude::*;

use crate::circuit::{NodeId, Position, WireId};
use crate::components::ComponentKind;
use crate::dsl;
use crate::error::CircuitError;
use crate::solver::Simulator;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(Level::Info);
}

fn to_js(e: CircuitError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// WASM-compatible circuit simulator.
///
/// Wraps the native [`Simulator`]; ids cross the boundary as strings.
#[wasm_bindgen]
pub struct WasmCircuitSim {
    simulator: Simulator,
}

#[wasm_bindgen]
impl WasmCircuitSim {
    /// Create a simulator loaded with the demonstration circuit.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmCircuitSim {
        WasmCircuitSim {
            simulator: Simulator::demo(),
        }
    }

    /// Create a simulator from a board description.
    ///
    /// # Example
    /// ```javascript
    /// const sim = WasmCircuitSim.from_description(".demo\nswitch S2 closed");
    /// ```
    #[wasm_bindgen]
    pub fn from_description(description: &str) -> Result<WasmCircuitSim, JsValue> {
        let board = dsl::load(description).map_err(to_js)?;
        Ok(WasmCircuitSim {
            simulator: Simulator::new(board),
        })
    }

    /// Export the current board as a description.
    #[wasm_bindgen]
    pub fn to_description(&self) -> String {
        dsl::describe(self.simulator.board())
    }

    /// Place a component and return its generated id.
    ///
    /// `kind` is one of `battery`, `resistor`, `led`, `switch`,
    /// `capacitor`, `ground`.
    #[wasm_bindgen]
    pub fn add_component(&mut self, kind: &str, x: f64, y: f64) -> Result<String, JsValue> {
        let kind = ComponentKind::from_keyword(kind).ok_or_else(|| {
            to_js(CircuitError::WasmError {
                message: format!("unknown component kind '{}'", kind),
            })
        })?;
        let id = self.simulator.add_component(kind, Position::new(x, y));
        Ok(id.0)
    }

    /// Remove a component and its wires.
    #[wasm_bindgen]
    pub fn remove_component(&mut self, id: &str) -> bool {
        self.simulator.remove_component(&NodeId::new(id))
    }

    /// Wire two components together and return the wire id.
    #[wasm_bindgen]
    pub fn connect(&mut self, source: &str, target: &str) -> Result<String, JsValue> {
        let id = self
            .simulator
            .connect(&NodeId::new(source), &NodeId::new(target))
            .map_err(to_js)?;
        Ok(id.0)
    }

    /// Remove a wire by id.
    #[wasm_bindgen]
    pub fn disconnect(&mut self, wire: &str) -> bool {
        self.simulator.disconnect(&WireId::new(wire))
    }

    /// Flip a switch. Returns the new state, or `undefined` for non-switches.
    #[wasm_bindgen]
    pub fn toggle_switch(&mut self, id: &str) -> Option<bool> {
        self.simulator.toggle_switch(&NodeId::new(id))
    }

    /// Move a component on the canvas.
    #[wasm_bindgen]
    pub fn move_component(&mut self, id: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.simulator
            .move_component(&NodeId::new(id), Position::new(x, y))
            .map_err(to_js)
    }

    /// Set a component's resistance in ohms.
    #[wasm_bindgen]
    pub fn set_resistance(&mut self, id: &str, ohms: f64) -> Result<(), JsValue> {
        self.simulator.set_resistance(&NodeId::new(id), ohms).map_err(to_js)
    }

    /// Set a battery's voltage.
    #[wasm_bindgen]
    pub fn set_voltage(&mut self, id: &str, volts: f64) -> Result<(), JsValue> {
        self.simulator.set_voltage(&NodeId::new(id), volts).map_err(to_js)
    }

    /// Restore the demonstration circuit.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.simulator.reset();
    }

    /// Switch simulation on or off.
    #[wasm_bindgen]
    pub fn set_active(&mut self, active: bool) {
        self.simulator.set_active(active);
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.simulator.is_active()
    }

    /// Whether a component lies on a complete circuit.
    #[wasm_bindgen]
    pub fn is_powered(&self, id: &str) -> bool {
        self.simulator.state(&NodeId::new(id)).powered
    }

    /// Current through a component, in amperes.
    #[wasm_bindgen]
    pub fn current(&self, id: &str) -> f64 {
        self.simulator.state(&NodeId::new(id)).current
    }

    /// Whether a wire should be drawn animated.
    #[wasm_bindgen]
    pub fn is_wire_energized(&self, wire: &str) -> bool {
        self.simulator.board().is_wire_energized(&WireId::new(wire))
    }

    /// Caption of a component, or `undefined` if it does not exist.
    #[wasm_bindgen]
    pub fn label(&self, id: &str) -> Option<String> {
        self.simulator
            .board()
            .node(&NodeId::new(id))
            .map(|n| n.label.clone())
    }

    /// Component ids in board order.
    #[wasm_bindgen]
    pub fn node_ids(&self) -> Vec<String> {
        self.simulator
            .board()
            .nodes()
            .iter()
            .map(|n| n.id().0.clone())
            .collect()
    }

    /// Wire ids in board order.
    #[wasm_bindgen]
    pub fn wire_ids(&self) -> Vec<String> {
        self.simulator
            .board()
            .wires()
            .iter()
            .map(|w| w.id.0.clone())
            .collect()
    }
}

impl Default for WasmCircuitSim {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
