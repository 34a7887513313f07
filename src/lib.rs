//! # Circuit Lab Core
//!
//! The engine behind an interactive circuit playground for learning
//! electronics.
//!
//! This library provides:
//! - An editable board of components (battery, resistor, LED, switch,
//!   capacitor, ground) joined by wires
//! - A loop evaluator deciding which components are energized and how much
//!   current flows through them
//! - A simulator that re-evaluates after every edit, skipping runs when
//!   nothing electrical changed
//! - A small text format for storing boards
//!
//! ## Architecture
//!
//! - [`circuit`] - Board graph, ids and validation
//! - [`components`] - Component kinds, default ratings and switch control
//! - [`solver`] - Loop evaluation, change detection and the simulator
//! - [`dsl`] - Parser and writer for the board description language
//! - [`report`] - Plain-text report (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! circuitlab --demo --toggle switch-1
//! circuitlab board.cir
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuitSim } from 'circuitlab_core';
//!
//! const sim = new WasmCircuitSim();
//! sim.toggle_switch("switch-1");
//! sim.is_powered("led-1"); // true
//! ```
//!
//! ## Evaluation Method
//!
//! This is not a nodal solver. For each battery:
//!
//! 1. Walk outward breadth-first, stopping at open switches
//! 2. At every ground reached, look for a separate way back to the battery
//! 3. Each such loop powers its members with current `V / ΣR`
//!
//! A component on several loops reports the largest loop current.

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod solver;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use circuit::{Board, NodeId, Position, WireId};
pub use components::ComponentKind;
pub use error::{CircuitError, Result};
pub use solver::{evaluate, Evaluation, NodeState, Simulator};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitSim;
