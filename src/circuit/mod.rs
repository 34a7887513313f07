//! Board graph representation and validation.
//!
//! This module provides the editable circuit: the [`Board`] arena holds
//! components and wires under stable string ids and exposes the mutation
//! operations the editor issues. [`Snapshot`] is the read-only view the
//! evaluator works on.

mod graph;
mod types;
mod validate;

pub use graph::{Board, Snapshot};
pub use types::*;
pub use validate::validate_board;
