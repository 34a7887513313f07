//! Text report for the CLI frontend.
//!
//! Renders a board and its evaluation as plain-text tables on any
//! `io::Write`, usually stdout.

use std::io::{self, Write};

use crate::circuit::Board;
use crate::components::format_si;
use crate::solver::Evaluation;

/// Write the per-component table, the completed loops and the energized
/// wires.
pub fn write_report<W: Write>(out: &mut W, board: &Board, evaluation: &Evaluation) -> io::Result<()> {
    let id_width = board
        .nodes()
        .iter()
        .map(|n| n.id().as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("COMPONENT".len());

    writeln!(
        out,
        "{:<id_width$}  {:<9}  {:<18}  {:<7}  {:>10}",
        "COMPONENT", "KIND", "LABEL", "POWERED", "CURRENT"
    )?;
    for node in board.nodes() {
        let state = evaluation.state(node.id());
        writeln!(
            out,
            "{:<id_width$}  {:<9}  {:<18}  {:<7}  {:>10}",
            node.id().as_str(),
            node.kind().as_str(),
            node.label,
            if state.powered { "ON" } else { "OFF" },
            format!("{:.4} A", state.current),
        )?;
    }

    writeln!(out)?;
    if evaluation.loops().is_empty() {
        writeln!(out, "No complete circuit.")?;
    } else {
        writeln!(out, "Complete circuits:")?;
        for l in evaluation.loops() {
            let path: Vec<&str> = l.nodes.iter().map(|id| id.as_str()).collect();
            writeln!(
                out,
                "  {} -> {}  ({}, {})",
                path.join(" -> "),
                l.battery,
                format_si(l.resistance, "Ω"),
                format_si(l.current, "A"),
            )?;
        }
    }

    let energized: Vec<&str> = board
        .wires()
        .iter()
        .filter(|w| evaluation.is_wire_energized(w))
        .map(|w| w.id.as_str())
        .collect();
    if !energized.is_empty() {
        writeln!(out, "Energized wires: {}", energized.join(", "))?;
    }

    Ok(())
}
