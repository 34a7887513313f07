//! Board description language.
//!
//! A small line-oriented text format for storing boards: fixtures for
//! tests, files for the CLI, and snapshots pushed into the browser
//! binding.
//!
//! # Grammar Overview
//!
//! ```text
//! board       = { line }
//! line        = comment | directive | component | wire | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".demo"
//! component   = kind id [value] { param '=' (value | flag) }
//! wire        = "wire" [id] id id [label]
//! label       = '"' { any_char except newline, with \" and \\ escaped } '"'
//!
//! kind        = "battery" | "resistor" | "led" | "switch" | "capacitor" | "ground"
//! id          = (letter | '_') { letter | digit | '_' | '-' }
//! value       = number [unit_suffix]
//! flag        = "on" | "off" | "closed" | "open" | "true" | "false"
//! unit_suffix = 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Component Values
//!
//! | Kind | Bare value means | Aliases |
//! |------|------------------|---------|
//! | battery | voltage | `bat`, `b` |
//! | resistor | resistance | `res`, `r` |
//! | led | resistance | |
//! | switch | state (`closed`/`open`, 1/0) | `sw`, `s` |
//! | capacitor | capacitance | `cap`, `c` |
//! | ground | resistance | `gnd`, `g` |
//!
//! Named parameters: `voltage`, `resistance`, `capacitance`, `closed`,
//! `x`, `y`.
//!
//! # Example
//!
//! ```text
//! # Battery lighting an LED through a switch
//! battery  B1 9    x=100 y=200
//! switch   S1 open x=320 y=200
//! resistor R1 220
//! led      L1
//! ground   G1
//!
//! wire B1 S1
//! wire S1 R1
//! wire R1 L1
//! wire L1 G1
//! wire G1 B1 "Return"
//! ```

mod ast;
mod lexer;
mod parser;

use std::fmt::Write;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::circuit::Board;
use crate::components::{ComponentKind, KindDefaults};
use crate::error::Result;

/// Parse a board description string into an AST.
pub fn parse(input: &str) -> Result<BoardAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a board description and build the board.
pub fn load(input: &str) -> Result<Board> {
    let board = Board::from_ast(parse(input)?)?;
    crate::circuit::validate_board(&board)?;
    Ok(board)
}

/// Parse a board description file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<BoardAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::CircuitError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Write a board back out as a description.
///
/// Only parameters that differ from the kind's defaults are written.
/// Loading the output yields a board that evaluates identically and keeps
/// wire labels. Component captions are derived from ratings, so they are
/// not written.
pub fn describe(board: &Board) -> String {
    let mut out = String::new();
    for node in board.nodes() {
        let defaults = KindDefaults::for_kind(node.kind());
        let _ = write!(out, "{} {}", node.kind(), node.id());
        match node.kind() {
            ComponentKind::Switch => {
                out.push_str(if node.is_closed() { " closed" } else { " open" });
            }
            ComponentKind::Battery if node.voltage() != defaults.voltage => {
                let _ = write!(out, " {}", node.voltage());
            }
            ComponentKind::Capacitor if node.capacitance() != defaults.capacitance => {
                let _ = write!(out, " {:e}", node.capacitance());
            }
            _ => {}
        }
        if node.resistance() != defaults.resistance {
            let _ = write!(out, " resistance={}", node.resistance());
        }
        let _ = writeln!(out, " x={} y={}", node.position.x, node.position.y);
    }
    for wire in board.wires() {
        let _ = write!(out, "wire {} {} {}", wire.id, wire.source, wire.target);
        if let Some(label) = &wire.label {
            let _ = write!(out, " \"{}\"", label.replace('\\', "\\\\").replace('"', "\\\""));
        }
        out.push('\n');
    }
    out
}
