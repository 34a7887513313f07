//! Circuit Lab - circuit playground evaluator
//!
//! Loads a board description, flips the requested switches and prints
//! which components are powered.
//!
//! # Usage
//!
//! ```bash
//! circuitlab --demo --toggle switch-1
//! circuitlab board.cir --toggle S1
//! ```

use std::io;
use std::path::PathBuf;

use clap::Parser;
use circuitlab_core::{
    circuit::{validate_board, Board},
    dsl,
    error::{CircuitError, Result},
    report::write_report,
    NodeId, Simulator,
};
use log::{info, warn};

/// Circuit playground evaluator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a board description file
    #[arg(value_name = "BOARD_FILE", required_unless_present = "demo")]
    board_file: Option<PathBuf>,

    /// Use the demonstration circuit instead of a file
    #[arg(long, conflicts_with = "board_file")]
    demo: bool,

    /// Toggle a switch before evaluating (repeatable)
    #[arg(short, long, value_name = "SWITCH_ID")]
    toggle: Vec<String>,

    /// Print the board back out as a description after evaluating
    #[arg(long)]
    describe: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    // Build the board
    let board = match &args.board_file {
        Some(path) => Board::from_ast(dsl::parse_file(path)?)?,
        None => Board::demo(),
    };

    // Validate
    validate_board(&board)?;

    let mut simulator = Simulator::new(board);
    for id in &args.toggle {
        match simulator.toggle_switch(&NodeId::new(id.as_str())) {
            Some(closed) => info!("switch '{}' is now {}", id, if closed { "closed" } else { "open" }),
            None => warn!("'{}' is not a switch on this board", id),
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, simulator.board(), simulator.evaluation())
        .map_err(|source| CircuitError::OutputError { source })?;

    if args.describe {
        println!();
        print!("{}", dsl::describe(simulator.board()));
    }

    Ok(())
}
