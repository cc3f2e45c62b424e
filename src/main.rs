//! Wirelist - board wire-list compiler
//!
//! Reads a wire list and prints the board graph as JSON.
//!
//! # Usage
//!
//! ```bash
//! wirelist a3-wire-list.txt -o a3-board.json
//! RUST_LOG=debug wirelist a3-wire-list.txt --strict > /dev/null
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use wirelist_core::{compile_file, CompileOptions, Compilation, ErrorKind, Result, WireListError};

/// Compile a board wire list into a component/trace graph
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the wire-list text file
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Write the JSON graph to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Additional power-net name (repeatable)
    #[arg(long = "power-net", value_name = "NAME")]
    power_nets: Vec<String>,

    /// Maximum pin count a component may declare
    #[arg(long, default_value_t = wirelist_core::netlist::grammar::MAX_PIN_COUNT)]
    max_pins: usize,

    /// Exit with an error status when any diagnostic was recorded
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(compilation) if args.strict && !compilation.is_clean() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Compilation> {
    let options = args
        .power_nets
        .iter()
        .fold(CompileOptions::new(), |options, name| options.with_power_net(name))
        .with_max_pin_count(args.max_pins);

    // Compile the wire list
    let compilation = compile_file(&args.netlist_file, options)?;

    for diagnostic in &compilation.diagnostics {
        eprintln!("{diagnostic}");
    }
    if !compilation.is_clean() {
        let breakdown: Vec<String> = [ErrorKind::Syntax, ErrorKind::Semantic, ErrorKind::Validation]
            .into_iter()
            .map(|kind| (kind, compilation.count(kind)))
            .filter(|(_, n)| *n > 0)
            .map(|(kind, n)| format!("{kind}: {n}"))
            .collect();
        eprintln!(
            "{} problem(s) found ({})",
            compilation.diagnostics.len(),
            breakdown.join(", ")
        );
    }

    // Emit the graph
    let graph = compilation.graph();
    let json = if args.compact {
        graph.to_json()?
    } else {
        graph.to_json_pretty()?
    };
    match &args.output {
        Some(path) => std::fs::write(path, json + "\n").map_err(|e| WireListError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?,
        None => println!("{json}"),
    }

    Ok(compilation)
}
