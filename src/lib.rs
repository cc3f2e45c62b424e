//! # Wirelist Core
//!
//! A compiler for retro computer board wire lists.
//!
//! This library provides:
//! - A validating parser for the line-oriented wire-list format
//! - Trace consolidation that merges pin records into named electrical nets
//! - A canonical JSON graph of components and traces for display tools
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`netlist`] - Line classification, token grammars and the compiler driver
//! - [`board`] - Components, traces, close-out validation and serialization
//! - [`config`] - Compilation options
//! - [`error`] - Error taxonomy and per-line diagnostics
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! wirelist a3-wire-list.txt > a3-board.json
//! ```
//!
//! ### Library
//!
//! ```
//! let compilation = wirelist_core::compile("U1 0 7400 1\n1 ? U2-1\nU2 0 7400 1\n1 ? U1-1\n");
//! assert!(compilation.is_clean());
//! let graph = compilation.graph();
//! assert_eq!(graph.component("U2").unwrap().pins, vec!["T001"]);
//! ```
//!
//! ## Diagnostics
//!
//! A run never stops at the first problem. Malformed or conflicting records
//! are dropped and reported with their line number; the graph is built from
//! everything that was accepted. Only an unreadable input file is fatal.

pub mod board;
pub mod config;
pub mod error;
pub mod netlist;

// Re-export main types for convenience
pub use board::{Board, BoardGraph};
pub use config::CompileOptions;
pub use error::{Diagnostic, ErrorKind, Result, WireListError};
pub use netlist::{compile, compile_file, compile_with, Compilation};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmWireList;
