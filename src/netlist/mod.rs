//! Wire-list compiler.
//!
//! The wire list is line-oriented. Each component is introduced by a header
//! record and followed by one record per pin, in pin order.
//!
//! # Grammar Overview
//!
//! ```text
//! wirelist    = { line }
//! line        = header | pin | empty
//! header      = id pages part pin_count [type] [location]
//! pin         = pin_number trace_name { peer }
//!
//! id          = upper+ digit+                  (U160, RN4)
//! pages       = digit+ { '-' digit+ }          (0-based in the text)
//! part        = (word | '.')+                  (74LS123, 4.7K)
//! pin_count   = digit+                         (1..=50)
//! type        = word+
//! location    = upper+ digit+                  (C12)
//! trace_name  = '?' | "NOCONNECTION" | power | name
//! peer        = id '-' digit+                  (1-based pin)
//! power       = "GND" | "+12V" | "-12V" | "+5V" | "-5V"
//!             | "+12FV" | "-12FV" | "+5FV" | "-5FV" | "GNDF"
//! ```
//!
//! Any other non-blank line is reported as ambiguous and skipped.
//!
//! # Example
//!
//! ```text
//! U160 3 74LS123 16 DIP C12
//! 1 ? U160-1 U12-6
//! 2 /RESET U160-2 U4-40 R5-1
//! 3 NOCONNECTION
//! ...
//! 8 GND
//! ```
//!
//! `?` resolves to the trace the peers already belong to, or a new
//! synthesized name (`T001`, `T002`, ...).

mod classify;
mod compiler;
pub mod grammar;

pub use classify::{classify, lines, Line, LineKind};
pub use compiler::{Compilation, Compiler, Scope};

use crate::config::CompileOptions;
use crate::error::{Result, WireListError};

/// Compile wire-list text with default options.
pub fn compile(input: &str) -> Compilation {
    compile_with(input, CompileOptions::default())
}

/// Compile wire-list text.
pub fn compile_with(input: &str, options: CompileOptions) -> Compilation {
    Compiler::new(options).compile(input)
}

/// Compile a wire-list file.
///
/// Failing to read the file is the only error; per-line problems end up in
/// [`Compilation::diagnostics`].
pub fn compile_file(path: &std::path::Path, options: CompileOptions) -> Result<Compilation> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| WireListError::file_read(path.display().to_string(), e))?;
    Ok(compile_with(&content, options))
}
