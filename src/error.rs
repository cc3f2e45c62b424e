//! Error types for the wire-list compiler.
//!
//! This module provides a unified error type [`WireListError`] that covers
//! every condition the compiler can report: malformed records, conflicting
//! trace declarations, incomplete components, and the few fatal I/O failures.
//!
//! Only fatal errors abort a run. Everything else is attached to a source
//! line as a [`Diagnostic`] and collected while the scan continues.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`WireListError`].
pub type Result<T> = std::result::Result<T, WireListError>;

/// Broad classification of a [`WireListError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Aborts the run before any output is produced.
    Fatal,
    /// Malformed token shapes or out-of-range values on one line.
    Syntax,
    /// A well-formed line that contradicts what was recorded earlier.
    Semantic,
    /// A component whose pin table is incomplete at close-out.
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Fatal => "fatal",
            ErrorKind::Syntax => "syntax",
            ErrorKind::Semantic => "semantic",
            ErrorKind::Validation => "validation",
        };
        f.write_str(name)
    }
}

/// Unified error type for all wire-list operations.
#[derive(Error, Debug)]
pub enum WireListError {
    // ============ Fatal Errors ============
    /// Error reading the netlist file
    #[error("Can't open file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the serialized graph
    #[error("Failed to write board graph to '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error encoding the board graph as JSON
    #[error("Failed to encode board graph: {0}")]
    Json(#[from] serde_json::Error),

    // ============ Syntax Errors ============
    /// Line that is neither a header nor a pin record
    #[error("Ambiguous line ({line})")]
    AmbiguousLine { line: String },

    /// Header with fewer than four fields
    #[error("Component header too short ({fields})")]
    HeaderTooShort { fields: usize },

    /// Header with more than six fields
    #[error("Component header too long ({fields})")]
    HeaderTooLong { fields: usize },

    /// Component id does not match `[A-Z]+[0-9]+`
    #[error("Wrong component ID syntax ({id})")]
    InvalidComponentId { id: String },

    /// Schematic pages are not dash-joined digits
    #[error("Wrong schematic pages syntax ({pages})")]
    InvalidPages { pages: String },

    /// Part name contains characters other than word characters and dots
    #[error("Wrong component part syntax ({part})")]
    InvalidPart { part: String },

    /// Pin count is not an integer
    #[error("Wrong component pin count syntax ({text})")]
    InvalidPinCount { text: String },

    /// Pin count outside the accepted range
    #[error("Wrong number of pins ({count}), expected 1..={max}")]
    PinCountOutOfRange { count: usize, max: usize },

    /// Component type contains non-word characters
    #[error("Wrong component type syntax ({kind})")]
    InvalidType { kind: String },

    /// Board location does not match `[A-Z]+[0-9]+`
    #[error("Wrong board location syntax ({location})")]
    InvalidLocation { location: String },

    /// Pin record without a trace name
    #[error("Pin description too short ({fields})")]
    PinRecordTooShort { fields: usize },

    /// Pin number is not an integer
    #[error("Wrong pin number syntax ({text})")]
    InvalidPinNumber { text: String },

    /// Trace name contains unexpected characters
    #[error("Wrong trace name ({name})")]
    InvalidTraceName { name: String },

    /// Peer token is not of the form `ID-PIN`
    #[error("Wrong connection in trace ({peer})")]
    InvalidPeer { peer: String },

    // ============ Semantic Errors ============
    /// Header for an id that is already on the board
    #[error("Duplicate component ID ({id})")]
    DuplicateComponent { id: String },

    /// Pin record before any valid header
    #[error("Unexpected pin - no component")]
    PinWithoutComponent,

    /// Pin numbers must increase one by one from 1
    #[error("Pin ({found}) but expected pin ({expected})")]
    UnexpectedPin { found: usize, expected: usize },

    /// Pin number beyond the declared pin count
    #[error("Pin ({pin}) out of component range ({pin_count})")]
    PinOutOfRange { pin: usize, pin_count: usize },

    /// Pin without peers that names neither a power net nor no-connection
    #[error("Wrong trace name for short pin ({name})")]
    UnconnectedTraceName { name: String },

    /// Power net or no-connection marker followed by peers
    #[error("Reserved trace name ({name}) cannot list connections")]
    ReservedNameWithPeers { name: String },

    /// Same peer listed twice in one record
    #[error("Trace contains duplicate values ({peer})")]
    DuplicatePeer { peer: String },

    /// Record groups endpoints differently than an existing trace
    #[error("Trace ({name}:{peers}) different to already stored ({stored}:{stored_endpoints})")]
    GroupingConflict {
        name: String,
        peers: String,
        stored: String,
        stored_endpoints: String,
    },

    /// Record names an existing endpoint group differently
    #[error("Trace ({name}) named differently than already stored ({stored})")]
    NameConflict { name: String, stored: String },

    /// Existing trace matched but the declaring pin is not part of it
    #[error("Source pin ({component}-{pin}) not part of the trace ({trace})")]
    MissingBackReference {
        component: String,
        pin: usize,
        trace: String,
    },

    /// Declaring pin already belongs to a different trace
    #[error("Source pin ({component}-{pin}) already belongs to trace ({trace})")]
    EndpointAlreadyTraced {
        component: String,
        pin: usize,
        trace: String,
    },

    /// Pin slot already holds a different trace
    #[error("Pin ({pin}) already assigned to trace ({trace})")]
    PinAlreadyAssigned { pin: usize, trace: String },

    // ============ Validation Errors ============
    /// Component closed with unassigned pins
    #[error("Missing pins definition for {component} ({pins:?})")]
    MissingPins { component: String, pins: Vec<usize> },
}

impl WireListError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        use WireListError::*;
        match self {
            FileReadError { .. } | FileWriteError { .. } | Json(_) => ErrorKind::Fatal,
            AmbiguousLine { .. }
            | HeaderTooShort { .. }
            | HeaderTooLong { .. }
            | InvalidComponentId { .. }
            | InvalidPages { .. }
            | InvalidPart { .. }
            | InvalidPinCount { .. }
            | PinCountOutOfRange { .. }
            | InvalidType { .. }
            | InvalidLocation { .. }
            | PinRecordTooShort { .. }
            | InvalidPinNumber { .. }
            | InvalidTraceName { .. }
            | InvalidPeer { .. } => ErrorKind::Syntax,
            DuplicateComponent { .. }
            | PinWithoutComponent
            | UnexpectedPin { .. }
            | PinOutOfRange { .. }
            | UnconnectedTraceName { .. }
            | ReservedNameWithPeers { .. }
            | DuplicatePeer { .. }
            | GroupingConflict { .. }
            | NameConflict { .. }
            | MissingBackReference { .. }
            | EndpointAlreadyTraced { .. }
            | PinAlreadyAssigned { .. } => ErrorKind::Semantic,
            MissingPins { .. } => ErrorKind::Validation,
        }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a naming conflict error
    pub fn name_conflict(name: impl Into<String>, stored: impl Into<String>) -> Self {
        Self::NameConflict {
            name: name.into(),
            stored: stored.into(),
        }
    }
}

/// A non-fatal error attached to the 1-based source line it came from.
#[derive(Debug)]
pub struct Diagnostic {
    /// Line number (1-indexed)
    pub line: usize,
    /// What went wrong
    pub error: WireListError,
}

impl Diagnostic {
    pub fn new(line: usize, error: WireListError) -> Self {
        Self { line, error }
    }

    /// Shorthand for `self.error.kind()`.
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}
