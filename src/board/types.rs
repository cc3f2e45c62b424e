//! Core types for the board graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One pin's membership in a trace: component id and zero-based pin index.
///
/// Serialized as a two-element array `["U1", 0]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(String, usize)", into = "(String, usize)")]
pub struct Endpoint {
    /// Component id
    pub component: String,
    /// Zero-based pin index
    pub pin: usize,
}

impl Endpoint {
    pub fn new(component: impl Into<String>, pin: usize) -> Self {
        Self {
            component: component.into(),
            pin,
        }
    }
}

impl From<(String, usize)> for Endpoint {
    fn from((component, pin): (String, usize)) -> Self {
        Self { component, pin }
    }
}

impl From<Endpoint> for (String, usize) {
    fn from(endpoint: Endpoint) -> Self {
        (endpoint.component, endpoint.pin)
    }
}

/// Displays in wire-list notation, with a 1-based pin: `U1-1`.
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.component, self.pin + 1)
    }
}

/// A named electrical net and the pins it connects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub name: String,
    pub endpoints: Vec<Endpoint>,
}

impl Trace {
    pub fn new(name: impl Into<String>, endpoints: Vec<Endpoint>) -> Self {
        Self {
            name: name.into(),
            endpoints,
        }
    }

    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        self.endpoints.contains(endpoint)
    }

    /// Count how many of `endpoints` already belong to this trace.
    pub fn overlap(&self, endpoints: &[Endpoint]) -> usize {
        endpoints.iter().filter(|e| self.contains(e)).count()
    }

    /// Endpoints in wire-list notation, e.g. `[U1-1, U2-3]`.
    pub fn endpoint_list(&self) -> String {
        format_endpoints(&self.endpoints)
    }
}

pub(crate) fn format_endpoints(endpoints: &[Endpoint]) -> String {
    let joined: Vec<String> = endpoints.iter().map(Endpoint::to_string).collect();
    format!("[{}]", joined.join(", "))
}
