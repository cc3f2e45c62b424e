//! Compiler configuration.

use crate::netlist::grammar::{self, MAX_PIN_COUNT};

/// Configuration for a compilation run.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Power-net names recognized on top of the built-in rails.
    pub extra_power_nets: Vec<String>,
    /// Largest pin count a component header may declare.
    pub max_pin_count: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            extra_power_nets: Vec::new(),
            max_pin_count: MAX_PIN_COUNT,
        }
    }
}

impl CompileOptions {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `name` as an additional power rail.
    ///
    /// Boards other than the one the built-in list was written for use
    /// rails such as `+9V` or `VCC`.
    pub fn with_power_net(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.is_power_net(&name) {
            self.extra_power_nets.push(name);
        }
        self
    }

    /// Set the maximum pin count a header may declare.
    pub fn with_max_pin_count(mut self, max_pin_count: usize) -> Self {
        self.max_pin_count = max_pin_count;
        self
    }

    /// Check whether `name` is a built-in or configured power rail.
    pub fn is_power_net(&self, name: &str) -> bool {
        grammar::is_power_net(name) || self.extra_power_nets.iter().any(|n| n == name)
    }
}
