//! Board graph structure and trace consolidation.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::component::Component;
use super::types::{format_endpoints, Endpoint, Trace};
use super::validate::validate_component;
use crate::config::CompileOptions;
use crate::error::{Result, WireListError};
use crate::netlist::grammar::{self, NO_CONNECTION, PLACEHOLDER};

/// All components and traces compiled from one wire list.
#[derive(Debug, Clone)]
pub struct Board {
    components: BTreeMap<String, Component>,
    /// Non-power traces by name
    traces: BTreeMap<String, Trace>,
    /// Sequence number of the next synthesized trace name
    next_trace: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            components: BTreeMap::new(),
            traces: BTreeMap::new(),
            next_trace: 1,
        }
    }

    /// Register a component. Ids must be unique.
    pub fn add_component(&mut self, component: Component) -> Result<()> {
        if self.components.contains_key(&component.id) {
            return Err(WireListError::DuplicateComponent { id: component.id });
        }
        self.components.insert(component.id.clone(), component);
        Ok(())
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Components in id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.traces.get(name)
    }

    /// Traces in name order. Power nets are never included.
    pub fn traces(&self) -> impl Iterator<Item = &Trace> {
        self.traces.values()
    }

    /// Find the trace an endpoint belongs to.
    pub fn trace_of(&self, endpoint: &Endpoint) -> Option<&Trace> {
        self.traces.values().find(|t| t.contains(endpoint))
    }

    /// Close out a component: check its pin table and seal it.
    pub fn close_component(&mut self, id: &str) -> Result<()> {
        match self.components.get_mut(id) {
            Some(component) => validate_component(component),
            None => Ok(()),
        }
    }

    /// Resolve one pin record of component `id` and fill its pin slot.
    ///
    /// `name` is an explicit trace name, a power net, [`NO_CONNECTION`] or
    /// the [`PLACEHOLDER`]; `peers` are the `ID-PIN` tokens that follow it.
    /// Returns the name stored in the pin slot. On error the board is left
    /// untouched.
    pub fn connect_pin(
        &mut self,
        id: &str,
        pin: usize,
        name: &str,
        peers: &[&str],
        options: &CompileOptions,
    ) -> Result<String> {
        let pin_count = self
            .components
            .get(id)
            .map(|c| c.pin_count)
            .ok_or(WireListError::PinWithoutComponent)?;
        if pin == 0 || pin > pin_count {
            return Err(WireListError::PinOutOfRange { pin, pin_count });
        }

        let assigned = self
            .components
            .get(id)
            .and_then(|c| c.pin(pin))
            .map(str::to_string);

        let resolved = if peers.is_empty() {
            resolve_unconnected(name, options)?
        } else {
            let source = Endpoint::new(id, pin - 1);
            self.resolve_connected(source, name, peers, assigned.as_deref(), options)?
        };

        // A filled slot may only be declared again with the same trace.
        if let Some(trace) = assigned {
            if trace != resolved {
                return Err(WireListError::PinAlreadyAssigned { pin, trace });
            }
            return Ok(resolved);
        }

        if let Some(component) = self.components.get_mut(id) {
            component.assign_pin(pin, resolved.clone())?;
        }
        Ok(resolved)
    }

    fn resolve_connected(
        &mut self,
        source: Endpoint,
        name: &str,
        peers: &[&str],
        assigned: Option<&str>,
        options: &CompileOptions,
    ) -> Result<String> {
        if name == NO_CONNECTION || options.is_power_net(name) {
            return Err(WireListError::ReservedNameWithPeers {
                name: name.to_string(),
            });
        }
        if !grammar::is_trace_name(name) {
            return Err(WireListError::InvalidTraceName {
                name: name.to_string(),
            });
        }

        let mut endpoints = peers
            .iter()
            .map(|peer| grammar::parse_peer(peer))
            .collect::<Result<Vec<_>>>()?;
        for (idx, endpoint) in endpoints.iter().enumerate() {
            if endpoints[..idx].contains(endpoint) {
                return Err(WireListError::DuplicatePeer {
                    peer: peers[idx].to_string(),
                });
            }
        }

        // Existing trace: the record must name exactly that group.
        for trace in self.traces.values() {
            let shared = trace.overlap(&endpoints);
            if shared == 0 {
                continue;
            }
            if shared != endpoints.len() {
                return Err(WireListError::GroupingConflict {
                    name: name.to_string(),
                    peers: format_endpoints(&endpoints),
                    stored: trace.name.clone(),
                    stored_endpoints: trace.endpoint_list(),
                });
            }
            if name != PLACEHOLDER && name != trace.name {
                return Err(WireListError::name_conflict(name, &trace.name));
            }
            if !trace.contains(&source) {
                return Err(WireListError::MissingBackReference {
                    component: source.component,
                    pin: source.pin + 1,
                    trace: trace.name.clone(),
                });
            }
            return Ok(trace.name.clone());
        }

        // New group. A filled slot or a traced declaring pin cannot start one.
        if let Some(trace) = assigned {
            return Err(WireListError::PinAlreadyAssigned {
                pin: source.pin + 1,
                trace: trace.to_string(),
            });
        }

        if let Some(owner) = self.trace_of(&source) {
            if name == PLACEHOLDER || name != owner.name {
                return Err(WireListError::EndpointAlreadyTraced {
                    component: source.component,
                    pin: source.pin + 1,
                    trace: owner.name.clone(),
                });
            }
        }

        let name = if name == PLACEHOLDER {
            self.synthesize_trace_name()
        } else {
            name.to_string()
        };
        if !endpoints.contains(&source) {
            endpoints.insert(0, source);
        }

        match self.traces.get_mut(&name) {
            Some(existing) => {
                warn!(
                    trace = %name,
                    endpoints = %format_endpoints(&endpoints),
                    "explicit trace name reused for an unrelated group, appending endpoints"
                );
                for endpoint in endpoints {
                    if !existing.contains(&endpoint) {
                        existing.endpoints.push(endpoint);
                    }
                }
            }
            None => {
                debug!(trace = %name, endpoints = endpoints.len(), "new trace");
                self.traces.insert(name.clone(), Trace::new(name.clone(), endpoints));
            }
        }
        Ok(name)
    }

    /// Next free `Txxx` name. Numbers are consumed even if an explicit
    /// declaration already took the name.
    fn synthesize_trace_name(&mut self) -> String {
        loop {
            let candidate = format!("T{:03}", self.next_trace);
            self.next_trace += 1;
            if !self.traces.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

fn resolve_unconnected(name: &str, options: &CompileOptions) -> Result<String> {
    if options.is_power_net(name) {
        Ok(name.to_string())
    } else if name == NO_CONNECTION {
        Ok(String::new())
    } else {
        Err(WireListError::UnconnectedTraceName {
            name: name.to_string(),
        })
    }
}
