//! Canonical output structure handed to display and filtering tools.
//!
//! ```json
//! {
//!   "components": {
//!     "U1": { "id": "U1", "location": "", "pages": [1], "part": "7400",
//!             "pin_count": 14, "pins": ["T001", ...], "type": "" }
//!   },
//!   "traces": { "T001": [["U1", 0], ["U2", 0]] }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::component::Component;
use super::graph::Board;
use super::types::Endpoint;
use crate::error::Result;

/// Serialized form of one component. Fields are declared in key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    pub location: String,
    pub pages: Vec<u32>,
    pub part: String,
    pub pin_count: usize,
    /// Trace name per pin, pin 1 first. Unconnected or missing pins are `""`.
    pub pins: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<&Component> for ComponentRecord {
    fn from(component: &Component) -> Self {
        Self {
            id: component.id.clone(),
            location: component.location.clone(),
            pages: component.pages.clone(),
            part: component.part.clone(),
            pin_count: component.pin_count,
            pins: component
                .pins()
                .iter()
                .map(|slot| slot.clone().unwrap_or_default())
                .collect(),
            kind: component.kind.clone(),
        }
    }
}

/// The complete board graph: components by id and traces by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGraph {
    pub components: BTreeMap<String, ComponentRecord>,
    pub traces: BTreeMap<String, Vec<Endpoint>>,
}

impl BoardGraph {
    pub fn component(&self, id: &str) -> Option<&ComponentRecord> {
        self.components.get(id)
    }

    pub fn trace(&self, name: &str) -> Option<&[Endpoint]> {
        self.traces.get(name).map(Vec::as_slice)
    }

    /// Indented JSON with sorted keys.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&Board> for BoardGraph {
    fn from(board: &Board) -> Self {
        Self {
            components: board
                .components()
                .map(|c| (c.id.clone(), ComponentRecord::from(c)))
                .collect(),
            traces: board
                .traces()
                .map(|t| (t.name.clone(), t.endpoints.clone()))
                .collect(),
        }
    }
}

impl Board {
    /// Snapshot the board in its serialized form.
    pub fn to_graph(&self) -> BoardGraph {
        BoardGraph::from(self)
    }
}
