//! Components and the header-record builder.

use crate::config::CompileOptions;
use crate::error::{Result, WireListError};
use crate::netlist::grammar;

/// A board component introduced by a header record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Unique component id (`U160`)
    pub id: String,
    /// Schematic pages, 1-based
    pub pages: Vec<u32>,
    /// Part name (`74LS123`)
    pub part: String,
    /// Declared number of pins
    pub pin_count: usize,
    /// Optional component type, empty when absent
    pub kind: String,
    /// Optional board location, empty when absent
    pub location: String,
    /// Trace name per pin, index 0 is pin 1. `None` until assigned.
    pins: Vec<Option<String>>,
    sealed: bool,
}

impl Component {
    /// Build a component from the whitespace-separated fields of a header.
    ///
    /// Header layout:
    /// `<ID> <Pages> <Part> <PinCount> [<Type>] [<Location>]`
    pub fn from_header(fields: &[&str], options: &CompileOptions) -> Result<Self> {
        match fields.len() {
            n if n < 4 => return Err(WireListError::HeaderTooShort { fields: n }),
            n if n > 6 => return Err(WireListError::HeaderTooLong { fields: n }),
            _ => {}
        }

        let id = fields[0];
        if !grammar::is_component_id(id) {
            return Err(WireListError::InvalidComponentId { id: id.to_string() });
        }
        let pages = grammar::parse_pages(fields[1])?;
        let part = fields[2];
        if !grammar::is_part(part) {
            return Err(WireListError::InvalidPart {
                part: part.to_string(),
            });
        }
        let pin_count = grammar::parse_pin_count(fields[3], options.max_pin_count)?;

        // A lone trailing field is a location if it looks like one.
        let (kind, location) = match &fields[4..] {
            [] => ("", ""),
            [single] if grammar::is_location(single) => ("", *single),
            [single] => (*single, ""),
            [kind, location, ..] => (*kind, *location),
        };
        if !kind.is_empty() && !grammar::is_component_type(kind) {
            return Err(WireListError::InvalidType {
                kind: kind.to_string(),
            });
        }
        if !location.is_empty() && !grammar::is_location(location) {
            return Err(WireListError::InvalidLocation {
                location: location.to_string(),
            });
        }

        Ok(Self {
            id: id.to_string(),
            pages,
            part: part.to_string(),
            pin_count,
            kind: kind.to_string(),
            location: location.to_string(),
            pins: vec![None; pin_count],
            sealed: false,
        })
    }

    /// Trace name assigned to a 1-based pin, if any.
    pub fn pin(&self, pin: usize) -> Option<&str> {
        pin.checked_sub(1)
            .and_then(|idx| self.pins.get(idx))
            .and_then(|slot| slot.as_deref())
    }

    /// All pin slots in order; unassigned pins are `None`.
    pub fn pins(&self) -> &[Option<String>] {
        &self.pins
    }

    /// Whether the pin table has been closed out.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// 1-based numbers of pins that have not been assigned.
    pub fn missing_pins(&self) -> Vec<usize> {
        self.pins
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(idx, _)| idx + 1)
            .collect()
    }

    /// Assign a trace name to a 1-based pin.
    pub(crate) fn assign_pin(&mut self, pin: usize, trace: String) -> Result<()> {
        let pin_count = self.pin_count;
        let slot = pin
            .checked_sub(1)
            .and_then(|idx| self.pins.get_mut(idx))
            .ok_or(WireListError::PinOutOfRange { pin, pin_count })?;
        debug_assert!(!self.sealed, "pin assigned after close-out");
        *slot = Some(trace);
        Ok(())
    }

    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }
}
