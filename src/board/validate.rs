//! Component close-out validation.

use tracing::debug;

use super::component::Component;
use crate::error::{Result, WireListError};

/// Close out a component once its header scope ends.
///
/// Checks that every pin 1..=pin_count was assigned and seals the pin table
/// either way. All missing pins are reported in a single error; the missing
/// slots stay unassigned and serialize as empty names.
pub fn validate_component(component: &mut Component) -> Result<()> {
    component.seal();
    let missing = component.missing_pins();
    debug!(
        component = %component.id,
        pins = component.pin_count,
        missing = missing.len(),
        "component closed"
    );
    if missing.is_empty() {
        Ok(())
    } else {
        Err(WireListError::MissingPins {
            component: component.id.clone(),
            pins: missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompileOptions;

    #[test]
    fn test_complete_component() {
        let fields = ["R1", "0", "1K", "2"];
        let mut c = Component::from_header(&fields, &CompileOptions::default()).unwrap();
        c.assign_pin(1, "GND".into()).unwrap();
        c.assign_pin(2, "T001".into()).unwrap();
        assert!(validate_component(&mut c).is_ok());
        assert!(c.is_sealed());
    }

    #[test]
    fn test_missing_pins_reported_together() {
        let fields = ["U3", "0", "7400", "8"];
        let mut c = Component::from_header(&fields, &CompileOptions::default()).unwrap();
        c.assign_pin(1, "GND".into()).unwrap();
        c.assign_pin(3, "GND".into()).unwrap();
        match validate_component(&mut c) {
            Err(WireListError::MissingPins { component, pins }) => {
                assert_eq!(component, "U3");
                assert_eq!(pins, vec![2, 4, 5, 6, 7, 8]);
            }
            other => panic!("expected missing pins, got {other:?}"),
        }
        assert!(c.is_sealed());
    }
}
