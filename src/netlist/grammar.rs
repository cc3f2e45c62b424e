//! Token grammars for wire-list records.
//!
//! One predicate or parse function per field shape. All patterns are
//! full-match: a token either fits the grammar entirely or is rejected.

use std::sync::LazyLock;

use regex::Regex;

use crate::board::Endpoint;
use crate::error::{Result, WireListError};

/// Trace-name token meaning "adopt the existing name or synthesize one".
pub const PLACEHOLDER: &str = "?";

/// Trace-name token for a pin that is not connected to anything.
pub const NO_CONNECTION: &str = "NOCONNECTION";

/// Supply and ground rails. Referenced by name only, never by endpoint list.
pub const POWER_NETS: [&str; 10] = [
    "GND", "+12V", "-12V", "+5V", "-5V", "+12FV", "-12FV", "+5FV", "-5FV", "GNDF",
];

/// Largest pin count a header may declare unless configured otherwise.
pub const MAX_PIN_COUNT: usize = 50;

static COMPONENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+[0-9]+$").expect("valid regex"));
static PAGES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(-[0-9]+)*$").expect("valid regex"));
static PART: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.]+$").expect("valid regex"));
static COMPONENT_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("valid regex"));
static TRACE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w?/*&][\w?/*&+.\-]*$").expect("valid regex"));
static PEER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+[0-9]+)-([0-9]+)$").expect("valid regex"));

/// Check a component id such as `U160` or `RN4`.
pub fn is_component_id(token: &str) -> bool {
    COMPONENT_ID.is_match(token)
}

/// Board locations share the component id shape (`C12`, `AB3`).
pub fn is_location(token: &str) -> bool {
    COMPONENT_ID.is_match(token)
}

pub fn is_part(token: &str) -> bool {
    PART.is_match(token)
}

pub fn is_component_type(token: &str) -> bool {
    COMPONENT_TYPE.is_match(token)
}

pub fn is_trace_name(token: &str) -> bool {
    TRACE_NAME.is_match(token)
}

/// Check whether a trace name is one of the built-in power rails.
pub fn is_power_net(name: &str) -> bool {
    POWER_NETS.contains(&name)
}

/// Parse schematic pages such as `3` or `3-4`.
///
/// Pages are 0-based in the wire list and stored 1-based.
pub fn parse_pages(token: &str) -> Result<Vec<u32>> {
    let invalid = || WireListError::InvalidPages {
        pages: token.to_string(),
    };
    if !PAGES.is_match(token) {
        return Err(invalid());
    }
    token
        .split('-')
        .map(|page| {
            page.parse::<u32>()
                .ok()
                .and_then(|p| p.checked_add(1))
                .ok_or_else(invalid)
        })
        .collect()
}

/// Parse a header's pin count, bounded by `max`.
pub fn parse_pin_count(token: &str, max: usize) -> Result<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WireListError::InvalidPinCount {
            text: token.to_string(),
        });
    }
    let count = token
        .parse::<usize>()
        .map_err(|_| WireListError::PinCountOutOfRange { count: usize::MAX, max })?;
    if !(1..=max).contains(&count) {
        return Err(WireListError::PinCountOutOfRange { count, max });
    }
    Ok(count)
}

/// Parse the leading pin number of a pin record.
pub fn parse_pin_number(token: &str) -> Result<usize> {
    let invalid = || WireListError::InvalidPinNumber {
        text: token.to_string(),
    };
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse::<usize>().map_err(|_| invalid())
}

/// Parse a peer token `ID-PIN` into a zero-based endpoint.
pub fn parse_peer(token: &str) -> Result<Endpoint> {
    let invalid = || WireListError::InvalidPeer {
        peer: token.to_string(),
    };
    let caps = PEER.captures(token).ok_or_else(invalid)?;
    let pin = caps[2].parse::<usize>().map_err(|_| invalid())?;
    if pin == 0 {
        return Err(invalid());
    }
    Ok(Endpoint::new(&caps[1], pin - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_id() {
        assert!(is_component_id("U160"));
        assert!(is_component_id("RN4"));
        assert!(!is_component_id("U"));
        assert!(!is_component_id("u1"));
        assert!(!is_component_id("U1A"));
        assert!(!is_component_id("160"));
    }

    #[test]
    fn test_parse_pages() {
        assert_eq!(parse_pages("3").unwrap(), vec![4]);
        assert_eq!(parse_pages("3-4").unwrap(), vec![4, 5]);
        assert_eq!(parse_pages("0-7-12").unwrap(), vec![1, 8, 13]);
        assert!(parse_pages("3-").is_err());
        assert!(parse_pages("-3").is_err());
        assert!(parse_pages("a").is_err());
    }

    #[test]
    fn test_parse_pin_count() {
        assert_eq!(parse_pin_count("16", MAX_PIN_COUNT).unwrap(), 16);
        assert_eq!(parse_pin_count("1", MAX_PIN_COUNT).unwrap(), 1);
        assert_eq!(parse_pin_count("50", MAX_PIN_COUNT).unwrap(), 50);
        assert!(matches!(
            parse_pin_count("0", MAX_PIN_COUNT),
            Err(WireListError::PinCountOutOfRange { count: 0, .. })
        ));
        assert!(matches!(
            parse_pin_count("51", MAX_PIN_COUNT),
            Err(WireListError::PinCountOutOfRange { count: 51, .. })
        ));
        assert!(matches!(
            parse_pin_count("1x", MAX_PIN_COUNT),
            Err(WireListError::InvalidPinCount { .. })
        ));
        assert_eq!(parse_pin_count("64", 64).unwrap(), 64);
    }

    #[test]
    fn test_part_and_type() {
        assert!(is_part("74LS123"));
        assert!(is_part("6502"));
        assert!(is_part("4.7K"));
        assert!(!is_part("74LS-123"));
        assert!(is_component_type("DIP"));
        assert!(!is_component_type("D/P"));
    }

    #[test]
    fn test_trace_name() {
        assert!(is_trace_name("?"));
        assert!(is_trace_name("PHI0"));
        assert!(is_trace_name("/RESET"));
        assert!(is_trace_name("D0*"));
        assert!(is_trace_name("R&W"));
        assert!(!is_trace_name("-FOO"));
        assert!(!is_trace_name("A(B)"));
        assert!(!is_trace_name("CLK,"));
        assert!(!is_trace_name(""));
    }

    #[test]
    fn test_parse_peer() {
        assert_eq!(parse_peer("U2-1").unwrap(), Endpoint::new("U2", 0));
        assert_eq!(parse_peer("RN12-16").unwrap(), Endpoint::new("RN12", 15));
        assert!(parse_peer("U2-0").is_err());
        assert!(parse_peer("U2").is_err());
        assert!(parse_peer("u2-1").is_err());
        assert!(parse_peer("U2-1-3").is_err());
    }

    #[test]
    fn test_power_nets() {
        assert!(is_power_net("GND"));
        assert!(is_power_net("-12FV"));
        assert!(!is_power_net("VCC"));
        assert!(!is_power_net(NO_CONNECTION));
    }
}
