//! Board graph representation and validation.
//!
//! This module provides the compiled form of a wire list. The [`Board`]
//! holds every component and every non-power trace, and enforces the
//! grouping rules that keep traces consistent as pin records arrive.

mod component;
mod graph;
mod serialize;
mod types;
mod validate;

pub use component::Component;
pub use graph::Board;
pub use serialize::{BoardGraph, ComponentRecord};
pub use types::{Endpoint, Trace};
pub use validate::validate_component;
