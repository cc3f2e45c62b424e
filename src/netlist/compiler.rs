//! Compiler driver for the wire list.

use tracing::info;

use super::classify::{self, Line, LineKind};
use super::grammar;
use crate::board::{Board, BoardGraph, Component};
use crate::config::CompileOptions;
use crate::error::{Diagnostic, ErrorKind, WireListError};

/// Where the compiler is relative to the component headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// No header seen yet, or the last header was rejected.
    NoActiveComponent,
    /// Pin records belong to component `id`; `expected_pin` is 1-based.
    ActiveComponent { id: String, expected_pin: usize },
}

/// Result of compiling one wire list.
#[derive(Debug)]
pub struct Compilation {
    /// Everything that was built successfully
    pub board: Board,
    /// Per-line problems, in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    /// No diagnostics were recorded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn graph(&self) -> BoardGraph {
        self.board.to_graph()
    }

    /// Number of diagnostics of a given kind.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind() == kind).count()
    }
}

/// Line-by-line wire-list compiler.
pub struct Compiler {
    options: CompileOptions,
    board: Board,
    scope: Scope,
    diagnostics: Vec<Diagnostic>,
    last_line: usize,
}

impl Compiler {
    /// Create a compiler with the given options.
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            board: Board::new(),
            scope: Scope::NoActiveComponent,
            diagnostics: Vec::new(),
            last_line: 0,
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Compile the whole input and close out the last component.
    pub fn compile(mut self, input: &str) -> Compilation {
        for line in classify::lines(input) {
            self.feed(line);
        }
        self.last_line = self.last_line.max(input.lines().count());
        self.finish()
    }

    /// Process one classified line.
    pub fn feed(&mut self, line: Line<'_>) {
        self.last_line = line.number;
        match line.kind {
            LineKind::Header(fields) => self.header(line.number, &fields),
            LineKind::Pin(fields) => self.pin(line.number, &fields),
            LineKind::Ambiguous(text) => {
                self.report(
                    line.number,
                    WireListError::AmbiguousLine {
                        line: text.to_string(),
                    },
                );
                if let Scope::ActiveComponent { expected_pin, .. } = &mut self.scope {
                    *expected_pin = 1;
                }
            }
        }
    }

    /// Close out the open component and hand back the result.
    pub fn finish(mut self) -> Compilation {
        self.close_out(self.last_line);
        info!(
            components = self.board.components().count(),
            traces = self.board.traces().count(),
            diagnostics = self.diagnostics.len(),
            "wire list compiled"
        );
        Compilation {
            board: self.board,
            diagnostics: self.diagnostics,
        }
    }

    fn header(&mut self, line: usize, fields: &[&str]) {
        self.close_out(line);
        let added = Component::from_header(fields, &self.options)
            .and_then(|component| {
                let id = component.id.clone();
                self.board.add_component(component).map(|_| id)
            });
        match added {
            Ok(id) => {
                self.scope = Scope::ActiveComponent {
                    id,
                    expected_pin: 1,
                }
            }
            Err(e) => self.report(line, e),
        }
    }

    fn pin(&mut self, line: usize, fields: &[&str]) {
        let Scope::ActiveComponent { id, expected_pin } = &mut self.scope else {
            self.report(line, WireListError::PinWithoutComponent);
            return;
        };
        let result = match fields {
            [number, name, peers @ ..] => grammar::parse_pin_number(number).and_then(|pin| {
                if pin != *expected_pin {
                    return Err(WireListError::UnexpectedPin {
                        found: pin,
                        expected: *expected_pin,
                    });
                }
                *expected_pin += 1;
                self.board
                    .connect_pin(id, pin, name, peers, &self.options)
                    .map(|_| ())
            }),
            _ => Err(WireListError::PinRecordTooShort {
                fields: fields.len(),
            }),
        };
        if let Err(e) = result {
            self.report(line, e);
        }
    }

    /// Mandatory transition out of `ActiveComponent`.
    fn close_out(&mut self, line: usize) {
        if let Scope::ActiveComponent { id, .. } =
            std::mem::replace(&mut self.scope, Scope::NoActiveComponent)
        {
            if let Err(e) = self.board.close_component(&id) {
                self.report(line, e);
            }
        }
    }

    fn report(&mut self, line: usize, error: WireListError) {
        self.diagnostics.push(Diagnostic::new(line, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Endpoint;

    fn compile(input: &str) -> Compilation {
        Compiler::new(CompileOptions::default()).compile(input)
    }

    fn messages(c: &Compilation) -> Vec<String> {
        c.diagnostics.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_placeholder() {
        let input = "U1 0 7400 1\n1 ? U2-1\nU2 0 7400 1\n1 ? U1-1\n";
        let c = compile(input);
        assert!(c.is_clean(), "{:?}", messages(&c));
        let graph = c.graph();
        assert_eq!(graph.traces.len(), 1);
        assert_eq!(
            graph.trace("T001").unwrap(),
            &[Endpoint::new("U1", 0), Endpoint::new("U2", 0)]
        );
        assert_eq!(graph.component("U1").unwrap().pins[0], "T001");
        assert_eq!(graph.component("U2").unwrap().pins[0], "T001");
    }

    #[test]
    fn test_pin_out_of_order() {
        let input = "U1 0 7400 3\n1 GND\n3 +5V\n2 GND\n3 GND\n";
        let c = compile(input);
        assert_eq!(messages(&c), vec!["line 3: Pin (3) but expected pin (2)"]);
        assert_eq!(
            c.graph().component("U1").unwrap().pins,
            vec!["GND", "GND", "GND"]
        );
    }

    #[test]
    fn test_out_of_order_pin_not_stored() {
        let mut compiler = Compiler::new(CompileOptions::default());
        for line in classify::lines("U1 0 7400 3\n1 GND\n3 +5V\n") {
            compiler.feed(line);
        }
        let component = compiler.board.component("U1").unwrap();
        assert_eq!(component.pin(1), Some("GND"));
        assert_eq!(component.pin(2), None);
        assert_eq!(component.pin(3), None);

        let c = compiler.finish();
        assert!(matches!(
            c.diagnostics.last().unwrap().error,
            WireListError::MissingPins { ref pins, .. } if pins == &vec![2, 3]
        ));
    }

    #[test]
    fn test_pin_cannot_be_redeclared_after_reset() {
        let input = "U1 0 7400 1\n1 ? U1-1 U2-1\n# x\n1 GND\nU2 0 7400 1\n1 ? U1-1 U2-1\n";
        let c = compile(input);
        assert_eq!(
            messages(&c),
            vec![
                "line 3: Ambiguous line (# x)",
                "line 4: Pin (1) already assigned to trace (T001)",
            ]
        );
        let graph = c.graph();
        assert_eq!(graph.component("U1").unwrap().pins, vec!["T001"]);
        assert_eq!(graph.component("U2").unwrap().pins, vec!["T001"]);
        assert_eq!(
            graph.trace("T001").unwrap(),
            &[Endpoint::new("U1", 0), Endpoint::new("U2", 0)]
        );
    }

    #[test]
    fn test_glued_pin_number_is_ambiguous() {
        let c = compile("U1 0 7400 2\n1 GND\n2GND\n1 GND\n2 +5V\n");
        assert_eq!(messages(&c), vec!["line 3: Ambiguous line (2GND)"]);
        assert_eq!(c.board.component("U1").unwrap().pin(2), Some("+5V"));
    }

    #[test]
    fn test_rejected_pin_leaves_slot_empty() {
        let input = "U1 0 7400 2\n1 GND\n3 GND\nU2 0 7400 1\n1 GND\n";
        let c = compile(input);
        assert_eq!(c.diagnostics.len(), 2);
        assert!(matches!(
            c.diagnostics[0].error,
            WireListError::UnexpectedPin { found: 3, expected: 2 }
        ));
        assert_eq!(c.diagnostics[1].line, 4);
        assert!(matches!(
            c.diagnostics[1].error,
            WireListError::MissingPins { ref pins, .. } if pins == &vec![2]
        ));
    }

    #[test]
    fn test_incomplete_component_still_serialized() {
        let mut input = String::from("U5 2 74LS74 8\n");
        for pin in 1..=7 {
            input.push_str(&format!("{pin} GND\n"));
        }
        let c = compile(&input);
        assert_eq!(c.count(ErrorKind::Validation), 1);
        assert_eq!(c.diagnostics.len(), 1);
        match &c.diagnostics[0].error {
            WireListError::MissingPins { component, pins } => {
                assert_eq!(component, "U5");
                assert_eq!(pins, &vec![8]);
            }
            other => panic!("unexpected {other:?}"),
        }
        let record = c.graph().components["U5"].clone();
        assert_eq!(record.pins.len(), 8);
        assert_eq!(record.pins[6], "GND");
        assert_eq!(record.pins[7], "");
    }

    #[test]
    fn test_shared_trace_across_components() {
        let input = "\
U1 0 7400 2
1 ? U1-1 U2-2
2 NOCONNECTION
U2 0 7400 2
1 GND
2 ? U1-1 U2-2
";
        let c = compile(input);
        assert!(c.is_clean(), "{:?}", messages(&c));
        let graph = c.graph();
        assert_eq!(graph.traces.keys().collect::<Vec<_>>(), vec!["T001"]);
        assert_eq!(graph.component("U1").unwrap().pins, vec!["T001", ""]);
        assert_eq!(graph.component("U2").unwrap().pins, vec!["GND", "T001"]);
    }

    #[test]
    fn test_rejected_header_blocks_pins() {
        let input = "U1 0 7400\n1 GND\nU2 0 7400 1\n1 GND\n";
        let c = compile(input);
        assert_eq!(
            messages(&c),
            vec![
                "line 1: Component header too short (3)",
                "line 2: Unexpected pin - no component",
            ]
        );
        assert!(c.board.component("U1").is_none());
        assert!(c.board.component("U2").is_some());
    }

    #[test]
    fn test_duplicate_header_keeps_first() {
        let input = "U1 0 7400 1\n1 GND\nU1 3 7404 1\n1 +5V\n";
        let c = compile(input);
        assert_eq!(
            messages(&c),
            vec![
                "line 3: Duplicate component ID (U1)",
                "line 4: Unexpected pin - no component",
            ]
        );
        assert_eq!(c.board.component("U1").unwrap().part, "7400");
        assert_eq!(c.board.component("U1").unwrap().pin(1), Some("GND"));
    }

    #[test]
    fn test_ambiguous_line_resets_pin_counter() {
        let input = "U1 0 7400 2\n1 GND\n# stray\n1 GND\n2 GND\n";
        let c = compile(input);
        assert_eq!(messages(&c), vec!["line 3: Ambiguous line (# stray)"]);
        assert_eq!(c.board.component("U1").unwrap().pin(2), Some("GND"));
    }

    #[test]
    fn test_short_pin_record() {
        let c = compile("U1 0 7400 1\n1\n1 GND\n");
        assert_eq!(messages(&c), vec!["line 2: Pin description too short (1)"]);
        assert!(!c.is_clean());
        assert_eq!(c.board.component("U1").unwrap().pin(1), Some("GND"));
    }

    #[test]
    fn test_missing_pins_reported_at_end_of_input() {
        let c = compile("U1 0 7400 3\n1 GND\n\n\n");
        assert_eq!(c.diagnostics.len(), 1);
        assert_eq!(c.diagnostics[0].line, 4);
    }

    #[test]
    fn test_power_net_with_peers_rejected() {
        let c = compile("U1 0 7400 1\n1 GND U2-1\n");
        assert!(matches!(
            c.diagnostics[0].error,
            WireListError::ReservedNameWithPeers { .. }
        ));
        assert!(c.graph().traces.is_empty());
    }

    #[test]
    fn test_extra_power_nets() {
        let options = CompileOptions::new().with_power_net("VCC");
        let c = Compiler::new(options).compile("U1 0 7400 1\n1 VCC\n");
        assert!(c.is_clean());
        assert_eq!(c.board.component("U1").unwrap().pin(1), Some("VCC"));
    }

    #[test]
    fn test_scope_transitions() {
        let mut compiler = Compiler::new(CompileOptions::default());
        assert_eq!(compiler.scope(), &Scope::NoActiveComponent);
        for line in classify::lines("U1 0 7400 2\n1 GND\n") {
            compiler.feed(line);
        }
        assert_eq!(
            compiler.scope(),
            &Scope::ActiveComponent {
                id: "U1".into(),
                expected_pin: 2
            }
        );
        let c = compiler.finish();
        assert_eq!(c.count(ErrorKind::Validation), 1);
    }
}
