//! Label hover over hand-built TP program trees.
//!
//! The trees mimic what the TP parser hands over: 1-based line numbers on
//! instructions and 1-based ranges on labels.

use lsp_types::{HoverContents, MarkupKind, Position, Range};
use robolang_core::tp::{
    TpAccess, TpInstruction, TpInstructionKind, TpLabel, TpMotion, TpMotionOption, TpMotionType,
    TpProgram, TpWait,
};
use robolang_core::{SourcePosition, SourceRange};
use robolang_lsp::compute_label_hover;

fn label_range(line: u32, width: u32) -> SourceRange {
    SourceRange::new(SourcePosition::new(line, 4), SourcePosition::new(line, 4 + width))
}

fn direct(number: u32, line: u32) -> TpLabel {
    TpLabel {
        number: TpAccess::Direct {
            number,
            comment: None,
        },
        range: label_range(line, 6),
    }
}

fn definition(number: u32, comment: &str, line: u32) -> TpInstruction {
    TpInstruction {
        line_number: line,
        kind: TpInstructionKind::LabelDefinition {
            label: TpLabel {
                number: TpAccess::Direct {
                    number,
                    comment: Some(comment.to_owned()),
                },
                range: label_range(line, 7 + comment.len() as u32),
            },
        },
    }
}

fn skip_motion(label: TpLabel, line: u32) -> TpInstruction {
    TpInstruction {
        line_number: line,
        kind: TpInstructionKind::Motion(TpMotion {
            motion_type: TpMotionType::Linear,
            position: "P[2]".into(),
            speed: "500mm/sec".into(),
            termination: "FINE".into(),
            options: vec![TpMotionOption::Skip { label }],
        }),
    }
}

fn jump(label: TpLabel, line: u32) -> TpInstruction {
    TpInstruction {
        line_number: line,
        kind: TpInstructionKind::JumpLabel { label },
    }
}

fn program(instructions: Vec<TpInstruction>) -> TpProgram {
    TpProgram {
        name: "PICK_PART".into(),
        instructions,
    }
}

fn hover_text(program: &TpProgram, line: u32) -> Option<String> {
    compute_label_hover(program, Position::new(line, 0)).map(|h| match h.contents {
        HoverContents::Markup(m) => {
            assert_eq!(m.kind, MarkupKind::PlainText);
            m.value
        }
        other => panic!("expected markup contents, got {:?}", other),
    })
}

/// A small program: a skip motion at line 3 targeting LBL[1] at line 10.
fn retry_program() -> TpProgram {
    program(vec![
        TpInstruction {
            line_number: 1,
            kind: TpInstructionKind::Comment {
                text: "pick cycle".into(),
            },
        },
        TpInstruction {
            line_number: 2,
            kind: TpInstructionKind::Call {
                program: "OPEN_GRIPPER".into(),
            },
        },
        skip_motion(direct(1, 3), 3),
        jump(direct(2, 4), 4),
        definition(1, "Retry", 10),
        TpInstruction {
            line_number: 11,
            kind: TpInstructionKind::End,
        },
    ])
}

// ──────────────────────────────────────────────
// Resolution
// ──────────────────────────────────────────────

#[test]
fn skip_option_resolves_to_label_definition() {
    let prog = retry_program();
    let hover = compute_label_hover(&prog, Position::new(2, 5)).expect("hover on line 3");
    match &hover.contents {
        HoverContents::Markup(m) => assert_eq!(m.value, "Retry (line 10)"),
        other => panic!("expected markup contents, got {:?}", other),
    }
    assert_eq!(
        hover.range,
        Some(Range::new(Position::new(9, 3), Position::new(9, 15)))
    );
}

#[test]
fn line_without_instruction_has_no_hover() {
    let prog = retry_program();
    assert_eq!(hover_text(&prog, 6), None);
    assert_eq!(hover_text(&prog, 400), None);
}

#[test]
fn instruction_without_label_has_no_hover() {
    let prog = retry_program();
    assert_eq!(hover_text(&prog, 1), None);
}

#[test]
fn undefined_label_has_no_hover() {
    // Line 4 jumps to LBL[2], which is never defined.
    let prog = retry_program();
    assert_eq!(hover_text(&prog, 3), None);
}

#[test]
fn indirect_reference_has_no_hover() {
    let indirect = TpLabel {
        number: TpAccess::Indirect { register: 1 },
        range: label_range(1, 9),
    };
    let prog = program(vec![jump(indirect, 1), definition(1, "Retry", 2)]);
    assert_eq!(hover_text(&prog, 0), None);
}

#[test]
fn first_line_is_found_by_cursor_line_zero() {
    let prog = program(vec![jump(direct(5, 1), 1), definition(5, "Done", 7)]);
    assert_eq!(hover_text(&prog, 0).as_deref(), Some("Done (line 7)"));
}

#[test]
fn first_definition_wins() {
    let prog = program(vec![
        jump(direct(3, 1), 1),
        definition(3, "First", 4),
        definition(3, "Second", 8),
    ]);
    assert_eq!(hover_text(&prog, 0).as_deref(), Some("First (line 4)"));
}

#[test]
fn indirect_definition_is_never_a_target() {
    let indirect_def = TpInstruction {
        line_number: 2,
        kind: TpInstructionKind::LabelDefinition {
            label: TpLabel {
                number: TpAccess::Indirect { register: 3 },
                range: label_range(2, 9),
            },
        },
    };
    let prog = program(vec![
        jump(direct(3, 1), 1),
        indirect_def,
        definition(3, "Real target", 6),
    ]);
    assert_eq!(hover_text(&prog, 0).as_deref(), Some("Real target (line 6)"));
}

#[test]
fn if_jump_and_wait_timeout_resolve() {
    let prog = program(vec![
        TpInstruction {
            line_number: 1,
            kind: TpInstructionKind::If {
                condition: "DI[3]=OFF".into(),
                action: Box::new(TpInstructionKind::JumpLabel {
                    label: direct(9, 1),
                }),
            },
        },
        TpInstruction {
            line_number: 2,
            kind: TpInstructionKind::Wait {
                wait: TpWait::Condition {
                    condition: "DI[4]=ON".into(),
                    timeout_label: Some(direct(9, 2)),
                },
            },
        },
        TpInstruction {
            line_number: 3,
            kind: TpInstructionKind::MixedLogicWait {
                condition: "(DI[4] OR DI[5])".into(),
                timeout_label: direct(9, 3),
            },
        },
        definition(9, "Fault", 5),
    ]);
    for line in 0..3 {
        assert_eq!(hover_text(&prog, line).as_deref(), Some("Fault (line 5)"));
    }
}

#[test]
fn concurrent_queries_agree() {
    let prog = retry_program();
    let expected = compute_label_hover(&prog, Position::new(2, 0));
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| compute_label_hover(&prog, Position::new(2, 0))))
            .collect();
        for h in handles {
            assert_eq!(h.join().expect("thread"), expected);
        }
    });
}

// ──────────────────────────────────────────────
// Serialized trees
// ──────────────────────────────────────────────

#[test]
fn program_loaded_from_json_resolves() {
    let json = r#"{
      "name": "MAIN",
      "instructions": [
        {
          "line_number": 1,
          "kind": {
            "kind": "jump_label",
            "label": {
              "number": { "kind": "direct", "number": 4, "comment": null },
              "range": { "start": { "line": 1, "column": 5 }, "end": { "line": 1, "column": 11 } }
            }
          }
        },
        {
          "line_number": 2,
          "kind": {
            "kind": "label_definition",
            "label": {
              "number": { "kind": "direct", "number": 4, "comment": "Home" },
              "range": { "start": { "line": 2, "column": 1 }, "end": { "line": 2, "column": 12 } }
            }
          }
        }
      ]
    }"#;
    let prog: TpProgram = serde_json::from_str(json).expect("valid program JSON");
    let hover = compute_label_hover(&prog, Position::new(0, 2)).expect("hover");
    assert_eq!(
        hover.range,
        Some(Range::new(Position::new(1, 0), Position::new(1, 11)))
    );
    assert_eq!(hover_text(&prog, 0).as_deref(), Some("Home (line 2)"));
}
