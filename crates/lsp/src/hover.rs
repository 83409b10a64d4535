//! Hover information for label references in TP programs.
//!
//! Hovering over an instruction that jumps to a label (directly, through a
//! motion skip option, an `IF` action or a wait timeout) shows the comment of
//! the `LBL[...]` definition it lands on, and points at that definition.

use lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position, Range};
use robolang_core::tp::{
    TpAccess, TpInstruction, TpInstructionKind, TpLabel, TpMotionOption, TpProgram, TpWait,
};

use crate::convert::to_lsp_range;

/// Resolve the label referenced on the cursor's line.
///
/// Returns `None` when there is no instruction on that line, the
/// instruction carries no label, the label is register-addressed, or no
/// definition with that number exists.
pub fn compute_label_hover(program: &TpProgram, position: Position) -> Option<Hover> {
    let instruction = instruction_at_line(program, position.line)?;
    let label = referenced_label(&instruction.kind)?;
    let &TpAccess::Direct { number, .. } = &label.number else {
        return None;
    };
    let target = find_label_definition(program, number)?;
    Some(make_hover(label_text(target, number), to_lsp_range(target.range)))
}

/// `line` is 0-based; instruction line numbers are 1-based.
fn instruction_at_line(program: &TpProgram, line: u32) -> Option<&TpInstruction> {
    program
        .instructions
        .iter()
        .find(|instr| instr.line_number.checked_sub(1) == Some(line))
}

/// The label an instruction refers to, if it has one.
pub fn referenced_label(kind: &TpInstructionKind) -> Option<&TpLabel> {
    match kind {
        TpInstructionKind::JumpLabel { label } => Some(label),
        TpInstructionKind::Motion(motion) => motion.options.iter().find_map(skip_label),
        TpInstructionKind::If { action, .. } => jump_label(action),
        TpInstructionKind::Wait {
            wait: TpWait::Condition { timeout_label, .. },
        } => timeout_label.as_ref(),
        TpInstructionKind::Wait {
            wait: TpWait::Time { .. },
        } => None,
        TpInstructionKind::MixedLogicWait { timeout_label, .. } => Some(timeout_label),
        TpInstructionKind::LabelDefinition { .. }
        | TpInstructionKind::Call { .. }
        | TpInstructionKind::Assignment { .. }
        | TpInstructionKind::Comment { .. }
        | TpInstructionKind::End => None,
    }
}

fn skip_label(option: &TpMotionOption) -> Option<&TpLabel> {
    match option {
        TpMotionOption::Skip { label } | TpMotionOption::SkipJump { label, .. } => Some(label),
        TpMotionOption::Acceleration { .. }
        | TpMotionOption::Offset { .. }
        | TpMotionOption::ToolOffset { .. }
        | TpMotionOption::Other { .. } => None,
    }
}

/// Only a plain `JMP LBL[...]` counts as an `IF` action with a label.
fn jump_label(action: &TpInstructionKind) -> Option<&TpLabel> {
    match action {
        TpInstructionKind::JumpLabel { label } => Some(label),
        TpInstructionKind::Motion(_)
        | TpInstructionKind::If { .. }
        | TpInstructionKind::Wait { .. }
        | TpInstructionKind::MixedLogicWait { .. }
        | TpInstructionKind::LabelDefinition { .. }
        | TpInstructionKind::Call { .. }
        | TpInstructionKind::Assignment { .. }
        | TpInstructionKind::Comment { .. }
        | TpInstructionKind::End => None,
    }
}

/// First definition in program order wins; duplicates are not reported.
fn find_label_definition(program: &TpProgram, number: u32) -> Option<&TpLabel> {
    program
        .instructions
        .iter()
        .filter_map(|instr| match &instr.kind {
            TpInstructionKind::LabelDefinition { label } => Some(label),
            _ => None,
        })
        .find(|label| matches!(label.number, TpAccess::Direct { number: n, .. } if n == number))
}

fn label_text(target: &TpLabel, number: u32) -> String {
    let line = target.range.start.line;
    match &target.number {
        TpAccess::Direct {
            comment: Some(comment),
            ..
        } => format!("{} (line {})", comment, line),
        _ => format!("LBL[{}] (line {})", number, line),
    }
}

/// Create a Hover with plaintext content.
fn make_hover(text: String, range: Range) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::PlainText,
            value: text,
        }),
        range: Some(range),
    }
}
