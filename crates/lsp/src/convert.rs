//! Conversions between tree positions (1-based) and LSP positions (0-based).

use lsp_types::{Position, Range};
use robolang_core::{SourcePosition, SourceRange};

pub fn to_lsp_position(pos: SourcePosition) -> Position {
    Position::new(pos.line.saturating_sub(1), pos.column.saturating_sub(1))
}

pub fn to_lsp_range(range: SourceRange) -> Range {
    Range::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

pub fn from_lsp_position(pos: Position) -> SourcePosition {
    SourcePosition::new(pos.line + 1, pos.character + 1)
}
