//! Source positions and position-tagged tree nodes.
//!
//! Positions inside the tree are 1-based (line and column). Editor-facing
//! code converts them to 0-based coordinates at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-based line/column location. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub const START: SourcePosition = SourcePosition { line: 1, column: 1 };

    pub fn new(line: u32, column: u32) -> Self {
        SourcePosition { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open source range: `end` is the position just past the last
/// character of the node. Always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceRange {
    /// Build a range, clamping `end` up to `start` if they arrive reversed.
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        SourceRange {
            start,
            end: end.max(start),
        }
    }
}

/// Anything in the tree that knows where it came from.
pub trait AstNode {
    fn range(&self) -> SourceRange;
}

/// A tree node together with its source range.
///
/// Equality compares `node` only, so two trees parsed from differently
/// laid-out text are equal when their structure is.
#[derive(Debug, Clone, Serialize)]
pub struct Located<T> {
    pub node: T,
    pub range: SourceRange,
}

impl<T> Located<T> {
    pub fn new(node: T, range: SourceRange) -> Self {
        Located { node, range }
    }
}

impl<T> AstNode for Located<T> {
    fn range(&self) -> SourceRange {
        self.range
    }
}

impl<T: PartialEq> PartialEq for Located<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<T: fmt::Display> fmt::Display for Located<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.node, f)
    }
}
