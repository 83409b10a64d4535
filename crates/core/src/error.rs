use serde::Serialize;

use crate::position::SourcePosition;

/// A failed parse: where it stopped and what it wanted there.
///
/// Produced by the lexer and by every grammar rule. A rule that fails
/// without consuming input lets alternation try the next branch; once input
/// is consumed the error is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{position}: expected {}, found {found}", describe_expected(.expected))]
pub struct ParseError {
    /// Furthest position reached before the failure.
    pub position: SourcePosition,
    /// Human-readable token descriptions that would have been accepted.
    pub expected: Vec<String>,
    /// Description of what was there instead.
    pub found: String,
}

impl ParseError {
    pub fn new(position: SourcePosition, expected: Vec<String>, found: impl Into<String>) -> Self {
        ParseError {
            position,
            expected,
            found: found.into(),
        }
    }

    pub fn lex(position: SourcePosition, expected: &str, found: impl Into<String>) -> Self {
        ParseError::new(position, vec![expected.to_owned()], found)
    }

    /// Serialize with every field present, matching the CLI's JSON error shape.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "line":     self.position.line,
            "column":   self.position.column,
            "expected": self.expected,
            "found":    self.found,
            "message":  self.to_string(),
        })
    }
}

fn describe_expected(expected: &[String]) -> String {
    let mut unique: Vec<&str> = Vec::new();
    for e in expected {
        if !unique.contains(&e.as_str()) {
            unique.push(e);
        }
    }
    match unique.as_slice() {
        [] => "nothing".to_owned(),
        [only] => (*only).to_owned(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}
