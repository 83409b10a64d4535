//! KAREL declaration AST.
//!
//! Produced by the parser; every node is wrapped in [`Located`] exactly
//! once. `Display` prints the canonical source form, which parses back to a
//! structurally equal tree.

use serde::Serialize;
use std::fmt;

use crate::position::Located;

// ──────────────────────────────────────────────
// Values and constants
// ──────────────────────────────────────────────

/// A literal as written in source. Nothing is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KarelValue {
    Integer(i64),
    /// Kept as text so `1.50` prints back as `1.50`
    Real(String),
    String(String),
    Boolean(bool),
    /// Named or dotted access, e.g. `max_count` or `cfg.limits.speed`
    Reference(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constant {
    pub identifier: String,
    pub value: Located<KarelValue>,
}

// ──────────────────────────────────────────────
// Types
// ──────────────────────────────────────────────

/// One dimension bound of an array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ArraySize {
    Literal(i64),
    /// Constant name; existence is not checked
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataType {
    /// Built-in or user type name, e.g. `INTEGER` or `JOINTPOS IN GROUP[2]`
    Name {
        identifier: String,
        group: Option<u32>,
    },
    /// `STRING[size]`
    String { size: u32 },
    /// `ARRAY[d1, d2] OF element`; empty `sizes` means unsized
    Array {
        sizes: Vec<Located<ArraySize>>,
        element: Box<Located<DataType>>,
    },
    /// `pos_type IN GROUP[group]` for a user-named position type
    Position { pos_type: String, group: u32 },
    /// `PATH [PATHHEADER = header,] NODEDATA = node_data`
    Path {
        header: Option<String>,
        node_data: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub identifier: String,
    pub data_type: Located<DataType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserType {
    Data { data_type: DataType },
    /// Never empty
    Structure { fields: Vec<Located<Field>> },
}

/// `identifier [FROM program] = user_type`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDeclaration {
    pub identifier: String,
    pub user_type: Located<UserType>,
    pub from_program: Option<String>,
}

/// The contents of `TYPE` and `CONST` sections, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeclarationUnit {
    pub types: Vec<Located<TypeDeclaration>>,
    pub constants: Vec<Located<Constant>>,
}

// ──────────────────────────────────────────────
// Canonical printing
// ──────────────────────────────────────────────

impl fmt::Display for KarelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KarelValue::Integer(n) => write!(f, "{}", n),
            KarelValue::Real(r) => f.write_str(r),
            KarelValue::String(s) => write!(f, "'{}'", s),
            KarelValue::Boolean(true) => f.write_str("TRUE"),
            KarelValue::Boolean(false) => f.write_str("FALSE"),
            KarelValue::Reference(path) => f.write_str(&path.join(".")),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}

impl fmt::Display for ArraySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArraySize::Literal(n) => write!(f, "{}", n),
            ArraySize::Named(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Name {
                identifier,
                group: Some(g),
            } => write!(f, "{} IN GROUP[{}]", identifier, g),
            DataType::Name {
                identifier,
                group: None,
            } => f.write_str(identifier),
            DataType::String { size } => write!(f, "STRING[{}]", size),
            DataType::Array { sizes, element } => {
                let dims: Vec<String> = sizes.iter().map(|s| s.to_string()).collect();
                write!(f, "ARRAY[{}] OF {}", dims.join(","), element)
            }
            DataType::Position { pos_type, group } => {
                write!(f, "{} IN GROUP[{}]", pos_type, group)
            }
            DataType::Path { header, node_data } => {
                f.write_str("PATH ")?;
                if let Some(h) = header {
                    write!(f, "PATHHEADER = {}, ", h)?;
                }
                write!(f, "NODEDATA = {}", node_data)
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.identifier, self.data_type)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Data { data_type } => write!(f, "{}", data_type),
            UserType::Structure { fields } => {
                writeln!(f, "STRUCTURE")?;
                for field in fields {
                    writeln!(f, "    {}", field)?;
                }
                f.write_str("ENDSTRUCTURE")
            }
        }
    }
}

impl fmt::Display for TypeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)?;
        if let Some(program) = &self.from_program {
            write!(f, " FROM {}", program)?;
        }
        write!(f, " = {}", self.user_type)
    }
}

impl fmt::Display for DeclarationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.constants.is_empty() {
            writeln!(f, "CONST")?;
            for c in &self.constants {
                writeln!(f, "    {}", c)?;
            }
        }
        if !self.types.is_empty() {
            writeln!(f, "TYPE")?;
            for t in &self.types {
                writeln!(f, "    {}", t)?;
            }
        }
        Ok(())
    }
}
