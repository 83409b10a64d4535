//! robolang-core: parsing and tree model for robot-controller languages.
//!
//! - KAREL declarations (`TYPE` / `CONST` sections) are parsed into an
//!   immutable, position-tagged AST: [`parse_declarations`],
//!   [`parse_type_declaration`] and friends.
//! - Teach-pendant programs are represented by the [`tp`] tree, produced by
//!   an external parser and consumed read-only by editor queries.
//!
//! Every tree node carries a 1-based [`SourceRange`].

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod tp;

// ── Convenience re-exports ───────────────────────────────────────────

pub use ast::{
    ArraySize, Constant, DataType, DeclarationUnit, Field, KarelValue, TypeDeclaration, UserType,
};
pub use error::ParseError;
pub use position::{AstNode, Located, SourcePosition, SourceRange};

pub use parser::{
    parse_constant, parse_data_type, parse_declarations, parse_type_declaration, parse_user_type,
    parse_value,
};
