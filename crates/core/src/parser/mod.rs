//! KAREL declaration parser.
//! Every produced node is wrapped in `Located` with the range of the tokens it
//! consumed. No name resolution is done here.
use crate::ast::{Constant, DataType, DeclarationUnit, KarelValue, TypeDeclaration, UserType};
use crate::error::ParseError;
use crate::lexer::{self, is_builtin_type, is_reserved, Spanned, Token};
use crate::position::{Located, SourcePosition, SourceRange};

mod types;
mod values;

/// A grammar rule usable as one branch of [`Parser::alt`].
type Rule<'a, T> = fn(&mut Parser<'a>) -> Result<T, ParseError>;

// ──────────────────────────────────────────────
// Parser
// ──────────────────────────────────────────────

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    /// End of the most recently consumed significant token.
    last_end: SourcePosition,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned]) -> Self {
        Parser {
            tokens,
            pos: 0,
            last_end: SourcePosition::START,
        }
    }

    fn cur(&self) -> &Spanned {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.cur().token
    }

    fn peek_nth(&self, n: usize) -> &Token {
        &self.tokens[(self.pos + n).min(self.tokens.len() - 1)].token
    }

    fn bump(&mut self) {
        self.last_end = self.cur().end;
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn skip_comments(&mut self) {
        while matches!(self.peek(), Token::Comment(_)) {
            self.pos += 1;
        }
    }

    fn error(&self, expected: Vec<String>) -> ParseError {
        ParseError::new(self.cur().start, expected, self.peek().describe())
    }

    fn expected(&self, what: &str) -> ParseError {
        self.error(vec![what.to_owned()])
    }

    // -- Combinators --------------------------------------------

    /// Run `rule` and attach the range it covered.
    fn located<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Located<T>, ParseError> {
        let start = self.cur().start;
        let node = rule(self)?;
        Ok(Located::new(node, SourceRange::new(start, self.last_end)))
    }

    /// Try each rule in order. Only a failure that consumed nothing moves on
    /// to the next rule; a failure after consuming input is returned as is.
    fn alt<T>(&mut self, rules: &[Rule<'a, T>]) -> Result<T, ParseError> {
        let entry = self.pos;
        let mut expected = Vec::new();
        for rule in rules {
            match rule(self) {
                Ok(v) => return Ok(v),
                Err(e) if self.pos == entry => expected.extend(e.expected),
                Err(e) => return Err(e),
            }
        }
        Err(self.error(expected))
    }

    fn optional<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        let entry = self.pos;
        match rule(self) {
            Ok(v) => Ok(Some(v)),
            Err(_) if self.pos == entry => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Zero or more repetitions; comments between repetitions are skipped.
    fn many<T>(
        &mut self,
        mut rule: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        loop {
            self.skip_comments();
            let entry = self.pos;
            match rule(self) {
                Ok(v) => items.push(v),
                Err(_) if self.pos == entry => return Ok(items),
                Err(e) => return Err(e),
            }
        }
    }

    fn at_least_once<T>(
        &mut self,
        mut rule: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.skip_comments();
        let first = rule(self)?;
        let mut items = vec![first];
        items.extend(self.many(rule)?);
        Ok(items)
    }

    /// Zero or more `rule`s separated by `sep`. A separator commits to
    /// another element.
    fn sep_by<T>(
        &mut self,
        mut rule: impl FnMut(&mut Self) -> Result<T, ParseError>,
        sep: Token,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();
        match self.optional(&mut rule)? {
            Some(first) => items.push(first),
            None => return Ok(items),
        }
        while self.peek() == &sep {
            self.expect(sep.clone())?;
            items.push(rule(self)?);
        }
        Ok(items)
    }

    fn between_brackets<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.expect(Token::LBracket)?;
        let v = rule(self)?;
        self.expect(Token::RBracket)?;
        Ok(v)
    }

    /// Skip comments on both sides of `rule`.
    fn ignore_comments<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.skip_comments();
        let v = rule(self)?;
        self.skip_comments();
        Ok(v)
    }

    // -- Lexical primitives -------------------------------------

    fn is_keyword_at(&self, n: usize, word: &str) -> bool {
        matches!(self.peek_nth(n), Token::Word(w) if w.eq_ignore_ascii_case(word))
    }

    fn is_keyword(&self, word: &str) -> bool {
        self.is_keyword_at(0, word)
    }

    /// Match `word` case-insensitively, then skip trailing comments.
    fn keyword(&mut self, word: &str) -> Result<(), ParseError> {
        if !self.is_keyword(word) {
            return Err(self.expected(&format!("'{}'", word)));
        }
        self.bump();
        self.skip_comments();
        Ok(())
    }

    /// Match a punctuation token, then skip trailing comments.
    fn expect(&mut self, token: Token) -> Result<(), ParseError> {
        if self.peek() != &token {
            return Err(self.expected(&token.describe()));
        }
        self.bump();
        self.skip_comments();
        Ok(())
    }

    fn identifier(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Token::Word(w) if !is_reserved(w) => {
                let w = w.clone();
                self.bump();
                Ok(w)
            }
            _ => Err(self.expected("identifier")),
        }
    }

    /// An identifier or a predefined type name such as `INTEGER`.
    fn type_name(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Token::Word(w) if !is_reserved(w) || is_builtin_type(w) => {
                let w = w.clone();
                self.bump();
                Ok(w)
            }
            _ => Err(self.expected("type name")),
        }
    }

    fn unsigned(&mut self) -> Result<u32, ParseError> {
        match self.peek() {
            Token::Int(n) => match u32::try_from(*n) {
                Ok(v) => {
                    self.bump();
                    Ok(v)
                }
                Err(_) => Err(self.expected("unsigned integer")),
            },
            _ => Err(self.expected("unsigned integer")),
        }
    }

    fn expect_eof(&self) -> Result<(), ParseError> {
        if self.peek() == &Token::Eof {
            Ok(())
        } else {
            Err(self.expected("end of input"))
        }
    }

    // -- Sections -----------------------------------------------

    /// `TYPE` and `CONST` sections, in any order and number.
    fn declaration_unit(&mut self) -> Result<DeclarationUnit, ParseError> {
        let mut unit = DeclarationUnit::default();
        loop {
            self.skip_comments();
            if self.is_keyword("TYPE") {
                self.keyword("TYPE")?;
                let types =
                    self.many(|p| p.ignore_comments(|p| p.located(Parser::type_declaration)))?;
                unit.types.extend(types);
            } else if self.is_keyword("CONST") {
                self.keyword("CONST")?;
                let constants =
                    self.many(|p| p.ignore_comments(|p| p.located(Parser::constant)))?;
                unit.constants.extend(constants);
            } else if self.peek() == &Token::Eof {
                return Ok(unit);
            } else {
                return Err(self.error(vec![
                    "'TYPE'".to_owned(),
                    "'CONST'".to_owned(),
                    "end of input".to_owned(),
                ]));
            }
        }
    }
}

// ──────────────────────────────────────────────
// Entry points
// ──────────────────────────────────────────────

/// Lex `src`, run `rule`, and require that nothing but comments follow.
fn parse_all<T>(
    src: &str,
    rule: impl FnOnce(&mut Parser<'_>) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    let tokens = lexer::lex(src)?;
    let mut p = Parser::new(&tokens);
    let v = p.ignore_comments(rule)?;
    p.expect_eof()?;
    Ok(v)
}

/// Parse a unit made of `TYPE` and `CONST` sections.
pub fn parse_declarations(src: &str) -> Result<DeclarationUnit, ParseError> {
    parse_all(src, |p| p.declaration_unit())
}

/// Parse a single `ident [FROM prog] = type` declaration.
pub fn parse_type_declaration(src: &str) -> Result<Located<TypeDeclaration>, ParseError> {
    parse_all(src, |p| p.located(Parser::type_declaration))
}

pub fn parse_user_type(src: &str) -> Result<Located<UserType>, ParseError> {
    parse_all(src, |p| p.located(Parser::user_type))
}

pub fn parse_data_type(src: &str) -> Result<Located<DataType>, ParseError> {
    parse_all(src, |p| p.located(Parser::data_type))
}

pub fn parse_constant(src: &str) -> Result<Located<Constant>, ParseError> {
    parse_all(src, |p| p.located(Parser::constant))
}

pub fn parse_value(src: &str) -> Result<Located<KarelValue>, ParseError> {
    parse_all(src, |p| p.located(Parser::value))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
