use super::{Parser, Rule};
use crate::ast::{Constant, KarelValue};
use crate::error::ParseError;
use crate::lexer::Token;

impl<'a> Parser<'a> {
    /// `ident = value`
    pub(super) fn constant(&mut self) -> Result<Constant, ParseError> {
        let identifier = self.identifier()?;
        self.expect(Token::Eq)?;
        let value = self.located(Parser::value)?;
        Ok(Constant { identifier, value })
    }

    pub(super) fn value(&mut self) -> Result<KarelValue, ParseError> {
        let rules: [Rule<'a, KarelValue>; 4] = [
            Parser::numeric_value,
            Parser::string_value,
            Parser::boolean_value,
            Parser::reference_value,
        ];
        self.alt(&rules)
    }

    fn numeric_value(&mut self) -> Result<KarelValue, ParseError> {
        let v = match self.peek() {
            Token::Int(n) => KarelValue::Integer(*n),
            Token::Real(r) => KarelValue::Real(r.clone()),
            _ => return Err(self.expected("number")),
        };
        self.bump();
        Ok(v)
    }

    fn string_value(&mut self) -> Result<KarelValue, ParseError> {
        let Token::Str(s) = self.peek() else {
            return Err(self.expected("string"));
        };
        let v = KarelValue::String(s.clone());
        self.bump();
        Ok(v)
    }

    fn boolean_value(&mut self) -> Result<KarelValue, ParseError> {
        let b = if self.is_keyword("TRUE") {
            true
        } else if self.is_keyword("FALSE") {
            false
        } else {
            return Err(self.expected("boolean"));
        };
        self.bump();
        Ok(KarelValue::Boolean(b))
    }

    /// `name` or `name.field.field`
    fn reference_value(&mut self) -> Result<KarelValue, ParseError> {
        let mut path = vec![self.identifier()?];
        while self.peek() == &Token::Dot {
            self.expect(Token::Dot)?;
            path.push(self.identifier()?);
        }
        Ok(KarelValue::Reference(path))
    }
}
