use super::{Parser, Rule};
use crate::ast::{ArraySize, DataType, Field, TypeDeclaration, UserType};
use crate::error::ParseError;
use crate::lexer::{is_reserved, Token};

impl<'a> Parser<'a> {
    // -- Declarations -------------------------------------------

    pub(super) fn type_declaration(&mut self) -> Result<TypeDeclaration, ParseError> {
        let identifier = self.identifier()?;
        let from_program = self.optional(|p| {
            p.keyword("FROM")?;
            p.identifier()
        })?;
        self.expect(Token::Eq)?;
        let user_type = self.located(Parser::user_type)?;
        Ok(TypeDeclaration {
            identifier,
            user_type,
            from_program,
        })
    }

    pub(super) fn user_type(&mut self) -> Result<UserType, ParseError> {
        let rules: [Rule<'a, UserType>; 2] = [Parser::structure, Parser::data_user_type];
        self.alt(&rules)
    }

    fn data_user_type(&mut self) -> Result<UserType, ParseError> {
        Ok(UserType::Data {
            data_type: self.data_type()?,
        })
    }

    fn structure(&mut self) -> Result<UserType, ParseError> {
        self.keyword("STRUCTURE")?;
        let fields = self.at_least_once(|p| p.ignore_comments(|p| p.located(Parser::field)))?;
        self.keyword("ENDSTRUCTURE")?;
        Ok(UserType::Structure { fields })
    }

    fn field(&mut self) -> Result<Field, ParseError> {
        let identifier = self.identifier()?;
        self.expect(Token::Colon)?;
        let data_type = self.located(Parser::data_type)?;
        Ok(Field {
            identifier,
            data_type,
        })
    }

    // -- Data types ---------------------------------------------

    /// Order matters: the position rule must see `IN GROUP` before the
    /// plain-name fallback gets a chance at the same identifier.
    pub(super) fn data_type(&mut self) -> Result<DataType, ParseError> {
        let rules: [Rule<'a, DataType>; 5] = [
            Parser::string_type,
            Parser::array_type,
            Parser::position_type,
            Parser::path_type,
            Parser::named_type,
        ];
        self.alt(&rules)
    }

    fn string_type(&mut self) -> Result<DataType, ParseError> {
        self.keyword("STRING")?;
        let size = self.between_brackets(Parser::unsigned)?;
        Ok(DataType::String { size })
    }

    fn array_type(&mut self) -> Result<DataType, ParseError> {
        self.keyword("ARRAY")?;
        let sizes = self
            .optional(|p| {
                p.between_brackets(|p| p.sep_by(|p| p.located(Parser::array_size), Token::Comma))
            })?
            .unwrap_or_default();
        self.keyword("OF")?;
        let element = self.located(Parser::data_type)?;
        Ok(DataType::Array {
            sizes,
            element: Box::new(element),
        })
    }

    fn array_size(&mut self) -> Result<ArraySize, ParseError> {
        match self.peek() {
            Token::Int(n) => {
                let n = *n;
                self.bump();
                Ok(ArraySize::Literal(n))
            }
            Token::Word(w) if !is_reserved(w) => {
                let name = w.clone();
                self.bump();
                Ok(ArraySize::Named(name))
            }
            _ => Err(self.expected("array size")),
        }
    }

    fn position_type(&mut self) -> Result<DataType, ParseError> {
        let is_position = matches!(self.peek(), Token::Word(w) if !is_reserved(w))
            && self.is_keyword_at(1, "IN")
            && self.is_keyword_at(2, "GROUP");
        if !is_position {
            return Err(self.expected("position type"));
        }
        let pos_type = self.identifier()?;
        let group = self.group_suffix()?;
        Ok(DataType::Position { pos_type, group })
    }

    fn path_type(&mut self) -> Result<DataType, ParseError> {
        self.keyword("PATH")?;
        let header = self.optional(|p| {
            p.keyword("PATHHEADER")?;
            p.expect(Token::Eq)?;
            let header = p.identifier()?;
            p.expect(Token::Comma)?;
            Ok(header)
        })?;
        self.keyword("NODEDATA")?;
        self.expect(Token::Eq)?;
        let node_data = self.identifier()?;
        Ok(DataType::Path { header, node_data })
    }

    fn named_type(&mut self) -> Result<DataType, ParseError> {
        let identifier = self.type_name()?;
        let group = self.optional(Parser::group_suffix)?;
        Ok(DataType::Name { identifier, group })
    }

    /// `IN GROUP[n]`
    fn group_suffix(&mut self) -> Result<u32, ParseError> {
        self.keyword("IN")?;
        self.keyword("GROUP")?;
        self.between_brackets(Parser::unsigned)
    }
}
