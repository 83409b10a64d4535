use crate::error::ParseError;
use crate::position::SourcePosition;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Identifiers and keywords -- distinguished in the parser
    Word(String),
    /// Integer literal
    Int(i64),
    /// Real literal -- kept as string to preserve exact representation
    Real(String),
    /// Single-quoted string literal (content without quotes)
    Str(String),
    /// `--` line comment (text after the dashes, untrimmed)
    Comment(String),
    // Punctuation
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    Dot,
    Eq,
    // End of input
    Eof,
}

impl Token {
    /// Short description used in "found ..." error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{}'", w),
            Token::Int(n) => format!("integer {}", n),
            Token::Real(r) => format!("real {}", r),
            Token::Str(s) => format!("string '{}'", s),
            Token::Comment(_) => "comment".to_owned(),
            Token::LBracket => "'['".to_owned(),
            Token::RBracket => "']'".to_owned(),
            Token::LParen => "'('".to_owned(),
            Token::RParen => "')'".to_owned(),
            Token::Colon => "':'".to_owned(),
            Token::Comma => "','".to_owned(),
            Token::Dot => "'.'".to_owned(),
            Token::Eq => "'='".to_owned(),
            Token::Eof => "end of input".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub start: SourcePosition,
    pub end: SourcePosition,
}

/// Words that can never be used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "ABORT", "AND", "ARRAY", "BEGIN", "BY", "CASE", "CONDITION", "CONST", "DELAY", "DIV", "DO",
    "DOWNTO", "ELSE", "END", "ENDCONDITION", "ENDFOR", "ENDIF", "ENDSELECT", "ENDSTRUCTURE",
    "ENDWHILE", "FALSE", "FOR", "FROM", "GO", "GOTO", "GROUP", "HOLD", "IF", "IN", "MOD",
    "NODEDATA", "NOT", "OF", "OFF", "ON", "OR", "PATH", "PATHHEADER", "PROGRAM", "REPEAT",
    "RETURN", "ROUTINE", "SELECT", "STRING", "STRUCTURE", "THEN", "TO", "TRUE", "TYPE", "UNTIL",
    "USING", "VAR", "WHEN", "WHILE", "WITH",
];

/// Predefined type names. Reserved, but accepted wherever a type name is.
pub const BUILTIN_TYPES: &[&str] = &[
    "BOOLEAN", "BYTE", "CAM_SETUP", "CONFIG", "DISP_DAT_T", "FILE", "INTEGER", "JOINTPOS",
    "JOINTPOS1", "JOINTPOS2", "JOINTPOS3", "JOINTPOS4", "JOINTPOS5", "JOINTPOS6", "JOINTPOS7",
    "JOINTPOS8", "JOINTPOS9", "MODEL", "POSITION", "REAL", "SHORT", "VECTOR", "VIS_PROCESS",
    "XYZWPR", "XYZWPREXT",
];

pub fn is_builtin_type(word: &str) -> bool {
    BUILTIN_TYPES.iter().any(|t| t.eq_ignore_ascii_case(word))
}

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.iter().any(|r| r.eq_ignore_ascii_case(word)) || is_builtin_type(word)
}

/// Character cursor that keeps line/column in step with the offset.
struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Cursor {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn here(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            s.push(c);
            self.bump();
        }
        s
    }
}

pub fn lex(src: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut cur = Cursor {
        chars: src.chars().collect(),
        pos: 0,
        line: 1,
        column: 1,
    };

    while let Some(c) = cur.peek() {
        // Whitespace
        if c.is_whitespace() {
            cur.bump();
            continue;
        }

        let start = cur.here();

        // Line comment
        if c == '-' && cur.peek_at(1) == Some('-') {
            cur.bump();
            cur.bump();
            let text = cur.take_while(|c| c != '\n' && c != '\r');
            tokens.push(Spanned {
                token: Token::Comment(text),
                start,
                end: cur.here(),
            });
            continue;
        }

        // String literal
        if c == '\'' {
            cur.bump();
            let text = cur.take_while(|c| c != '\'' && c != '\n' && c != '\r');
            if cur.peek() != Some('\'') {
                let found = if cur.peek().is_some() {
                    "end of line"
                } else {
                    "end of input"
                };
                return Err(ParseError::lex(cur.here(), "closing quote", found));
            }
            cur.bump();
            tokens.push(Spanned {
                token: Token::Str(text),
                start,
                end: cur.here(),
            });
            continue;
        }

        // Number
        if c.is_ascii_digit() || (c == '-' && cur.peek_at(1).is_some_and(|d| d.is_ascii_digit()))
        {
            let token = lex_number(&mut cur, start)?;
            tokens.push(Spanned {
                token,
                start,
                end: cur.here(),
            });
            continue;
        }

        // Identifier / keyword
        if c.is_alphabetic() || c == '_' {
            let word = cur.take_while(|c| c.is_alphanumeric() || c == '_');
            tokens.push(Spanned {
                token: Token::Word(word),
                start,
                end: cur.here(),
            });
            continue;
        }

        let token = match c {
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ':' => Token::Colon,
            ',' => Token::Comma,
            '.' => Token::Dot,
            '=' => Token::Eq,
            other => return Err(ParseError::lex(start, "token", format!("'{}'", other))),
        };
        cur.bump();
        tokens.push(Spanned {
            token,
            start,
            end: cur.here(),
        });
    }

    let here = cur.here();
    tokens.push(Spanned {
        token: Token::Eof,
        start: here,
        end: here,
    });
    Ok(tokens)
}

fn lex_number(cur: &mut Cursor, start: SourcePosition) -> Result<Token, ParseError> {
    let mut text = String::new();
    if cur.peek() == Some('-') {
        cur.bump();
        text.push('-');
    }
    text.push_str(&cur.take_while(|c| c.is_ascii_digit()));

    let mut is_real = false;
    if cur.peek() == Some('.') && cur.peek_at(1).is_some_and(|d| d.is_ascii_digit()) {
        is_real = true;
        cur.bump();
        text.push('.');
        text.push_str(&cur.take_while(|c| c.is_ascii_digit()));
    }
    if matches!(cur.peek(), Some('e' | 'E')) {
        let signed = matches!(cur.peek_at(1), Some('+' | '-'));
        let digit_at = if signed { 2 } else { 1 };
        if cur.peek_at(digit_at).is_some_and(|d| d.is_ascii_digit()) {
            is_real = true;
            text.push('E');
            cur.bump();
            if signed {
                if let Some(sign) = cur.bump() {
                    text.push(sign);
                }
            }
            text.push_str(&cur.take_while(|c| c.is_ascii_digit()));
        }
    }

    if is_real {
        return Ok(Token::Real(text));
    }
    text.parse::<i64>()
        .map(Token::Int)
        .map_err(|_| ParseError::lex(start, "integer in range", format!("'{}'", text)))
}
