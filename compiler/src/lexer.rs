use std::fmt::Display;

use crate::CompileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Program,
    Var,
    Integer,
    Begin,
    End,
    Read,
    Write,
    While,
    Do,

    Identifier,
    Number,

    Assign,
    LessEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Semicolon,
    Colon,
    Comma,
    LeftParen,
    RightParen,
    Dot,

    Eof,
}

impl TokenKind {
    fn keyword(word: &str) -> Option<Self> {
        use TokenKind::*;

        let kind = match word {
            "program" => Program,
            "var" => Var,
            "integer" => Integer,
            "begin" => Begin,
            "end" => End,
            "read" => Read,
            "write" => Write,
            "while" => While,
            "do" => Do,
            _ => return None,
        };

        Some(kind)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TokenKind::*;

        let text = match *self {
            Program => "\"program\"",
            Var => "\"var\"",
            Integer => "\"integer\"",
            Begin => "\"begin\"",
            End => "\"end\"",
            Read => "\"read\"",
            Write => "\"write\"",
            While => "\"while\"",
            Do => "\"do\"",
            Identifier => "identifier",
            Number => "number",
            Assign => "\":=\"",
            LessEqual => "\"<=\"",
            Plus => "\"+\"",
            Minus => "\"-\"",
            Star => "\"*\"",
            Slash => "\"/\"",
            Semicolon => "\";\"",
            Colon => "\":\"",
            Comma => "\",\"",
            LeftParen => "\"(\"",
            RightParen => "\")\"",
            Dot => "\".\"",
            Eof => "end of input",
        };

        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number => {
                write!(f, "{} '{}'", self.kind, self.lexeme)
            }
            kind => write!(f, "{kind}"),
        }
    }
}

/// Splits `source` into tokens, always terminated by a single `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, CompileError> {
    Lexer::new(source).tokenize()
}

#[derive(Debug, Clone)]
struct Lexer {
    contents: Vec<char>,
    idx: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            contents: source.chars().collect(),
            idx: 0,
            line: 1,
            column: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, CompileError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            let (start, line, column) = (self.idx, self.line, self.column);
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    lexeme: String::new(),
                    line,
                    column,
                });

                return Ok(tokens);
            };

            let kind = match ch {
                c if c.is_ascii_alphabetic() => self.lex_word(),
                c if c.is_ascii_digit() => self.lex_number()?,
                ':' if self.peek_next() == Some('=') => self.lex_pair(TokenKind::Assign),
                '<' if self.peek_next() == Some('=') => self.lex_pair(TokenKind::LessEqual),
                ':' => self.lex_single(TokenKind::Colon),
                '+' => self.lex_single(TokenKind::Plus),
                '-' => self.lex_single(TokenKind::Minus),
                '*' => self.lex_single(TokenKind::Star),
                '/' => self.lex_single(TokenKind::Slash),
                ';' => self.lex_single(TokenKind::Semicolon),
                ',' => self.lex_single(TokenKind::Comma),
                '(' => self.lex_single(TokenKind::LeftParen),
                ')' => self.lex_single(TokenKind::RightParen),
                '.' => self.lex_single(TokenKind::Dot),
                c => {
                    return Err(CompileError::lexical(
                        line,
                        column,
                        format!("unexpected character '{}'", c.escape_debug()),
                    ))
                }
            };

            let lexeme = self.contents[start..self.idx].iter().collect();
            tokens.push(Token {
                kind,
                lexeme,
                line,
                column,
            });
        }
    }

    fn lex_word(&mut self) -> TokenKind {
        let start = self.idx;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.next();
        }

        let word: String = self.contents[start..self.idx].iter().collect();
        TokenKind::keyword(&word).unwrap_or(TokenKind::Identifier)
    }

    fn lex_number(&mut self) -> Result<TokenKind, CompileError> {
        let (line, column) = (self.line, self.column);
        let start = self.idx;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.next();
        }

        let digits: String = self.contents[start..self.idx].iter().collect();
        digits.parse::<i64>().map_err(|_| {
            CompileError::lexical(
                line,
                column,
                format!("integer literal {digits} is out of range"),
            )
        })?;

        Ok(TokenKind::Number)
    }

    fn lex_pair(&mut self, kind: TokenKind) -> TokenKind {
        self.next();
        self.next();

        kind
    }

    fn lex_single(&mut self, kind: TokenKind) -> TokenKind {
        self.next();

        kind
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next();
        }
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.idx += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.contents.get(self.idx).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.contents.get(self.idx + 1).copied()
    }
}
