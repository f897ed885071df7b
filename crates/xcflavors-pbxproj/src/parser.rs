//! Recursive-descent parser producing a span-annotated tree.

use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::value::{DictEntry, Node, NodeKind, Span};

/// Parse a complete property-list document.
///
/// The document must contain exactly one root value; comments and
/// whitespace around it are allowed.
pub fn parse(src: &str) -> Result<Node, ParseError> {
    let mut parser = Parser {
        lexer: Lexer::new(src),
        peeked: None,
    };
    let root = parser.value()?;
    if let Some(extra) = parser.next()? {
        return Err(parser.error(extra.span.start, "unexpected content after root value"));
    }
    Ok(root)
}

/// Whether `text` holds a `,` token. Commas inside comments or quoted
/// strings do not count; text that does not lex counts as no comma.
pub fn contains_comma(text: &str) -> bool {
    let mut lexer = Lexer::new(text);
    while let Ok(Some(token)) = lexer.next_token() {
        if token.kind == TokenKind::Comma {
            return true;
        }
    }
    false
}

/// Whether `text` is only whitespace and comments.
pub fn is_trivia(text: &str) -> bool {
    matches!(Lexer::new(text).next_token(), Ok(None))
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::LBrace => "'{'".to_string(),
        TokenKind::RBrace => "'}'".to_string(),
        TokenKind::LParen => "'('".to_string(),
        TokenKind::RParen => "')'".to_string(),
        TokenKind::Equals => "'='".to_string(),
        TokenKind::Semicolon => "';'".to_string(),
        TokenKind::Comma => "','".to_string(),
        TokenKind::String(s) => format!("string '{}'", s),
    }
}

impl<'a> Parser<'a> {
    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError::at(self.lexer.src(), offset, message)
    }

    fn eof_error(&self, expected: &str) -> ParseError {
        self.error(
            self.lexer.src().len(),
            format!("unexpected end of input, expected {}", expected),
        )
    }

    fn next(&mut self) -> Result<Option<Token>, ParseError> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.lexer.next_token(),
        }
    }

    fn peek(&mut self) -> Result<Option<&Token>, ParseError> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next_token()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let expected = describe(&kind);
        match self.next()? {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(self.error(
                token.span.start,
                format!("expected {}, found {}", expected, describe(&token.kind)),
            )),
            None => Err(self.eof_error(&expected)),
        }
    }

    fn value(&mut self) -> Result<Node, ParseError> {
        let Some(token) = self.next()? else {
            return Err(self.eof_error("a value"));
        };
        match token.kind {
            TokenKind::String(s) => Ok(Node {
                kind: NodeKind::String(s),
                span: token.span,
            }),
            TokenKind::LBrace => self.dict(token.span.start),
            TokenKind::LParen => self.array(token.span.start),
            other => Err(self.error(
                token.span.start,
                format!("expected a value, found {}", describe(&other)),
            )),
        }
    }

    fn dict(&mut self, start: usize) -> Result<Node, ParseError> {
        let mut entries = Vec::new();
        loop {
            let Some(token) = self.next()? else {
                return Err(self.eof_error("'}'"));
            };
            let key = match token.kind {
                TokenKind::RBrace => {
                    return Ok(Node {
                        kind: NodeKind::Dict(entries),
                        span: Span::new(start, token.span.end),
                    });
                }
                TokenKind::String(key) => key,
                other => {
                    return Err(self.error(
                        token.span.start,
                        format!("expected a key or '}}', found {}", describe(&other)),
                    ));
                }
            };
            self.expect(TokenKind::Equals)?;
            let value = self.value()?;
            let semi = self.expect(TokenKind::Semicolon)?;
            entries.push(DictEntry {
                key,
                value,
                span: Span::new(token.span.start, semi.span.end),
            });
        }
    }

    fn array(&mut self, start: usize) -> Result<Node, ParseError> {
        let mut items = Vec::new();
        loop {
            if let Some(token) = self.peek()? {
                if token.kind == TokenKind::RParen {
                    let end = token.span.end;
                    self.next()?;
                    return Ok(Node {
                        kind: NodeKind::Array(items),
                        span: Span::new(start, end),
                    });
                }
            }
            items.push(self.value()?);
            match self.next()? {
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => {}
                Some(Token {
                    kind: TokenKind::RParen,
                    span,
                }) => {
                    return Ok(Node {
                        kind: NodeKind::Array(items),
                        span: Span::new(start, span.end),
                    });
                }
                Some(token) => {
                    return Err(self.error(
                        token.span.start,
                        format!("expected ',' or ')', found {}", describe(&token.kind)),
                    ));
                }
                None => return Err(self.eof_error("')'")),
            }
        }
    }
}
