use crate::{lexer::prelude::{tokenize, LexResult, LexicalError, Lexer, Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Parsed, Program};

pub trait Parse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<T>, precedence: Option<Precedence>) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = LexResult>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<T>,
        left: Self,
        precedence: Precedence
    ) -> Result<Self, ParseError>;
}

pub struct Parser<T: Iterator<Item = LexResult>> {
    pub current_token: Option<Spanned>,
    pub next_token: Option<Spanned>,
    pub comments: Vec<SrcSpan>,
    pub lex_errors: Vec<LexicalError>,

    tokens: T,
    last_end: u32,
}

impl<T: Iterator<Item = LexResult>> Parser<T> {
    pub fn new(input: T) -> Self {
        let mut parser = Self {
            current_token: None,
            next_token: None,
            comments: vec![],
            lex_errors: vec![],

            tokens: input,
            last_end: 0,
        };

        parser.step();
        parser.step();

        parser
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn next_token(&mut self) -> Option<Spanned> {
        let t = self.current_token.take();
        let mut next = None;

        loop {
            match self.tokens.next() {
                Some(Ok((start, Token::Comment, end))) => {
                    self.comments.push(SrcSpan { start, end })
                },
                Some(Err(err)) => {
                    self.lex_errors.push(err);

                    break;
                },
                Some(Ok(tok)) => {
                    next = Some(tok);

                    break;
                },
                None => {
                    break;
                }
            }
        }

        if let Some((_, _, end)) = &t {
            self.last_end = *end;
        }

        self.current_token = self.next_token.take();
        self.next_token = next.take();

        t
    }

    /// The current token; a drained or failed token stream reads as `Eof`.
    pub fn current(&self) -> &Token {
        match &self.current_token {
            Some((_, token, _)) => token,
            None => &Token::Eof
        }
    }

    pub fn peek(&self) -> &Token {
        match &self.next_token {
            Some((_, token, _)) => token,
            None => &Token::Eof
        }
    }

    pub fn current_span(&self) -> SrcSpan {
        match &self.current_token {
            Some((start, _, end)) => SrcSpan { start: *start, end: *end },
            None => SrcSpan::point(self.last_end)
        }
    }

    pub fn at_end(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    pub fn skip_semicolons(&mut self) {
        while matches!(self.current(), Token::Semicolon) {
            self.step();
        }
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(self.current())
    }

    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        let program = Program::parse(self, None);

        if let Some(error) = self.lex_errors.first() {
            return parse_error(
                ParseErrorType::LexError { error: *error },
                error.location
            );
        }

        Ok(Parsed {
            program: program?,
            comments: std::mem::take(&mut self.comments)
        })
    }

    pub fn expect_one(&mut self, token: Token) -> Result<(u32, u32), ParseError> {
        match &self.current_token {
            Some((start, tok, end)) if *tok == token => {
                let span = (*start, *end);
                self.step();

                Ok(span)
            },
            Some((start, Token::Eof, end)) => parse_error(
                ParseErrorType::UnexpectedEof,
                SrcSpan { start: *start, end: *end }
            ),
            Some((start, tok, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token: tok.clone(),
                    expected: vec![format!("`{}`", token.as_literal())],
                },
                SrcSpan { start: *start, end: *end }
            ),
            None => parse_error(ParseErrorType::UnexpectedEof, self.current_span())
        }
    }

    pub fn expect_ident(&mut self) -> Result<(u32, String, u32), ParseError> {
        if let Some((_, Token::Ident(_), _)) = &self.current_token {
            if let Some((start, Token::Ident(value), end)) = self.next_token() {
                return Ok((start, value, end));
            }
        }

        match self.current() {
            Token::Eof => parse_error(ParseErrorType::UnexpectedEof, self.current_span()),
            _ => parse_error(ParseErrorType::ExpectedIdent, self.current_span())
        }
    }
}

/// Binding power of a token when it appears in infix position. Higher binds
/// tighter; `None` never continues an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(i8)]
pub enum Precedence {
    None = -1,
    Group = 0,
    Conversion = 5,
    Comparison = 10,
    Modulo = 15,
    Sum = 20,
    Product = 30,
    Power = 40,
}

impl Precedence {
    pub fn binding_power(self) -> i8 {
        self as i8
    }
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::In | Token::Arrow => Self::Conversion,
            token if token.is_comparison() => Self::Comparison,
            Token::Mod => Self::Modulo,
            Token::Plus | Token::Minus => Self::Sum,
            Token::Mult | Token::Div => Self::Product,
            Token::Pow => Self::Power,
            Token::LParen => Self::Group,
            _ => Self::None,
        }
    }
}

pub fn parse_module(src: &str) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    parser.parse()
}

pub fn parse_module_from_stream(stream: impl Iterator<Item = char>) -> Result<Parsed, ParseError> {
    let lexer = Lexer::new(stream
        .scan(0, |pos, c| {
            *pos += c.len_utf8() as u32;
            Some((*pos - c.len_utf8() as u32, c))
        })
    );
    let mut parser = Parser::new(lexer);

    parser.parse()
}

/// Parses an already lexed token sequence, as produced by [`tokenize`].
pub fn parse_tokens(tokens: Vec<Spanned>) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(tokens.into_iter().map(Ok));

    parser.parse()
}

pub fn parse_source(src: &str) -> Result<Parsed, ParseError> {
    match tokenize(src) {
        Ok(tokens) => parse_tokens(tokens),
        Err(error) => parse_error(ParseErrorType::LexError { error }, error.location)
    }
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
