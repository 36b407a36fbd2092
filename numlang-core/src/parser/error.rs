use crate::{lexer::prelude::{LexicalError, Token}, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedIdent,
    ExpectedArrow,
    ExpectedParameter,
    UnexpectedEof,
    UnexpectedToken {
        token: Token,
        expected: Vec<String>,
    },
    UnsupportedPrefix {
        token: Token,
    },
    UnsupportedOperator {
        token: Token,
    },
    UnclosedGroup,
    UnclosedList {
        terminator: Token,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

fn describe(token: &Token) -> String {
    match token {
        Token::Int(_) => "an Int".to_string(),
        Token::Float(_) => "a Float".to_string(),
        Token::Str(_) => "a String".to_string(),
        Token::Ident(name) => format!("the identifier `{name}`"),
        Token::Eof => "the end of input".to_string(),
        _ if token.is_reserved_word() => format!("the keyword `{}`", token.as_literal()),
        _ => format!("`{}`", token.as_literal())
    }
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedIdent => ("Expected identifier", vec![]),
            ParseErrorType::ExpectedArrow => (
                "Expected `=>` while parsing function definition",
                vec!["A function definition reads `define name(a, b) => body`".to_string()]
            ),
            ParseErrorType::ExpectedParameter => (
                "Function parameters must be identifiers",
                vec![]
            ),
            ParseErrorType::UnexpectedToken { token, expected } => {
                let found = describe(token);

                let messages = std::iter::once(format!("Found {found}, expected one of: "))
                    .chain(expected.iter().map(|s| format!("- {s}")))
                    .collect();

                ("Not expected this", messages)
            },
            ParseErrorType::UnsupportedPrefix { token } => (
                "Unsupported prefix",
                vec![format!("{} cannot start an expression", describe(token))]
            ),
            ParseErrorType::UnsupportedOperator { token } => (
                "Unsupported operator",
                vec![format!("{} is not a binary operator", describe(token))]
            ),
            ParseErrorType::UnclosedGroup => ("Unclosed parenthesis", vec![]),
            ParseErrorType::UnclosedList { terminator } => (
                "Unclosed argument list",
                vec![format!("Expected `{}` before the end of the statement", terminator.as_literal())]
            ),
            ParseErrorType::UnexpectedEof => ("Unexpected end of file", vec![]),
            ParseErrorType::LexError { error } => error.details()
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (message, extra) = self.details();
        let kind = match self.error {
            ParseErrorType::LexError { .. } => "LexError",
            _ => "SyntaxError",
        };

        write!(f, "{kind}: {message}")?;

        if !extra.is_empty() {
            write!(f, " ({})", extra.join("; "))?;
        }

        Ok(())
    }
}
