use std::{fmt::Display, rc::Rc};

use crate::{
    lexer::prelude::{LexResult, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

#[derive(Debug)]
pub struct Parsed {
    pub program: Program,
    pub comments: Vec<SrcSpan>,
}

// program -> { <statement> [;] }
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Node>,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(parser: &mut Parser<T>, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let mut statements = vec![];

        loop {
            parser.skip_semicolons();

            if parser.at_end() {
                break;
            }

            statements.push(Node::parse_statement(parser)?);
        }

        Ok(Self { statements })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("; "))
    }
}

// define <identifier> [ "(" <identifier> {, <identifier>} ")" ] => <program>
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Program,
}

impl<T: Iterator<Item = LexResult>> Parse<T> for FunctionDef {
    fn parse(parser: &mut Parser<T>, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        parser.expect_one(Token::Define)?;

        let (_, name, _) = parser.expect_ident()?;

        let mut parameters = vec![];

        if matches!(parser.current(), Token::LParen) {
            let span = parser.current_span();

            for parameter in Node::parse_list(parser, Token::RParen)? {
                match parameter {
                    Node::Identifier(name) => parameters.push(name),
                    _ => return parse_error(ParseErrorType::ExpectedParameter, span)
                }
            }
        }

        if !matches!(parser.current(), Token::Arrow) {
            return parse_error(ParseErrorType::ExpectedArrow, parser.current_span());
        }

        parser.step();

        // the body runs to the end of input, there is no closing delimiter
        let body = Program::parse(parser, None)?;

        Ok(Self { name, parameters, body })
    }
}

impl Display for FunctionDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "define {}({}) => {}", self.name, self.parameters.join(", "), self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Not,
    Round,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
            Self::Round => write!(f, "~"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
}

impl TryFrom<&Token> for BinaryOperator {
    type Error = ();

    fn try_from(value: &Token) -> Result<Self, Self::Error> {
        Ok(match value {
            Token::Plus => Self::Add,
            Token::Minus => Self::Sub,
            Token::Mult => Self::Mul,
            Token::Div => Self::Div,
            Token::Pow => Self::Pow,
            Token::Mod => Self::Mod,
            Token::Equal => Self::Equal,
            Token::NotEqual => Self::NotEqual,
            Token::LessThan => Self::LessThan,
            Token::LessThanOrEqual => Self::LessThanOrEqual,
            Token::GreaterThan => Self::GreaterThan,
            Token::GreaterThanOrEqual => Self::GreaterThanOrEqual,
            Token::In | Token::Arrow => Self::In,
            _ => return Err(())
        })
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let literal = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Mod => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::In => "in",
        };

        write!(f, "{literal}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program(Program),
    Identifier(String),
    IntLiteral(i64),
    FloatLiteral(f64),
    StringLiteral(String),
    UnitAnnotation {
        value: Box<Node>,
        unit: String,
    },
    BinaryOp {
        left: Box<Node>,
        operator: BinaryOperator,
        right: Box<Node>,
    },
    UnaryOp {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
    FunctionCall {
        name: String,
        arguments: Vec<Node>,
    },
    Array(Vec<Node>),
    Assign {
        name: String,
        value: Box<Node>,
    },
    FunctionDef(Rc<FunctionDef>),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Program(_) => "Program",
            Self::Identifier(_) => "Identifier",
            Self::IntLiteral(_) => "IntLiteral",
            Self::FloatLiteral(_) => "FloatLiteral",
            Self::StringLiteral(_) => "StringLiteral",
            Self::UnitAnnotation { .. } => "UnitAnnotation",
            Self::BinaryOp { .. } => "BinaryOp",
            Self::UnaryOp { .. } => "UnaryOp",
            Self::FunctionCall { .. } => "FunctionCall",
            Self::Array(_) => "Array",
            Self::Assign { .. } => "Assign",
            Self::FunctionDef(_) => "FunctionDef",
        }
    }

    // statement -> <assignment> | <function_definition> | <expression>
    pub fn parse_statement<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        match (parser.current(), parser.peek()) {
            (Token::Ident(_), Token::Assign) => {
                let (_, name, _) = parser.expect_ident()?;
                parser.expect_one(Token::Assign)?;

                let value = Self::parse_expression(parser, Precedence::Group.binding_power())?;

                Ok(Self::Assign { name, value: Box::new(value) })
            },
            (Token::Define, _) => Ok(Self::FunctionDef(Rc::new(FunctionDef::parse(parser, None)?))),
            _ => <Self as Parse<T>>::parse(parser, None)
        }
    }

    pub fn parse_expression<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
        min_binding_power: i8
    ) -> Result<Self, ParseError> {
        let mut left = Self::parse_prefix(parser)?;

        // an operator directly followed by the end of the statement is left
        // for the next statement to reject
        while !matches!(parser.peek(), Token::Eof | Token::Semicolon)
            && parser.current_precedence().binding_power() >= min_binding_power
        {
            let precedence = parser.current_precedence();

            left = <Self as InfixParse<T>>::parse(parser, left, precedence)?;
        }

        Ok(left)
    }

    fn parse_prefix<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let span = parser.current_span();

        let node = match parser.current() {
            Token::Tilda | Token::Bang | Token::Minus => {
                let operator = match parser.current() {
                    Token::Tilda => UnaryOperator::Round,
                    Token::Bang => UnaryOperator::Not,
                    _ => UnaryOperator::Negate,
                };
                parser.step();

                let operand = Self::parse_prefix(parser)?;

                Self::UnaryOp { operator, operand: Box::new(operand) }
            },
            Token::LParen => {
                parser.step();

                let expression = Self::parse_expression(parser, Precedence::Group.binding_power())?;

                if !matches!(parser.current(), Token::RParen) {
                    return parse_error(ParseErrorType::UnclosedGroup, span);
                }

                parser.step();

                Self::parse_unit(parser, expression)
            },
            Token::LSBracket => Self::Array(Self::parse_list(parser, Token::RSBracket)?),
            Token::Ident(name) => {
                let name = name.clone();
                parser.step();

                match parser.current() {
                    Token::LParen => Self::FunctionCall {
                        name,
                        arguments: Self::parse_list(parser, Token::RParen)?,
                    },
                    _ => Self::parse_unit(parser, Self::Identifier(name))
                }
            },
            Token::Int(value) => {
                let value = *value;
                parser.step();

                Self::parse_unit(parser, Self::IntLiteral(value))
            },
            Token::Float(value) => {
                let value = *value;
                parser.step();

                Self::parse_unit(parser, Self::FloatLiteral(value))
            },
            Token::Str(value) => {
                let value = value.clone();
                parser.step();

                Self::StringLiteral(value)
            },
            Token::Eof => return parse_error(ParseErrorType::UnexpectedEof, span),
            token => return parse_error(
                ParseErrorType::UnsupportedPrefix { token: token.clone() },
                span
            )
        };

        Ok(node)
    }

    /// Attaches an immediately following identifier as the unit of `value`.
    fn parse_unit<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>, value: Self) -> Self {
        let unit = match parser.current() {
            Token::Ident(unit) => unit.clone(),
            _ => return value
        };

        parser.step();

        Self::UnitAnnotation { value: Box::new(value), unit }
    }

    /// Parses `<opener> [<expression> {, <expression>}] <terminator>`, starting
    /// on the opening bracket.
    pub fn parse_list<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
        terminator: Token
    ) -> Result<Vec<Self>, ParseError> {
        let span = parser.current_span();
        let mut elements = vec![];

        parser.step();

        while *parser.current() != terminator {
            match parser.current() {
                Token::Eof | Token::Semicolon => return parse_error(
                    ParseErrorType::UnclosedList { terminator },
                    SrcSpan { start: span.start, end: parser.current_span().start }
                ),
                Token::Comma => parser.step(),
                _ => elements.push(Self::parse_expression(parser, Precedence::Group.binding_power())?)
            }
        }

        parser.step();

        Ok(elements)
    }
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Node {
    fn parse(parser: &mut Parser<T>, precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let min_binding_power = precedence.unwrap_or(Precedence::Group).binding_power();

        Self::parse_expression(parser, min_binding_power)
    }
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for Node {
    fn parse(
        parser: &mut Parser<T>,
        left: Self,
        precedence: Precedence
    ) -> Result<Self, ParseError> {
        let operator = match BinaryOperator::try_from(parser.current()) {
            Ok(operator) => operator,
            Err(()) => return parse_error(
                ParseErrorType::UnsupportedOperator { token: parser.current().clone() },
                parser.current_span()
            )
        };

        parser.step();

        let right = Self::parse_expression(parser, precedence.binding_power() + 1)?;

        Ok(Self::BinaryOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Program(program) => write!(f, "{program}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::IntLiteral(value) => write!(f, "{value}"),
            Self::FloatLiteral(value) => write!(f, "{value:?}"),
            Self::StringLiteral(value) => write!(f, "{value:?}"),
            Self::UnitAnnotation { value, unit } => write!(f, "{value} {unit}"),
            Self::BinaryOp { left, operator, right } => write!(f, "({left} {operator} {right})"),
            Self::UnaryOp { operator, operand } => write!(f, "{operator}{operand}"),
            Self::FunctionCall { name, arguments } => {
                let arguments = arguments.iter()
                    .map(|argument| format!("{argument}"))
                    .collect::<Vec<String>>();

                write!(f, "{name}({})", arguments.join(", "))
            },
            Self::Array(elements) => {
                let elements = elements.iter()
                    .map(|element| format!("{element}"))
                    .collect::<Vec<String>>();

                write!(f, "[{}]", elements.join(", "))
            },
            Self::Assign { name, value } => write!(f, "{name} = {value}"),
            Self::FunctionDef(definition) => write!(f, "{definition}"),
        }
    }
}
