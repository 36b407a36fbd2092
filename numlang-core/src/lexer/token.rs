#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // <буква>|_ {<буква>|<цифра>|_}
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    // # до конца строки
    Comment,

    // Ключевые слова
    In, // in
    Define, // define

    // Операции отношения
    Equal, // ==
    NotEqual, // !=
    LessThan, // <
    LessThanOrEqual, // <=
    GreaterThan, // >
    GreaterThanOrEqual, // >=

    // Арифметика
    Plus, // +
    Minus, // -
    Mult, // *
    Div, // / и per
    Pow, // ^
    Mod, // %

    // Унарные операции
    Bang, // !
    Tilda, // ~

    Assign, // =

    // Скобки
    LParen, // (
    RParen, // )
    LSBracket, // [
    RSBracket, // ]
    LBrace, // {
    RBrace, // }

    // Разделители
    Semicolon, // ;
    Comma, // ,
    Arrow, // =>

    Eof,
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(self, Token::In | Token::Define)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::Equal
            | Token::NotEqual
            | Token::LessThan
            | Token::LessThanOrEqual
            | Token::GreaterThan
            | Token::GreaterThanOrEqual
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => format!("{}", value),
            Token::Float(value) => format!("{}", value),
            Token::Str(value) => format!("\"{}\"", value),
            Token::Comment => "#".to_string(),

            Token::In => "in".to_string(),
            Token::Define => "define".to_string(),

            Token::Equal => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::LessThan => "<".to_string(),
            Token::LessThanOrEqual => "<=".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::GreaterThanOrEqual => ">=".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Mult => "*".to_string(),
            Token::Div => "/".to_string(),
            Token::Pow => "^".to_string(),
            Token::Mod => "%".to_string(),

            Token::Bang => "!".to_string(),
            Token::Tilda => "~".to_string(),
            Token::Assign => "=".to_string(),

            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LSBracket => "[".to_string(),
            Token::RSBracket => "]".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),

            Token::Semicolon => ";".to_string(),
            Token::Comma => ",".to_string(),
            Token::Arrow => "=>".to_string(),

            Token::Eof => "\0".to_string(),
        }
    }
}
