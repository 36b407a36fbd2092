use super::prelude::{tokenize, Lexer, LexicalError, LexicalErrorType, Token};

fn kinds(input: &str) -> Result<Vec<Token>, LexicalError> {
    Ok(tokenize(input)?
        .into_iter()
        .map(|(_, token, _)| token)
        .collect())
}

#[test]
fn test_numbers() -> Result<(), LexicalError> {
    let tokens = kinds("10 1.5 .25 6.02e23 1e-3 2E+2")?;

    assert_eq!(tokens, vec![
        Token::Int(10),
        Token::Float(1.5),
        Token::Float(0.25),
        Token::Float(6.02e23),
        Token::Float(0.001),
        Token::Float(200.0),
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_number_followed_by_unit() -> Result<(), LexicalError> {
    assert_eq!(kinds("3e")?, vec![Token::Int(3), Token::Ident("e".into()), Token::Eof]);
    assert_eq!(kinds("5kg")?, vec![Token::Int(5), Token::Ident("kg".into()), Token::Eof]);
    assert_eq!(
        kinds("3e+x")?,
        vec![Token::Int(3), Token::Ident("e".into()), Token::Plus, Token::Ident("x".into()), Token::Eof]
    );
    assert_eq!(
        kinds("2E-")?,
        vec![Token::Int(2), Token::Ident("E".into()), Token::Minus, Token::Eof]
    );
    assert_eq!(
        kinds("2.5 meter")?,
        vec![Token::Float(2.5), Token::Ident("meter".into()), Token::Eof]
    );

    Ok(())
}

#[test]
fn test_operators() -> Result<(), LexicalError> {
    let tokens = kinds("= == != < <= > >= + - / * ^ % ! ~ => ( ) [ ] { } ; ,")?;

    assert_eq!(tokens, vec![
        Token::Assign,
        Token::Equal,
        Token::NotEqual,
        Token::LessThan,
        Token::LessThanOrEqual,
        Token::GreaterThan,
        Token::GreaterThanOrEqual,
        Token::Plus,
        Token::Minus,
        Token::Div,
        Token::Mult,
        Token::Pow,
        Token::Mod,
        Token::Bang,
        Token::Tilda,
        Token::Arrow,
        Token::LParen,
        Token::RParen,
        Token::LSBracket,
        Token::RSBracket,
        Token::LBrace,
        Token::RBrace,
        Token::Semicolon,
        Token::Comma,
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_keywords() -> Result<(), LexicalError> {
    let tokens = kinds("define in per inch defined")?;

    assert_eq!(tokens, vec![
        Token::Define,
        Token::In,
        Token::Div,
        Token::Ident("inch".into()),
        Token::Ident("defined".into()),
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_strings_and_comments() -> Result<(), LexicalError> {
    let tokens = kinds("'Fe' # iron\n\"a\\\"b\" _x1")?;

    assert_eq!(tokens, vec![
        Token::Str("Fe".into()),
        Token::Str("a\"b".into()),
        Token::Ident("_x1".into()),
        Token::Eof,
    ]);

    Ok(())
}

#[test]
fn test_spans() -> Result<(), LexicalError> {
    let tokens = tokenize("x = 10 meter")?;

    assert_eq!(tokens, vec![
        (0, Token::Ident("x".into()), 1),
        (2, Token::Assign, 3),
        (4, Token::Int(10), 6),
        (7, Token::Ident("meter".into()), 12),
        (12, Token::Eof, 12),
    ]);

    Ok(())
}

#[test]
fn test_single_eof() {
    let lexer = Lexer::new("1 + 2".char_indices().map(|(i, c)| (i as u32, c)));
    let tokens = lexer.collect::<Vec<_>>();

    assert_eq!(tokens.len(), 4);
    assert!(matches!(tokens.last(), Some(Ok((_, Token::Eof, _)))));

    assert_eq!(kinds("").unwrap(), vec![Token::Eof]);
}

#[test]
fn test_invalid_input() {
    let fails = vec![
        ("1 $ 2", LexicalErrorType::UnrecognizedToken { tok: '$' }),
        ("1.", LexicalErrorType::MissingDigitAfterPeriod),
        ("99999999999999999999", LexicalErrorType::NumberTooLarge),
        ("\"open", LexicalErrorType::MissingStringEnd),
        ("'\\q'", LexicalErrorType::UnknownEscape { ch: 'q' }),
    ];

    for (input, expected) in fails {
        match tokenize(input) {
            Ok(tokens) => panic!("`{input}` lexed to {tokens:?}"),
            Err(err) => assert_eq!(err.error, expected, "input `{input}`"),
        }
    }
}

#[test]
fn test_unrecognized_location() {
    let err = tokenize("ab @").unwrap_err();

    assert_eq!(err.location.start, 3);
    assert_eq!(err.location.end, 4);
}

#[test]
fn test_empty_identifier_lookup() {
    assert_eq!(
        super::lexer::lookup_identifier(String::new()),
        Err(LexicalErrorType::EmptyIdentifier)
    );
    assert_eq!(super::lexer::lookup_identifier("per".into()), Ok(Token::Div));
}
