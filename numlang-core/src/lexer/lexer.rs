use super::error::{LexicalError, LexicalErrorType};
use super::token::Token;
use std::{fmt::Display, iter::Peekable};
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"in" => Token::In,
		"define" => Token::Define,
		"per" => Token::Div,
		_ => return None
	})
}

pub fn lookup_identifier(word: String) -> Result<Token, LexicalErrorType> {
	if word.is_empty() {
		return Err(LexicalErrorType::EmptyIdentifier);
	}

	Ok(str_to_keyword(&word).unwrap_or(Token::Ident(word)))
}

/// Lexes the whole source eagerly. The returned sequence always ends with a
/// single `Token::Eof`; comments are dropped.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)))
		.filter(|res| !matches!(res, Ok((_, Token::Comment, _))))
		.collect()
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: Peekable<T>,
	finished: bool,
}

impl<T: Iterator<Item = (u32, char)>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tnext_position: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.next_position, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input: input.peekable(),
			finished: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> LexResult {
		let span = match self.ch {
			Some(ch) => match ch {
				'#' => return Ok(self.lex_comment()),
				'"' | '\'' => return self.lex_string(ch),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'[' => self.eat_one_char(Token::LSBracket),
				']' => self.eat_one_char(Token::RSBracket),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				';' => self.eat_one_char(Token::Semicolon),
				',' => self.eat_one_char(Token::Comma),
				'~' => self.eat_one_char(Token::Tilda),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_char(Token::Mult),
				'/' => self.eat_one_char(Token::Div),
				'^' => self.eat_one_char(Token::Pow),
				'%' => self.eat_one_char(Token::Mod),
				'=' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::Equal),
					Some('>') => self.eat_two_chars(Token::Arrow),
					_ => self.eat_one_char(Token::Assign),
				},
				'!' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::NotEqual),
					_ => self.eat_one_char(Token::Bang),
				},
				'<' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::LessThanOrEqual),
					_ => self.eat_one_char(Token::LessThan),
				},
				'>' => match self.next_ch {
					Some('=') => self.eat_two_chars(Token::GreaterThanOrEqual),
					_ => self.eat_one_char(Token::GreaterThan),
				},
				'a'..='z' | 'A'..='Z' | '_' => {
					return self.lex_ident();
				},
				'0'..='9' => {
					return self.lex_number();
				},
				'.' if self.next_ch.is_some_and(|c| c.is_ascii_digit()) => {
					return self.lex_number();
				},
				c if c.is_whitespace() => {
					let _ = self.next_char();

					return self.next_token()
				}
				c => {
					let location = self.position;
					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedToken { tok: c },
						location: SrcSpan {
							start: location,
							end: location + c.len_utf8() as u32,
						},
					});
				}
			},
			None => {
				let position = self.position;

				(position, Token::Eof, position)
			}
		};

		Ok(span)
    }

	/// The character after `next_ch`.
	fn peek_char(&mut self) -> Option<char> {
		self.input.peek().map(|(_, c)| *c)
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(1, |c| c.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn eat_two_chars(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> LexResult {
        let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch {
			if !(ch.is_ascii_alphanumeric() || ch == '_') {
				break;
			}

			ident.push(ch);
			self.next_char();
		}

        let end_pos = self.position;

		match lookup_identifier(ident) {
			Ok(token) => Ok((start_pos, token, end_pos)),
			Err(error) => Err(LexicalError {
				error,
				location: SrcSpan::from(start_pos, end_pos)
			})
		}
	}

	fn eat_digits(&mut self, value: &mut String) {
		while let Some(ch) = self.ch {
			if !ch.is_ascii_digit() {
				break;
			}

			value.push(ch);
			self.next_char();
		}
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();
		let mut is_float = false;

		self.eat_digits(&mut value);

		if self.ch == Some('.') {
			is_float = true;
			value.push('.');
			self.next_char();

			if !self.ch.is_some_and(|c| c.is_ascii_digit()) {
				return Err(LexicalError {
					error: LexicalErrorType::MissingDigitAfterPeriod,
					location: SrcSpan::from(start_pos, self.position)
				});
			}

			self.eat_digits(&mut value);
		}

		// `3e` is the number 3 annotated with the unit `e`, `3e5` and `3e-5` are
		// exponents, `3e+x` is `3 e + x`
		if matches!(self.ch, Some('e' | 'E')) {
			let digit_after_sign = self.peek_char().is_some_and(|c| c.is_ascii_digit());

			let exponent = match self.next_ch {
				Some(c) if c.is_ascii_digit() => Some(None),
				Some(sign @ ('+' | '-')) if digit_after_sign => Some(Some(sign)),
				_ => None,
			};

			if let Some(sign) = exponent {
				is_float = true;
				value.push('e');
				self.next_char();

				if let Some(sign) = sign {
					value.push(sign);
					self.next_char();
				}

				self.eat_digits(&mut value);
			}
		}

		let end_pos = self.position;

		let token = if is_float {
			match value.parse::<f64>() {
				Ok(value) => Token::Float(value),
				Err(_) => return Err(LexicalError {
					error: LexicalErrorType::MissingDigitAfterPeriod,
					location: SrcSpan::from(start_pos, end_pos)
				})
			}
		} else {
			match value.parse::<i64>() {
				Ok(value) => Token::Int(value),
				Err(_) => return Err(LexicalError {
					error: LexicalErrorType::NumberTooLarge,
					location: SrcSpan::from(start_pos, end_pos)
				})
			}
		};

		Ok((start_pos, token, end_pos))
	}

	fn lex_string(&mut self, quote: char) -> LexResult {
		let start_pos = self.position;
		let mut value = String::new();

		self.next_char(); // открывающая кавычка

		loop {
			match self.next_char() {
				Some(ch) if ch == quote => break,
				Some('\\') => {
					let escape_pos = self.position;

					match self.next_char() {
						Some('n') => value.push('\n'),
						Some('t') => value.push('\t'),
						Some(ch @ ('\\' | '"' | '\'')) => value.push(ch),
						Some(ch) => return Err(LexicalError {
							error: LexicalErrorType::UnknownEscape { ch },
							location: SrcSpan::from(escape_pos - 1, self.position)
						}),
						None => return Err(LexicalError {
							error: LexicalErrorType::MissingStringEnd,
							location: SrcSpan::from(start_pos, self.position)
						})
					}
				},
				Some(ch) => value.push(ch),
				None => return Err(LexicalError {
					error: LexicalErrorType::MissingStringEnd,
					location: SrcSpan::from(start_pos, self.position)
				})
			}
		}

		let end_pos = self.position;

		Ok((start_pos, Token::Str(value), end_pos))
	}

	fn lex_comment(&mut self) -> Spanned {
		let start_pos = self.position;

		while !matches!(self.ch, None | Some('\n')) {
			self.next_char();
		}

		let end_pos = self.position;

		(start_pos, Token::Comment, end_pos)
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if matches!(token, Ok((_, Token::Eof, _)) | Err(_)) {
			self.finished = true;
		}

		Some(token)
	}
}
