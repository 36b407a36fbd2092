use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    EmptyIdentifier,
    MissingDigitAfterPeriod,
    NumberTooLarge,
    MissingStringEnd,
    UnknownEscape { ch: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("I don't know what to do with this character", vec![format!("Found `{tok}`")])
            },
            LexicalErrorType::EmptyIdentifier => {
                ("Identifier must not be empty", vec![])
            },
            LexicalErrorType::MissingDigitAfterPeriod => {
                ("Missing digits after the decimal point", vec![])
            },
            LexicalErrorType::NumberTooLarge => {
                ("Integer literal does not fit in 64 bits", vec![])
            },
            LexicalErrorType::MissingStringEnd => {
                ("Missing closing quote of the string literal", vec![])
            },
            LexicalErrorType::UnknownEscape { ch } => {
                ("Unknown escape sequence", vec![format!("Found `\\{ch}`")])
            }
        }
    }
}
