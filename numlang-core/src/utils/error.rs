use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::EvalError,
    parser::prelude::{ParseError, ParseErrorType},
    units::prelude::ConversionError,
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("evaluation failed")]
    Eval {
        path: PathBuf,
        src: String,
        error: EvalError
    },
    #[error("failed to set up unit conversions")]
    Units {
        error: ConversionError
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();
                let text = extra.join("\n");

                let adjusted_location = if matches!(
                    error.error,
                    ParseErrorType::UnexpectedEof | ParseErrorType::UnclosedGroup
                ) {
                    SrcSpan::point(src.len() as u32)
                } else {
                    error.span
                };

                let title = match error.error {
                    ParseErrorType::LexError { .. } => "Lexical error",
                    _ => "Syntax error",
                };

                vec![Diagnostic {
                    title: title.into(),
                    text,
                    notes: vec![],
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: adjusted_location,
                        },
                    }),
                }]
            },
            Error::Eval { error, .. } => {
                let (kind, trace) = error.details();

                vec![Diagnostic {
                    title: kind.into(),
                    text: error.message(),
                    notes: trace,
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::Units { error } => {
                vec![Diagnostic {
                    title: "Unit registry error".into(),
                    text: format!("{error}"),
                    notes: vec![],
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::StdIo { err, } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    notes: vec![],
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}
