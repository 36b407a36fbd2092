use std::{io::Write, path::PathBuf};

use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel, Severity},
    files::SimpleFiles,
    term::{self, Config},
};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use super::src_span::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    fn severity(self) -> Severity {
        match self {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        }
    }

    fn heading(self) -> (&'static str, Color) {
        match self {
            Level::Error => ("error", Color::Red),
            Level::Warning => ("warning", Color::Yellow),
        }
    }
}

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan,
}

impl Label {
    /// Primary codespan label. The span is clamped to the source so that a
    /// position reported past the last character still renders.
    fn to_codespan_label(&self, file_id: usize, src_len: usize) -> CodespanLabel<usize> {
        let range = self.span.to_range();
        let start = range.start.min(src_len);
        let end = range.end.clamp(start, src_len);

        let label = CodespanLabel::primary(file_id, start..end);

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

/// Where in which source a diagnostic points.
pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    /// Trailing lines such as the functions an error passed through.
    pub notes: Vec<String>,
    pub level: Level,
    pub location: Option<Location<'a>>,
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) {
        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_plain(buf),
        }
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) {
        let mut files = SimpleFiles::new();
        let file_id = files.add(location.path.to_string_lossy(), location.src);

        let diagnostic = CodespanDiagnostic::new(self.level.severity())
            .with_message(&self.title)
            .with_labels(vec![location.label.to_codespan_label(file_id, location.src.len())])
            .with_notes(self.notes.clone());

        term::emit(buf, &Config::default(), &files, &diagnostic)
            .expect("write_diagnostic");

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text).expect("text write");
        }
    }

    fn write_plain(&self, buf: &mut Buffer) {
        let (kind, colour) = self.level.heading();

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))
            .expect("write_title_color");
        write!(buf, "{kind}").expect("write_title_kind");

        buf.set_color(ColorSpec::new().set_bold(true))
            .expect("write_title_color");
        writeln!(buf, ": {}", self.title).expect("write_title_title");

        buf.set_color(&ColorSpec::new())
            .expect("write_title_reset");

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text).expect("text write");
        }

        for note in &self.notes {
            writeln!(buf, "  = {note}").expect("note write");
        }
    }
}
