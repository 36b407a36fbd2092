use std::{path::PathBuf, rc::Rc};

use log::{debug, info};
use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Value},
    eval::prelude::{EvalConfig, Evaluator},
    parser::prelude::{parse_module, parse_module_from_stream, Parsed},
    units::prelude::UnitRegistry,
    utils::prelude::{Error, OutputIO, WarningEmitterIO},
};

/// An evaluator paired with the environment it keeps between runs.
pub struct Interpreter {
    evaluator: Evaluator,
    env: Environment,
}

impl Interpreter {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            env: Environment::new(),
        }
    }

    /// Interpreter over the standard unit registry.
    pub fn standard(
        config: EvalConfig,
        output: Rc<dyn OutputIO>,
        warnings: Rc<dyn WarningEmitterIO>
    ) -> Result<Self, Error> {
        let units = UnitRegistry::standard()
            .map_err(|error| Error::Units { error })?;

        let evaluator = Evaluator::new(Rc::new(units), output, warnings)
            .with_config(config);

        Ok(Self::new(evaluator))
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Parses and evaluates `src`. Definitions and assignments stay in the
    /// environment for later runs.
    pub fn run_source(&mut self, path: PathBuf, src: &str) -> Result<Vec<Value>, Error> {
        let parsed = parse_module(src)
            .map_err(|error| Error::Parse { path: path.clone(), src: src.to_string(), error })?;

        self.run_parsed(path, src.to_string(), parsed)
    }

    pub fn run_file(&mut self, path: PathBuf) -> Result<Vec<Value>, Error> {
        let (src, parsed) = parse_file(path.clone())?;

        self.run_parsed(path, src, parsed)
    }

    fn run_parsed(&mut self, path: PathBuf, src: String, parsed: Parsed) -> Result<Vec<Value>, Error> {
        debug!(
            "{} statement(s), {} comment(s) in {}",
            parsed.program.statements.len(),
            parsed.comments.len(),
            path.display()
        );

        let values = self.evaluator.eval_program(&parsed.program, &mut self.env)
            .map_err(|error| Error::Eval { path: path.clone(), src, error })?;

        info!("evaluated {}", path.display());

        Ok(values)
    }
}

/// Parses a file while reading it as a character stream. Returns the source
/// text alongside the parsed program for diagnostics.
pub fn parse_file(path: PathBuf) -> Result<(String, Parsed), Error> {
    let file = std::fs::File::open(&path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut io_error = None;
    let mut reader = std::io::BufReader::new(file);

    let stream = reader.chars()
        .map_while(|c| match c {
            Ok(c) => {
                src.push(c);
                Some(c)
            },
            Err(err) => {
                io_error = Some(err.kind());
                None
            }
        });

    let parsed = parse_module_from_stream(stream);

    if let Some(err) = io_error {
        return Err(Error::StdIo { err });
    }

    match parsed {
        Ok(parsed) => Ok((src, parsed)),
        Err(error) => Err(Error::Parse { path, src, error }),
    }
}

#[cfg(test)]
mod tests;
