mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{path::PathBuf, process::ExitCode, rc::Rc};

use clap::{Parser, Subcommand};
use cli::{init_logger, print_finished, print_running};
use numlang_core::{
    environment::prelude::Value,
    eval::prelude::EvalConfig,
    interpreter::{parse_file, Interpreter},
    utils::prelude::{Error, NullOutputIO, OutputIO, StdoutOutputIO, Warning, WarningEmitterIO},
};

#[derive(Parser)]
#[command(version, about = "Numeric expression language with units")]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Report unknown variables instead of substituting the closest name
    #[arg(long, global = true, default_value_t = false)]
    strict: bool,
    /// Maximum depth of nested user function calls
    #[arg(long, global = true, value_name = "DEPTH", default_value_t = 256)]
    max_depth: usize,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluates a source file and prints every non-nil result
    Run {
        /// Path of source file
        path: PathBuf,
        /// Do not print results or `print` output
        #[arg(short, long, default_value_t = false)]
        no_output: bool,
        /// Print ast instead of evaluating
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Evaluates a single expression given on the command line
    Eval {
        /// Source text to evaluate
        expression: String,
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl {
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = EvalConfig {
        fuzzy_resolution: !cli.strict,
        max_call_depth: cli.max_depth,
    };

    match cli.command {
        Command::Run { path, no_output, print_ast } => {
            print_running(&path.display().to_string());
            let start = std::time::Instant::now();

            let mut warnings = 0;

            let result = if print_ast {
                parse_file(path).map(|(_, parsed)| println!("{:#?}", parsed.program))
            } else {
                let output: Rc<dyn OutputIO> = match no_output {
                    true => Rc::new(NullOutputIO),
                    false => Rc::new(StdoutOutputIO),
                };

                interpreter(config, output).and_then(|mut interpreter| {
                    let result = interpreter.run_file(path);
                    warnings = interpreter.evaluator().warnings().count();

                    result.map(|values| if !no_output { print_values(&values) })
                })
            };

            print_finished(std::time::Instant::now() - start, warnings);

            report(result)
        },
        Command::Eval { expression } => {
            let result = interpreter(config, Rc::new(StdoutOutputIO))
                .and_then(|mut interpreter| interpreter.run_source(PathBuf::from("eval"), &expression))
                .map(|values| print_values(&values));

            report(result)
        },
        Command::Repl => match interpreter(config, Rc::new(StdoutOutputIO)) {
            Ok(interpreter) => exit_code(repl::start(interpreter)),
            Err(err) => report(Err(err)),
        },
        Command::Rlpl => exit_code(rlpl::start()),
        Command::Rppl { print_ast } => exit_code(rppl::start(print_ast)),
    }
}

fn interpreter(config: EvalConfig, output: Rc<dyn OutputIO>) -> Result<Interpreter, Error> {
    Interpreter::standard(config, output, Rc::new(ConsoleWarningEmitter))
}

fn print_values(values: &[Value]) {
    for value in values.iter().filter(|value| !value.is_nil()) {
        println!("{value}");
    }
}

pub(crate) fn print_error(err: &Error) {
    let buf_writer = cli::stderr_buffer_writer();
    let mut buf = buf_writer.buffer();

    err.pretty(&mut buf);
    buf_writer
        .print(&buf)
        .expect("Writing error to stderr");
}

fn report(result: Result<(), Error>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(result: std::io::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(Err(Error::StdIo { err: err.kind() })),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
