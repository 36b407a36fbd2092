use std::{io::Write, path::PathBuf};

use log::{debug, warn};
use numlang_core::interpreter::Interpreter;

use crate::print_error;

const PROMPT: &str = ">> ";

/// Read Eval Print Loop. Variables and functions survive between lines.
/// `.vars` lists bound variables, `.units` the known units.
pub fn start(mut interpreter: Interpreter) -> std::io::Result<()> {
	if let Err(err) = ctrlc::set_handler(|| {
		println!();
		std::process::exit(0);
	}) {
		warn!("unable to install interrupt handler: {err}");
	}

	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.trim() {
			"" => {},
			".exit" => return Ok(()),
			".vars" => {
				for (name, value) in &interpreter.env().variables {
					println!("{name} = {value}");
				}
			},
			".units" => {
				for unit in interpreter.evaluator().units().units() {
					println!("{: <10} {: <18} {}", unit.quantity.to_string(), unit.name, unit.aliases.join(", "));
				}
			},
			_ => match interpreter.run_source(PathBuf::from("repl"), &input) {
				Ok(values) => {
					debug!("{} value(s)", values.len());

					for value in values.iter().filter(|value| !value.is_nil()) {
						println!("{value}");
					}
				},
				Err(err) => print_error(&err),
			}
		}
	}
}
