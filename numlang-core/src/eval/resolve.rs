use log::trace;

use crate::{
    elements::prelude::lookup,
    environment::prelude::{round_to_precision, Environment, Value},
    utils::prelude::Warning,
};

use super::{error::EvalErrorType, EvalResult, Evaluator};

impl Evaluator {
    /// Resolves an identifier against, in order: constants, elements, bound
    /// variables and, when enabled, the closest bound variable name.
    pub fn resolve_identifier(&self, name: &str, env: &Environment) -> EvalResult {
        if let Some(value) = env.constant(name) {
            trace!("`{name}` is a constant");
            return Ok(value.clone());
        }

        if let Some(element) = lookup(name) {
            trace!("`{name}` is the element {}", element.symbol);
            return Ok(Value::Float { value: round_to_precision(element.atomic_mass) });
        }

        if let Some(value) = env.get(name) {
            return Ok(value.clone());
        }

        let closest = match self.config.fuzzy_resolution {
            true => closest_variable(name, env.variables.keys().map(String::as_str)),
            false => None
        };

        match closest.and_then(|closest| Some((closest, env.get(closest)?))) {
            Some((closest, value)) => {
                trace!("`{name}` resolved to `{closest}`");

                self.warnings().emit(Warning::FuzzySubstitution {
                    requested: name.to_string(),
                    substituted: closest.to_string(),
                });

                Ok(value.clone())
            },
            None => Err(EvalErrorType::UndefinedVariable { name: name.to_string() }.into()),
        }
    }
}

/// Scores how close `candidate` is to `requested`, in `[0, 1]`: half from the
/// share of `requested` covered by the common prefix, half from normalized
/// Levenshtein similarity.
pub fn similarity(requested: &str, candidate: &str) -> f64 {
    let length = requested.chars().count();

    let prefix = match length {
        0 => 0.0,
        _ => {
            let common = requested.chars()
                .zip(candidate.chars())
                .take_while(|(a, b)| a == b)
                .count();

            common as f64 / length as f64
        }
    };

    prefix * 0.5 + strsim::normalized_levenshtein(requested, candidate) * 0.5
}

/// Highest scoring candidate; ties keep the earliest one. `None` only when
/// there are no candidates.
pub fn closest_variable<'a>(
    requested: &str,
    candidates: impl Iterator<Item = &'a str>
) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;

    for candidate in candidates {
        let score = similarity(requested, candidate);

        match best {
            Some((_, best_score)) if score <= best_score => {},
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(candidate, _)| candidate)
}
