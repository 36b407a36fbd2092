pub mod builtins;
pub mod call;
pub mod error;
pub mod operators;
pub mod resolve;

pub mod prelude {
    pub use super::{
        builtins::*,
        error::*,
        resolve::*,
        EvalConfig,
        EvalResult,
        Evaluator,
    };
}

#[cfg(test)]
mod tests;

use std::rc::Rc;

use log::{debug, trace};

use crate::{
    elements::prelude::lookup,
    environment::prelude::{Environment, Value, NIL},
    parser::prelude::{Node, Program},
    units::prelude::UnitRegistry,
    utils::prelude::{OutputIO, Warning, WarningEmitter, WarningEmitterIO},
};

use self::{builtins::BUILTIN_NAMES, error::{EvalError, EvalErrorType}};

pub type EvalResult = Result<Value, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalConfig {
    /// Substitute the closest bound variable for an unknown identifier.
    pub fuzzy_resolution: bool,
    /// Deepest allowed nesting of user function calls.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            fuzzy_resolution: true,
            max_call_depth: 256,
        }
    }
}

/// Tree-walking evaluator.
///
/// Holds only what stays fixed between runs: configuration, the unit
/// registry and the side channels. All mutable state lives in the
/// [`Environment`] passed to [`Evaluator::eval`].
pub struct Evaluator {
    pub config: EvalConfig,
    units: Rc<UnitRegistry>,
    output: Rc<dyn OutputIO>,
    warnings: WarningEmitter,
}

impl Evaluator {
    pub fn new(
        units: Rc<UnitRegistry>,
        output: Rc<dyn OutputIO>,
        warnings: Rc<dyn WarningEmitterIO>
    ) -> Self {
        Self {
            config: EvalConfig::default(),
            units,
            output,
            warnings: WarningEmitter::new(warnings),
        }
    }

    pub fn with_config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    pub fn output(&self) -> &dyn OutputIO {
        self.output.as_ref()
    }

    pub fn warnings(&self) -> &WarningEmitter {
        &self.warnings
    }

    /// Evaluates every statement in order. The first failure aborts the rest.
    pub fn eval_program(&self, program: &Program, env: &mut Environment) -> Result<Vec<Value>, EvalError> {
        let mut values = Vec::with_capacity(program.statements.len());

        for statement in &program.statements {
            trace!("evaluating `{statement}`");
            values.push(self.eval(statement, env)?);
        }

        Ok(values)
    }

    pub fn eval(&self, node: &Node, env: &mut Environment) -> EvalResult {
        match node {
            Node::Program(program) => Ok(Value::List {
                values: self.eval_program(program, env)?
            }),
            Node::IntLiteral(value) => Ok(Value::Integer { value: *value }),
            Node::FloatLiteral(value) => Ok(Value::Float { value: *value }),
            Node::StringLiteral(value) => Ok(Value::String { value: value.clone() }),
            Node::Identifier(name) => self.resolve_identifier(name, env),
            Node::UnitAnnotation { value, unit } => {
                let value = self.eval(value, env)?;

                match value.magnitude() {
                    Some(magnitude) => Ok(Value::Unit { value: magnitude, unit: unit.clone() }),
                    None => Err(EvalErrorType::NotANumber { found: value.value_type() }.into()),
                }
            },
            Node::UnaryOp { operator, operand } => {
                let operand = self.eval(operand, env)?;

                self.eval_unary(*operator, operand)
            },
            Node::BinaryOp { left, operator, right } => self.eval_binary(left, *operator, right, env),
            Node::FunctionCall { name, arguments } => self.eval_call(name, arguments, env),
            Node::Array(elements) => {
                let values = elements.iter()
                    .map(|element| self.eval(element, env))
                    .collect::<Result<Vec<Value>, EvalError>>()?;

                Ok(Value::List { values })
            },
            Node::Assign { name, value } => {
                let value = self.eval(value, env)?;

                if env.constant(name).is_some() || lookup(name).is_some() {
                    self.warnings.emit(Warning::ShadowedAssignment { name: name.clone() });
                }

                debug!("{name} = {value}");
                env.set(name.clone(), value);

                Ok(NIL)
            },
            Node::FunctionDef(definition) => {
                debug!("defining `{}({})`", definition.name, definition.parameters.join(", "));

                if BUILTIN_NAMES.contains(&definition.name.as_str()) {
                    self.warnings.emit(Warning::ShadowedBuiltin { name: definition.name.clone() });
                }

                env.define_function(Rc::clone(definition));

                Ok(NIL)
            },
        }
    }
}
